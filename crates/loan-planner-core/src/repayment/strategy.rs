use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use super::loan::Loan;
use crate::error::LoanPlannerError;
use crate::types::Money;

/// Policy for distributing the budget left over after minimum payments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationStrategy {
    /// Highest interest rate first; ties go to the smaller balance.
    Avalanche,
    /// Lowest balance first; ties go to the higher rate.
    Snowball,
}

impl AllocationStrategy {
    pub const ALL: [AllocationStrategy; 2] =
        [AllocationStrategy::Avalanche, AllocationStrategy::Snowball];

    pub fn name(&self) -> &'static str {
        match self {
            AllocationStrategy::Avalanche => "avalanche",
            AllocationStrategy::Snowball => "snowball",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            AllocationStrategy::Avalanche => "Debt Avalanche (Highest Interest First)",
            AllocationStrategy::Snowball => "Debt Snowball (Lowest Balance First)",
        }
    }

    /// Order in which two loans should receive extra payment.
    pub fn priority(&self, a: &Loan, b: &Loan) -> Ordering {
        match self {
            AllocationStrategy::Avalanche => b
                .rate
                .cmp(&a.rate)
                .then_with(|| a.balance.cmp(&b.balance)),
            AllocationStrategy::Snowball => a
                .balance
                .cmp(&b.balance)
                .then_with(|| b.rate.cmp(&a.rate)),
        }
    }

    /// Spread `extra` over the loans that still carry a balance and return
    /// the amount actually applied.
    ///
    /// The payment order is re-derived on every call from current balances.
    /// Loans beyond the first one that absorbs the last of `extra` receive
    /// nothing. Exact ties on both keys keep the caller's slice order.
    pub fn allocate(&self, loans: &mut [Loan], extra: Money) -> Money {
        if extra <= Decimal::ZERO {
            return Decimal::ZERO;
        }

        let mut active: Vec<&mut Loan> = loans.iter_mut().filter(|l| !l.is_paid_off()).collect();
        active.sort_by(|a, b| self.priority(a, b));

        let mut remaining = extra;
        for loan in active {
            remaining -= loan.pay(remaining);
            if remaining <= Decimal::ZERO {
                break;
            }
        }

        extra - remaining
    }
}

impl fmt::Display for AllocationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AllocationStrategy {
    type Err = LoanPlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "avalanche" => Ok(AllocationStrategy::Avalanche),
            "snowball" => Ok(AllocationStrategy::Snowball),
            other => Err(LoanPlannerError::InvalidInput {
                field: "strategy".into(),
                reason: format!("Unknown strategy '{other}' (expected avalanche or snowball)"),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_loans() -> Vec<Loan> {
        vec![
            Loan::new("Card", dec!(5000), dec!(20), dec!(100)),
            Loan::new("Car", dec!(3000), dec!(5), dec!(60)),
            Loan::new("Store", dec!(400), dec!(12), dec!(25)),
        ]
    }

    #[test]
    fn test_avalanche_pays_highest_rate_first() {
        let mut loans = sample_loans();
        let applied = AllocationStrategy::Avalanche.allocate(&mut loans, dec!(300));
        assert_eq!(applied, dec!(300));
        assert_eq!(loans[0].balance, dec!(4700));
        assert_eq!(loans[1].balance, dec!(3000));
        assert_eq!(loans[2].balance, dec!(400));
    }

    #[test]
    fn test_snowball_pays_lowest_balance_first() {
        let mut loans = sample_loans();
        let applied = AllocationStrategy::Snowball.allocate(&mut loans, dec!(300));
        assert_eq!(applied, dec!(300));
        assert_eq!(loans[2].balance, dec!(100));
        assert_eq!(loans[0].balance, dec!(5000));
        assert_eq!(loans[1].balance, dec!(3000));
    }

    #[test]
    fn test_extra_spills_to_next_loan() {
        let mut loans = sample_loans();
        // Snowball: Store (400) cleared, remaining 200 goes to Car (3000)
        AllocationStrategy::Snowball.allocate(&mut loans, dec!(600));
        assert_eq!(loans[2].balance, Decimal::ZERO);
        assert_eq!(loans[1].balance, dec!(2800));
        assert_eq!(loans[0].balance, dec!(5000));
    }

    #[test]
    fn test_extra_beyond_total_balance_is_not_applied() {
        let mut loans = vec![
            Loan::new("A", dec!(100), dec!(10), dec!(10)),
            Loan::new("B", dec!(50), dec!(5), dec!(10)),
        ];
        let applied = AllocationStrategy::Avalanche.allocate(&mut loans, dec!(1000));
        assert_eq!(applied, dec!(150));
        assert!(loans.iter().all(Loan::is_paid_off));
    }

    #[test]
    fn test_paid_off_loans_are_skipped() {
        let mut loans = vec![
            Loan::new("Done", Decimal::ZERO, dec!(30), dec!(10)),
            Loan::new("Open", dec!(500), dec!(4), dec!(10)),
        ];
        let applied = AllocationStrategy::Avalanche.allocate(&mut loans, dec!(100));
        assert_eq!(applied, dec!(100));
        assert_eq!(loans[0].balance, Decimal::ZERO);
        assert_eq!(loans[1].balance, dec!(400));
    }

    #[test]
    fn test_avalanche_tie_breaks_on_smaller_balance() {
        let mut loans = vec![
            Loan::new("Big", dec!(900), dec!(18), dec!(10)),
            Loan::new("Small", dec!(200), dec!(18), dec!(10)),
        ];
        AllocationStrategy::Avalanche.allocate(&mut loans, dec!(50));
        assert_eq!(loans[0].balance, dec!(900));
        assert_eq!(loans[1].balance, dec!(150));
    }

    #[test]
    fn test_snowball_tie_breaks_on_higher_rate() {
        let mut loans = vec![
            Loan::new("Low", dec!(500), dec!(3), dec!(10)),
            Loan::new("High", dec!(500), dec!(9), dec!(10)),
        ];
        AllocationStrategy::Snowball.allocate(&mut loans, dec!(50));
        assert_eq!(loans[0].balance, dec!(500));
        assert_eq!(loans[1].balance, dec!(450));
    }

    #[test]
    fn test_allocation_keeps_slice_order() {
        let mut loans = sample_loans();
        AllocationStrategy::Avalanche.allocate(&mut loans, dec!(10));
        let names: Vec<&str> = loans.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Card", "Car", "Store"]);
    }

    #[test]
    fn test_zero_extra_is_noop() {
        let mut loans = sample_loans();
        let before = loans.clone();
        assert_eq!(
            AllocationStrategy::Snowball.allocate(&mut loans, Decimal::ZERO),
            Decimal::ZERO
        );
        assert_eq!(loans, before);
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!(
            "Avalanche".parse::<AllocationStrategy>().unwrap(),
            AllocationStrategy::Avalanche
        );
        assert_eq!(
            " snowball ".parse::<AllocationStrategy>().unwrap(),
            AllocationStrategy::Snowball
        );
        assert!("hybrid".parse::<AllocationStrategy>().is_err());
        assert_eq!(AllocationStrategy::Snowball.to_string(), "snowball");
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&AllocationStrategy::Avalanche).unwrap();
        assert_eq!(json, "\"avalanche\"");
        let parsed: AllocationStrategy = serde_json::from_str("\"snowball\"").unwrap();
        assert_eq!(parsed, AllocationStrategy::Snowball);
    }
}
