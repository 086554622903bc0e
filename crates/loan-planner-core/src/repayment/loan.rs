use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Percentage};

const PERCENT: Decimal = dec!(100);
const MONTHS_PER_YEAR: Decimal = dec!(12);

/// A single loan as carried through a repayment simulation.
///
/// The balance is mutated in place while a simulation runs; callers hand the
/// simulator a snapshot and it works on its own copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    /// Display label, not used in computation
    pub name: String,
    /// Amount currently owed
    pub balance: Money,
    /// Nominal annual interest rate in percent
    pub rate: Percentage,
    /// Minimum required monthly payment
    pub min_payment: Money,
}

impl Loan {
    pub fn new(
        name: impl Into<String>,
        balance: Money,
        rate: Percentage,
        min_payment: Money,
    ) -> Self {
        Self {
            name: name.into(),
            balance,
            rate,
            min_payment,
        }
    }

    /// A loan with no positive balance left is paid off.
    pub fn is_paid_off(&self) -> bool {
        self.balance <= Decimal::ZERO
    }

    /// Simple monthly rate as a decimal fraction: `rate / 100 / 12`.
    pub fn monthly_rate(&self) -> Decimal {
        self.rate / PERCENT / MONTHS_PER_YEAR
    }

    /// Interest for one month on the current balance.
    pub fn monthly_interest(&self) -> Option<Money> {
        self.balance.checked_mul(self.monthly_rate())
    }

    /// Capitalise one month of interest onto the balance and return it.
    ///
    /// Returns `None` if the balance would overflow the decimal range; the
    /// balance is left untouched in that case.
    pub fn accrue_interest(&mut self) -> Option<Money> {
        let interest = self.monthly_interest()?;
        self.balance = self.balance.checked_add(interest)?;
        Some(interest)
    }

    /// Pay up to `amount` off the balance and return what was actually applied.
    ///
    /// Payments are capped at the outstanding balance so it never goes negative.
    pub fn pay(&mut self, amount: Money) -> Money {
        if self.is_paid_off() || amount <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        let applied = amount.min(self.balance);
        self.balance -= applied;
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monthly_rate() {
        let loan = Loan::new("Card", dec!(1000), dec!(12), dec!(50));
        assert_eq!(loan.monthly_rate(), dec!(0.01));
    }

    #[test]
    fn test_accrue_interest_capitalises() {
        let mut loan = Loan::new("Card", dec!(1000), dec!(12), dec!(50));
        let interest = loan.accrue_interest().unwrap();
        assert_eq!(interest, dec!(10));
        assert_eq!(loan.balance, dec!(1010));
    }

    #[test]
    fn test_zero_rate_accrues_nothing() {
        let mut loan = Loan::new("Family", dec!(800), Decimal::ZERO, dec!(100));
        assert_eq!(loan.accrue_interest(), Some(Decimal::ZERO));
        assert_eq!(loan.balance, dec!(800));
    }

    #[test]
    fn test_pay_capped_at_balance() {
        let mut loan = Loan::new("Car", dec!(40), dec!(5), dec!(100));
        let applied = loan.pay(dec!(100));
        assert_eq!(applied, dec!(40));
        assert_eq!(loan.balance, Decimal::ZERO);
        assert!(loan.is_paid_off());
    }

    #[test]
    fn test_pay_on_paid_off_loan_applies_nothing() {
        let mut loan = Loan::new("Car", Decimal::ZERO, dec!(5), dec!(100));
        assert_eq!(loan.pay(dec!(25)), Decimal::ZERO);
        assert_eq!(loan.balance, Decimal::ZERO);
    }

    #[test]
    fn test_accrue_interest_overflow_leaves_balance() {
        let mut loan = Loan::new("Runaway", Decimal::MAX, dec!(1200), dec!(1));
        assert!(loan.accrue_interest().is_none());
        assert_eq!(loan.balance, Decimal::MAX);
    }
}
