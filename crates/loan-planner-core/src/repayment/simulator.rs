use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::loan::Loan;
use super::strategy::AllocationStrategy;
use crate::types::Money;

/// Hard stop on simulated months (~83 years).
pub const MAX_MONTHS: u32 = 1000;

/// Result of running one strategy to completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationOutcome {
    pub strategy: AllocationStrategy,
    /// Months simulated until every balance reached zero, or until the cap
    pub months: u32,
    /// Interest capitalised over the whole run
    pub total_interest: Money,
    /// Minimum and extra payments applied over the whole run
    pub total_paid: Money,
    /// False when the run stopped with balance still outstanding
    pub converged: bool,
    /// Balance left across all loans when the run stopped
    pub remaining_balance: Money,
}

/// One simulated month across all loans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthRecord {
    pub month: u32,
    pub interest: Money,
    pub minimum_paid: Money,
    pub extra_paid: Money,
    pub closing_balance: Money,
    pub loans_remaining: usize,
}

/// Simulate month-by-month repayment of `loans` under a fixed monthly budget.
///
/// Works on a private copy of `loans`. Each month, for every loan still
/// carrying a balance: interest is capitalised, then the minimum payment
/// (capped at the balance) is applied. Whatever is left of the budget after
/// minimums is handed to `strategy`. Runs until all balances are zero or
/// [`MAX_MONTHS`] is reached.
pub fn simulate(loans: &[Loan], budget: Money, strategy: AllocationStrategy) -> SimulationOutcome {
    run(loans, budget, strategy, None)
}

/// Same as [`simulate`], also returning one [`MonthRecord`] per month.
pub fn simulate_with_schedule(
    loans: &[Loan],
    budget: Money,
    strategy: AllocationStrategy,
) -> (SimulationOutcome, Vec<MonthRecord>) {
    let mut schedule = Vec::new();
    let outcome = run(loans, budget, strategy, Some(&mut schedule));
    (outcome, schedule)
}

fn run(
    initial: &[Loan],
    budget: Money,
    strategy: AllocationStrategy,
    mut schedule: Option<&mut Vec<MonthRecord>>,
) -> SimulationOutcome {
    let mut loans = initial.to_vec();
    let mut months: u32 = 0;
    let mut total_interest = Decimal::ZERO;
    let mut total_paid = Decimal::ZERO;
    let mut overflowed = false;

    debug!(
        strategy = %strategy,
        loans = loans.len(),
        budget = %budget,
        "starting repayment simulation"
    );

    while months < MAX_MONTHS && loans.iter().any(|l| !l.is_paid_off()) {
        // Work on a scratch copy so an overflow never leaves a half-applied month
        let mut next = loans.clone();
        let Some(month) = step_month(&mut next, budget, strategy) else {
            overflowed = true;
            break;
        };
        let interest_to_date = total_interest.checked_add(month.interest);
        let paid_to_date = month.paid().and_then(|paid| total_paid.checked_add(paid));
        let (Some(interest_to_date), Some(paid_to_date)) = (interest_to_date, paid_to_date) else {
            overflowed = true;
            break;
        };

        loans = next;
        total_interest = interest_to_date;
        total_paid = paid_to_date;
        months += 1;

        if let Some(records) = schedule.as_deref_mut() {
            records.push(MonthRecord {
                month: months,
                interest: month.interest,
                minimum_paid: month.minimum_paid,
                extra_paid: month.extra_paid,
                closing_balance: outstanding(&loans),
                loans_remaining: loans.iter().filter(|l| !l.is_paid_off()).count(),
            });
        }
    }

    let remaining_balance = outstanding(&loans);
    let converged = !overflowed && remaining_balance <= Decimal::ZERO;

    if converged {
        debug!(strategy = %strategy, months, total_interest = %total_interest, "loans paid off");
    } else {
        warn!(
            strategy = %strategy,
            months,
            remaining_balance = %remaining_balance,
            overflowed,
            "repayment did not converge"
        );
    }

    SimulationOutcome {
        strategy,
        months,
        total_interest,
        total_paid,
        converged,
        remaining_balance,
    }
}

struct MonthTotals {
    interest: Money,
    minimum_paid: Money,
    extra_paid: Money,
}

impl MonthTotals {
    fn paid(&self) -> Option<Money> {
        self.minimum_paid.checked_add(self.extra_paid)
    }
}

/// Apply one month to `loans`; `None` if any running figure overflows.
fn step_month(
    loans: &mut [Loan],
    budget: Money,
    strategy: AllocationStrategy,
) -> Option<MonthTotals> {
    let mut interest = Decimal::ZERO;
    let mut minimum_paid = Decimal::ZERO;

    for loan in loans.iter_mut().filter(|l| !l.is_paid_off()) {
        interest = interest.checked_add(loan.accrue_interest()?)?;
        let payment = loan.min_payment;
        minimum_paid = minimum_paid.checked_add(loan.pay(payment))?;
    }

    let extra = budget.checked_sub(minimum_paid)?;
    let extra_paid = if extra > Decimal::ZERO {
        strategy.allocate(loans, extra)
    } else {
        Decimal::ZERO
    };

    Some(MonthTotals {
        interest,
        minimum_paid,
        extra_paid,
    })
}

fn outstanding(loans: &[Loan]) -> Money {
    loans
        .iter()
        .filter(|l| !l.is_paid_off())
        .fold(Decimal::ZERO, |acc, l| acc.saturating_add(l.balance))
}
