//! Month-by-month payoff simulation for a set of loans under a fixed monthly
//! budget, with pluggable allocation of the budget left after minimums.

pub mod loan;
pub mod simulator;
pub mod strategy;

pub use loan::Loan;
pub use simulator::{simulate, simulate_with_schedule, MonthRecord, SimulationOutcome, MAX_MONTHS};
pub use strategy::AllocationStrategy;
