pub mod error;
pub mod types;

#[cfg(feature = "repayment")]
pub mod repayment;

#[cfg(feature = "planner")]
pub mod planner;

pub use error::LoanPlannerError;
pub use types::*;

/// Standard result type for all loan-planner operations
pub type LoanPlannerResult<T> = Result<T, LoanPlannerError>;
