use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoanPlannerError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Budget ${budget:.2} is less than total minimum payments ${required:.2}")]
    BudgetShortfall { budget: Decimal, required: Decimal },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl LoanPlannerError {
    /// The input field the error refers to, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            LoanPlannerError::InvalidInput { field, .. } => Some(field),
            LoanPlannerError::BudgetShortfall { .. } => Some("budget"),
            LoanPlannerError::SerializationError(_) => None,
        }
    }
}

impl From<serde_json::Error> for LoanPlannerError {
    fn from(e: serde_json::Error) -> Self {
        LoanPlannerError::SerializationError(e.to_string())
    }
}
