use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::LoanPlannerError;
use crate::repayment::Loan;
use crate::types::{Money, Percentage};
use crate::LoanPlannerResult;

/// A loan as supplied by a caller, before validation.
///
/// Missing numeric fields default to zero and are rejected by [`validate_plan`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoanInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub balance: Money,
    /// Annual interest rate in percent
    #[serde(default)]
    pub rate: Percentage,
    #[serde(default)]
    pub min_payment: Money,
}

/// Loans and budget that passed validation.
#[derive(Debug, Clone)]
pub struct ValidatedPlan {
    pub loans: Vec<Loan>,
    pub budget: Money,
    pub total_min_payments: Money,
    pub warnings: Vec<String>,
}

/// Check raw loan records and a monthly budget, producing simulation-ready loans.
///
/// The first failing rule is reported, with the offending field and loan index.
pub fn validate_plan(loans: &[LoanInput], budget: Money) -> LoanPlannerResult<ValidatedPlan> {
    if loans.is_empty() {
        return Err(LoanPlannerError::InvalidInput {
            field: "loans".into(),
            reason: "No loan data provided".into(),
        });
    }
    if budget <= Decimal::ZERO {
        return Err(LoanPlannerError::InvalidInput {
            field: "budget".into(),
            reason: "Budget must be positive".into(),
        });
    }

    let mut validated = Vec::with_capacity(loans.len());
    let mut warnings = Vec::new();
    let mut total_min_payments = Decimal::ZERO;

    for (i, input) in loans.iter().enumerate() {
        let label = format!("Loan {}", i + 1);

        if input.balance <= Decimal::ZERO {
            return Err(invalid_loan(i, "balance", &label, "balance must be positive"));
        }
        if input.rate < Decimal::ZERO {
            return Err(invalid_loan(i, "rate", &label, "rate must not be negative"));
        }
        if input.min_payment <= Decimal::ZERO {
            return Err(invalid_loan(
                i,
                "min_payment",
                &label,
                "minimum payment must be positive",
            ));
        }

        let name = match input.name.as_deref().map(str::trim) {
            Some(n) if !n.is_empty() => n.to_string(),
            _ => label,
        };
        let loan = Loan::new(name, input.balance, input.rate, input.min_payment);

        if let Some(interest) = loan.monthly_interest() {
            if loan.min_payment <= interest {
                warnings.push(format!(
                    "Loan '{}': minimum payment {} does not cover first-month interest {}",
                    loan.name,
                    loan.min_payment,
                    interest.round_dp(2)
                ));
            }
        }

        total_min_payments = total_min_payments
            .checked_add(loan.min_payment)
            .ok_or_else(|| {
                invalid_loan(
                    i,
                    "min_payment",
                    &loan.name,
                    "total minimum payments exceed the supported range",
                )
            })?;
        validated.push(loan);
    }

    if budget < total_min_payments {
        return Err(LoanPlannerError::BudgetShortfall {
            budget,
            required: total_min_payments,
        });
    }

    Ok(ValidatedPlan {
        loans: validated,
        budget,
        total_min_payments,
        warnings,
    })
}

fn invalid_loan(index: usize, field: &str, label: &str, reason: &str) -> LoanPlannerError {
    LoanPlannerError::InvalidInput {
        field: format!("loans[{index}].{field}"),
        reason: format!("Invalid data for {label}: {reason}"),
    }
}
