//! Validated entry points: check caller-supplied loans and budget, then run
//! one or both repayment strategies and package the results.

pub mod comparison;
pub mod validation;

pub use comparison::{
    compare_strategies, plan_repayment, ComparisonOutput, PlanInput, Recommendation,
    RepaymentPlanOutput, SimulationInput, StrategySummary,
};
pub use validation::{validate_plan, LoanInput, ValidatedPlan};
