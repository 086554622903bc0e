use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::time::Instant;

use super::validation::{validate_plan, LoanInput, ValidatedPlan};
use crate::repayment::{
    simulate, simulate_with_schedule, AllocationStrategy, MonthRecord, SimulationOutcome,
    MAX_MONTHS,
};
use crate::types::*;
use crate::LoanPlannerResult;

const MONTHS_PER_YEAR: u32 = 12;

/// Loans and monthly budget to plan against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanInput {
    pub loans: Vec<LoanInput>,
    /// Total amount available for debt repayment each month
    pub budget: Money,
    /// Date of the first monthly payment, used to project payoff dates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
}

/// Input for running a single named strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationInput {
    pub loans: Vec<LoanInput>,
    pub budget: Money,
    pub strategy: AllocationStrategy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    /// Include the month-by-month schedule in the output
    #[serde(default)]
    pub include_schedule: bool,
}

/// Headline numbers for one strategy run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategySummary {
    pub strategy: AllocationStrategy,
    pub months: u32,
    pub years: u32,
    pub rem_months: u32,
    /// Total interest, rounded to cents
    pub total_interest: Money,
    pub converged: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payoff_date: Option<NaiveDate>,
}

/// Which strategy comes out ahead, and by how much.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Strategy with strictly less interest; `None` when equal
    pub lower_interest: Option<AllocationStrategy>,
    pub interest_savings: Money,
    /// Strategy that finishes strictly sooner; `None` when equal
    pub faster: Option<AllocationStrategy>,
    pub months_saved: u32,
}

/// Side-by-side avalanche and snowball results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonOutput {
    pub avalanche: StrategySummary,
    pub snowball: StrategySummary,
    pub total_min_payments: Money,
    pub extra_payment: Money,
    pub recommendation: Recommendation,
}

/// Result of a single-strategy plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepaymentPlanOutput {
    pub summary: StrategySummary,
    pub total_paid: Money,
    pub total_min_payments: Money,
    pub extra_payment: Money,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub schedule: Vec<MonthRecord>,
}

/// Validate the plan and run avalanche and snowball against the same loans.
pub fn compare_strategies(
    input: &PlanInput,
) -> LoanPlannerResult<ComputationOutput<ComparisonOutput>> {
    let start = Instant::now();
    let plan = validate_plan(&input.loans, input.budget)?;
    let mut warnings = plan.warnings.clone();

    // Both runs read the same validated snapshot; each simulates on its own copy.
    let avalanche = simulate(&plan.loans, plan.budget, AllocationStrategy::Avalanche);
    let snowball = simulate(&plan.loans, plan.budget, AllocationStrategy::Snowball);

    for outcome in [&avalanche, &snowball] {
        if !outcome.converged {
            warnings.push(non_convergence_warning(outcome));
        }
    }

    let avalanche = summarise(&avalanche, input.start_date);
    let snowball = summarise(&snowball, input.start_date);
    let recommendation = recommend(&avalanche, &snowball);

    let output = ComparisonOutput {
        avalanche,
        snowball,
        total_min_payments: plan.total_min_payments.round_dp(2),
        extra_payment: extra_payment(&plan),
        recommendation,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Avalanche vs Snowball Repayment Comparison",
        &assumptions(&plan),
        warnings,
        elapsed,
        output,
    ))
}

/// Validate the plan and run one strategy, optionally keeping the schedule.
pub fn plan_repayment(
    input: &SimulationInput,
) -> LoanPlannerResult<ComputationOutput<RepaymentPlanOutput>> {
    let start = Instant::now();
    let plan = validate_plan(&input.loans, input.budget)?;
    let mut warnings = plan.warnings.clone();

    let (outcome, schedule) = if input.include_schedule {
        simulate_with_schedule(&plan.loans, plan.budget, input.strategy)
    } else {
        (
            simulate(&plan.loans, plan.budget, input.strategy),
            Vec::new(),
        )
    };

    if !outcome.converged {
        warnings.push(non_convergence_warning(&outcome));
    }

    let output = RepaymentPlanOutput {
        summary: summarise(&outcome, input.start_date),
        total_paid: outcome.total_paid.round_dp(2),
        total_min_payments: plan.total_min_payments.round_dp(2),
        extra_payment: extra_payment(&plan),
        schedule,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        input.strategy.description(),
        &assumptions(&plan),
        warnings,
        elapsed,
        output,
    ))
}

fn summarise(outcome: &SimulationOutcome, start_date: Option<NaiveDate>) -> StrategySummary {
    let payoff_date = match start_date {
        // Month 1's payment falls on the start date itself
        Some(date) if outcome.converged => {
            date.checked_add_months(Months::new(outcome.months.saturating_sub(1)))
        }
        _ => None,
    };
    StrategySummary {
        strategy: outcome.strategy,
        months: outcome.months,
        years: outcome.months / MONTHS_PER_YEAR,
        rem_months: outcome.months % MONTHS_PER_YEAR,
        total_interest: outcome.total_interest.round_dp(2),
        converged: outcome.converged,
        payoff_date,
    }
}

fn recommend(avalanche: &StrategySummary, snowball: &StrategySummary) -> Recommendation {
    let lower_interest = match avalanche.total_interest.cmp(&snowball.total_interest) {
        Ordering::Less => Some(AllocationStrategy::Avalanche),
        Ordering::Greater => Some(AllocationStrategy::Snowball),
        Ordering::Equal => None,
    };
    let faster = match avalanche.months.cmp(&snowball.months) {
        Ordering::Less => Some(AllocationStrategy::Avalanche),
        Ordering::Greater => Some(AllocationStrategy::Snowball),
        Ordering::Equal => None,
    };
    Recommendation {
        lower_interest,
        interest_savings: (avalanche.total_interest - snowball.total_interest).abs(),
        faster,
        months_saved: avalanche.months.abs_diff(snowball.months),
    }
}

fn extra_payment(plan: &ValidatedPlan) -> Money {
    (plan.budget - plan.total_min_payments).round_dp(2)
}

fn non_convergence_warning(outcome: &SimulationOutcome) -> String {
    format!(
        "{}: balance of {} still outstanding after {} months; loans not paid off",
        outcome.strategy,
        outcome.remaining_balance.round_dp(2),
        outcome.months
    )
}

fn assumptions(plan: &ValidatedPlan) -> serde_json::Value {
    serde_json::json!({
        "loans": plan.loans.len(),
        "budget": plan.budget.to_string(),
        "total_min_payments": plan.total_min_payments.to_string(),
        "interest": "fixed monthly simple interest (annual rate / 12), capitalised before payments",
        "max_months": MAX_MONTHS,
    })
}
