use napi::Result as NapiResult;
use napi_derive::napi;

use loan_planner_core::planner::{self, PlanInput, SimulationInput};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Compare avalanche and snowball repayment for a JSON plan
/// (`{"loans": [...], "budget": ..., "start_date": ...}`).
#[napi]
pub fn compare_strategies(input_json: String) -> NapiResult<String> {
    let input: PlanInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = planner::compare_strategies(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Run a single named strategy, optionally returning the monthly schedule.
#[napi]
pub fn plan_repayment(input_json: String) -> NapiResult<String> {
    let input: SimulationInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = planner::plan_repayment(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
