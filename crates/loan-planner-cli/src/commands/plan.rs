use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::debug;

use loan_planner_core::planner::{self, LoanInput, PlanInput, SimulationInput};
use loan_planner_core::repayment::AllocationStrategy;

use crate::input;

/// Loans and budget shared by every planning command
#[derive(Args)]
pub struct PlanArgs {
    /// Path to a JSON or YAML plan file; --budget and --start-date still override it
    #[arg(long)]
    pub input: Option<String>,

    /// Total monthly amount available for all loans
    #[arg(long)]
    pub budget: Option<Decimal>,

    /// A loan as NAME:BALANCE:RATE:MIN_PAYMENT (rate in percent); repeat per loan
    #[arg(long = "loan", value_parser = parse_loan_arg)]
    pub loans: Vec<LoanInput>,

    /// Date of the first monthly payment (YYYY-MM-DD), used to project payoff dates
    #[arg(long)]
    pub start_date: Option<NaiveDate>,
}

/// Arguments for the avalanche vs snowball comparison
#[derive(Args)]
pub struct CompareArgs {
    #[command(flatten)]
    pub plan: PlanArgs,
}

/// Arguments for a single-strategy simulation
#[derive(Args)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub plan: PlanArgs,

    /// Allocation strategy: avalanche or snowball
    #[arg(long, default_value = "avalanche")]
    pub strategy: AllocationStrategy,

    /// Include the month-by-month schedule
    #[arg(long)]
    pub schedule: bool,
}

pub fn run_compare(args: CompareArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let plan_input = load_plan(args.plan)?;
    let result = planner::compare_strategies(&plan_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_simulate(args: SimulateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let plan_input = load_plan(args.plan)?;
    let sim_input = SimulationInput {
        loans: plan_input.loans,
        budget: plan_input.budget,
        strategy: args.strategy,
        start_date: plan_input.start_date,
        include_schedule: args.schedule,
    };
    let result = planner::plan_repayment(&sim_input)?;
    Ok(serde_json::to_value(result)?)
}

fn load_plan(args: PlanArgs) -> Result<PlanInput, Box<dyn std::error::Error>> {
    // File, then explicit flags, then piped stdin
    let source;
    let mut plan_input: PlanInput = if let Some(ref path) = args.input {
        source = "file";
        input::file::read_document(path)?
    } else if !args.loans.is_empty() {
        source = "flags";
        let budget = args
            .budget
            .ok_or("--budget is required (or provide --input)")?;
        PlanInput {
            loans: args.loans,
            budget,
            start_date: None,
        }
    } else if let Some(piped) = input::stdin::read_stdin()? {
        source = "stdin";
        piped
    } else {
        return Err("at least one --loan is required (or provide --input or stdin)".into());
    };

    if let Some(budget) = args.budget {
        plan_input.budget = budget;
    }

    if args.start_date.is_some() {
        plan_input.start_date = args.start_date;
    }

    debug!(
        source,
        loans = plan_input.loans.len(),
        budget = %plan_input.budget,
        "loaded repayment plan"
    );
    Ok(plan_input)
}

/// Parse `NAME:BALANCE:RATE:MIN_PAYMENT`, or `BALANCE:RATE:MIN_PAYMENT` without a name.
///
/// Numbers are taken from the right so names may contain colons.
pub fn parse_loan_arg(arg: &str) -> Result<LoanInput, String> {
    let mut parts: Vec<&str> = arg.rsplitn(4, ':').collect();
    parts.reverse();

    let (name, numbers) = match parts.len() {
        4 => (Some(parts[0].trim().to_string()), &parts[1..]),
        3 => (None, &parts[..]),
        _ => {
            return Err(format!(
                "expected NAME:BALANCE:RATE:MIN_PAYMENT, got '{arg}'"
            ))
        }
    };

    let number = |label: &str, raw: &str| -> Result<Decimal, String> {
        raw.trim()
            .parse::<Decimal>()
            .map_err(|e| format!("invalid {label} '{}': {e}", raw.trim()))
    };

    Ok(LoanInput {
        name: name.filter(|n| !n.is_empty()),
        balance: number("balance", numbers[0])?,
        rate: number("rate", numbers[1])?,
        min_payment: number("min_payment", numbers[2])?,
    })
}
