mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::plan::{CompareArgs, SimulateArgs};

/// Multi-loan repayment planning
#[derive(Parser)]
#[command(
    name = "loanplan",
    version,
    about = "Compare avalanche and snowball loan repayment plans",
    long_about = "Simulates month-by-month payoff of several loans under a fixed monthly \
                  budget with decimal precision. Compares the avalanche (highest rate first) \
                  and snowball (lowest balance first) strategies for allocating the budget \
                  left over after minimum payments."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log simulation progress to stderr (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare avalanche and snowball payoff for the same loans and budget
    Compare(CompareArgs),
    /// Run a single strategy, optionally with the month-by-month schedule
    Simulate(SimulateArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Compare(args) => commands::plan::run_compare(args),
        Commands::Simulate(args) => commands::plan::run_simulate(args),
        Commands::Version => {
            println!("loanplan {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
