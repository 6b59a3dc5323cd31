mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::analysis::{CompareArgs, EffectiveRateArgs, MaxPrincipalArgs};
use commands::schedule::ScheduleArgs;

/// Employee loan EMI schedules
#[derive(Parser)]
#[command(
    name = "loan-emi",
    version,
    about = "Employee loan EMI schedules with decimal precision",
    long_about = "A CLI for previewing employee loan repayment schedules. Supports \
                  interest-free, flat-rate and reducing-balance loans, method \
                  comparison, flat-to-reducing equivalent rates and maximum \
                  principal for an installment ceiling."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Build an installment-by-installment repayment schedule
    Schedule(ScheduleArgs),
    /// Compare flat and reducing-balance interest for the same loan
    Compare(CompareArgs),
    /// Reducing-balance rate equivalent to a loan's EMI
    EffectiveRate(EffectiveRateArgs),
    /// Largest principal affordable under an EMI ceiling
    MaxPrincipal(MaxPrincipalArgs),
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

/// Logs go to stderr so stdout stays machine-readable. `RUST_LOG`
/// overrides the default `warn` level.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Schedule(args) => commands::schedule::run_schedule(args),
        Commands::Compare(args) => commands::analysis::run_compare(args),
        Commands::EffectiveRate(args) => commands::analysis::run_effective_rate(args),
        Commands::MaxPrincipal(args) => commands::analysis::run_max_principal(args),
        Commands::Version => {
            println!("loan-emi {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
