mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::calculate::CalculateArgs;
use commands::catalog::ComparisonsArgs;
use commands::donation::DonationArgs;

/// Global income percentile and donation impact calculations
#[derive(Parser)]
#[command(
    name = "gip",
    version,
    about = "Global income percentile and donation impact calculations",
    long_about = "Computes where a household income ranks in the global income \
                  distribution, with decimal precision: PPP conversion to \
                  international dollars, household equivalization, percentile \
                  rank, median multiple, and the projected effect of donating \
                  a percentage of the income."
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
    /// Rank an income in the global distribution
    Calculate(CalculateArgs),
    /// Project the effect of donating a percentage of an income
    Donation(DonationArgs),
    /// List the donation comparison catalog
    Comparisons(ComparisonsArgs),
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

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Calculate(args) => commands::calculate::run_calculate(args),
        Commands::Donation(args) => commands::donation::run_donation(args),
        Commands::Comparisons(args) => commands::catalog::run_comparisons(args),
        Commands::Version => {
            println!("gip {}", env!("CARGO_PKG_VERSION"));
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
