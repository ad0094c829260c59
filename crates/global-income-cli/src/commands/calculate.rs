use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use global_income_core::engine::{CalculationEngine, CalculationInput};
use global_income_core::Household;

use crate::input;

/// Arguments for ranking an income in the global distribution
#[derive(Args)]
pub struct CalculateArgs {
    /// Annual household income in local currency
    #[arg(long)]
    pub income: Option<Decimal>,

    /// ISO 3166-1 alpha-3 country code, e.g. GBR
    #[arg(long)]
    pub country: Option<String>,

    /// Adults in the household
    #[arg(long, default_value = "1")]
    pub adults: u32,

    /// Children in the household
    #[arg(long, default_value = "0")]
    pub children: u32,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_calculate(args: CalculateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let calc_input: CalculationInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        CalculationInput {
            income: args.income.ok_or("--income is required (or provide --input)")?,
            country_code: args
                .country
                .ok_or("--country is required (or provide --input)")?,
            household: Household {
                adults: args.adults,
                children: args.children,
            },
        }
    };

    let engine = CalculationEngine::builtin()?;
    let result = engine.calculate(&calc_input)?;
    Ok(serde_json::to_value(result)?)
}
