use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use global_income_core::donation::DonationInput;
use global_income_core::engine::CalculationEngine;
use global_income_core::Household;

use crate::input;

/// Arguments for projecting a donation's impact
#[derive(Args)]
pub struct DonationArgs {
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

    /// Percentage of income to donate, 0-100
    #[arg(long, alias = "pct")]
    pub percentage: Option<Decimal>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_donation(args: DonationArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let donation_input: DonationInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        DonationInput {
            income: args.income.ok_or("--income is required (or provide --input)")?,
            country_code: args
                .country
                .ok_or("--country is required (or provide --input)")?,
            household: Household {
                adults: args.adults,
                children: args.children,
            },
            donation_percentage: args
                .percentage
                .ok_or("--percentage is required (or provide --input)")?,
        }
    };

    let engine = CalculationEngine::builtin()?;
    let result = engine.donation_impact(&donation_input)?;
    Ok(serde_json::to_value(result)?)
}
