use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use global_income_core::donation::comparison_amount;
use global_income_core::engine::CalculationEngine;

/// Arguments for listing the donation comparison catalog
#[derive(Args)]
pub struct ComparisonsArgs {
    /// Optional donation amount in USD to project against each entry
    #[arg(long)]
    pub amount: Option<Decimal>,
}

pub fn run_comparisons(args: ComparisonsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let engine = CalculationEngine::builtin()?;

    let entries: Vec<Value> = engine
        .data()
        .comparisons()
        .iter()
        .map(|item| {
            let mut entry = json!({
                "id": item.id,
                "cost_per_unit": item.cost_per_unit,
                "fraction_digits": item.fraction_digits,
                "description_template": item.description_template,
                "icon": item.icon,
            });
            if let Some(amount) = args.amount {
                entry["quantity"] = json!(comparison_amount(amount, item));
            }
            entry
        })
        .collect();

    Ok(Value::Array(entries))
}
