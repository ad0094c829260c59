use std::sync::OnceLock;

use napi::Result as NapiResult;
use napi_derive::napi;

use global_income_core::donation::{comparison_amount, DonationInput};
use global_income_core::engine::{CalculationEngine, CalculationInput};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// The engine and its reference tables are built once per process and shared
/// by every call.
fn engine() -> NapiResult<&'static CalculationEngine> {
    static ENGINE: OnceLock<CalculationEngine> = OnceLock::new();
    if let Some(engine) = ENGINE.get() {
        return Ok(engine);
    }
    let built = CalculationEngine::builtin().map_err(to_napi_error)?;
    Ok(ENGINE.get_or_init(|| built))
}

// ---------------------------------------------------------------------------
// Calculation
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate(input_json: String) -> NapiResult<String> {
    let input: CalculationInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = engine()?.calculate(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn median_income() -> NapiResult<String> {
    Ok(engine()?.median_income().to_string())
}

#[napi]
pub fn currency_code_for(country_code: String) -> NapiResult<Option<String>> {
    Ok(engine()?
        .currency_code_for(&country_code)
        .map(str::to_string))
}

// ---------------------------------------------------------------------------
// Donation impact
// ---------------------------------------------------------------------------

#[napi]
pub fn donation_impact(input_json: String) -> NapiResult<String> {
    let input: DonationInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = engine()?.donation_impact(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn comparison_amounts(donation_value_json: String) -> NapiResult<String> {
    let value: rust_decimal::Decimal =
        serde_json::from_str(&donation_value_json).map_err(to_napi_error)?;
    let engine = engine()?;
    let amounts: Vec<serde_json::Value> = engine
        .data()
        .comparisons()
        .iter()
        .map(|item| {
            serde_json::json!({
                "id": item.id,
                "quantity": comparison_amount(value, item),
            })
        })
        .collect();
    serde_json::to_string(&amounts).map_err(to_napi_error)
}
