use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Positions in the world income distribution, 0–100.
pub type Centile = Decimal;

/// Ratios against the global median income (e.g. 5.7× median)
pub type Multiple = Decimal;

/// Household composition used for income equivalization.
///
/// Mutated only by the caller between calculation calls; the engine never
/// modifies it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Household {
    pub adults: u32,
    pub children: u32,
}

/// One entry of the donation comparison catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonItem {
    /// Stable catalog identifier, e.g. "bednets"
    pub id: String,
    /// USD cost of one unit
    pub cost_per_unit: Money,
    /// Display precision for quantities of this item
    pub fraction_digits: u32,
    /// Sentence with a single `{}` placeholder for the quantity
    pub description_template: String,
    /// Opaque hint for the presentation layer
    pub icon: String,
}

/// Everything a caller needs to place one income in the world distribution.
/// Produced fresh per call, never cached or mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Income in international dollars (PPP-adjusted)
    pub internationalized_income: Money,
    /// International-dollar income normalized by household composition
    pub equivalized_income: Money,
    /// Income converted to USD at market exchange rates, for display
    pub converted_income: Money,
    /// Percentile rank of the equivalized income, capped at the ceiling
    pub income_centile: Centile,
    /// `100 − income_centile`
    pub income_top_percentile: Centile,
    /// Equivalized income as a multiple of the global median
    pub median_multiple: Multiple,
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub dataset_version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    dataset_version: &str,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            dataset_version: dataset_version.to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

// ---------------------------------------------------------------------------
// Rounding
// ---------------------------------------------------------------------------

/// Money figures round to 2 places, half-up, matching the published
/// methodology of the reference datasets.
pub fn round_money(value: Decimal) -> Money {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Percentiles and median multiples round to 1 place, half-up.
pub fn round_tenth(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_money_half_up() {
        assert_eq!(round_money(dec!(2.005)), dec!(2.01));
        assert_eq!(round_money(dec!(2.004)), dec!(2.00));
        assert_eq!(round_money(dec!(3333.333333)), dec!(3333.33));
    }

    #[test]
    fn test_round_tenth_half_up() {
        assert_eq!(round_tenth(dec!(94.85)), dec!(94.9));
        assert_eq!(round_tenth(dec!(94.84999)), dec!(94.8));
        assert_eq!(round_tenth(dec!(10.95)), dec!(11.0));
    }
}
