//! The calculation engine: orchestrates the conversion pipeline, the
//! household equivalizer, and the distribution interpolator into one result
//! record. Stateless per call; safe to share across threads.

use std::time::Instant;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::convert;
use crate::data::ReferenceData;
use crate::error::GlobalIncomeError;
use crate::household;
use crate::interpolate::DistributionInterpolator;
use crate::types::{
    round_tenth, with_metadata, CalculationResult, Centile, ComputationOutput, Household, Money,
};
use crate::GlobalIncomeResult;

/// Incomes beyond the distribution tail report at most this percentile.
pub const PERCENTILE_CEILING: Centile = dec!(99.9);

/// The centile the global median income is read off the distribution at.
pub(crate) const MEDIAN_CENTILE: Centile = dec!(50);

/// One full comparison request: an annual income in local currency, the
/// country it is earned in, and who shares it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationInput {
    pub income: Money,
    pub country_code: String,
    pub household: Household,
}

/// Owns the reference tables plus the two values derived from them once at
/// construction: the interpolator and the global median income.
#[derive(Debug, Clone)]
pub struct CalculationEngine {
    data: ReferenceData,
    interpolator: DistributionInterpolator,
    median_income: Money,
}

impl CalculationEngine {
    /// Build an engine over explicit reference tables.
    pub fn new(data: ReferenceData) -> Self {
        let interpolator = DistributionInterpolator::new(data.anchors().to_vec());
        let median_income = interpolator.income_from_centile(MEDIAN_CENTILE);
        Self {
            data,
            interpolator,
            median_income,
        }
    }

    /// Engine over the embedded, versioned datasets.
    pub fn builtin() -> GlobalIncomeResult<Self> {
        Ok(Self::new(ReferenceData::builtin()?))
    }

    pub fn data(&self) -> &ReferenceData {
        &self.data
    }

    /// Annual global median income in international dollars, derived once
    /// from the anchor table.
    pub fn median_income(&self) -> Money {
        self.median_income
    }

    pub fn dataset_version(&self) -> &str {
        self.data.version()
    }

    /// The interpolator the engine ranks incomes with.
    pub fn distribution(&self) -> &DistributionInterpolator {
        &self.interpolator
    }

    /// ISO currency code for a country, or `None` for unsupported codes.
    pub fn currency_code_for(&self, country_code: &str) -> Option<&str> {
        self.data.currency_code_for(country_code)
    }

    /// Place an income in the global distribution.
    ///
    /// Inputs are rejected before any computation runs: income must be
    /// positive and the household must contain at least one adult. Missing
    /// reference coverage surfaces as [`GlobalIncomeError::DataNotFound`],
    /// distinguishable by the caller from bad input.
    pub fn calculate(
        &self,
        input: &CalculationInput,
    ) -> GlobalIncomeResult<ComputationOutput<CalculationResult>> {
        let start = Instant::now();
        let mut warnings: Vec<String> = Vec::new();

        // --- Validate ---
        if input.income <= Decimal::ZERO {
            return Err(GlobalIncomeError::InvalidInput {
                field: "income".into(),
                reason: "must be positive".into(),
            });
        }
        household::equivalization_factor(&input.household)?;

        // --- Convert ---
        let internationalized_income =
            convert::internationalize(&self.data, input.income, &input.country_code)?;
        let equivalized_income = convert::equivalize(internationalized_income, &input.household)?;
        let converted_income =
            convert::convert_to_display(&self.data, input.income, &input.country_code)?;

        // --- Rank ---
        let income_centile = self
            .interpolator
            .centile_from_income(equivalized_income)
            .min(PERCENTILE_CEILING);
        if income_centile == PERCENTILE_CEILING {
            warnings.push(format!(
                "equivalized income {equivalized_income} is in the distribution tail; centile reported at the {PERCENTILE_CEILING} ceiling"
            ));
        }
        let income_top_percentile = round_tenth(Decimal::ONE_HUNDRED - income_centile);
        let median_multiple = round_tenth(equivalized_income / self.median_income);

        let result = CalculationResult {
            internationalized_income,
            equivalized_income,
            converted_income,
            income_centile,
            income_top_percentile,
            median_multiple,
        };

        let elapsed = start.elapsed().as_micros() as u64;

        Ok(with_metadata(
            "Global income distribution comparison",
            input,
            warnings,
            self.data.version(),
            elapsed,
            result,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> CalculationEngine {
        CalculationEngine::builtin().unwrap()
    }

    fn input(income: Decimal, country: &str, adults: u32, children: u32) -> CalculationInput {
        CalculationInput {
            income,
            country_code: country.into(),
            household: Household { adults, children },
        }
    }

    #[test]
    fn test_median_income_derived_from_anchor_table() {
        // 7.67 dollars a day at the 50th percentile anchor
        assert_eq!(engine().median_income(), dec!(2799.55));
    }

    #[test]
    fn test_rejects_non_positive_income() {
        let result = engine().calculate(&input(dec!(0), "GBR", 1, 0));
        assert!(matches!(
            result,
            Err(GlobalIncomeError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_rejects_household_without_adults() {
        let result = engine().calculate(&input(dec!(28400), "GBR", 0, 1));
        assert!(matches!(
            result,
            Err(GlobalIncomeError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_unknown_country_is_data_not_found() {
        let result = engine().calculate(&input(dec!(28400), "XKX", 1, 0));
        assert!(matches!(
            result,
            Err(GlobalIncomeError::DataNotFound { .. })
        ));
    }

    #[test]
    fn test_no_warnings_for_ordinary_income() {
        let output = engine().calculate(&input(dec!(28400), "GBR", 1, 1)).unwrap();
        assert!(output.warnings.is_empty());
    }

    #[test]
    fn test_tail_income_warns_and_clamps() {
        let output = engine()
            .calculate(&input(dec!(284000000), "GBR", 1, 1))
            .unwrap();
        assert_eq!(output.result.income_centile, PERCENTILE_CEILING);
        assert!(!output.warnings.is_empty());
    }

    #[test]
    fn test_methodology_and_dataset_version() {
        let output = engine().calculate(&input(dec!(28400), "GBR", 1, 1)).unwrap();
        assert_eq!(output.methodology, "Global income distribution comparison");
        assert_eq!(output.metadata.dataset_version, "2025-06");
    }

    #[test]
    fn test_deterministic_across_calls() {
        let eng = engine();
        let a = eng.calculate(&input(dec!(28400), "GBR", 1, 1)).unwrap();
        let b = eng.calculate(&input(dec!(28400), "GBR", 1, 1)).unwrap();
        assert_eq!(a.result, b.result);
    }
}
