//! Donation impact: what remains of an income after giving a percentage
//! away, where the reduced income lands in the distribution, and what the
//! donated amount funds in real-world comparison units.

use std::time::Instant;

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::engine::{CalculationEngine, CalculationInput, MEDIAN_CENTILE};
use crate::error::GlobalIncomeError;
use crate::types::{
    round_money, with_metadata, CalculationResult, ComparisonItem, ComputationOutput, Household,
    Money,
};
use crate::GlobalIncomeResult;

const FULL_SHARE: Decimal = dec!(100);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A donation projection request: the calculation inputs plus the percentage
/// of income to give.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DonationInput {
    pub income: Money,
    pub country_code: String,
    pub household: Household,
    /// Percentage of income donated, on the closed range [0, 100]
    pub donation_percentage: Decimal,
}

/// What one donation funds, for a single catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonationComparison {
    pub id: String,
    /// Units funded, rounded to the entry's display precision
    pub quantity: Money,
    /// The entry's template with the quantity substituted in
    pub description: String,
}

/// The full donation projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DonationImpact {
    pub donation_percentage: Decimal,
    pub income_after_donating: Money,
    pub donation_value: Money,
    /// The post-donation income placed in the distribution
    pub result: CalculationResult,
    /// Absent when the post-donation income sits at or below the global
    /// median, where catalog comparisons stop being meaningful.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparisons: Option<Vec<DonationComparison>>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Income left after donating `percentage` percent of it.
pub fn income_after_donating(income: Money, percentage: Decimal) -> GlobalIncomeResult<Money> {
    validate_donation(income, percentage)?;
    Ok(round_money(income * (FULL_SHARE - percentage) / FULL_SHARE))
}

/// The donated amount itself.
pub fn donation_value(income: Money, percentage: Decimal) -> GlobalIncomeResult<Money> {
    Ok(income - income_after_donating(income, percentage)?)
}

/// Units of a catalog entry a donation funds, rounded half-up to the entry's
/// display precision.
pub fn comparison_amount(value: Money, comparison: &ComparisonItem) -> Money {
    (value / comparison.cost_per_unit).round_dp_with_strategy(
        comparison.fraction_digits,
        RoundingStrategy::MidpointAwayFromZero,
    )
}

/// Whole units funded. The explicit alternative to [`comparison_amount`]
/// for callers that never want a partial unit rounded up.
pub fn comparison_amount_floored(value: Money, comparison: &ComparisonItem) -> Money {
    (value / comparison.cost_per_unit).floor()
}

impl CalculationEngine {
    /// Project the effect of donating a percentage of an income: the reduced
    /// income is run through the full calculation, and the donated amount is
    /// translated into catalog comparison units.
    ///
    /// A 100% donation leaves no income to rank and is rejected here even
    /// though the pure helpers accept the boundary.
    pub fn donation_impact(
        &self,
        input: &DonationInput,
    ) -> GlobalIncomeResult<ComputationOutput<DonationImpact>> {
        let start = Instant::now();

        let retained = income_after_donating(input.income, input.donation_percentage)?;
        let donated = input.income - retained;

        let post = self.calculate(&CalculationInput {
            income: retained,
            country_code: input.country_code.clone(),
            household: input.household,
        })?;
        let mut warnings = post.warnings;
        let result = post.result;

        let comparisons = if result.income_centile <= MEDIAN_CENTILE {
            warnings.push(
                "post-donation income is at or below the global median; comparisons suppressed"
                    .to_string(),
            );
            None
        } else {
            Some(
                self.data()
                    .comparisons()
                    .iter()
                    .map(|item| {
                        let quantity = comparison_amount(donated, item);
                        DonationComparison {
                            id: item.id.clone(),
                            description: item
                                .description_template
                                .replacen("{}", &quantity.to_string(), 1),
                            quantity,
                        }
                    })
                    .collect(),
            )
        };

        let impact = DonationImpact {
            donation_percentage: input.donation_percentage,
            income_after_donating: retained,
            donation_value: donated,
            result,
            comparisons,
        };

        let elapsed = start.elapsed().as_micros() as u64;

        Ok(with_metadata(
            "Donation impact projection",
            input,
            warnings,
            self.dataset_version(),
            elapsed,
            impact,
        ))
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn validate_donation(income: Money, percentage: Decimal) -> GlobalIncomeResult<()> {
    if income <= Decimal::ZERO {
        return Err(GlobalIncomeError::InvalidInput {
            field: "income".into(),
            reason: "must be positive".into(),
        });
    }
    if percentage < Decimal::ZERO || percentage > FULL_SHARE {
        return Err(GlobalIncomeError::InvalidInput {
            field: "donation_percentage".into(),
            reason: "must be between 0 and 100".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn bednets() -> ComparisonItem {
        ComparisonItem {
            id: "bednets".into(),
            cost_per_unit: dec!(4.93),
            fraction_digits: 0,
            description_template: "{} anti-malaria bednets distributed".into(),
            icon: "bednet".into(),
        }
    }

    #[test]
    fn test_income_after_donating() {
        assert_eq!(income_after_donating(dec!(30000), dec!(10)).unwrap(), dec!(27000));
    }

    #[test]
    fn test_donation_boundaries() {
        assert_eq!(income_after_donating(dec!(30000), dec!(0)).unwrap(), dec!(30000));
        assert_eq!(income_after_donating(dec!(30000), dec!(100)).unwrap(), dec!(0));
        assert_eq!(donation_value(dec!(30000), dec!(0)).unwrap(), dec!(0));
        assert_eq!(donation_value(dec!(30000), dec!(100)).unwrap(), dec!(30000));
    }

    #[test]
    fn test_fractional_percentage() {
        assert_eq!(
            income_after_donating(dec!(30000), dec!(12.5)).unwrap(),
            dec!(26250)
        );
    }

    #[test]
    fn test_percentage_out_of_range_rejected() {
        assert!(income_after_donating(dec!(30000), dec!(-1)).is_err());
        assert!(income_after_donating(dec!(30000), dec!(101)).is_err());
    }

    #[test]
    fn test_non_positive_income_rejected() {
        assert!(income_after_donating(dec!(0), dec!(10)).is_err());
    }

    #[test]
    fn test_comparison_amount_rounds_to_display_precision() {
        assert_eq!(comparison_amount(dec!(498), &bednets()), dec!(101));
    }

    #[test]
    fn test_comparison_amount_floored() {
        let lives = ComparisonItem {
            id: "lives".into(),
            cost_per_unit: dec!(3500),
            fraction_digits: 1,
            description_template: "{} lives saved".into(),
            icon: "heart".into(),
        };
        assert_eq!(comparison_amount(dec!(3710), &lives), dec!(1.1));
        assert_eq!(comparison_amount_floored(dec!(3710), &lives), dec!(1));
    }
}
