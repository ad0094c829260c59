//! Reference datasets: world income distribution anchors, PPP conversion
//! factors, exchange rates, country→currency mapping, and the donation
//! comparison catalog.
//!
//! All tables are loaded and validated once, then treated as immutable for
//! the life of the engine. Tests substitute fixture tables through
//! [`ReferenceData::from_parts`]; nothing here is process-global.

use std::collections::HashMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::GlobalIncomeError;
use crate::types::{ComparisonItem, Money};
use crate::GlobalIncomeResult;

const INCOME_CENTILES_JSON: &str = include_str!("../data/income_centiles.json");
const PPP_CONVERSION_JSON: &str = include_str!("../data/ppp_conversion.json");
const EXCHANGE_RATES_JSON: &str = include_str!("../data/exchange_rates.json");
const COUNTRY_CURRENCIES_JSON: &str = include_str!("../data/country_currencies.json");
const COMPARISONS_JSON: &str = include_str!("../data/comparisons.json");

const DAYS_PER_YEAR: Decimal = dec!(365);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One (percentile, annual income) point of the empirical world income
/// distribution, in international dollars.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IncomeAnchor {
    pub percentile: Decimal,
    pub income: Money,
}

/// The full set of immutable reference tables the engine computes against.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    version: String,
    anchors: Vec<IncomeAnchor>,
    ppp_factors: HashMap<String, Decimal>,
    exchange_rates: HashMap<String, Decimal>,
    currencies: HashMap<String, String>,
    comparisons: Vec<ComparisonItem>,
}

// Raw document shapes for the embedded JSON. Decimals are carried as strings
// so they parse exactly.

#[derive(Debug, Deserialize)]
struct DistributionDocument {
    version: String,
    anchors: Vec<DailyAnchor>,
}

#[derive(Debug, Deserialize)]
struct DailyAnchor {
    percentile: Decimal,
    daily_dollars: Decimal,
}

#[derive(Debug, Deserialize)]
struct PppDocument {
    version: String,
    factors: HashMap<String, Decimal>,
}

#[derive(Debug, Deserialize)]
struct RatesDocument {
    version: String,
    rates: HashMap<String, Decimal>,
}

#[derive(Debug, Deserialize)]
struct CurrenciesDocument {
    version: String,
    currencies: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct ComparisonsDocument {
    version: String,
    comparisons: Vec<ComparisonItem>,
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

impl ReferenceData {
    /// Parse and validate the embedded datasets. Intended to run once at
    /// process start; the result is read-only afterwards.
    pub fn builtin() -> GlobalIncomeResult<Self> {
        let distribution: DistributionDocument = serde_json::from_str(INCOME_CENTILES_JSON)?;
        let ppp: PppDocument = serde_json::from_str(PPP_CONVERSION_JSON)?;
        let rates: RatesDocument = serde_json::from_str(EXCHANGE_RATES_JSON)?;
        let currencies: CurrenciesDocument = serde_json::from_str(COUNTRY_CURRENCIES_JSON)?;
        let comparisons: ComparisonsDocument = serde_json::from_str(COMPARISONS_JSON)?;

        let versions = [
            &ppp.version,
            &rates.version,
            &currencies.version,
            &comparisons.version,
        ];
        if versions.iter().any(|v| **v != distribution.version) {
            return Err(GlobalIncomeError::InvalidDataset(format!(
                "dataset documents disagree on version (distribution is '{}')",
                distribution.version
            )));
        }

        let anchors = distribution
            .anchors
            .into_iter()
            .map(|a| IncomeAnchor {
                percentile: a.percentile,
                income: a.daily_dollars * DAYS_PER_YEAR,
            })
            .collect();

        Self::from_parts(
            distribution.version,
            anchors,
            ppp.factors,
            rates.rates,
            currencies.currencies,
            comparisons.comparisons,
        )
    }

    /// Validating constructor over explicit tables. This is the seam tests
    /// use to substitute fixtures for the embedded datasets.
    pub fn from_parts(
        version: String,
        anchors: Vec<IncomeAnchor>,
        ppp_factors: HashMap<String, Decimal>,
        exchange_rates: HashMap<String, Decimal>,
        currencies: HashMap<String, String>,
        comparisons: Vec<ComparisonItem>,
    ) -> GlobalIncomeResult<Self> {
        validate_anchors(&anchors)?;
        validate_positive_factors("ppp_conversion", &ppp_factors)?;
        validate_positive_factors("exchange_rates", &exchange_rates)?;
        validate_comparisons(&comparisons)?;

        Ok(Self {
            version,
            anchors,
            ppp_factors,
            exchange_rates,
            currencies,
            comparisons,
        })
    }
}

fn validate_anchors(anchors: &[IncomeAnchor]) -> GlobalIncomeResult<()> {
    if anchors.len() < 2 {
        return Err(GlobalIncomeError::InvalidDataset(
            "distribution needs at least two anchor points".into(),
        ));
    }
    for anchor in anchors {
        if anchor.percentile < Decimal::ZERO || anchor.percentile > Decimal::ONE_HUNDRED {
            return Err(GlobalIncomeError::InvalidDataset(format!(
                "anchor percentile {} outside [0, 100]",
                anchor.percentile
            )));
        }
        if anchor.income < Decimal::ZERO {
            return Err(GlobalIncomeError::InvalidDataset(format!(
                "anchor income {} is negative",
                anchor.income
            )));
        }
    }
    for pair in anchors.windows(2) {
        if pair[1].percentile <= pair[0].percentile {
            return Err(GlobalIncomeError::InvalidDataset(format!(
                "anchor percentiles not strictly increasing at {}",
                pair[1].percentile
            )));
        }
        if pair[1].income < pair[0].income {
            return Err(GlobalIncomeError::InvalidDataset(format!(
                "anchor income decreases at percentile {}",
                pair[1].percentile
            )));
        }
    }
    Ok(())
}

fn validate_positive_factors(
    table: &str,
    factors: &HashMap<String, Decimal>,
) -> GlobalIncomeResult<()> {
    for (key, factor) in factors {
        if *factor <= Decimal::ZERO {
            return Err(GlobalIncomeError::InvalidDataset(format!(
                "{table} factor for '{key}' must be positive, got {factor}"
            )));
        }
    }
    Ok(())
}

fn validate_comparisons(comparisons: &[ComparisonItem]) -> GlobalIncomeResult<()> {
    for (i, item) in comparisons.iter().enumerate() {
        if item.cost_per_unit <= Decimal::ZERO {
            return Err(GlobalIncomeError::InvalidDataset(format!(
                "comparison '{}' has non-positive cost per unit",
                item.id
            )));
        }
        if comparisons[..i].iter().any(|other| other.id == item.id) {
            return Err(GlobalIncomeError::InvalidDataset(format!(
                "duplicate comparison id '{}'",
                item.id
            )));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Accessors
// ---------------------------------------------------------------------------

impl ReferenceData {
    /// Dataset version shared by all tables, e.g. "2025-06".
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Distribution anchors, sorted by percentile.
    pub fn anchors(&self) -> &[IncomeAnchor] {
        &self.anchors
    }

    /// PPP factor for a country, if the dataset covers it.
    pub fn ppp_factor(&self, country_code: &str) -> Option<Decimal> {
        self.ppp_factors.get(country_code).copied()
    }

    /// Units of a currency per USD, if the dataset covers it.
    pub fn exchange_rate(&self, currency_code: &str) -> Option<Decimal> {
        self.exchange_rates.get(currency_code).copied()
    }

    /// ISO currency code for a country. Unknown countries are an expected,
    /// user-facing case: `None`, never an error.
    pub fn currency_code_for(&self, country_code: &str) -> Option<&str> {
        self.currencies.get(country_code).map(String::as_str)
    }

    /// The donation comparison catalog, in display order.
    pub fn comparisons(&self) -> &[ComparisonItem] {
        &self.comparisons
    }

    /// A single catalog entry by id.
    pub fn comparison(&self, id: &str) -> Option<&ComparisonItem> {
        self.comparisons.iter().find(|c| c.id == id)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn anchor(percentile: Decimal, income: Decimal) -> IncomeAnchor {
        IncomeAnchor { percentile, income }
    }

    #[test]
    fn test_builtin_loads_and_validates() {
        let data = ReferenceData::builtin().unwrap();
        assert_eq!(data.version(), "2025-06");
        assert!(data.anchors().len() >= 2);
        assert_eq!(data.ppp_factor("GBR"), Some(dec!(0.91)));
        assert_eq!(data.exchange_rate("GBP"), Some(dec!(0.82)));
        assert_eq!(data.currency_code_for("AUS"), Some("AUD"));
        assert!(data.comparison("bednets").is_some());
    }

    #[test]
    fn test_anchor_incomes_are_annualized() {
        let data = ReferenceData::builtin().unwrap();
        // First anchor: 0.95 dollars a day
        assert_eq!(data.anchors()[0].income, dec!(346.75));
    }

    #[test]
    fn test_unknown_country_is_none() {
        let data = ReferenceData::builtin().unwrap();
        assert_eq!(data.ppp_factor("XKX"), None);
        assert_eq!(data.currency_code_for("XKX"), None);
    }

    #[test]
    fn test_rejects_single_anchor() {
        let result = ReferenceData::from_parts(
            "test".into(),
            vec![anchor(dec!(50), dec!(2800))],
            HashMap::new(),
            HashMap::new(),
            HashMap::new(),
            vec![],
        );
        assert!(matches!(result, Err(GlobalIncomeError::InvalidDataset(_))));
    }

    #[test]
    fn test_rejects_unsorted_percentiles() {
        let result = ReferenceData::from_parts(
            "test".into(),
            vec![anchor(dec!(50), dec!(2800)), anchor(dec!(40), dec!(3000))],
            HashMap::new(),
            HashMap::new(),
            HashMap::new(),
            vec![],
        );
        assert!(matches!(result, Err(GlobalIncomeError::InvalidDataset(_))));
    }

    #[test]
    fn test_rejects_decreasing_income() {
        let result = ReferenceData::from_parts(
            "test".into(),
            vec![anchor(dec!(40), dec!(3000)), anchor(dec!(50), dec!(2800))],
            HashMap::new(),
            HashMap::new(),
            HashMap::new(),
            vec![],
        );
        assert!(matches!(result, Err(GlobalIncomeError::InvalidDataset(_))));
    }

    #[test]
    fn test_rejects_non_positive_factor() {
        let mut ppp = HashMap::new();
        ppp.insert("GBR".to_string(), dec!(0));
        let result = ReferenceData::from_parts(
            "test".into(),
            vec![anchor(dec!(1), dec!(300)), anchor(dec!(99), dec!(50000))],
            ppp,
            HashMap::new(),
            HashMap::new(),
            vec![],
        );
        assert!(matches!(result, Err(GlobalIncomeError::InvalidDataset(_))));
    }

    #[test]
    fn test_rejects_duplicate_comparison_ids() {
        let item = ComparisonItem {
            id: "bednets".into(),
            cost_per_unit: dec!(4.93),
            fraction_digits: 0,
            description_template: "{} bednets".into(),
            icon: "bednet".into(),
        };
        let result = ReferenceData::from_parts(
            "test".into(),
            vec![anchor(dec!(1), dec!(300)), anchor(dec!(99), dec!(50000))],
            HashMap::new(),
            HashMap::new(),
            HashMap::new(),
            vec![item.clone(), item],
        );
        assert!(matches!(result, Err(GlobalIncomeError::InvalidDataset(_))));
    }
}
