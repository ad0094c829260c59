//! The conversion pipeline: PPP internationalization, exchange-rate display
//! conversion, and household equivalization. Stages are composed by the
//! engine, never fused; each one rounds its own output to 2 places.

use crate::data::ReferenceData;
use crate::error::GlobalIncomeError;
use crate::household::equivalization_factor;
use crate::types::{round_money, Household, Money};
use crate::GlobalIncomeResult;

/// Express a local-currency income in international dollars through the
/// country's PPP factor.
pub fn internationalize(
    data: &ReferenceData,
    income: Money,
    country_code: &str,
) -> GlobalIncomeResult<Money> {
    let factor =
        data.ppp_factor(country_code)
            .ok_or_else(|| GlobalIncomeError::DataNotFound {
                table: "ppp_conversion",
                key: country_code.to_string(),
            })?;
    Ok(round_money(income / factor))
}

/// Convert a local-currency income to USD at market exchange rates, for
/// presentation. Resolves the country's currency first; either lookup can
/// miss independently.
pub fn convert_to_display(
    data: &ReferenceData,
    income: Money,
    country_code: &str,
) -> GlobalIncomeResult<Money> {
    let currency =
        data.currency_code_for(country_code)
            .ok_or_else(|| GlobalIncomeError::DataNotFound {
                table: "country_currencies",
                key: country_code.to_string(),
            })?;
    let rate = data
        .exchange_rate(currency)
        .ok_or_else(|| GlobalIncomeError::DataNotFound {
            table: "exchange_rates",
            key: currency.to_string(),
        })?;
    Ok(round_money(income / rate))
}

/// Normalize an income by household composition. Always applied after
/// internationalization, never before.
pub fn equivalize(income: Money, household: &Household) -> GlobalIncomeResult<Money> {
    let factor = equivalization_factor(household)?;
    Ok(round_money(income / factor))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn data() -> ReferenceData {
        ReferenceData::builtin().unwrap()
    }

    #[test]
    fn test_internationalize_germany() {
        // 20 EUR at a PPP factor of 0.75
        assert_eq!(internationalize(&data(), dec!(20), "DEU").unwrap(), dec!(26.67));
    }

    #[test]
    fn test_internationalize_japan() {
        // 10000 JPY buys roughly 98 international dollars
        assert_eq!(
            internationalize(&data(), dec!(10000), "JPN").unwrap(),
            dec!(98.04)
        );
    }

    #[test]
    fn test_internationalize_unknown_country() {
        let result = internationalize(&data(), dec!(1000), "XKX");
        assert!(matches!(
            result,
            Err(GlobalIncomeError::DataNotFound {
                table: "ppp_conversion",
                ..
            })
        ));
    }

    #[test]
    fn test_convert_to_display_australia() {
        assert_eq!(
            convert_to_display(&data(), dec!(10000), "AUS").unwrap(),
            dec!(6369.43)
        );
    }

    #[test]
    fn test_convert_to_display_unknown_country() {
        let result = convert_to_display(&data(), dec!(1000), "XKX");
        assert!(matches!(
            result,
            Err(GlobalIncomeError::DataNotFound {
                table: "country_currencies",
                ..
            })
        ));
    }

    #[test]
    fn test_equivalize_one_adult_two_children() {
        let household = Household {
            adults: 1,
            children: 2,
        };
        assert_eq!(equivalize(dec!(10000), &household).unwrap(), dec!(5000.00));
    }

    #[test]
    fn test_equivalize_large_household_rounds() {
        let household = Household {
            adults: 2,
            children: 5,
        };
        assert_eq!(equivalize(dec!(10000), &household).unwrap(), dec!(2380.95));
    }

    #[test]
    fn test_equivalize_rejects_no_adults() {
        let household = Household {
            adults: 0,
            children: 0,
        };
        assert!(equivalize(dec!(10000), &household).is_err());
    }
}
