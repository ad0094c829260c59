use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::GlobalIncomeError;
use crate::types::Household;
use crate::GlobalIncomeResult;

// OECD-modified equivalence scale: first adult 1.0, each further adult 0.7,
// each child 0.5.
const ADDITIONAL_ADULT_WEIGHT: Decimal = dec!(0.7);
const CHILD_WEIGHT: Decimal = dec!(0.5);

/// Weighted household size used to normalize incomes for shared living
/// costs. Strictly positive; non-decreasing in both adults and children.
/// A household with no adults is invalid input, not a default.
pub fn equivalization_factor(household: &Household) -> GlobalIncomeResult<Decimal> {
    if household.adults == 0 {
        return Err(GlobalIncomeError::InvalidInput {
            field: "household.adults".into(),
            reason: "at least one adult is required".into(),
        });
    }

    let extra_adults = Decimal::from(household.adults - 1);
    let children = Decimal::from(household.children);
    Ok(Decimal::ONE + ADDITIONAL_ADULT_WEIGHT * extra_adults + CHILD_WEIGHT * children)
}
