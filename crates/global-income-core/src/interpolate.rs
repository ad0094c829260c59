//! Piecewise-linear interpolation over the world income distribution.
//!
//! Out-of-range queries clamp to the nearest anchor in both directions;
//! neither tail of the empirical distribution is linear, so nothing is
//! extrapolated.

use crate::data::IncomeAnchor;
use crate::types::{round_money, round_tenth, Centile, Money};

/// Bidirectional monotone interpolator built once from the validated anchor
/// sequence. A pure function of the table; no other state.
#[derive(Debug, Clone)]
pub struct DistributionInterpolator {
    anchors: Vec<IncomeAnchor>,
}

impl DistributionInterpolator {
    /// Anchors must come from a validated [`crate::data::ReferenceData`]:
    /// at least two points, strictly increasing percentile, non-decreasing
    /// income.
    pub(crate) fn new(anchors: Vec<IncomeAnchor>) -> Self {
        Self { anchors }
    }

    /// Percentile rank of an annual international-dollar income, rounded to
    /// 1 decimal place. Amounts outside the anchor range clamp to the first
    /// or last anchor's percentile.
    pub fn centile_from_income(&self, amount: Money) -> Centile {
        let lowest = self.anchors[0];
        let highest = self.anchors[self.anchors.len() - 1];

        if amount <= lowest.income {
            return round_tenth(lowest.percentile);
        }
        if amount >= highest.income {
            return round_tenth(highest.percentile);
        }
        for pair in self.anchors.windows(2) {
            let (lo, hi) = (pair[0], pair[1]);
            if amount <= hi.income {
                let fraction = (amount - lo.income) / (hi.income - lo.income);
                return round_tenth(lo.percentile + (hi.percentile - lo.percentile) * fraction);
            }
        }
        round_tenth(highest.percentile)
    }

    /// Annual international-dollar income at a percentile, rounded to
    /// 2 decimal places. Centiles outside the anchor range clamp to the
    /// first or last anchor's income.
    pub fn income_from_centile(&self, centile: Centile) -> Money {
        let lowest = self.anchors[0];
        let highest = self.anchors[self.anchors.len() - 1];

        if centile <= lowest.percentile {
            return round_money(lowest.income);
        }
        if centile >= highest.percentile {
            return round_money(highest.income);
        }
        for pair in self.anchors.windows(2) {
            let (lo, hi) = (pair[0], pair[1]);
            if centile <= hi.percentile {
                let fraction = (centile - lo.percentile) / (hi.percentile - lo.percentile);
                return round_money(lo.income + (hi.income - lo.income) * fraction);
            }
        }
        round_money(highest.income)
    }
}
