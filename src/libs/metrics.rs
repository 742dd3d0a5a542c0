//! Harvest loss and efficiency calculations.
//!
//! Every function here is pure: no state, no I/O and no input validation.
//! Callers are expected to pass `area > 0`, `yield_per_ha > 0` and a loss
//! percentage within `0..=100`; the engine trusts them.
//!
//! ## Rounding
//!
//! All tonnage, money and percentage outputs are rounded to two decimal
//! places, half away from zero (`f64::round`). Intermediate values are kept
//! unrounded except where a formula is defined on a rounded result
//! (harvested tonnage subtracts the rounded loss tonnage).
//!
//! ## Formulas
//!
//! ```text
//! gross            = area * yield_per_ha
//! tonnes lost      = gross * loss_pct / 100
//! harvested        = gross - tonnes lost
//! financial loss   = tonnes lost * price
//! efficiency       = max(0, 100 - loss_pct)
//! savings          = gross * (current - target) / 100 * price   (0 when current <= target)
//! annual savings   = savings * harvests_per_year
//! ```
//!
//! Default price and target loss are not global: resolve them through
//! [`HarvestConfig`](crate::libs::config::HarvestConfig) before calling in.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::HarvestError;

/// Discrete loss classification derived from the loss percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LossTier {
    Optimal,
    Good,
    Regular,
    High,
    Critical,
}

impl LossTier {
    pub const ALL: [LossTier; 5] = [LossTier::Optimal, LossTier::Good, LossTier::Regular, LossTier::High, LossTier::Critical];

    pub fn as_str(&self) -> &'static str {
        match self {
            LossTier::Optimal => "Optimal",
            LossTier::Good => "Good",
            LossTier::Regular => "Regular",
            LossTier::High => "High",
            LossTier::Critical => "Critical",
        }
    }
}

impl fmt::Display for LossTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LossTier {
    type Err = HarvestError;

    /// Parses the exact vocabulary produced by [`classify`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LossTier::ALL
            .into_iter()
            .find(|tier| tier.as_str() == s)
            .ok_or_else(|| HarvestError::validation("classification", format!("unknown tier '{}'", s)))
    }
}

/// Summary of a list of loss percentages.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct LossStatistics {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub count: usize,
}

/// Difference between two harvests, second minus first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HarvestComparison {
    pub loss_pct_delta: f64,
    pub tonnes_delta: f64,
    pub improved: bool,
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn loss_tonnage(area: f64, yield_per_ha: f64, loss_pct: f64) -> f64 {
    round2(area * yield_per_ha * (loss_pct / 100.0))
}

pub fn financial_loss(tonnes_lost: f64, price_per_tonne: f64) -> f64 {
    round2(tonnes_lost * price_per_tonne)
}

pub fn financial_loss_from_inputs(area: f64, yield_per_ha: f64, loss_pct: f64, price_per_tonne: f64) -> f64 {
    financial_loss(loss_tonnage(area, yield_per_ha, loss_pct), price_per_tonne)
}

pub fn harvested_tonnage(area: f64, yield_per_ha: f64, loss_pct: f64) -> f64 {
    round2(area * yield_per_ha - loss_tonnage(area, yield_per_ha, loss_pct))
}

pub fn efficiency(loss_pct: f64) -> f64 {
    round2((100.0 - loss_pct).max(0.0))
}

/// Bands are inclusive on their upper edge and checked in ascending order.
pub fn classify(loss_pct: f64) -> LossTier {
    if loss_pct <= 5.0 {
        LossTier::Optimal
    } else if loss_pct <= 8.0 {
        LossTier::Good
    } else if loss_pct <= 12.0 {
        LossTier::Regular
    } else if loss_pct <= 15.0 {
        LossTier::High
    } else {
        LossTier::Critical
    }
}

/// Money recovered by bringing `current_loss_pct` down to `target_loss_pct`.
///
/// Returns `0.0` when the harvest is already at or below the target.
pub fn potential_savings(area: f64, yield_per_ha: f64, current_loss_pct: f64, target_loss_pct: f64, price_per_tonne: f64) -> f64 {
    if current_loss_pct <= target_loss_pct {
        return 0.0;
    }

    let recovered_tonnes = area * yield_per_ha * ((current_loss_pct - target_loss_pct) / 100.0);
    round2(recovered_tonnes * price_per_tonne)
}

pub fn projected_annual_savings(
    area: f64,
    yield_per_ha: f64,
    current_loss_pct: f64,
    target_loss_pct: f64,
    price_per_tonne: f64,
    harvests_per_year: u32,
) -> f64 {
    let per_harvest = potential_savings(area, yield_per_ha, current_loss_pct, target_loss_pct, price_per_tonne);
    round2(per_harvest * harvests_per_year as f64)
}

/// Mean, minimum and maximum of `losses`; all zero for an empty slice.
pub fn loss_statistics(losses: &[f64]) -> LossStatistics {
    if losses.is_empty() {
        return LossStatistics::default();
    }

    let sum: f64 = losses.iter().sum();
    let min = losses.iter().copied().fold(f64::INFINITY, f64::min);
    let max = losses.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    LossStatistics {
        mean: round2(sum / losses.len() as f64),
        min: round2(min),
        max: round2(max),
        count: losses.len(),
    }
}

/// Compares two harvests given as `(loss_pct, harvested_tonnes)` pairs.
pub fn compare_harvests(first: (f64, f64), second: (f64, f64)) -> HarvestComparison {
    let loss_pct_delta = round2(second.0 - first.0);
    HarvestComparison {
        loss_pct_delta,
        tonnes_delta: round2(second.1 - first.1),
        improved: second.0 - first.0 < 0.0,
    }
}

/// Estimated hours for a harvester to cover `area` hectares.
pub fn harvest_duration_hours(area: f64, speed_kmh: f64, cut_width_m: f64) -> f64 {
    if speed_kmh <= 0.0 || cut_width_m <= 0.0 {
        return 0.0;
    }

    let area_m2 = area * 10_000.0;
    let distance_km = area_m2 / (cut_width_m * 1000.0);
    round2(distance_km / speed_kmh)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round2_is_half_away_from_zero() {
        assert_eq!(round2(1.005_000_1), 1.01);
        assert_eq!(round2(2.5), 2.5);
        assert_eq!(round2(-0.125_000_1), -0.13);
    }

    #[test]
    fn tier_names_round_trip_through_from_str() {
        for tier in LossTier::ALL {
            assert_eq!(tier.to_string().parse::<LossTier>().unwrap(), tier);
        }
        assert!("optimal".parse::<LossTier>().is_err());
    }

    #[test]
    fn duration_is_zero_without_speed() {
        assert_eq!(harvest_duration_hours(10.0, 0.0, 1.5), 0.0);
        assert_eq!(harvest_duration_hours(10.0, 5.0, 0.0), 0.0);
    }

    #[test]
    fn duration_for_ten_hectares() {
        // 100 000 m2 / 1500 m = 66.67 km at 5 km/h
        assert_eq!(harvest_duration_hours(10.0, 5.0, 1.5), 13.33);
    }
}
