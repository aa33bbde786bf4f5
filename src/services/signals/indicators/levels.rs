//! Support and resistance detection from local extremes.

use super::{Indicator, IndicatorCategory};
use crate::types::MarketSeries;

/// Bars skipped at each end of the series.
const EDGE: usize = 10;
/// Neighbours checked on each side of a candidate.
const NEIGHBOURS: usize = 5;
/// Levels kept per side.
const MAX_LEVELS: usize = 3;

/// Support and resistance levels, each sorted ascending.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyLevels {
    pub support: Vec<f64>,
    pub resistance: Vec<f64>,
}

/// Local-extreme support/resistance finder.
///
/// A close is support when none of its five neighbours on either side is
/// lower, and resistance when none is higher. The first three of each
/// (oldest first) are kept and then sorted ascending.
#[derive(Default)]
pub struct SupportResistance;

impl Indicator for SupportResistance {
    type Output = KeyLevels;

    fn id(&self) -> &str {
        "support_resistance"
    }

    fn name(&self) -> &str {
        "Support/Resistance"
    }

    fn category(&self) -> IndicatorCategory {
        IndicatorCategory::Structure
    }

    fn min_periods(&self) -> usize {
        EDGE * 2
    }

    fn calculate(&self, series: &MarketSeries) -> Option<KeyLevels> {
        if series.len() < self.min_periods() {
            return None;
        }

        let closes = series.closes();
        let mut levels = KeyLevels::default();

        for i in EDGE..closes.len() - EDGE {
            let price = closes[i];
            let neighbours = closes[i - NEIGHBOURS..=i + NEIGHBOURS]
                .iter()
                .enumerate()
                .filter(|(offset, _)| *offset != NEIGHBOURS)
                .map(|(_, p)| *p);

            let (mut is_support, mut is_resistance) = (true, true);
            for p in neighbours {
                if p < price {
                    is_support = false;
                }
                if p > price {
                    is_resistance = false;
                }
            }

            if is_support && levels.support.len() < MAX_LEVELS {
                levels.support.push(price);
            }
            if is_resistance && levels.resistance.len() < MAX_LEVELS {
                levels.resistance.push(price);
            }
        }

        levels.support.sort_by(f64::total_cmp);
        levels.resistance.sort_by(f64::total_cmp);
        Some(levels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Zig-zag with a period of 12 bars between 90 and 110.
    fn zigzag(count: usize) -> MarketSeries {
        MarketSeries::from_closes(
            (0..count)
                .map(|i| {
                    let phase = (i % 12) as f64;
                    if phase <= 6.0 {
                        90.0 + phase * (20.0 / 6.0)
                    } else {
                        110.0 - (phase - 6.0) * (20.0 / 6.0)
                    }
                })
                .collect(),
        )
    }

    #[test]
    fn test_levels_short_history() {
        let series = MarketSeries::from_closes(vec![1.0; 19]);
        assert!(SupportResistance.calculate(&series).is_none());
        assert_eq!(SupportResistance.value(&series), KeyLevels::default());
    }

    #[test]
    fn test_levels_zigzag() {
        let levels = SupportResistance.calculate(&zigzag(100)).unwrap();
        assert_eq!(levels.support.len(), 3);
        assert_eq!(levels.resistance.len(), 3);
        assert!(levels.support.iter().all(|s| (s - 90.0).abs() < 1e-9));
        assert!(levels.resistance.iter().all(|r| (r - 110.0).abs() < 1e-9));
    }

    #[test]
    fn test_levels_sorted_ascending() {
        // V-shaped troughs at 12, 24, 36 with falling depth.
        let troughs = [(12usize, 95.0), (24, 90.0), (36, 85.0)];
        let closes: Vec<f64> = (0..50usize)
            .map(|i| {
                let (t, depth) = troughs
                    .iter()
                    .min_by_key(|(t, _)| t.abs_diff(i))
                    .copied()
                    .unwrap();
                depth + 2.0 * t.abs_diff(i) as f64
            })
            .collect();
        let levels = SupportResistance
            .calculate(&MarketSeries::from_closes(closes))
            .unwrap();
        assert_eq!(levels.support, vec![85.0, 90.0, 95.0]);
    }

    #[test]
    fn test_levels_monotonic_series_has_none() {
        let series = MarketSeries::from_closes((0..60).map(|i| i as f64).collect());
        let levels = SupportResistance.calculate(&series).unwrap();
        assert!(levels.support.is_empty());
        assert!(levels.resistance.is_empty());
    }
}
