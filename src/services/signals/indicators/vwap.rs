//! Volume Weighted Average Price (VWAP) indicator.

use super::{Indicator, IndicatorCategory};
use crate::types::MarketSeries;

/// VWAP over the whole series.
///
/// Requires volumes aligned with closes and a non-zero total volume.
#[derive(Default)]
pub struct Vwap;

impl Indicator for Vwap {
    type Output = f64;

    fn id(&self) -> &str {
        "vwap"
    }

    fn name(&self) -> &str {
        "VWAP"
    }

    fn category(&self) -> IndicatorCategory {
        IndicatorCategory::Volume
    }

    fn min_periods(&self) -> usize {
        1
    }

    fn calculate(&self, series: &MarketSeries) -> Option<f64> {
        if !series.volumes_aligned() {
            return None;
        }

        let (pv, volume) = series
            .closes()
            .iter()
            .zip(series.volumes())
            .fold((0.0, 0.0), |(pv, vol), (p, v)| (pv + p * v, vol + v));

        if volume > 0.0 {
            Some(pv / volume)
        } else {
            None
        }
    }
}
