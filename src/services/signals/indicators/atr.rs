//! Average True Range (ATR) indicator.

use super::{mean, Indicator, IndicatorCategory};
use crate::types::MarketSeries;

/// Bar low approximated as this fraction of the bar's close.
///
/// The series carries closes only, so each bar is treated as
/// high = close and low = close * SYNTHETIC_LOW_RATIO.
pub const SYNTHETIC_LOW_RATIO: f64 = 0.98;

/// ATR (Average True Range) indicator.
///
/// Mean of the last `period` true ranges, each computed against the
/// previous close.
pub struct Atr {
    period: usize,
}

impl Default for Atr {
    fn default() -> Self {
        Self { period: 14 }
    }
}

impl Atr {
    fn true_range(close: f64, prev_close: f64) -> f64 {
        let high = close;
        let low = close * SYNTHETIC_LOW_RATIO;
        (high - low)
            .max((high - prev_close).abs())
            .max((low - prev_close).abs())
    }
}

impl Indicator for Atr {
    type Output = f64;

    fn id(&self) -> &str {
        "atr"
    }

    fn name(&self) -> &str {
        "ATR (14)"
    }

    fn category(&self) -> IndicatorCategory {
        IndicatorCategory::Volatility
    }

    fn min_periods(&self) -> usize {
        self.period + 1
    }

    fn calculate(&self, series: &MarketSeries) -> Option<f64> {
        if self.period == 0 || series.len() < self.min_periods() {
            return None;
        }

        let closes = series.closes();
        let ranges: Vec<f64> = closes[closes.len() - self.period - 1..]
            .windows(2)
            .map(|pair| Self::true_range(pair[1], pair[0]))
            .collect();

        mean(&ranges)
    }
}
