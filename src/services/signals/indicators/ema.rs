//! Exponential Moving Average (EMA) indicator.

use super::{Indicator, IndicatorCategory, Sma};
use crate::types::MarketSeries;

/// EMA (Exponential Moving Average) indicator.
///
/// Seeded with the SMA of the first `period` closes, then smoothed with
/// multiplier 2/(period+1).
pub struct Ema {
    period: usize,
}

impl Ema {
    pub fn new(period: usize) -> Self {
        Self { period }
    }
}

/// EMA of every position from `period - 1` onward.
///
/// The first element is the SMA seed. Empty if there are fewer than `period`
/// values.
pub fn ema_series(values: &[f64], period: usize) -> Vec<f64> {
    let Some(seed) = Sma::compute(&values[..period.min(values.len())], period) else {
        return Vec::new();
    };

    let multiplier = 2.0 / (period as f64 + 1.0);
    let mut ema = Vec::with_capacity(values.len() - period + 1);
    let mut current = seed;
    ema.push(current);

    for value in &values[period..] {
        current = (value - current) * multiplier + current;
        ema.push(current);
    }

    ema
}

impl Indicator for Ema {
    type Output = f64;

    fn id(&self) -> &str {
        match self.period {
            9 => "ema9",
            21 => "ema21",
            _ => "ema",
        }
    }

    fn name(&self) -> &str {
        match self.period {
            9 => "EMA (9)",
            21 => "EMA (21)",
            _ => "EMA",
        }
    }

    fn category(&self) -> IndicatorCategory {
        IndicatorCategory::Trend
    }

    fn min_periods(&self) -> usize {
        self.period
    }

    fn calculate(&self, series: &MarketSeries) -> Option<f64> {
        ema_series(series.closes(), self.period).last().copied()
    }
}
