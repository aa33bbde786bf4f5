//! Stochastic Oscillator indicator.

use super::{mean, Indicator, IndicatorCategory};
use crate::types::{MarketSeries, StochasticValues};

/// Stochastic Oscillator.
///
/// Compares the close to the close range over a period:
/// %K = (Close - Lowest) / (Highest - Lowest) * 100
/// %D = mean of the last three %K readings
///
/// Signals:
/// - Below 20: Oversold (bullish)
/// - Above 80: Overbought (bearish)
pub struct Stochastic {
    k_period: usize,
    d_period: usize,
}

impl Default for Stochastic {
    fn default() -> Self {
        Self {
            k_period: 14,
            d_period: 3,
        }
    }
}

impl Stochastic {
    /// %K for the window ending at `end` (inclusive). 50 when the range is flat.
    fn raw_k(closes: &[f64], end: usize, period: usize) -> f64 {
        let window = &closes[end + 1 - period..=end];
        let lowest = window.iter().copied().fold(f64::INFINITY, f64::min);
        let highest = window.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        if highest > lowest {
            (closes[end] - lowest) / (highest - lowest) * 100.0
        } else {
            50.0
        }
    }
}

impl Indicator for Stochastic {
    type Output = StochasticValues;

    fn id(&self) -> &str {
        "stochastic"
    }

    fn name(&self) -> &str {
        "Stochastic"
    }

    fn category(&self) -> IndicatorCategory {
        IndicatorCategory::Momentum
    }

    fn min_periods(&self) -> usize {
        self.k_period + self.d_period - 1
    }

    fn calculate(&self, series: &MarketSeries) -> Option<StochasticValues> {
        if self.k_period == 0 || self.d_period == 0 || series.len() < self.min_periods() {
            return None;
        }

        let closes = series.closes();
        let last = closes.len() - 1;
        let k_values: Vec<f64> = (last + 1 - self.d_period..=last)
            .map(|end| Self::raw_k(closes, end, self.k_period))
            .collect();

        let k = *k_values.last()?;
        let d = mean(&k_values)?;

        Some(StochasticValues {
            k,
            d,
            oversold: k < 20.0,
            overbought: k > 80.0,
        })
    }
}
