//! MACD (Moving Average Convergence Divergence) indicator.

use super::{ema_series, Indicator, IndicatorCategory};
use crate::types::{MacdCrossover, MacdValues, MarketSeries};

/// MACD indicator.
///
/// Shows the relationship between two EMAs:
/// - MACD Line = EMA(12) - EMA(26)
/// - Signal Line = EMA(9) of the MACD Line history
/// - Histogram = MACD Line - Signal Line
///
/// A crossover is reported when the histogram clears 1% of the signal line.
pub struct Macd {
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
}

impl Default for Macd {
    fn default() -> Self {
        Self {
            fast_period: 12,
            slow_period: 26,
            signal_period: 9,
        }
    }
}

impl Macd {
    /// MACD line for every bar where both EMAs exist.
    fn macd_line(&self, closes: &[f64]) -> Vec<f64> {
        let fast = ema_series(closes, self.fast_period);
        let slow = ema_series(closes, self.slow_period);

        // The fast EMA starts earlier; align on the slow EMA's first bar.
        let offset = self.slow_period.saturating_sub(self.fast_period);
        fast.iter()
            .skip(offset)
            .zip(slow.iter())
            .map(|(f, s)| f - s)
            .collect()
    }

    fn crossover(histogram: f64, signal: f64) -> MacdCrossover {
        if histogram > 0.0 && histogram > signal * 0.01 {
            MacdCrossover::Bullish
        } else if histogram < 0.0 && histogram < signal * -0.01 {
            MacdCrossover::Bearish
        } else {
            MacdCrossover::None
        }
    }
}

impl Indicator for Macd {
    type Output = MacdValues;

    fn id(&self) -> &str {
        "macd"
    }

    fn name(&self) -> &str {
        "MACD"
    }

    fn category(&self) -> IndicatorCategory {
        IndicatorCategory::Trend
    }

    fn min_periods(&self) -> usize {
        self.slow_period + self.signal_period - 1
    }

    fn calculate(&self, series: &MarketSeries) -> Option<MacdValues> {
        if series.len() < self.min_periods() {
            return None;
        }

        let line = self.macd_line(series.closes());
        let macd = *line.last()?;
        let signal = *ema_series(&line, self.signal_period).last()?;
        let histogram = macd - signal;

        Some(MacdValues {
            macd,
            signal,
            histogram,
            crossover: Self::crossover(histogram, signal),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometric(count: usize, rate: f64) -> MarketSeries {
        MarketSeries::from_closes((0..count).map(|i| 100.0 * rate.powi(i as i32)).collect())
    }

    #[test]
    fn test_macd_id_and_periods() {
        let macd = Macd::default();
        assert_eq!(macd.id(), "macd");
        assert_eq!(macd.category(), IndicatorCategory::Trend);
        assert_eq!(macd.min_periods(), 34);
    }

    #[test]
    fn test_macd_insufficient_data() {
        let macd = Macd::default();
        let series = geometric(33, 1.01);
        assert!(macd.calculate(&series).is_none());
        assert_eq!(macd.value(&series), MacdValues::default());
        assert!(macd.calculate(&geometric(34, 1.01)).is_some());
    }

    #[test]
    fn test_macd_flat_series() {
        let series = MarketSeries::from_closes(vec![50.0; 100]);
        let values = Macd::default().calculate(&series).unwrap();
        assert!(values.macd.abs() < 1e-9);
        assert!(values.histogram.abs() < 1e-9);
        assert_eq!(values.crossover, MacdCrossover::None);
    }

    #[test]
    fn test_macd_accelerating_uptrend_is_bullish() {
        let values = Macd::default().calculate(&geometric(200, 1.005)).unwrap();
        assert!(values.macd > 0.0);
        assert!(values.histogram > 0.0);
        assert_eq!(values.crossover, MacdCrossover::Bullish);
    }

    #[test]
    fn test_macd_accelerating_downtrend_is_bearish() {
        let closes = (0..200).map(|i| 200.0 - 0.002 * (i * i) as f64).collect();
        let values = Macd::default()
            .calculate(&MarketSeries::from_closes(closes))
            .unwrap();
        assert!(values.macd < 0.0);
        assert!(values.histogram < 0.0);
        assert_eq!(values.crossover, MacdCrossover::Bearish);
    }

    #[test]
    fn test_crossover_threshold() {
        assert_eq!(Macd::crossover(0.5, 10.0), MacdCrossover::Bullish);
        assert_eq!(Macd::crossover(0.05, 10.0), MacdCrossover::None);
        assert_eq!(Macd::crossover(-0.5, -10.0), MacdCrossover::Bearish);
        assert_eq!(Macd::crossover(0.0, 0.0), MacdCrossover::None);
    }
}
