//! Relative Strength Index (RSI) indicator.

use super::{Indicator, IndicatorCategory};
use crate::types::MarketSeries;

/// Closes inspected when looking for a bullish divergence.
const DIVERGENCE_WINDOW: usize = 20;

/// RSI (Relative Strength Index) indicator.
///
/// Measures momentum by comparing the magnitude of recent gains to recent losses.
/// Uses simple averages over the last `period` deltas. Values range from 0-100:
/// - Below 30: Oversold (potential buy signal)
/// - Above 70: Overbought (potential sell signal)
pub struct Rsi {
    period: usize,
}

impl Default for Rsi {
    fn default() -> Self {
        Self { period: 14 }
    }
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    /// Calculate RSI from the last `period` close-to-close changes.
    fn calculate_rsi(closes: &[f64], period: usize) -> Option<f64> {
        if period == 0 || closes.len() < period + 1 {
            return None;
        }

        let mut gains = 0.0;
        let mut losses = 0.0;

        for pair in closes[closes.len() - period - 1..].windows(2) {
            let change = pair[1] - pair[0];
            if change > 0.0 {
                gains += change;
            } else {
                losses -= change;
            }
        }

        let avg_gain = gains / period as f64;
        let avg_loss = losses / period as f64;

        if avg_loss == 0.0 {
            return Some(100.0);
        }

        let rs = avg_gain / avg_loss;
        Some(100.0 - (100.0 / (1.0 + rs)))
    }
}

impl Indicator for Rsi {
    type Output = f64;

    fn id(&self) -> &str {
        "rsi"
    }

    fn name(&self) -> &str {
        "RSI (14)"
    }

    fn category(&self) -> IndicatorCategory {
        IndicatorCategory::Momentum
    }

    fn min_periods(&self) -> usize {
        self.period + 1
    }

    fn calculate(&self, series: &MarketSeries) -> Option<f64> {
        Self::calculate_rsi(series.closes(), self.period)
    }

    fn neutral(&self) -> f64 {
        50.0
    }
}

/// Bullish divergence: the lowest of the last 20 closes sits in the second
/// half of the window while RSI is below 40.
pub fn detect_divergence(closes: &[f64], rsi: f64) -> bool {
    if closes.len() < DIVERGENCE_WINDOW {
        return false;
    }

    let window = &closes[closes.len() - DIVERGENCE_WINDOW..];
    let mut min_idx = 0;
    for (i, close) in window.iter().enumerate() {
        if *close < window[min_idx] {
            min_idx = i;
        }
    }

    min_idx > 10 && rsi < 40.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uptrend(count: usize) -> MarketSeries {
        MarketSeries::from_closes((0..count).map(|i| 100.0 + i as f64 * 1.5).collect())
    }

    fn downtrend(count: usize) -> MarketSeries {
        MarketSeries::from_closes((0..count).map(|i| 200.0 - i as f64 * 1.5).collect())
    }

    #[test]
    fn test_rsi_id_and_name() {
        let rsi = Rsi::default();
        assert_eq!(rsi.id(), "rsi");
        assert_eq!(rsi.name(), "RSI (14)");
        assert_eq!(rsi.category(), IndicatorCategory::Momentum);
    }

    #[test]
    fn test_rsi_min_periods() {
        assert_eq!(Rsi::default().min_periods(), 15);
        assert_eq!(Rsi::new(7).min_periods(), 8);
    }

    #[test]
    fn test_rsi_insufficient_data() {
        let rsi = Rsi::default();
        let series = uptrend(14);
        assert!(rsi.calculate(&series).is_none());
        assert_eq!(rsi.value(&series), 50.0);
    }

    #[test]
    fn test_rsi_no_losses_is_100() {
        assert_eq!(Rsi::default().calculate(&uptrend(50)), Some(100.0));
    }

    #[test]
    fn test_rsi_no_gains_is_0() {
        assert_eq!(Rsi::default().calculate(&downtrend(50)), Some(0.0));
    }

    #[test]
    fn test_rsi_balanced_moves() {
        let closes: Vec<f64> = (0..30)
            .map(|i| if i % 2 == 0 { 100.0 } else { 101.0 })
            .collect();
        let rsi = Rsi::default()
            .calculate(&MarketSeries::from_closes(closes))
            .unwrap();
        assert!((rsi - 50.0).abs() < 1e-9, "got {}", rsi);
    }

    #[test]
    fn test_rsi_uses_only_last_window() {
        // Large early losses fall outside the last 14 deltas.
        let mut closes: Vec<f64> = (0..20).map(|i| 200.0 - i as f64 * 5.0).collect();
        closes.extend((0..15).map(|i| 100.0 + i as f64));
        let rsi = Rsi::default()
            .calculate(&MarketSeries::from_closes(closes))
            .unwrap();
        assert_eq!(rsi, 100.0);
    }

    #[test]
    fn test_rsi_value_range() {
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + (i as f64 * 0.7).sin() * 5.0).collect();
        let rsi = Rsi::default()
            .calculate(&MarketSeries::from_closes(closes))
            .unwrap();
        assert!((0.0..=100.0).contains(&rsi));
    }

    #[test]
    fn test_divergence_requires_late_low_and_weak_rsi() {
        let mut closes = vec![100.0; 20];
        closes[15] = 90.0;
        assert!(detect_divergence(&closes, 35.0));
        assert!(!detect_divergence(&closes, 45.0));

        let mut early = vec![100.0; 20];
        early[5] = 90.0;
        assert!(!detect_divergence(&early, 35.0));
    }

    #[test]
    fn test_divergence_short_history() {
        assert!(!detect_divergence(&[1.0; 19], 10.0));
    }
}
