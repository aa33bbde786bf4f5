//! Bollinger Bands indicator.

use super::{Indicator, IndicatorCategory, Sma};
use crate::types::{BollingerValues, MarketSeries};

/// Bollinger Bands.
///
/// Middle band is SMA(20); upper and lower bands sit two population standard
/// deviations away. Width is the band spread as a percentage of the middle.
pub struct BollingerBands {
    period: usize,
    std_dev_multiplier: f64,
}

impl Default for BollingerBands {
    fn default() -> Self {
        Self {
            period: 20,
            std_dev_multiplier: 2.0,
        }
    }
}

impl Indicator for BollingerBands {
    type Output = BollingerValues;

    fn id(&self) -> &str {
        "bollinger"
    }

    fn name(&self) -> &str {
        "Bollinger Bands"
    }

    fn category(&self) -> IndicatorCategory {
        IndicatorCategory::Volatility
    }

    fn min_periods(&self) -> usize {
        self.period
    }

    fn calculate(&self, series: &MarketSeries) -> Option<BollingerValues> {
        let closes = series.closes();
        let middle = Sma::compute(closes, self.period)?;

        let variance = closes[closes.len() - self.period..]
            .iter()
            .map(|c| (c - middle).powi(2))
            .sum::<f64>()
            / self.period as f64;
        let band = variance.sqrt() * self.std_dev_multiplier;

        let width = if middle != 0.0 {
            band * 2.0 / middle * 100.0
        } else {
            0.0
        };

        Some(BollingerValues {
            upper: middle + band,
            middle,
            lower: middle - band,
            width,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bollinger_metadata() {
        let bb = BollingerBands::default();
        assert_eq!(bb.id(), "bollinger");
        assert_eq!(bb.category(), IndicatorCategory::Volatility);
        assert_eq!(bb.min_periods(), 20);
    }

    #[test]
    fn test_bollinger_flat_series_collapses() {
        let series = MarketSeries::from_closes(vec![100.0; 25]);
        let bb = BollingerBands::default().calculate(&series).unwrap();
        assert_eq!(bb.upper, 100.0);
        assert_eq!(bb.lower, 100.0);
        assert_eq!(bb.width, 0.0);
    }

    #[test]
    fn test_bollinger_population_std_dev() {
        // Alternating 99/101 has population sigma exactly 1.
        let closes: Vec<f64> = (0..20).map(|i| if i % 2 == 0 { 99.0 } else { 101.0 }).collect();
        let bb = BollingerBands::default()
            .calculate(&MarketSeries::from_closes(closes))
            .unwrap();
        assert!((bb.middle - 100.0).abs() < 1e-9);
        assert!((bb.upper - 102.0).abs() < 1e-9);
        assert!((bb.lower - 98.0).abs() < 1e-9);
        assert!((bb.width - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_bollinger_zero_middle() {
        let series = MarketSeries::from_closes(vec![0.0; 20]);
        let bb = BollingerBands::default().calculate(&series).unwrap();
        assert_eq!(bb.width, 0.0);
    }

    #[test]
    fn test_bollinger_insufficient_data() {
        let series = MarketSeries::from_closes(vec![1.0; 19]);
        assert!(BollingerBands::default().calculate(&series).is_none());
    }
}
