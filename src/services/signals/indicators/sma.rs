//! Simple Moving Average (SMA) indicator.

use super::{Indicator, IndicatorCategory};
use crate::types::MarketSeries;

/// SMA (Simple Moving Average) indicator.
///
/// Mean of the last `period` closes.
pub struct Sma {
    period: usize,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    /// Mean of the last `period` values, None if there are fewer.
    pub fn compute(values: &[f64], period: usize) -> Option<f64> {
        if period == 0 || values.len() < period {
            return None;
        }
        Some(values[values.len() - period..].iter().sum::<f64>() / period as f64)
    }
}

impl Indicator for Sma {
    type Output = f64;

    fn id(&self) -> &str {
        match self.period {
            20 => "sma20",
            50 => "sma50",
            200 => "sma200",
            _ => "sma",
        }
    }

    fn name(&self) -> &str {
        match self.period {
            20 => "SMA (20)",
            50 => "SMA (50)",
            200 => "SMA (200)",
            _ => "SMA",
        }
    }

    fn category(&self) -> IndicatorCategory {
        IndicatorCategory::Trend
    }

    fn min_periods(&self) -> usize {
        self.period
    }

    fn calculate(&self, series: &MarketSeries) -> Option<f64> {
        Self::compute(series.closes(), self.period)
    }
}
