//! Technical indicator implementations.

pub mod atr;
pub mod bollinger;
pub mod ema;
pub mod levels;
pub mod macd;
pub mod rsi;
pub mod sma;
pub mod stochastic;
pub mod volume_profile;
pub mod vwap;

pub use atr::{Atr, SYNTHETIC_LOW_RATIO};
pub use bollinger::BollingerBands;
pub use ema::{ema_series, Ema};
pub use levels::{KeyLevels, SupportResistance};
pub use macd::Macd;
pub use rsi::{detect_divergence, Rsi};
pub use sma::Sma;
pub use stochastic::Stochastic;
pub use volume_profile::VolumeProfile;
pub use vwap::Vwap;

use serde::{Deserialize, Serialize};

use crate::types::MarketSeries;

/// Closes required before the full indicator set is computed.
pub const MIN_HISTORY: usize = 200;

/// Indicator family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorCategory {
    Trend,
    Momentum,
    Volatility,
    Volume,
    Structure,
}

/// Trait for implementing technical indicators.
pub trait Indicator: Send + Sync {
    /// Value produced by a successful calculation.
    type Output: Default;

    /// Unique identifier for this indicator.
    fn id(&self) -> &str;

    /// Human-readable name.
    fn name(&self) -> &str;

    /// Category this indicator belongs to.
    fn category(&self) -> IndicatorCategory;

    /// Minimum number of closes required for calculation.
    fn min_periods(&self) -> usize;

    /// Calculate the indicator from a price/volume series.
    /// Returns None if there is insufficient or unusable data.
    fn calculate(&self, series: &MarketSeries) -> Option<Self::Output>;

    /// Value reported when the indicator cannot be calculated.
    fn neutral(&self) -> Self::Output {
        Self::Output::default()
    }

    /// Calculate, falling back to the neutral value.
    fn value(&self, series: &MarketSeries) -> Self::Output {
        self.calculate(series).unwrap_or_else(|| self.neutral())
    }
}

/// Mean of a slice, None when empty.
pub(crate) fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}
