use serde::{Deserialize, Serialize};

/// Ordered close/volume history for one instrument, oldest first.
///
/// Volumes are aligned index-for-index with closes. A series whose volume
/// length differs from its close length is still usable; volume-weighted
/// calculations simply degrade to zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSeries {
    closes: Vec<f64>,
    #[serde(default)]
    volumes: Vec<f64>,
}

impl MarketSeries {
    /// Create a series from closes and volumes.
    pub fn new(closes: Vec<f64>, volumes: Vec<f64>) -> Self {
        Self { closes, volumes }
    }

    /// Create a series with no volume information.
    pub fn from_closes(closes: Vec<f64>) -> Self {
        Self {
            closes,
            volumes: Vec::new(),
        }
    }

    /// An empty series (used when history is unavailable).
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn closes(&self) -> &[f64] {
        &self.closes
    }

    pub fn volumes(&self) -> &[f64] {
        &self.volumes
    }

    /// Number of closes in the series.
    pub fn len(&self) -> usize {
        self.closes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }

    /// Most recent close.
    pub fn last_close(&self) -> Option<f64> {
        self.closes.last().copied()
    }

    /// The most recent `count` bars.
    pub fn tail(&self, count: usize) -> Self {
        let skip = |len: usize| len.saturating_sub(count);
        Self {
            closes: self.closes[skip(self.closes.len())..].to_vec(),
            volumes: self.volumes[skip(self.volumes.len())..].to_vec(),
        }
    }

    /// Whether volumes line up with closes for volume-weighted calculations.
    pub fn volumes_aligned(&self) -> bool {
        !self.volumes.is_empty() && self.volumes.len() == self.closes.len()
    }

    /// Whether the series contains any price movement at all.
    pub fn has_price_movement(&self) -> bool {
        match self.closes.first() {
            Some(first) => self.closes.iter().any(|c| c != first),
            None => false,
        }
    }

    /// Return the index and value of the first close or volume that is
    /// negative or not finite.
    pub fn first_invalid_value(&self) -> Option<(&'static str, usize, f64)> {
        let bad = |v: &f64| !v.is_finite() || *v < 0.0;
        if let Some((i, v)) = self.closes.iter().enumerate().find(|(_, v)| bad(v)) {
            return Some(("close", i, *v));
        }
        self.volumes
            .iter()
            .enumerate()
            .find(|(_, v)| bad(v))
            .map(|(i, v)| ("volume", i, *v))
    }
}

/// Point-in-time quote snapshot for an instrument or sector index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Quote {
    /// Trading symbol (e.g., "RELIANCE").
    pub symbol: String,
    /// Last traded price.
    pub last_price: f64,
    /// Day open.
    pub open: f64,
    /// Day high.
    pub high: f64,
    /// Day low.
    pub low: f64,
    /// Previous session close.
    pub close: f64,
    /// Volume-weighted average traded price for the day.
    pub average_price: f64,
    /// Volume traded today.
    pub volume: f64,
    /// Reference volume to compare today's volume against (e.g., average daily volume).
    pub reference_volume: f64,
    /// Absolute change from the previous close.
    pub net_change: f64,
    /// Upper circuit limit, 0 if the exchange has none.
    pub upper_circuit_limit: f64,
    /// Lower circuit limit, 0 if the exchange has none.
    pub lower_circuit_limit: f64,
    /// Open interest for derivatives, 0 for cash instruments.
    pub open_interest: f64,
    /// Unix timestamp (milliseconds) of the snapshot.
    pub timestamp: i64,
}

impl Quote {
    /// Net change as a percentage of the last price.
    pub fn change_pct(&self) -> f64 {
        if self.last_price > 0.0 {
            self.net_change / self.last_price * 100.0
        } else {
            0.0
        }
    }

    /// Today's volume as a multiple of the reference volume.
    pub fn volume_multiple(&self) -> f64 {
        if self.reference_volume > 0.0 {
            self.volume / self.reference_volume
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_alignment() {
        let series = MarketSeries::new(vec![1.0, 2.0], vec![10.0, 20.0]);
        assert!(series.volumes_aligned());

        let series = MarketSeries::new(vec![1.0, 2.0], vec![10.0]);
        assert!(!series.volumes_aligned());

        let series = MarketSeries::from_closes(vec![1.0, 2.0]);
        assert!(!series.volumes_aligned());
    }

    #[test]
    fn test_series_tail() {
        let series = MarketSeries::new(vec![1.0, 2.0, 3.0], vec![10.0, 20.0, 30.0]);
        let tail = series.tail(2);
        assert_eq!(tail.closes(), &[2.0, 3.0]);
        assert_eq!(tail.volumes(), &[20.0, 30.0]);
        assert_eq!(series.tail(10), series);
    }

    #[test]
    fn test_series_price_movement() {
        assert!(!MarketSeries::from_closes(vec![5.0; 10]).has_price_movement());
        assert!(MarketSeries::from_closes(vec![5.0, 5.0, 5.1]).has_price_movement());
        assert!(!MarketSeries::empty().has_price_movement());
    }

    #[test]
    fn test_series_invalid_values() {
        let series = MarketSeries::new(vec![1.0, f64::NAN], vec![1.0, 1.0]);
        assert_eq!(series.first_invalid_value().map(|(k, i, _)| (k, i)), Some(("close", 1)));

        let series = MarketSeries::new(vec![1.0, 2.0], vec![1.0, -3.0]);
        assert_eq!(series.first_invalid_value().map(|(k, i, _)| (k, i)), Some(("volume", 1)));

        assert!(MarketSeries::new(vec![1.0], vec![0.0]).first_invalid_value().is_none());
    }

    #[test]
    fn test_quote_ratios() {
        let quote = Quote {
            last_price: 200.0,
            net_change: 4.0,
            volume: 3000.0,
            reference_volume: 1500.0,
            ..Default::default()
        };
        assert!((quote.change_pct() - 2.0).abs() < 1e-9);
        assert!((quote.volume_multiple() - 2.0).abs() < 1e-9);

        let empty = Quote::default();
        assert_eq!(empty.change_pct(), 0.0);
        assert_eq!(empty.volume_multiple(), 0.0);
    }
}
