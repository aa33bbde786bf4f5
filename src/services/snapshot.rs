//! In-memory provider backed by a JSON snapshot.
//!
//! Snapshot layout:
//!
//! ```json
//! {
//!   "quotes": { "RELIANCE": { "lastPrice": 2450.0, ... } },
//!   "history": { "RELIANCE": { "closes": [...], "volumes": [...] } },
//!   "fundamentals": { "RELIANCE": { "score": 72.0 } },
//!   "sentiment": { "RELIANCE": { "score": 65.0 } }
//! }
//! ```
//!
//! Symbols are matched case-insensitively.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::provider::{MarketDataProvider, ProviderFuture};
use crate::error::{AppError, Result};
use crate::types::{FundamentalData, MarketSeries, Quote, SentimentData};

/// Serialized snapshot contents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Snapshot {
    pub quotes: BTreeMap<String, Quote>,
    pub history: BTreeMap<String, MarketSeries>,
    pub fundamentals: BTreeMap<String, FundamentalData>,
    pub sentiment: BTreeMap<String, SentimentData>,
}

impl Snapshot {
    fn normalized(self) -> Self {
        fn upper<V>(map: BTreeMap<String, V>) -> BTreeMap<String, V> {
            map.into_iter().map(|(k, v)| (k.to_uppercase(), v)).collect()
        }

        let mut quotes = upper(self.quotes);
        for (symbol, quote) in quotes.iter_mut() {
            if quote.symbol.is_empty() {
                quote.symbol = symbol.clone();
            }
        }

        Self {
            quotes,
            history: upper(self.history),
            fundamentals: upper(self.fundamentals),
            sentiment: upper(self.sentiment),
        }
    }
}

/// Provider serving a fixed snapshot.
#[derive(Debug, Clone, Default)]
pub struct SnapshotProvider {
    snapshot: Snapshot,
}

impl SnapshotProvider {
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            snapshot: snapshot.normalized(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: Snapshot = serde_json::from_str(json)?;
        Ok(Self::new(snapshot))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let provider = Self::from_json(&json)?;
        info!(
            "Loaded snapshot {} ({} quotes, {} histories)",
            path.display(),
            provider.snapshot.quotes.len(),
            provider.snapshot.history.len()
        );
        Ok(provider)
    }

    /// Symbols with a quote, in sorted order.
    pub fn symbols(&self) -> Vec<String> {
        self.snapshot.quotes.keys().cloned().collect()
    }

    fn lookup<'a, V>(map: &'a BTreeMap<String, V>, symbol: &str) -> Option<&'a V> {
        map.get(&symbol.to_uppercase())
    }
}

impl MarketDataProvider for SnapshotProvider {
    fn name(&self) -> &str {
        "snapshot"
    }

    fn history<'a>(&'a self, symbol: &'a str, lookback_days: u32) -> ProviderFuture<'a, MarketSeries> {
        Box::pin(async move {
            let series = Self::lookup(&self.snapshot.history, symbol)
                .ok_or_else(|| AppError::NotFound(format!("history for {symbol}")))?;
            debug!("{symbol}: serving {} bars from snapshot", series.len());
            Ok(series.tail(lookback_days as usize))
        })
    }

    fn quote<'a>(&'a self, symbol: &'a str) -> ProviderFuture<'a, Quote> {
        Box::pin(async move {
            Self::lookup(&self.snapshot.quotes, symbol)
                .cloned()
                .ok_or_else(|| AppError::NotFound(format!("quote for {symbol}")))
        })
    }

    fn fundamentals<'a>(&'a self, symbol: &'a str) -> ProviderFuture<'a, Option<FundamentalData>> {
        Box::pin(async move { Ok(Self::lookup(&self.snapshot.fundamentals, symbol).cloned()) })
    }

    fn sentiment<'a>(&'a self, symbol: &'a str) -> ProviderFuture<'a, Option<SentimentData>> {
        Box::pin(async move { Ok(Self::lookup(&self.snapshot.sentiment, symbol).cloned()) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JSON: &str = r#"{
        "quotes": {
            "infy": { "lastPrice": 1500.0, "open": 1490.0, "high": 1510.0, "low": 1480.0,
                      "averagePrice": 1495.0, "volume": 2000.0, "referenceVolume": 1000.0,
                      "netChange": 20.0 }
        },
        "history": {
            "INFY": { "closes": [1.0, 2.0, 3.0], "volumes": [10.0, 20.0, 30.0] }
        },
        "fundamentals": { "INFY": { "score": 80.0 } }
    }"#;

    #[tokio::test]
    async fn test_lookup_is_case_insensitive() {
        let provider = SnapshotProvider::from_json(JSON).unwrap();
        let quote = provider.quote("Infy").await.unwrap();
        assert_eq!(quote.symbol, "INFY");
        assert_eq!(quote.last_price, 1500.0);
        assert_eq!(provider.symbols(), vec!["INFY".to_string()]);
    }

    #[tokio::test]
    async fn test_history_honours_lookback() {
        let provider = SnapshotProvider::from_json(JSON).unwrap();
        let series = provider.history("INFY", 2).await.unwrap();
        assert_eq!(series.closes(), &[2.0, 3.0]);
    }

    #[tokio::test]
    async fn test_missing_symbol_is_not_found() {
        let provider = SnapshotProvider::from_json(JSON).unwrap();
        assert!(matches!(provider.quote("TCS").await, Err(AppError::NotFound(_))));
        assert!(matches!(provider.history("TCS", 10).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_optional_blocks() {
        let provider = SnapshotProvider::from_json(JSON).unwrap();
        let fundamentals = provider.fundamentals("INFY").await.unwrap();
        assert_eq!(fundamentals.map(|f| f.score), Some(80.0));
        assert!(provider.sentiment("INFY").await.unwrap().is_none());
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            SnapshotProvider::from_json("{ not json"),
            Err(AppError::SerdeJson(_))
        ));
    }
}
