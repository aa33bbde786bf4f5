//! Market data provider seam.

use std::future::Future;
use std::pin::Pin;

use crate::error::AppError;
use crate::types::{FundamentalData, MarketSeries, Quote, SentimentData};

/// Boxed future returned by provider methods.
pub type ProviderFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, AppError>> + Send + 'a>>;

/// Source of history and quotes for the screener.
///
/// Implementations report missing symbols as `AppError::NotFound` and
/// transport failures as `AppError::ExternalApi`.
pub trait MarketDataProvider: Send + Sync {
    /// Provider name, used in logs.
    fn name(&self) -> &str;

    /// Daily close/volume history covering roughly `lookback_days`.
    fn history<'a>(&'a self, symbol: &'a str, lookback_days: u32) -> ProviderFuture<'a, MarketSeries>;

    /// Latest quote.
    fn quote<'a>(&'a self, symbol: &'a str) -> ProviderFuture<'a, Quote>;

    /// Fundamental snapshot, if the provider has one.
    fn fundamentals<'a>(&'a self, _symbol: &'a str) -> ProviderFuture<'a, Option<FundamentalData>> {
        Box::pin(async { Ok(None) })
    }

    /// Sentiment snapshot, if the provider has one.
    fn sentiment<'a>(&'a self, _symbol: &'a str) -> ProviderFuture<'a, Option<SentimentData>> {
        Box::pin(async { Ok(None) })
    }
}
