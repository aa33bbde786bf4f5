pub mod analyzer;
pub mod provider;
pub mod screener;
pub mod signals;
pub mod snapshot;

pub use analyzer::{AnalysisRequest, Analyzer};
pub use provider::{MarketDataProvider, ProviderFuture};
pub use screener::Screener;
pub use snapshot::{Snapshot, SnapshotProvider};
