//! Omen - market time-series analysis and trade-signal engine

pub mod config;
pub mod error;
pub mod services;
pub mod types;

// Re-export commonly used types
pub use types::*;
pub use services::{Analyzer, Screener, SnapshotProvider};
