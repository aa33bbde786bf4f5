//! Trading signals service module.
//!
//! Provides technical indicator calculations, composite scoring,
//! risk-reward planning and signal generation.

pub mod composite;
pub mod generator;
pub mod indicators;
pub mod patterns;
pub mod risk;
pub mod scanners;
pub mod scoring;

pub use composite::{calculate_indicators, determine_trend, Bias, TechnicalScorer, TrendInputs};
pub use generator::{confidence, SignalGenerator};
pub use indicators::{Indicator, IndicatorCategory, MIN_HISTORY};
pub use patterns::{detect_candle_pattern, detect_chart_pattern};
pub use risk::{kelly, RiskRewardEngine};
pub use scanners::{
    analyze_sector, quick_signal, rank_momentum, rank_sectors, sector_report, sector_rotation,
    top_sectors, weak_sectors, MomentumScorer, SectorScorer,
};
pub use scoring::{PointScore, StrengthScorer, WeightedScore};
