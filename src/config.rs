use std::env;

use crate::types::RiskTier;

/// Risk-per-trade defaults, one percentage per tier.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskConfig {
    /// Conservative tier risk per trade (percent of capital).
    pub conservative_pct: f64,
    /// Moderate tier risk per trade (percent of capital).
    pub moderate_pct: f64,
    /// Aggressive tier risk per trade (percent of capital).
    pub aggressive_pct: f64,
    /// Maximum tier risk per trade (percent of capital).
    pub maximum_pct: f64,
    /// Largest share of capital a single position may occupy (0.0 - 1.0).
    pub max_position_fraction: f64,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            conservative_pct: 1.0,
            moderate_pct: 2.0,
            aggressive_pct: 3.0,
            maximum_pct: 4.0,
            max_position_fraction: 0.33,
        }
    }
}

impl RiskConfig {
    /// Load risk percentages from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            conservative_pct: env_or("RISK_PCT_CONSERVATIVE", defaults.conservative_pct),
            moderate_pct: env_or("RISK_PCT_MODERATE", defaults.moderate_pct),
            aggressive_pct: env_or("RISK_PCT_AGGRESSIVE", defaults.aggressive_pct),
            maximum_pct: env_or("RISK_PCT_MAXIMUM", defaults.maximum_pct),
            max_position_fraction: defaults.max_position_fraction,
        }
    }

    /// Risk percentage for a tier.
    pub fn risk_pct(&self, tier: RiskTier) -> f64 {
        match tier {
            RiskTier::Conservative => self.conservative_pct,
            RiskTier::Moderate => self.moderate_pct,
            RiskTier::Aggressive => self.aggressive_pct,
            RiskTier::Maximum => self.maximum_pct,
        }
    }
}

/// Momentum scan thresholds and result limits.
#[derive(Debug, Clone, PartialEq)]
pub struct ScannerConfig {
    /// Minimum day change (percent) before price momentum adds to the score.
    pub min_price_change: f64,
    /// Volume surge threshold, as a percentage of reference volume.
    pub min_volume_surge: f64,
    /// Candidates must score above this to be kept.
    pub min_score: f64,
    /// Maximum number of candidates returned.
    pub max_results: usize,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            min_price_change: 2.0,
            min_volume_surge: 150.0,
            min_score: 60.0,
            max_results: 10,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Trading capital used for position sizing.
    pub capital: f64,
    /// Default risk tier.
    pub risk_tier: RiskTier,
    /// Explicit risk-per-trade override (percent), wins over the tier default.
    pub max_risk_pct: Option<f64>,
    /// Days of history requested from the data provider.
    pub lookback_days: u32,
    /// Momentum scanner settings.
    pub scanner: ScannerConfig,
    /// Risk-per-trade settings.
    pub risk: RiskConfig,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let scanner_defaults = ScannerConfig::default();

        Self {
            capital: env_or("CAPITAL", 100_000.0),
            risk_tier: env::var("RISK_TIER")
                .ok()
                .and_then(|v| RiskTier::from_str(&v))
                .unwrap_or_default(),
            max_risk_pct: env::var("MAX_RISK_PERCENT")
                .ok()
                .and_then(|v| v.parse().ok()),
            // 200 trading sessions need roughly a year of calendar days
            lookback_days: env_or("LOOKBACK_DAYS", 365),
            scanner: ScannerConfig {
                min_price_change: env_or("SCAN_MIN_PRICE_CHANGE", scanner_defaults.min_price_change),
                min_volume_surge: env_or("SCAN_MIN_VOLUME_SURGE", scanner_defaults.min_volume_surge),
                min_score: env_or("SCAN_MIN_SCORE", scanner_defaults.min_score),
                max_results: env_or("SCAN_MAX_RESULTS", scanner_defaults.max_results),
            },
            risk: RiskConfig::from_env(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capital: 100_000.0,
            risk_tier: RiskTier::default(),
            max_risk_pct: None,
            lookback_days: 365,
            scanner: ScannerConfig::default(),
            risk: RiskConfig::default(),
        }
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // RiskConfig Tests
    // =========================================================================

    #[test]
    fn test_risk_config_defaults() {
        let config = RiskConfig::default();
        assert_eq!(config.risk_pct(RiskTier::Conservative), 1.0);
        assert_eq!(config.risk_pct(RiskTier::Moderate), 2.0);
        assert_eq!(config.risk_pct(RiskTier::Aggressive), 3.0);
        assert_eq!(config.risk_pct(RiskTier::Maximum), 4.0);
        assert!((config.max_position_fraction - 0.33).abs() < f64::EPSILON);
    }

    #[test]
    fn test_risk_config_custom() {
        let config = RiskConfig {
            moderate_pct: 1.5,
            ..Default::default()
        };
        assert_eq!(config.risk_pct(RiskTier::Moderate), 1.5);
        assert_eq!(config.risk_pct(RiskTier::Aggressive), 3.0);
    }

    // =========================================================================
    // ScannerConfig Tests
    // =========================================================================

    #[test]
    fn test_scanner_config_defaults() {
        let config = ScannerConfig::default();
        assert_eq!(config.min_price_change, 2.0);
        assert_eq!(config.min_volume_surge, 150.0);
        assert_eq!(config.min_score, 60.0);
        assert_eq!(config.max_results, 10);
    }

    // =========================================================================
    // Config Tests
    // =========================================================================

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.capital, 100_000.0);
        assert_eq!(config.risk_tier, RiskTier::Moderate);
        assert!(config.max_risk_pct.is_none());
        assert_eq!(config.lookback_days, 365);
    }

    #[test]
    fn test_env_or_fallback() {
        assert_eq!(env_or("OMEN_TEST_UNSET_VARIABLE", 42u32), 42);
    }
}
