//! Per-instrument analysis pipeline.
//!
//! Runs indicators, the risk-reward plan and signal generation for one
//! instrument and packages the result as an [`Analysis`].

use tracing::{debug, info};
use uuid::Uuid;

use crate::config::{Config, RiskConfig};
use crate::error::{AppError, Result};
use crate::services::signals::{calculate_indicators, confidence, RiskRewardEngine, SignalGenerator};
use crate::types::{Analysis, FundamentalData, MarketSeries, Quote, RiskTier, SentimentData};

/// Inputs for a single analysis.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub symbol: String,
    pub series: MarketSeries,
    /// Live quote; its last price is used as entry when present.
    pub quote: Option<Quote>,
    pub capital: f64,
    pub risk_tier: RiskTier,
    /// Explicit risk-per-trade percentage, wins over the tier default.
    pub max_risk_pct: Option<f64>,
    pub fundamental: FundamentalData,
    pub sentiment: SentimentData,
}

impl AnalysisRequest {
    pub fn new(symbol: impl Into<String>, series: MarketSeries, capital: f64) -> Self {
        Self {
            symbol: symbol.into(),
            series,
            quote: None,
            capital,
            risk_tier: RiskTier::default(),
            max_risk_pct: None,
            fundamental: FundamentalData::default(),
            sentiment: SentimentData::default(),
        }
    }

    /// Request using capital and risk settings from the application config.
    pub fn from_config(symbol: impl Into<String>, series: MarketSeries, config: &Config) -> Self {
        Self {
            risk_tier: config.risk_tier,
            max_risk_pct: config.max_risk_pct,
            ..Self::new(symbol, series, config.capital)
        }
    }

    pub fn with_quote(mut self, quote: Quote) -> Self {
        self.quote = Some(quote);
        self
    }

    pub fn with_risk_tier(mut self, tier: RiskTier) -> Self {
        self.risk_tier = tier;
        self
    }

    pub fn with_max_risk_pct(mut self, pct: f64) -> Self {
        self.max_risk_pct = Some(pct);
        self
    }

    pub fn with_fundamental(mut self, fundamental: FundamentalData) -> Self {
        self.fundamental = fundamental;
        self
    }

    pub fn with_sentiment(mut self, sentiment: SentimentData) -> Self {
        self.sentiment = sentiment;
        self
    }

    /// Entry price: the quote's last price, else the last close.
    fn entry_price(&self) -> Option<f64> {
        self.quote
            .as_ref()
            .map(|q| q.last_price)
            .filter(|p| *p > 0.0)
            .or_else(|| self.series.last_close())
    }
}

/// Stateless analysis pipeline.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    engine: RiskRewardEngine,
    generator: SignalGenerator,
}

impl Analyzer {
    pub fn new(risk: RiskConfig) -> Self {
        Self {
            engine: RiskRewardEngine::new(risk),
            generator: SignalGenerator::new(),
        }
    }

    pub fn engine(&self) -> &RiskRewardEngine {
        &self.engine
    }

    /// Analyze one instrument.
    pub fn analyze(&self, request: AnalysisRequest) -> Result<Analysis> {
        if let Some((field, index, value)) = request.series.first_invalid_value() {
            return Err(AppError::InvalidInput(format!(
                "{} has invalid {field} at index {index}: {value}",
                request.symbol
            )));
        }

        let entry = request.entry_price().ok_or_else(|| {
            AppError::InvalidInput(format!("{} has no price to enter at", request.symbol))
        })?;
        let risk_pct = self.engine.risk_pct(request.risk_tier, request.max_risk_pct)?;

        let indicators = calculate_indicators(&request.series);
        debug!(
            "{}: {} closes, trend {} ({:.0}), bullish {:.1}, bearish {:.1}",
            request.symbol,
            request.series.len(),
            indicators.trend.label(),
            indicators.trend_strength,
            indicators.bullish_score,
            indicators.bearish_score
        );

        let plan = self.engine.plan(entry, &indicators, request.capital, risk_pct)?;
        let confidence = confidence(&indicators, &plan, &request.fundamental, &request.sentiment);
        let signal = self.generator.generate(&indicators, &plan, confidence);
        let kelly_pct = self.engine.kelly_suggestion(confidence, &plan);

        let mut sentiment = request.sentiment;
        if sentiment.open_interest == 0.0 {
            if let Some(quote) = &request.quote {
                sentiment.open_interest = quote.open_interest;
            }
        }

        info!(
            "{}: {} ({:?}) confidence {:.0}, priority {}",
            request.symbol,
            signal.action.label(),
            signal.strength,
            confidence,
            signal.priority
        );

        Ok(Analysis {
            id: Uuid::new_v4(),
            symbol: request.symbol,
            indicators,
            risk_reward: plan,
            signal,
            fundamental: request.fundamental,
            sentiment,
            confidence,
            kelly_pct,
            timestamp: chrono::Utc::now().timestamp_millis(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{TradeAction, Trend};

    fn ramp(len: usize) -> MarketSeries {
        let closes = (0..len).map(|i| 100.0 * 1.005f64.powi(i as i32)).collect();
        let volumes = (0..len)
            .map(|i| if i >= len - 10 { 2000.0 } else { 1000.0 })
            .collect();
        MarketSeries::new(closes, volumes)
    }

    #[test]
    fn test_rejects_invalid_series() {
        let series = MarketSeries::new(vec![100.0, f64::NAN], vec![1.0, 1.0]);
        let err = Analyzer::default()
            .analyze(AnalysisRequest::new("BAD", series, 10_000.0))
            .unwrap_err();
        assert!(err.is_contract_violation());
        assert!(err.to_string().contains("index 1"));
    }

    #[test]
    fn test_rejects_missing_price() {
        let err = Analyzer::default()
            .analyze(AnalysisRequest::new("NONE", MarketSeries::empty(), 10_000.0))
            .unwrap_err();
        assert!(err.is_contract_violation());
    }

    #[test]
    fn test_rejects_bad_risk_override() {
        let request = AnalysisRequest::new("X", ramp(10), 10_000.0).with_max_risk_pct(150.0);
        assert!(Analyzer::default().analyze(request).is_err());
    }

    #[test]
    fn test_short_history_is_neutral_hold() {
        let analysis = Analyzer::default()
            .analyze(AnalysisRequest::new("SHORT", ramp(50), 10_000.0))
            .unwrap();
        assert!(analysis.indicators.is_neutral());
        assert_eq!(analysis.signal.action, TradeAction::Hold);
        assert!(analysis.risk_reward.stop_loss < analysis.risk_reward.entry_price);
    }

    #[test]
    fn test_quote_sets_entry_and_open_interest() {
        let quote = Quote {
            symbol: "UP".to_string(),
            last_price: 250.0,
            open_interest: 1234.0,
            ..Default::default()
        };
        let analysis = Analyzer::default()
            .analyze(AnalysisRequest::new("UP", ramp(200), 100_000.0).with_quote(quote))
            .unwrap();
        assert_eq!(analysis.risk_reward.entry_price, 250.0);
        assert_eq!(analysis.sentiment.open_interest, 1234.0);
    }

    #[test]
    fn test_uptrend_buys() {
        let analysis = Analyzer::default()
            .analyze(AnalysisRequest::new("UP", ramp(200), 100_000.0))
            .unwrap();
        assert_eq!(analysis.indicators.trend, Trend::Bullish);
        assert_eq!(analysis.signal.action, TradeAction::Buy);
        assert!(analysis.signal.priority >= 6);
        assert!(analysis.kelly_pct.is_finite());
        assert_eq!(analysis.id.get_version_num(), 4);
    }
}
