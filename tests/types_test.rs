//! Unit tests for types module

use omen::types::*;
use serde_json;

#[test]
fn test_trade_action_serialization() {
    assert_eq!(serde_json::to_string(&TradeAction::Buy).unwrap(), "\"BUY\"");
    assert_eq!(serde_json::to_string(&TradeAction::Hold).unwrap(), "\"HOLD\"");

    let parsed: TradeAction = serde_json::from_str("\"SELL\"").unwrap();
    assert_eq!(parsed, TradeAction::Sell);
    assert_eq!(parsed.label(), "SELL");
}

#[test]
fn test_pattern_serialization() {
    assert_eq!(
        serde_json::to_string(&CandlePattern::BullishEngulfing).unwrap(),
        "\"bullish_engulfing\""
    );
    assert_eq!(serde_json::to_string(&ChartPattern::Triangle).unwrap(), "\"triangle\"");
    assert_eq!(serde_json::to_string(&MacdCrossover::None).unwrap(), "\"none\"");
}

#[test]
fn test_signal_timeframe_from_str() {
    assert_eq!(SignalTimeframe::from_str("intraday"), Some(SignalTimeframe::Intraday));
    assert_eq!(SignalTimeframe::from_str("SWING"), Some(SignalTimeframe::Swing));
    assert_eq!(SignalTimeframe::from_str("position"), Some(SignalTimeframe::Positional));
    assert_eq!(SignalTimeframe::from_str("weekly"), None);
}

#[test]
fn test_holding_periods() {
    assert_eq!(SignalTimeframe::Intraday.holding_period(), "1-2 days");
    assert_eq!(SignalTimeframe::Swing.holding_period(), "3-10 days");
    assert_eq!(SignalTimeframe::Positional.holding_period(), "2-4 weeks");
}

#[test]
fn test_risk_tier_from_str() {
    assert_eq!(RiskTier::from_str("low"), Some(RiskTier::Conservative));
    assert_eq!(RiskTier::from_str("Moderate"), Some(RiskTier::Moderate));
    assert_eq!(RiskTier::from_str("high"), Some(RiskTier::Aggressive));
    assert_eq!(RiskTier::from_str("poverty-escape"), Some(RiskTier::Maximum));
    assert_eq!(RiskTier::from_str("yolo"), None);
    assert_eq!(RiskTier::default(), RiskTier::Moderate);
}

#[test]
fn test_trade_style_from_str() {
    assert_eq!(TradeStyle::from_str("scalping"), Some(TradeStyle::Scalping));
    assert_eq!(TradeStyle::from_str("positional"), Some(TradeStyle::Positional));
    assert_eq!(TradeStyle::default(), TradeStyle::Swing);
}

#[test]
fn test_hold_signal_defaults() {
    let signal = TradeSignal::hold();
    assert_eq!(signal.action, TradeAction::Hold);
    assert_eq!(signal.strength, SignalStrength::Weak);
    assert_eq!(signal.priority, 1);
    assert!(signal.reasons.is_empty());

    // Holding period is omitted when absent
    let json = serde_json::to_value(&signal).unwrap();
    assert!(json.get("holdingPeriod").is_none());
    assert_eq!(json["expectedReturn"], 0.0);
}

#[test]
fn test_indicators_default_is_neutral() {
    let indicators = Indicators::default();
    assert!(indicators.is_neutral());
    assert_eq!(indicators.trend, Trend::Neutral);
    assert!(indicators.support.is_empty());
}

#[test]
fn test_quote_deserialization_partial() {
    let quote: Quote = serde_json::from_str(
        r#"{"symbol": "TCS", "lastPrice": 3500.0, "volume": 10.0, "referenceVolume": 5.0}"#,
    )
    .unwrap();
    assert_eq!(quote.symbol, "TCS");
    assert_eq!(quote.last_price, 3500.0);
    assert_eq!(quote.upper_circuit_limit, 0.0);
    assert_eq!(quote.volume_multiple(), 2.0);
}

#[test]
fn test_market_series_serialization() {
    let series = MarketSeries::new(vec![1.0, 2.0], vec![10.0, 20.0]);
    let json = serde_json::to_string(&series).unwrap();
    assert_eq!(json, r#"{"closes":[1.0,2.0],"volumes":[10.0,20.0]}"#);

    let parsed: MarketSeries = serde_json::from_str(r#"{"closes":[5.0]}"#).unwrap();
    assert_eq!(parsed.closes(), &[5.0]);
    assert!(parsed.volumes().is_empty());
}

#[test]
fn test_sentiment_defaults_when_missing() {
    let sentiment: SentimentData = serde_json::from_str(r#"{"score": 72.5}"#).unwrap();
    assert_eq!(sentiment.score, 72.5);
    assert_eq!(sentiment.institutional_activity, InstitutionalActivity::Neutral);
    assert_eq!(sentiment.bulk_deals, 0);
}

#[test]
fn test_sector_call_description() {
    assert_eq!(SectorCall::from_score(71.0), SectorCall::StrongBuy);
    assert!(!SectorCall::Avoid.description().is_empty());
    assert_eq!(serde_json::to_string(&SectorCall::StrongBuy).unwrap(), "\"strong_buy\"");
}

#[test]
fn test_tier_allocation() {
    let allocation = RiskTier::Aggressive.allocation();
    assert_eq!(allocation.max_positions, 4);
    assert!((allocation.position_size(100_000.0) - 35_000.0).abs() < 1e-9);
    assert!((allocation.max_risk_per_trade(100_000.0) - 3_000.0).abs() < 1e-9);
}
