//! Confidence scoring and trade-signal generation.

use crate::types::{
    ChartPattern, FundamentalData, Indicators, MacdCrossover, RiskRewardPlan, SentimentData,
    SignalStrength, SignalTimeframe, TradeAction, TradeSignal, Trend,
};

const BASE_CONFIDENCE: f64 = 50.0;
const BASE_PRIORITY: i32 = 5;

/// Overall confidence (0-100) in a long setup.
///
/// Starts at 50 and adds for bullish score, a strong bullish trend,
/// risk-reward and the caller's fundamental and sentiment scores.
pub fn confidence(
    indicators: &Indicators,
    plan: &RiskRewardPlan,
    fundamental: &FundamentalData,
    sentiment: &SentimentData,
) -> f64 {
    let mut confidence = BASE_CONFIDENCE;

    if indicators.bullish_score > 70.0 {
        confidence += 15.0;
    } else if indicators.bullish_score > 60.0 {
        confidence += 10.0;
    }

    if indicators.trend == Trend::Bullish && indicators.trend_strength > 60.0 {
        confidence += 10.0;
    }

    if plan.risk_reward_ratio > 3.0 {
        confidence += 10.0;
    } else if plan.risk_reward_ratio > 2.0 {
        confidence += 5.0;
    }

    if fundamental.score > 70.0 {
        confidence += 10.0;
    }
    if sentiment.score > 70.0 {
        confidence += 5.0;
    }

    confidence.clamp(0.0, 100.0)
}

/// Turns indicators, a plan and a confidence into a trade recommendation.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignalGenerator;

impl SignalGenerator {
    pub fn new() -> Self {
        Self
    }

    pub fn generate(
        &self,
        indicators: &Indicators,
        plan: &RiskRewardPlan,
        confidence: f64,
    ) -> TradeSignal {
        let mut signal = TradeSignal::hold();
        let bullish = indicators.bullish_score;
        let bearish = indicators.bearish_score;

        if bullish > 70.0 && confidence > 75.0 {
            signal.action = TradeAction::Buy;
            signal.strength = SignalStrength::Strong;
            signal.reasons.push(format!("Strong bullish score: {bullish:.1}%"));
        } else if bullish > 60.0 && confidence > 65.0 {
            signal.action = TradeAction::Buy;
            signal.strength = SignalStrength::Moderate;
            signal.reasons.push(format!("Moderate bullish score: {bullish:.1}%"));
        } else if bearish > 70.0 && confidence > 75.0 {
            signal.action = TradeAction::Sell;
            signal.strength = SignalStrength::Strong;
            signal.reasons.push(format!("Strong bearish score: {bearish:.1}%"));

            if indicators.rsi > 70.0 {
                signal
                    .warnings
                    .push("RSI overbought - potential reversal".to_string());
            }
        }

        if signal.action == TradeAction::Buy {
            if indicators.rsi < 40.0 {
                signal.reasons.push("RSI oversold - good entry point".to_string());
            }
            if indicators.macd.crossover == MacdCrossover::Bullish {
                signal.reasons.push("MACD bullish crossover".to_string());
            }
            if indicators.trend == Trend::Bullish {
                signal.reasons.push(format!(
                    "Bullish trend with {:.1}% strength",
                    indicators.trend_strength
                ));
            }
        }

        if indicators.bollinger.width > 5.0 {
            signal.warnings.push("High volatility detected".to_string());
        }
        if plan.risk_reward_ratio < 2.0 {
            signal
                .warnings
                .push("Risk-reward ratio below optimal (< 1:2)".to_string());
        }

        signal.timeframe = timeframe(indicators, plan.entry_price);
        signal.strategy = strategy(indicators, plan, signal.action).to_string();

        if signal.action == TradeAction::Buy {
            signal.expected_return = if plan.entry_price > 0.0 {
                (plan.target1() - plan.entry_price) / plan.entry_price * 100.0
            } else {
                0.0
            };
            signal.holding_period = Some(signal.timeframe.holding_period().to_string());
        }

        signal.priority = priority(&signal, confidence, plan.risk_reward_ratio);
        signal
    }
}

/// Intraday when ATR is under 1% of entry, positional on a strong trend.
pub fn timeframe(indicators: &Indicators, entry: f64) -> SignalTimeframe {
    if indicators.atr < entry * 0.01 {
        SignalTimeframe::Intraday
    } else if indicators.trend_strength > 70.0 {
        SignalTimeframe::Positional
    } else {
        SignalTimeframe::Swing
    }
}

/// Primary strategy label for a signal.
pub fn strategy(indicators: &Indicators, plan: &RiskRewardPlan, action: TradeAction) -> &'static str {
    if action != TradeAction::Buy {
        return "Wait for better entry";
    }

    let entry = plan.entry_price;
    let near_support = indicators
        .support
        .iter()
        .any(|s| *s > 0.0 && (entry - s).abs() / s < 0.02);

    if indicators.rsi < 30.0 {
        "Oversold bounce play"
    } else if indicators.macd.crossover == MacdCrossover::Bullish {
        "MACD momentum trade"
    } else if indicators.trend == Trend::Bullish && indicators.trend_strength > 60.0 {
        "Trend following"
    } else if near_support {
        "Support level bounce"
    } else if indicators.chart_pattern == ChartPattern::Triangle {
        "Triangle breakout"
    } else {
        "General momentum trade"
    }
}

/// Priority 1-10 from strength, confidence, risk-reward and warning count.
pub fn priority(signal: &TradeSignal, confidence: f64, risk_reward_ratio: f64) -> u8 {
    let mut priority = BASE_PRIORITY;

    priority += match signal.strength {
        SignalStrength::Strong => 2,
        SignalStrength::Moderate => 1,
        SignalStrength::Weak => 0,
    };

    if confidence > 80.0 {
        priority += 2;
    } else if confidence > 70.0 {
        priority += 1;
    }

    if risk_reward_ratio > 3.0 {
        priority += 1;
    }

    match signal.warnings.len() {
        0 => {}
        1 | 2 => priority -= 1,
        _ => priority -= 2,
    }

    priority.clamp(1, 10) as u8
}
