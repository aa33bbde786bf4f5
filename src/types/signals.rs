use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{RiskRewardPlan, RiskTier, TierAllocation};

/// Overall trend direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Bullish,
    Bearish,
    #[default]
    Neutral,
}

impl Trend {
    /// Get display label.
    pub fn label(&self) -> &'static str {
        match self {
            Trend::Bullish => "bullish",
            Trend::Bearish => "bearish",
            Trend::Neutral => "neutral",
        }
    }
}

/// Candlestick pattern over the most recent closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CandlePattern {
    #[default]
    None,
    BullishEngulfing,
    BearishEngulfing,
    Doji,
}

/// Chart pattern over the last 50 closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ChartPattern {
    #[default]
    None,
    Triangle,
    Channel,
}

/// MACD crossover state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MacdCrossover {
    Bullish,
    Bearish,
    #[default]
    None,
}

/// MACD line, signal line and histogram.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MacdValues {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
    pub crossover: MacdCrossover,
}

/// Stochastic oscillator reading.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StochasticValues {
    /// %K (0-100).
    pub k: f64,
    /// %D, the smoothed %K (0-100).
    pub d: f64,
    pub oversold: bool,
    pub overbought: bool,
}

/// Bollinger band levels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BollingerValues {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
    /// Band width as a percentage of the middle band.
    pub width: f64,
}

/// Volume profile summary.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeProfileData {
    /// Point of control: price bucket with the highest traded volume.
    pub poc: f64,
    pub value_area_high: f64,
    pub value_area_low: f64,
    /// Recent volume exceeds the prior window by more than 20%.
    pub volume_surge: bool,
    pub accumulation_distribution: f64,
}

/// Immutable snapshot of every technical value derived from a series.
///
/// `Indicators::default()` is the neutral value returned for histories that
/// are too short to analyze; callers should check `is_neutral()` before
/// trusting individual fields.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Indicators {
    pub sma20: f64,
    pub sma50: f64,
    pub sma200: f64,
    pub ema9: f64,
    pub ema21: f64,
    pub vwap: f64,

    pub rsi: f64,
    pub rsi_divergence: bool,
    pub macd: MacdValues,
    pub stochastic: StochasticValues,

    pub bollinger: BollingerValues,
    pub atr: f64,

    /// Up to three support levels, ascending.
    pub support: Vec<f64>,
    /// Up to three resistance levels, ascending.
    pub resistance: Vec<f64>,
    pub trend: Trend,
    /// Trend strength (0-100).
    pub trend_strength: f64,

    pub candle_pattern: CandlePattern,
    pub chart_pattern: ChartPattern,
    pub volume_profile: VolumeProfileData,

    /// Bullish composite score (0-100).
    pub bullish_score: f64,
    /// Bearish composite score (0-100).
    pub bearish_score: f64,
}

impl Indicators {
    /// Whether this is the degenerate value produced for insufficient history.
    pub fn is_neutral(&self) -> bool {
        *self == Indicators::default()
    }
}

/// Recommended action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeAction {
    Buy,
    Sell,
    #[default]
    Hold,
}

impl TradeAction {
    /// Get display label.
    pub fn label(&self) -> &'static str {
        match self {
            TradeAction::Buy => "BUY",
            TradeAction::Sell => "SELL",
            TradeAction::Hold => "HOLD",
        }
    }
}

/// Conviction behind a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SignalStrength {
    Strong,
    Moderate,
    #[default]
    Weak,
}

/// Holding style a signal is meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SignalTimeframe {
    Intraday,
    #[default]
    Swing,
    Positional,
}

impl SignalTimeframe {
    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "intraday" | "day" => Some(Self::Intraday),
            "swing" => Some(Self::Swing),
            "positional" | "position" => Some(Self::Positional),
            _ => None,
        }
    }

    /// Typical holding period for this timeframe.
    pub fn holding_period(&self) -> &'static str {
        match self {
            Self::Intraday => "1-2 days",
            Self::Swing => "3-10 days",
            Self::Positional => "2-4 weeks",
        }
    }
}

/// Structured trade recommendation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeSignal {
    pub action: TradeAction,
    pub strength: SignalStrength,
    pub timeframe: SignalTimeframe,
    /// Primary strategy label.
    pub strategy: String,
    /// Supporting evidence, in the order it was found.
    pub reasons: Vec<String>,
    /// Risk factors, in the order they were found.
    pub warnings: Vec<String>,
    /// Expected return to the first target, in percent (BUY only).
    pub expected_return: f64,
    /// Holding-period estimate (BUY only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub holding_period: Option<String>,
    /// Priority 1-10, higher is better.
    pub priority: u8,
}

impl TradeSignal {
    /// A weak HOLD with no evidence attached.
    pub fn hold() -> Self {
        Self {
            priority: 1,
            ..Default::default()
        }
    }
}

/// Foreign institutional activity reported alongside sentiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum InstitutionalActivity {
    Buying,
    Selling,
    #[default]
    Neutral,
}

/// Caller-supplied fundamental snapshot. Only `score` feeds the engine.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FundamentalData {
    pub pe: f64,
    pub pb: f64,
    pub debt_to_equity: f64,
    pub roe: f64,
    pub quarterly_growth: f64,
    pub industry_pe: f64,
    pub relative_strength: f64,
    /// Fundamental score (0-100).
    pub score: f64,
}

/// Caller-supplied sentiment snapshot. Only `score` feeds the engine.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SentimentData {
    pub delivery_pct: f64,
    pub bulk_deals: u32,
    pub institutional_activity: InstitutionalActivity,
    pub options_pcr: f64,
    pub open_interest: f64,
    /// Sentiment score (0-100).
    pub score: f64,
}

/// Complete analysis for one instrument, produced fresh per request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    /// Unique analysis ID.
    pub id: Uuid,
    pub symbol: String,
    pub indicators: Indicators,
    pub risk_reward: RiskRewardPlan,
    pub signal: TradeSignal,
    pub fundamental: FundamentalData,
    pub sentiment: SentimentData,
    /// Overall confidence (0-100).
    pub confidence: f64,
    /// Quarter-Kelly position suggestion, in percent of capital.
    pub kelly_pct: f64,
    /// Unix timestamp (milliseconds) when computed.
    pub timestamp: i64,
}

/// Ranked picks funded under a risk tier's allocation limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GamePlan {
    pub tier: RiskTier,
    pub capital: f64,
    pub allocation: TierAllocation,
    /// Capital set aside for each pick.
    pub position_capital: f64,
    /// Most capital a single pick may lose.
    pub max_risk_per_trade: f64,
    /// Capital left over once every pick is funded.
    pub reserve: f64,
    pub picks: Vec<Analysis>,
}
