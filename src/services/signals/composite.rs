//! Composite trend and directional scoring.

use super::indicators::{
    detect_divergence, Atr, BollingerBands, Ema, Indicator, Macd, Rsi, Sma, Stochastic,
    SupportResistance, VolumeProfile, Vwap, MIN_HISTORY,
};
use super::patterns::{detect_candle_pattern, detect_chart_pattern};
use super::scoring::{StrengthScorer, WeightedScore};
use crate::types::{CandlePattern, ChartPattern, Indicators, MacdCrossover, MarketSeries, Trend};

const TREND_WEIGHT: f64 = 25.0;
const RSI_WEIGHT: f64 = 15.0;
const MACD_WEIGHT: f64 = 20.0;
const STOCHASTIC_WEIGHT: f64 = 10.0;
const VOLUME_WEIGHT: f64 = 15.0;
const PATTERN_WEIGHT: f64 = 15.0;

/// Largest possible number of trend points.
const MAX_TREND_POINTS: f64 = 6.0;

/// Moving averages feeding the trend decision.
#[derive(Debug, Clone, Copy)]
pub struct TrendInputs {
    pub sma20: f64,
    pub sma50: f64,
    pub sma200: f64,
    pub macd_histogram: f64,
}

/// Classify the trend and its strength (0-100).
///
/// Points: MA stack +/-3, 20-bar over prior 20-bar mean +/-2, MACD histogram
/// sign +/-1. Equal comparisons score nothing.
pub fn determine_trend(closes: &[f64], inputs: TrendInputs) -> (Trend, f64) {
    if closes.len() < 50 {
        return (Trend::Neutral, 0.0);
    }

    let current = closes[closes.len() - 1];
    let mut points = 0.0;

    if current > inputs.sma20 && inputs.sma20 > inputs.sma50 && inputs.sma50 > inputs.sma200 {
        points += 3.0;
    } else if current < inputs.sma20 && inputs.sma20 < inputs.sma50 && inputs.sma50 < inputs.sma200
    {
        points -= 3.0;
    }

    let split = closes.len() - 20;
    let recent = Sma::compute(&closes[split..], 20).unwrap_or(0.0);
    let older = Sma::compute(&closes[split - 20..split], 20).unwrap_or(0.0);
    if recent > older {
        points += 2.0;
    } else if recent < older {
        points -= 2.0;
    }

    if inputs.macd_histogram > 0.0 {
        points += 1.0;
    } else if inputs.macd_histogram < 0.0 {
        points -= 1.0;
    }

    let strength = (f64::abs(points) / MAX_TREND_POINTS * 100.0).min(100.0);
    let trend = if points > 2.0 {
        Trend::Bullish
    } else if points < -2.0 {
        Trend::Bearish
    } else {
        Trend::Neutral
    };

    (trend, strength)
}

/// Which side of the market a technical score measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bias {
    Bullish,
    Bearish,
}

/// Weighted technical score for one side of the market.
pub struct TechnicalScorer {
    bias: Bias,
}

impl TechnicalScorer {
    pub fn bullish() -> Self {
        Self { bias: Bias::Bullish }
    }

    pub fn bearish() -> Self {
        Self { bias: Bias::Bearish }
    }

    fn bullish_factors(ind: &Indicators, score: &mut WeightedScore) {
        let trend = if ind.trend == Trend::Bullish {
            ind.trend_strength / 100.0
        } else {
            0.0
        };
        score.add(TREND_WEIGHT, trend);

        let rsi = if ind.rsi <= 30.0 {
            1.0
        } else if ind.rsi < 70.0 {
            (ind.rsi - 30.0) / 40.0
        } else {
            0.0
        };
        score.add(RSI_WEIGHT, rsi);

        let macd = if ind.macd.crossover == MacdCrossover::Bullish {
            1.0
        } else if ind.macd.histogram > 0.0 {
            0.5
        } else {
            0.0
        };
        score.add(MACD_WEIGHT, macd);

        let stoch = if ind.stochastic.oversold {
            1.0
        } else if ind.stochastic.k > 20.0 && ind.stochastic.k < 80.0 {
            0.5
        } else {
            0.0
        };
        score.add(STOCHASTIC_WEIGHT, stoch);

        let profile = &ind.volume_profile;
        let volume = if profile.volume_surge && profile.accumulation_distribution > 0.0 {
            1.0
        } else if profile.accumulation_distribution > 0.0 {
            0.5
        } else {
            0.0
        };
        score.add(VOLUME_WEIGHT, volume);

        if has_pattern(ind) {
            let pattern = if ind.candle_pattern == CandlePattern::BullishEngulfing {
                1.0
            } else if matches!(ind.chart_pattern, ChartPattern::Triangle | ChartPattern::Channel) {
                0.5
            } else {
                0.0
            };
            score.add(PATTERN_WEIGHT, pattern);
        }
    }

    fn bearish_factors(ind: &Indicators, score: &mut WeightedScore) {
        let trend = if ind.trend == Trend::Bearish {
            ind.trend_strength / 100.0
        } else {
            0.0
        };
        score.add(TREND_WEIGHT, trend);

        let rsi = if ind.rsi > 70.0 {
            1.0
        } else if ind.rsi > 50.0 {
            (70.0 - ind.rsi) / 20.0
        } else {
            0.0
        };
        score.add(RSI_WEIGHT, rsi);

        let macd = if ind.macd.crossover == MacdCrossover::Bearish {
            1.0
        } else if ind.macd.histogram < 0.0 {
            0.5
        } else {
            0.0
        };
        score.add(MACD_WEIGHT, macd);

        let stoch = if ind.stochastic.overbought {
            1.0
        } else if ind.stochastic.k > 50.0 {
            0.5
        } else {
            0.0
        };
        score.add(STOCHASTIC_WEIGHT, stoch);

        let profile = &ind.volume_profile;
        let volume = if profile.volume_surge && profile.accumulation_distribution < 0.0 {
            1.0
        } else if profile.accumulation_distribution < 0.0 {
            0.5
        } else {
            0.0
        };
        score.add(VOLUME_WEIGHT, volume);

        if has_pattern(ind) {
            let pattern = if ind.candle_pattern == CandlePattern::BearishEngulfing {
                1.0
            } else if ind.candle_pattern == CandlePattern::Doji && ind.trend == Trend::Bearish {
                0.5
            } else {
                0.0
            };
            score.add(PATTERN_WEIGHT, pattern);
        }
    }
}

/// The pattern factor only takes part when some pattern was detected.
///
/// With no pattern the weight is left out of the normalising total instead
/// of counting as a zero, so pattern-free series are not pulled bearish.
fn has_pattern(ind: &Indicators) -> bool {
    ind.candle_pattern != CandlePattern::None || ind.chart_pattern != ChartPattern::None
}

impl StrengthScorer for TechnicalScorer {
    type Input = Indicators;

    fn id(&self) -> &str {
        match self.bias {
            Bias::Bullish => "bullish",
            Bias::Bearish => "bearish",
        }
    }

    fn score(&self, indicators: &Indicators) -> f64 {
        let mut score = WeightedScore::new();
        match self.bias {
            Bias::Bullish => Self::bullish_factors(indicators, &mut score),
            Bias::Bearish => Self::bearish_factors(indicators, &mut score),
        }
        score.finish()
    }
}

/// Compute every indicator, pattern and directional score for a series.
///
/// Returns `Indicators::default()` for fewer than 200 closes. A series with
/// no price movement scores 50/50 with a neutral trend.
pub fn calculate_indicators(series: &MarketSeries) -> Indicators {
    if series.len() < MIN_HISTORY {
        return Indicators::default();
    }

    let closes = series.closes();
    let rsi = Rsi::default().value(series);
    let macd = Macd::default().value(series);
    let levels = SupportResistance.value(series);

    let mut indicators = Indicators {
        sma20: Sma::new(20).value(series),
        sma50: Sma::new(50).value(series),
        sma200: Sma::new(200).value(series),
        ema9: Ema::new(9).value(series),
        ema21: Ema::new(21).value(series),
        vwap: Vwap.value(series),
        rsi,
        rsi_divergence: detect_divergence(closes, rsi),
        macd,
        stochastic: Stochastic::default().value(series),
        bollinger: BollingerBands::default().value(series),
        atr: Atr::default().value(series),
        support: levels.support,
        resistance: levels.resistance,
        candle_pattern: detect_candle_pattern(closes),
        chart_pattern: detect_chart_pattern(closes),
        volume_profile: VolumeProfile.value(series),
        ..Default::default()
    };

    // Directional scores are meaningless without any price movement.
    if !series.has_price_movement() {
        indicators.trend = Trend::Neutral;
        indicators.trend_strength = 0.0;
        indicators.bullish_score = 50.0;
        indicators.bearish_score = 50.0;
        return indicators;
    }

    let (trend, strength) = determine_trend(
        closes,
        TrendInputs {
            sma20: indicators.sma20,
            sma50: indicators.sma50,
            sma200: indicators.sma200,
            macd_histogram: indicators.macd.histogram,
        },
    );
    indicators.trend = trend;
    indicators.trend_strength = strength;
    indicators.bullish_score = TechnicalScorer::bullish().score(&indicators);
    indicators.bearish_score = TechnicalScorer::bearish().score(&indicators);

    indicators
}
