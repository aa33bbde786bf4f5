//! Candlestick and chart pattern detection on closes.

use crate::types::{CandlePattern, ChartPattern};

/// Closes needed for chart pattern detection.
pub const CHART_WINDOW: usize = 50;
const SEGMENT: usize = 5;

/// Classify the last three closes.
pub fn detect_candle_pattern(closes: &[f64]) -> CandlePattern {
    let [first, middle, last] = match closes {
        [.., a, b, c] => [*a, *b, *c],
        _ => return CandlePattern::None,
    };

    if first < middle && middle < last && last > middle * 1.01 {
        CandlePattern::BullishEngulfing
    } else if first > middle && middle > last && last < middle * 0.99 {
        CandlePattern::BearishEngulfing
    } else if (last - middle).abs() < middle * 0.001 {
        CandlePattern::Doji
    } else {
        CandlePattern::None
    }
}

/// Classify the last 50 closes by comparing the first and last 5-bar segments.
///
/// Falling highs with rising lows is a triangle. When neither holds the
/// range is treated as a channel.
pub fn detect_chart_pattern(closes: &[f64]) -> ChartPattern {
    if closes.len() < CHART_WINDOW {
        return ChartPattern::None;
    }

    let window = &closes[closes.len() - CHART_WINDOW..];
    let extremes: Vec<(f64, f64)> = window
        .chunks(SEGMENT)
        .map(|segment| {
            segment.iter().fold((f64::NEG_INFINITY, f64::INFINITY), |(hi, lo), p| {
                (hi.max(*p), lo.min(*p))
            })
        })
        .collect();

    let (Some(first), Some(last)) = (extremes.first(), extremes.last()) else {
        return ChartPattern::None;
    };

    let highs_descending = first.0 > last.0;
    let lows_ascending = first.1 < last.1;

    match (highs_descending, lows_ascending) {
        (true, true) => ChartPattern::Triangle,
        (false, false) => ChartPattern::Channel,
        _ => ChartPattern::None,
    }
}
