//! Quote-level scanners: momentum candidates, sector strength and quick signals.

use std::cmp::Ordering;

use super::scoring::{PointScore, StrengthScorer};
use crate::config::ScannerConfig;
use crate::types::{
    MomentumStock, Quote, RotationStrength, ScanType, SectorAnalysis, SectorAnalysisType,
    SectorCall, SectorReport, SectorRotation, SignalStrength, SignalTimeframe, TradeAction,
    TradeSignal,
};

/// Sectors listed in the top and weak slices of a report.
pub const SECTOR_SLICE: usize = 3;

/// Intraday momentum score for a single quote.
#[derive(Debug, Clone)]
pub struct MomentumScorer {
    min_price_change: f64,
    min_volume_surge: f64,
}

impl Default for MomentumScorer {
    fn default() -> Self {
        Self::from_config(&ScannerConfig::default())
    }
}

impl MomentumScorer {
    pub fn from_config(config: &ScannerConfig) -> Self {
        Self {
            min_price_change: config.min_price_change,
            min_volume_surge: config.min_volume_surge,
        }
    }

    /// Score a quote and describe what drove the score.
    fn evaluate(&self, quote: &Quote) -> (f64, Vec<String>) {
        let change = quote.change_pct();
        let volume_multiple = quote.volume_multiple();
        let mut score = PointScore::new(50.0);
        let mut signals = Vec::new();

        if change > self.min_price_change {
            score.add(change * 2.0);
            signals.push(format!("Price surge: +{change:.2}%"));
        }
        if volume_multiple > self.min_volume_surge / 100.0 {
            score.add(20.0);
            signals.push(format!("Volume surge: {volume_multiple:.1}x average"));
        }
        if quote.last_price >= quote.high * 0.98 {
            score.add(15.0);
            signals.push("Near day's high".to_string());
        }
        if quote.last_price > quote.average_price && quote.average_price > quote.open {
            score.add(10.0);
            signals.push("Strong buying pressure".to_string());
        }

        (score.finish(), signals)
    }

    /// Full momentum candidate with entry, stop and target levels.
    pub fn candidate(&self, quote: &Quote) -> MomentumStock {
        let (score, signals) = self.evaluate(quote);
        MomentumStock {
            symbol: quote.symbol.clone(),
            last_price: quote.last_price,
            price_change: quote.change_pct(),
            volume_multiple: quote.volume_multiple(),
            score,
            signals,
            entry_level: quote.last_price * 1.005,
            stop_loss: quote.low * 0.99,
            target: quote.last_price * 1.05,
        }
    }
}

impl StrengthScorer for MomentumScorer {
    type Input = Quote;

    fn id(&self) -> &str {
        "momentum"
    }

    fn score(&self, quote: &Quote) -> f64 {
        self.evaluate(quote).0
    }
}

/// Sector index strength under one analysis model.
#[derive(Debug, Clone, Copy, Default)]
pub struct SectorScorer {
    analysis_type: SectorAnalysisType,
}

impl SectorScorer {
    pub fn new(analysis_type: SectorAnalysisType) -> Self {
        Self { analysis_type }
    }

    pub fn analysis_type(&self) -> SectorAnalysisType {
        self.analysis_type
    }

    fn relative_strength(quote: &Quote) -> f64 {
        let change = quote.change_pct();
        let mut score = PointScore::new(50.0);
        if change > 2.0 {
            score.add(20.0);
        } else if change > 0.0 {
            score.add(10.0);
        } else if change < -2.0 {
            score.add(-20.0);
        }
        score
            .add_if(quote.last_price > quote.average_price, 15.0)
            .add_if(quote.volume > quote.reference_volume, 15.0);
        score.finish()
    }

    fn momentum(quote: &Quote) -> f64 {
        let mut score = PointScore::new(50.0);
        score
            .add(quote.change_pct() * 5.0)
            .add_if(quote.last_price >= quote.high, 20.0);
        score.finish()
    }

    fn institutional_flow(quote: &Quote) -> f64 {
        let mut score = PointScore::new(50.0);
        score
            .add_if(
                quote.volume > quote.reference_volume * 1.5 && quote.net_change > 0.0,
                30.0,
            )
            .add_if(
                quote.high - quote.low < quote.last_price * 0.02
                    && quote.volume > quote.reference_volume,
                20.0,
            );
        score.finish()
    }

    fn breakout(quote: &Quote) -> f64 {
        let mut score = PointScore::new(0.0);
        score
            .add_if(quote.last_price >= quote.high, 50.0)
            .add_if(quote.volume > quote.reference_volume * 1.5, 30.0)
            .add_if(
                quote.last_price > quote.open && quote.last_price > quote.average_price,
                20.0,
            );
        score.finish()
    }
}

impl StrengthScorer for SectorScorer {
    type Input = Quote;

    fn id(&self) -> &str {
        match self.analysis_type {
            SectorAnalysisType::RelativeStrength => "relative_strength",
            SectorAnalysisType::Momentum => "momentum",
            SectorAnalysisType::InstitutionalFlow => "institutional_flow",
            SectorAnalysisType::Breakout => "breakout",
        }
    }

    fn score(&self, quote: &Quote) -> f64 {
        match self.analysis_type {
            SectorAnalysisType::RelativeStrength => Self::relative_strength(quote),
            SectorAnalysisType::Momentum => Self::momentum(quote),
            SectorAnalysisType::InstitutionalFlow => Self::institutional_flow(quote),
            SectorAnalysisType::Breakout => Self::breakout(quote),
        }
    }
}

/// Score one sector index.
pub fn analyze_sector(name: &str, quote: &Quote, scorer: &SectorScorer) -> SectorAnalysis {
    let strength_score = scorer.score(quote);
    SectorAnalysis {
        sector: name.to_string(),
        price_change: quote.change_pct(),
        strength_score,
        recommendation: SectorCall::from_score(strength_score),
    }
}

fn by_score_desc(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

/// Sort sectors strongest first.
pub fn rank_sectors(mut sectors: Vec<SectorAnalysis>) -> Vec<SectorAnalysis> {
    sectors.sort_by(|a, b| by_score_desc(a.strength_score, b.strength_score));
    sectors
}

/// Rotation out of the weakest sector into the strongest.
///
/// Expects `sectors` sorted strongest first.
pub fn sector_rotation(sectors: &[SectorAnalysis]) -> SectorRotation {
    let (Some(strongest), Some(weakest)) = (sectors.first(), sectors.last()) else {
        return no_rotation();
    };
    if sectors.len() < 2 {
        return no_rotation();
    }

    let spread = strongest.strength_score - weakest.strength_score;
    let strength = if spread > 30.0 {
        RotationStrength::Strong
    } else if spread < 10.0 {
        RotationStrength::Weak
    } else {
        RotationStrength::Moderate
    };

    SectorRotation {
        rotating_from: Some(weakest.sector.clone()),
        rotating_to: Some(strongest.sector.clone()),
        strength,
    }
}

fn no_rotation() -> SectorRotation {
    SectorRotation {
        rotating_from: None,
        rotating_to: None,
        strength: RotationStrength::Weak,
    }
}

/// First `count` sectors of a ranked list.
pub fn top_sectors(sectors: &[SectorAnalysis], count: usize) -> Vec<SectorAnalysis> {
    sectors.iter().take(count).cloned().collect()
}

/// Last `count` sectors of a ranked list.
pub fn weak_sectors(sectors: &[SectorAnalysis], count: usize) -> Vec<SectorAnalysis> {
    sectors[sectors.len().saturating_sub(count)..].to_vec()
}

/// Score, rank and summarize a set of sector index quotes.
pub fn sector_report<'a, I>(quotes: I, scorer: &SectorScorer) -> SectorReport
where
    I: IntoIterator<Item = (&'a str, &'a Quote)>,
{
    let sectors = rank_sectors(
        quotes
            .into_iter()
            .map(|(name, quote)| analyze_sector(name, quote, scorer))
            .collect(),
    );

    SectorReport {
        analysis_type: scorer.analysis_type(),
        top: top_sectors(&sectors, SECTOR_SLICE),
        weak: weak_sectors(&sectors, SECTOR_SLICE),
        rotation: sector_rotation(&sectors),
        sectors,
        timestamp: chrono::Utc::now().timestamp_millis(),
    }
}

/// Keep candidates scoring above the minimum, strongest first, up to the limit.
pub fn rank_momentum(mut candidates: Vec<MomentumStock>, config: &ScannerConfig) -> Vec<MomentumStock> {
    candidates.retain(|c| c.score > config.min_score);
    candidates.sort_by(|a, b| by_score_desc(a.score, b.score));
    candidates.truncate(config.max_results);
    candidates
}

/// Lightweight signal from a single quote, without history.
pub fn quick_signal(quote: &Quote, scan_type: ScanType) -> TradeSignal {
    let mut signal = TradeSignal::hold();
    let change = quote.change_pct();

    let mut buy = |strength: SignalStrength, expected: f64, priority: u8, reasons: Vec<String>| {
        signal.action = TradeAction::Buy;
        signal.strength = strength;
        signal.expected_return = expected;
        signal.priority = priority;
        signal.reasons = reasons;
    };

    match scan_type {
        ScanType::Momentum => {
            if change > 2.0 && quote.volume > quote.reference_volume {
                buy(
                    SignalStrength::Moderate,
                    15.0,
                    7,
                    vec![
                        format!("Strong momentum: +{change:.2}%"),
                        "Volume above average".to_string(),
                    ],
                );
            }
        }
        ScanType::OversoldBounce => {
            if change < -3.0 {
                buy(
                    SignalStrength::Moderate,
                    12.0,
                    6,
                    vec!["Oversold condition for potential bounce".to_string()],
                );
            }
        }
        ScanType::Breakout => {
            if quote.last_price >= quote.high && quote.volume > quote.reference_volume * 1.5 {
                buy(
                    SignalStrength::Strong,
                    20.0,
                    8,
                    vec![
                        "Breaking previous high".to_string(),
                        "High volume confirmation".to_string(),
                    ],
                );
            }
        }
        ScanType::HighVolume => {
            if quote.volume > quote.reference_volume * 2.0 && change > 0.0 {
                buy(
                    SignalStrength::Weak,
                    10.0,
                    5,
                    vec![format!(
                        "Heavy volume: {:.1}x average",
                        quote.volume_multiple()
                    )],
                );
            }
        }
    }

    if quote.upper_circuit_limit > 0.0 && quote.last_price > quote.upper_circuit_limit * 0.95 {
        signal.warnings.push("Near upper circuit".to_string());
    }
    if quote.volume < quote.reference_volume * 0.5 {
        signal.warnings.push("Low volume - poor liquidity".to_string());
    }

    signal.timeframe = SignalTimeframe::Swing;
    signal.holding_period = Some("3-5 days".to_string());
    signal.strategy = format!("{} strategy", scan_type.label());
    signal
}
