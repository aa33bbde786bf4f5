//! Tests for the quote-level scanners

use omen::config::ScannerConfig;
use omen::services::signals::{
    analyze_sector, quick_signal, rank_momentum, sector_report, MomentumScorer, SectorScorer,
    StrengthScorer,
};
use omen::types::*;

fn sector_quote(name: &str, last: f64, change: f64, volume: f64) -> Quote {
    Quote {
        symbol: name.to_string(),
        last_price: last,
        open: last - change,
        high: last + 1.0,
        low: last - change - 1.0,
        average_price: last - change / 2.0,
        volume,
        reference_volume: 1000.0,
        net_change: change,
        ..Default::default()
    }
}

#[test]
fn test_momentum_candidates_ranked() {
    let scorer = MomentumScorer::default();
    let quotes = [
        // 4% up on 2x volume near the high with buying pressure
        sector_quote("ALPHA", 100.0, 4.0, 2000.0),
        // flat, quiet and well off the high
        Quote {
            high: 110.0,
            ..sector_quote("BETA", 100.0, 0.0, 900.0)
        },
        // 3% up, normal volume
        sector_quote("GAMMA", 100.0, 3.0, 1000.0),
    ];

    let candidates = quotes.iter().map(|q| scorer.candidate(q)).collect();
    let ranked = rank_momentum(candidates, &ScannerConfig::default());

    let symbols: Vec<&str> = ranked.iter().map(|c| c.symbol.as_str()).collect();
    assert_eq!(symbols, ["ALPHA", "GAMMA"]);
    assert!(ranked[0].score > ranked[1].score);
    assert!(ranked[0].signals.iter().any(|s| s.starts_with("Volume surge")));
}

#[test]
fn test_momentum_scores_bounded() {
    let scorer = MomentumScorer::default();
    for change in [-50.0, -5.0, 0.0, 5.0, 80.0] {
        let score = scorer.score(&sector_quote("X", 100.0, change, 5000.0));
        assert!((0.0..=100.0).contains(&score));
    }
}

#[test]
fn test_sector_scores_bounded_for_every_type() {
    let types = [
        SectorAnalysisType::RelativeStrength,
        SectorAnalysisType::Momentum,
        SectorAnalysisType::InstitutionalFlow,
        SectorAnalysisType::Breakout,
    ];
    for analysis_type in types {
        let scorer = SectorScorer::new(analysis_type);
        for change in [-30.0, -1.0, 0.0, 1.0, 30.0] {
            let analysis = analyze_sector("IDX", &sector_quote("IDX", 100.0, change, 3000.0), &scorer);
            assert!((0.0..=100.0).contains(&analysis.strength_score));
        }
    }
}

#[test]
fn test_sector_report() {
    let quotes = [
        sector_quote("NIFTY IT", 100.0, 3.0, 2000.0),
        sector_quote("NIFTY BANK", 100.0, 1.0, 1100.0),
        sector_quote("NIFTY PHARMA", 100.0, -3.0, 500.0),
        sector_quote("NIFTY AUTO", 100.0, 0.5, 800.0),
    ];
    let report = sector_report(
        quotes.iter().map(|q| (q.symbol.as_str(), q)),
        &SectorScorer::default(),
    );

    assert_eq!(report.analysis_type, SectorAnalysisType::RelativeStrength);
    assert_eq!(report.sectors.len(), 4);
    assert!(report
        .sectors
        .windows(2)
        .all(|w| w[0].strength_score >= w[1].strength_score));
    assert_eq!(report.top.len(), 3);
    assert_eq!(report.top[0].sector, "NIFTY IT");
    assert_eq!(report.weak.last().map(|s| s.sector.as_str()), Some("NIFTY PHARMA"));
    assert_eq!(report.rotation.rotating_to.as_deref(), Some("NIFTY IT"));
    assert_eq!(report.rotation.rotating_from.as_deref(), Some("NIFTY PHARMA"));
    assert_eq!(report.rotation.strength, RotationStrength::Strong);
    assert_eq!(report.top[0].recommendation, SectorCall::StrongBuy);
}

#[test]
fn test_empty_sector_report() {
    let report = sector_report(std::iter::empty::<(&str, &Quote)>(), &SectorScorer::default());
    assert!(report.sectors.is_empty());
    assert!(report.rotation.rotating_to.is_none());
    assert_eq!(report.rotation.strength, RotationStrength::Weak);
}

#[test]
fn test_quick_signal_breakout() {
    let quote = Quote {
        symbol: "BRK".to_string(),
        last_price: 105.0,
        high: 105.0,
        volume: 2000.0,
        reference_volume: 1000.0,
        ..Default::default()
    };
    let signal = quick_signal(&quote, ScanType::Breakout);

    assert_eq!(signal.action, TradeAction::Buy);
    assert_eq!(signal.strength, SignalStrength::Strong);
    assert_eq!(signal.priority, 8);
    assert_eq!(signal.expected_return, 20.0);
    assert_eq!(signal.timeframe, SignalTimeframe::Swing);
    assert_eq!(signal.holding_period.as_deref(), Some("3-5 days"));
}

#[test]
fn test_scan_type_parsing() {
    assert_eq!(ScanType::from_str("oversold_bounce"), Some(ScanType::OversoldBounce));
    assert_eq!(ScanType::from_str("breakout"), Some(ScanType::Breakout));
    assert_eq!(ScanType::from_str("nonsense"), None);
    assert_eq!(SectorAnalysisType::from_str("rs"), Some(SectorAnalysisType::RelativeStrength));
    assert_eq!(SectorAnalysisType::from_str("flow"), Some(SectorAnalysisType::InstitutionalFlow));
}
