//! Multi-symbol scans over a market data provider.

use std::cmp::Ordering;
use std::sync::Arc;

use futures_util::future::join_all;
use tracing::{debug, info, warn};

use super::analyzer::{AnalysisRequest, Analyzer};
use super::provider::MarketDataProvider;
use crate::config::Config;
use crate::error::Result;
use crate::services::signals::{quick_signal, rank_momentum, sector_report, MomentumScorer, SectorScorer};
use crate::types::{
    Analysis, GamePlan, MarketSeries, MomentumStock, Quote, ScanType, SectorAnalysisType,
    SectorReport, TradeAction, TradeSignal,
};

/// Drives analyses and scans for many symbols at once.
pub struct Screener {
    provider: Arc<dyn MarketDataProvider>,
    config: Config,
    analyzer: Analyzer,
}

impl Screener {
    pub fn new(provider: Arc<dyn MarketDataProvider>, config: Config) -> Self {
        let analyzer = Analyzer::new(config.risk.clone());
        Self {
            provider,
            config,
            analyzer,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Fetch quotes concurrently, dropping symbols whose quote fails.
    async fn quotes(&self, symbols: &[String]) -> Vec<Quote> {
        let results = join_all(symbols.iter().map(|s| self.provider.quote(s))).await;

        symbols
            .iter()
            .zip(results)
            .filter_map(|(symbol, result)| match result {
                Ok(quote) => Some(quote),
                Err(e) => {
                    warn!("{}: skipping {}: {}", self.provider.name(), symbol, e);
                    None
                }
            })
            .collect()
    }

    /// Momentum candidates above the configured score, strongest first.
    pub async fn scan_momentum(&self, symbols: &[String]) -> Vec<MomentumStock> {
        let scorer = MomentumScorer::from_config(&self.config.scanner);
        let candidates = self
            .quotes(symbols)
            .await
            .iter()
            .map(|q| scorer.candidate(q))
            .collect();

        let ranked = rank_momentum(candidates, &self.config.scanner);
        info!(
            "Momentum scan: {} of {} symbols qualified",
            ranked.len(),
            symbols.len()
        );
        ranked
    }

    /// Rank sector indices by strength.
    pub async fn rank_sectors(
        &self,
        sectors: &[String],
        analysis_type: SectorAnalysisType,
    ) -> SectorReport {
        let quotes = self.quotes(sectors).await;
        let report = sector_report(
            quotes.iter().map(|q| (q.symbol.as_str(), q)),
            &SectorScorer::new(analysis_type),
        );
        info!(
            "Sector ranking ({:?}): {} sectors, rotating to {:?}",
            analysis_type,
            report.sectors.len(),
            report.rotation.rotating_to
        );
        report
    }

    /// Quote-only BUY signals for a scan type, highest priority first.
    pub async fn quick_scan(&self, symbols: &[String], scan_type: ScanType) -> Vec<(String, TradeSignal)> {
        let mut hits: Vec<(String, TradeSignal)> = self
            .quotes(symbols)
            .await
            .into_iter()
            .map(|q| {
                let signal = quick_signal(&q, scan_type);
                (q.symbol, signal)
            })
            .filter(|(_, s)| s.action == TradeAction::Buy)
            .collect();

        hits.sort_by(|a, b| b.1.priority.cmp(&a.1.priority));
        hits
    }

    /// Full analysis for one symbol.
    ///
    /// A failed history fetch degrades to an empty series so the result
    /// carries neutral indicators; a failed quote is an error.
    pub async fn analyze(&self, symbol: &str) -> Result<Analysis> {
        let (quote, history, fundamental, sentiment) = tokio::join!(
            self.provider.quote(symbol),
            self.provider.history(symbol, self.config.lookback_days),
            self.provider.fundamentals(symbol),
            self.provider.sentiment(symbol),
        );

        let quote = quote?;
        let series = history.unwrap_or_else(|e| {
            warn!("{}: no history for {}: {}", self.provider.name(), symbol, e);
            MarketSeries::empty()
        });

        let mut request = AnalysisRequest::from_config(symbol, series, &self.config).with_quote(quote);
        match fundamental {
            Ok(Some(fundamental)) => request = request.with_fundamental(fundamental),
            Ok(None) => {}
            Err(e) => warn!("{}: no fundamentals for {}: {}", self.provider.name(), symbol, e),
        }
        match sentiment {
            Ok(Some(sentiment)) => request = request.with_sentiment(sentiment),
            Ok(None) => {}
            Err(e) => warn!("{}: no sentiment for {}: {}", self.provider.name(), symbol, e),
        }

        self.analyzer.analyze(request)
    }

    /// Analyze many symbols, best first.
    ///
    /// With `limit_to_tier`, only BUY signals are kept and the list is cut
    /// to the risk tier's maximum concurrent positions.
    pub async fn analyze_batch(&self, symbols: &[String], limit_to_tier: bool) -> Vec<Analysis> {
        let results = join_all(symbols.iter().map(|s| self.analyze(s))).await;

        let mut analyses: Vec<Analysis> = symbols
            .iter()
            .zip(results)
            .filter_map(|(symbol, result)| match result {
                Ok(analysis) => Some(analysis),
                Err(e) => {
                    warn!("Analysis failed for {}: {}", symbol, e);
                    None
                }
            })
            .collect();

        analyses.sort_by(|a, b| {
            b.signal
                .priority
                .cmp(&a.signal.priority)
                .then_with(|| b.confidence.partial_cmp(&a.confidence).unwrap_or(Ordering::Equal))
        });

        if limit_to_tier {
            let max_positions = self.config.risk_tier.allocation().max_positions;
            analyses.retain(|a| a.signal.action == TradeAction::Buy);
            analyses.truncate(max_positions);
            debug!(
                "Tier {} allows {} positions, keeping {}",
                self.config.risk_tier.name(),
                max_positions,
                analyses.len()
            );
        }

        analyses
    }

    /// Tier-limited BUY picks with the capital each one may use.
    pub async fn game_plan(&self, symbols: &[String]) -> GamePlan {
        let tier = self.config.risk_tier;
        let capital = self.config.capital;
        let allocation = tier.allocation();
        let picks = self.analyze_batch(symbols, true).await;

        let position_capital = allocation.position_size(capital);
        let reserve = (capital - position_capital * picks.len() as f64).max(0.0);
        info!(
            "Game plan ({}): {} picks, {:.0} per position, {:.0} in reserve",
            tier.name(),
            picks.len(),
            position_capital,
            reserve
        );

        GamePlan {
            tier,
            capital,
            allocation,
            position_capital,
            max_risk_per_trade: allocation.max_risk_per_trade(capital),
            reserve,
            picks,
        }
    }
}
