use std::sync::Arc;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use omen::config::Config;
use omen::services::signals::RiskRewardEngine;
use omen::services::{Screener, SnapshotProvider};
use omen::types::{RiskTier, ScanType, SectorAnalysisType, TradeStyle};

#[derive(Parser)]
#[command(name = "omen")]
#[command(about = "Market analysis and trade-signal engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Full analysis for one symbol
    Analyze {
        /// Snapshot JSON file
        snapshot: String,
        /// Symbol to analyze
        symbol: String,
        /// Risk tier (conservative, moderate, aggressive, maximum)
        #[arg(short, long)]
        tier: Option<String>,
        /// Trading capital, overrides CAPITAL
        #[arg(short, long)]
        capital: Option<f64>,
    },

    /// Analyze every symbol and rank the signals
    Batch {
        /// Snapshot JSON file
        snapshot: String,
        /// Print a game plan: BUY signals up to the tier's position limit,
        /// with the tier's capital allocation
        #[arg(long)]
        limit: bool,
    },

    /// Momentum scan over every quote in the snapshot
    Scan {
        /// Snapshot JSON file
        snapshot: String,
    },

    /// Quote-only scan (momentum, oversold_bounce, breakout, high_volume)
    Quick {
        /// Snapshot JSON file
        snapshot: String,
        #[arg(default_value = "momentum")]
        scan_type: String,
    },

    /// Position size and targets for a planned trade
    Position {
        /// Entry price
        entry: f64,
        /// Stop-loss price
        stop: f64,
        /// Trade style (scalping, intraday, swing, positional)
        #[arg(short, long, default_value = "swing")]
        style: String,
        /// Confidence in the setup (0-100)
        #[arg(long, default_value = "70")]
        confidence: f64,
        /// Scale risk up for small accounts and high confidence
        #[arg(long)]
        accelerated: bool,
        /// Trading capital, overrides CAPITAL
        #[arg(short, long)]
        capital: Option<f64>,
    },

    /// Rank the snapshot's quotes as sector indices
    Sectors {
        /// Snapshot JSON file
        snapshot: String,
        /// Analysis type (relative_strength, momentum, institutional_flow, breakout)
        #[arg(default_value = "relative_strength")]
        analysis_type: String,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QuickHit {
    symbol: String,
    signal: omen::types::TradeSignal,
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "omen=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_env();

    match cli.command {
        Commands::Analyze {
            snapshot,
            symbol,
            tier,
            capital,
        } => {
            if let Some(tier) = tier {
                config.risk_tier =
                    RiskTier::from_str(&tier).ok_or_else(|| anyhow!("unknown risk tier: {tier}"))?;
            }
            if let Some(capital) = capital {
                config.capital = capital;
            }
            let screener = screener(&snapshot, config)?;
            let analysis = screener.analyze(&symbol).await?;
            print_json(&analysis)?;
        }
        Commands::Batch { snapshot, limit } => {
            let (screener, symbols) = screener_with_symbols(&snapshot, config)?;
            if limit {
                print_json(&screener.game_plan(&symbols).await)?;
            } else {
                print_json(&screener.analyze_batch(&symbols, false).await)?;
            }
        }
        Commands::Scan { snapshot } => {
            let (screener, symbols) = screener_with_symbols(&snapshot, config)?;
            print_json(&screener.scan_momentum(&symbols).await)?;
        }
        Commands::Quick {
            snapshot,
            scan_type,
        } => {
            let scan_type = ScanType::from_str(&scan_type)
                .ok_or_else(|| anyhow!("unknown scan type: {scan_type}"))?;
            let (screener, symbols) = screener_with_symbols(&snapshot, config)?;
            let hits: Vec<QuickHit> = screener
                .quick_scan(&symbols, scan_type)
                .await
                .into_iter()
                .map(|(symbol, signal)| QuickHit { symbol, signal })
                .collect();
            print_json(&hits)?;
        }
        Commands::Position {
            entry,
            stop,
            style,
            confidence,
            accelerated,
            capital,
        } => {
            let style =
                TradeStyle::from_str(&style).ok_or_else(|| anyhow!("unknown trade style: {style}"))?;
            let engine = RiskRewardEngine::new(config.risk.clone());
            let advice = engine.optimal_position(
                capital.unwrap_or(config.capital),
                entry,
                stop,
                style,
                confidence,
                accelerated,
            )?;
            print_json(&advice)?;
        }
        Commands::Sectors {
            snapshot,
            analysis_type,
        } => {
            let analysis_type = SectorAnalysisType::from_str(&analysis_type)
                .ok_or_else(|| anyhow!("unknown analysis type: {analysis_type}"))?;
            let (screener, symbols) = screener_with_symbols(&snapshot, config)?;
            print_json(&screener.rank_sectors(&symbols, analysis_type).await)?;
        }
    }

    Ok(())
}

fn screener(path: &str, config: Config) -> Result<Screener> {
    Ok(screener_with_symbols(path, config)?.0)
}

fn screener_with_symbols(path: &str, config: Config) -> Result<(Screener, Vec<String>)> {
    let provider = SnapshotProvider::from_path(path)?;
    let symbols = provider.symbols();
    info!(
        "Capital {:.0}, tier {}, {} symbols",
        config.capital,
        config.risk_tier.name(),
        symbols.len()
    );
    Ok((Screener::new(Arc::new(provider), config), symbols))
}
