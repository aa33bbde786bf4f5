//! Stop-loss, target and position-size planning.

use crate::config::RiskConfig;
use crate::error::{AppError, Result};
use crate::types::{
    Indicators, PositionAdvice, PositionSizing, RiskRewardPlan, RiskTier, TargetProjection,
    TradeStyle,
};

/// Stop placed this fraction of the way under the lowest support.
const SUPPORT_STOP_RATIO: f64 = 0.99;
/// Stop used when no support level is known.
const DEFAULT_STOP_RATIO: f64 = 0.98;
/// ATR multiple for the volatility stop.
const ATR_STOP_MULTIPLE: f64 = 1.5;
/// Reward multiples of risk for the three targets.
const TARGET_MULTIPLES: [f64; 3] = [2.0, 3.0, 5.0];
/// Targets capped just under the matching resistance.
const RESISTANCE_CAP_RATIO: f64 = 0.995;
/// Fraction of full Kelly suggested.
const KELLY_FRACTION: f64 = 0.25;
/// Ceiling for the advisor's risk per trade, in percent.
const MAX_ADVISED_RISK_PCT: f64 = 5.0;

/// Plans stops, targets and position sizes for long entries.
#[derive(Debug, Clone, Default)]
pub struct RiskRewardEngine {
    config: RiskConfig,
}

impl RiskRewardEngine {
    pub fn new(config: RiskConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RiskConfig {
        &self.config
    }

    /// Risk per trade for a tier, unless an explicit override is given.
    pub fn risk_pct(&self, tier: RiskTier, override_pct: Option<f64>) -> Result<f64> {
        let pct = override_pct.unwrap_or_else(|| self.config.risk_pct(tier));
        validate_risk_pct(pct)?;
        Ok(pct)
    }

    /// Stop-loss for a long entry.
    ///
    /// 1% under the lowest support, or 2% under entry without usable support.
    /// An ATR stop (entry - 1.5 ATR) replaces it when tighter.
    pub fn stop_loss(&self, entry: f64, indicators: &Indicators) -> f64 {
        let mut stop = match indicators.support.first() {
            Some(support) if support * SUPPORT_STOP_RATIO < entry => support * SUPPORT_STOP_RATIO,
            _ => entry * DEFAULT_STOP_RATIO,
        };

        if indicators.atr > 0.0 {
            let atr_stop = entry - indicators.atr * ATR_STOP_MULTIPLE;
            if atr_stop > stop {
                stop = atr_stop;
            }
        }

        stop
    }

    /// Three targets at 2x, 3x and 5x risk, each capped under the matching
    /// resistance level when that level is lower.
    pub fn project_targets(&self, entry: f64, stop: f64, resistance: &[f64]) -> [f64; 3] {
        let risk = entry - stop;
        let mut targets = TARGET_MULTIPLES.map(|m| entry + risk * m);

        for (target, level) in targets.iter_mut().zip(resistance) {
            if *level < *target {
                *target = level * RESISTANCE_CAP_RATIO;
            }
        }

        targets
    }

    /// Size a position so that hitting the stop loses `risk_pct` of capital,
    /// then cap invested value at the configured share of capital.
    pub fn size_position(
        &self,
        capital: f64,
        entry: f64,
        stop: f64,
        risk_pct: f64,
    ) -> Result<PositionSizing> {
        validate_capital(capital)?;
        validate_entry(entry)?;
        validate_risk_pct(risk_pct)?;

        let risk_per_unit = entry - stop;
        if risk_per_unit.is_nan() || risk_per_unit <= 0.0 {
            return Ok(PositionSizing::default());
        }

        Ok(self.apply_exposure_cap(capital, entry, risk_per_unit, capital * risk_pct / 100.0))
    }

    fn apply_exposure_cap(
        &self,
        capital: f64,
        entry: f64,
        risk_per_unit: f64,
        risk_budget: f64,
    ) -> PositionSizing {
        let mut units = (risk_budget / risk_per_unit).floor().max(0.0) as u64;
        let max_invested = capital * self.config.max_position_fraction;
        let mut capped = false;

        if units as f64 * entry > max_invested {
            units = (max_invested / entry).floor().max(0.0) as u64;
            capped = true;
        }

        PositionSizing {
            units,
            capital_at_risk: units as f64 * risk_per_unit,
            invested: units as f64 * entry,
            capped,
        }
    }

    /// Full risk-reward plan for a long entry at `entry`.
    pub fn plan(
        &self,
        entry: f64,
        indicators: &Indicators,
        capital: f64,
        risk_pct: f64,
    ) -> Result<RiskRewardPlan> {
        validate_entry(entry)?;

        let stop_loss = self.stop_loss(entry, indicators);
        let targets = self.project_targets(entry, stop_loss, &indicators.resistance);
        let sizing = self.size_position(capital, entry, stop_loss, risk_pct)?;

        let risk_per_unit = entry - stop_loss;
        // An uncapped first target is exactly 2x risk; re-deriving it from
        // the rounded price would drift around the ratio thresholds.
        let uncapped = entry + risk_per_unit * TARGET_MULTIPLES[0];
        let reward_per_unit = if targets[0] == uncapped {
            risk_per_unit * TARGET_MULTIPLES[0]
        } else {
            targets[0] - entry
        };
        let risk_reward_ratio = if risk_per_unit > 0.0 {
            reward_per_unit / risk_per_unit
        } else {
            0.0
        };
        let units = sizing.units as f64;

        Ok(RiskRewardPlan {
            entry_price: entry,
            stop_loss,
            targets,
            risk_per_unit,
            reward_per_unit,
            risk_reward_ratio,
            position_size: sizing.units,
            capital_at_risk: sizing.capital_at_risk,
            max_loss: risk_per_unit * units,
            max_profit: (targets[2] - entry) * units,
            exposure_capped: sizing.capped,
        })
    }

    /// Quarter-Kelly position suggestion in percent of capital.
    ///
    /// Win rate is confidence / 100; the win is the move to target 2 and the
    /// loss the move to the stop, both relative to entry. Zero when the win
    /// is not positive.
    pub fn kelly_suggestion(&self, confidence: f64, plan: &RiskRewardPlan) -> f64 {
        kelly(
            confidence,
            plan.entry_price,
            plan.stop_loss,
            plan.target2(),
        )
    }

    /// Position recommendation for a trade style.
    ///
    /// Accelerated mode scales risk up for small accounts (x2 under 50 000,
    /// x1.5 under 100 000) and by confidence (x1.2 above 80, x0.8 below 60).
    /// Risk never exceeds 5% of capital.
    pub fn optimal_position(
        &self,
        capital: f64,
        entry: f64,
        stop: f64,
        style: TradeStyle,
        confidence: f64,
        accelerated: bool,
    ) -> Result<PositionAdvice> {
        validate_capital(capital)?;
        validate_entry(entry)?;
        if !stop.is_finite() {
            return Err(AppError::InvalidInput(format!("stop-loss must be finite, got {stop}")));
        }

        let mut risk_pct = style.base_risk_pct();
        if accelerated {
            if capital < 50_000.0 {
                risk_pct *= 2.0;
            } else if capital < 100_000.0 {
                risk_pct *= 1.5;
            }

            if confidence > 80.0 {
                risk_pct *= 1.2;
            } else if confidence < 60.0 {
                risk_pct *= 0.8;
            }
        }
        let risk_pct = risk_pct.min(MAX_ADVISED_RISK_PCT);

        let risk_per_unit = (entry - stop).abs();
        let sizing = if risk_per_unit > 0.0 {
            self.apply_exposure_cap(capital, entry, risk_per_unit, capital * risk_pct / 100.0)
        } else {
            PositionSizing::default()
        };

        let units = sizing.units as f64;
        let targets = TARGET_MULTIPLES
            .iter()
            .map(|m| {
                let price = entry + risk_per_unit * m;
                let profit = units * (price - entry);
                let return_pct = if sizing.invested > 0.0 {
                    profit / sizing.invested * 100.0
                } else {
                    0.0
                };
                TargetProjection {
                    price,
                    profit,
                    return_pct,
                }
            })
            .collect::<Vec<_>>();

        let capital_pct = if capital > 0.0 {
            sizing.invested / capital * 100.0
        } else {
            0.0
        };

        Ok(PositionAdvice {
            style,
            accelerated,
            units: sizing.units,
            investment: sizing.invested,
            capital_at_risk: sizing.capital_at_risk,
            risk_pct,
            capital_pct,
            kelly_pct: kelly(confidence, entry, stop, entry + risk_per_unit * TARGET_MULTIPLES[1]),
            targets,
            confidence,
        })
    }
}

/// Quarter-Kelly fraction in percent for a long trade with the given levels.
pub fn kelly(confidence: f64, entry: f64, stop: f64, target: f64) -> f64 {
    if entry <= 0.0 {
        return 0.0;
    }
    let win_rate = (confidence / 100.0).clamp(0.0, 1.0);
    let avg_win = (target - entry) / entry;
    let avg_loss = (entry - stop) / entry;

    if avg_win.is_nan() || avg_win <= 0.0 {
        return 0.0;
    }

    (win_rate * avg_win - (1.0 - win_rate) * avg_loss) / avg_win * 100.0 * KELLY_FRACTION
}

pub(crate) fn validate_capital(capital: f64) -> Result<()> {
    if !capital.is_finite() || capital < 0.0 {
        return Err(AppError::InvalidInput(format!(
            "capital must be finite and non-negative, got {capital}"
        )));
    }
    Ok(())
}

fn validate_entry(entry: f64) -> Result<()> {
    if !entry.is_finite() || entry <= 0.0 {
        return Err(AppError::InvalidInput(format!(
            "entry price must be finite and positive, got {entry}"
        )));
    }
    Ok(())
}

fn validate_risk_pct(pct: f64) -> Result<()> {
    if !pct.is_finite() || pct <= 0.0 || pct > 100.0 {
        return Err(AppError::InvalidInput(format!(
            "risk percentage must be within (0, 100], got {pct}"
        )));
    }
    Ok(())
}
