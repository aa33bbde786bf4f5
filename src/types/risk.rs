use serde::{Deserialize, Serialize};

/// Risk appetite tier used to pick a default risk-per-trade percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    Conservative,
    #[default]
    Moderate,
    Aggressive,
    /// Highest-aggression tier for small accounts trying to compound quickly.
    Maximum,
}

impl RiskTier {
    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "conservative" | "low" => Some(Self::Conservative),
            "moderate" | "medium" => Some(Self::Moderate),
            "aggressive" | "high" => Some(Self::Aggressive),
            "maximum" | "max" | "poverty-escape" | "poverty_escape" => Some(Self::Maximum),
            _ => None,
        }
    }

    /// Get display name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Conservative => "Conservative",
            Self::Moderate => "Moderate",
            Self::Aggressive => "Aggressive",
            Self::Maximum => "Maximum",
        }
    }

    /// Portfolio allocation limits for this tier.
    pub fn allocation(&self) -> TierAllocation {
        match self {
            Self::Conservative => TierAllocation {
                max_positions: 2,
                position_fraction: 0.25,
                risk_fraction: 0.01,
            },
            Self::Moderate => TierAllocation {
                max_positions: 3,
                position_fraction: 0.30,
                risk_fraction: 0.02,
            },
            Self::Aggressive => TierAllocation {
                max_positions: 4,
                position_fraction: 0.35,
                risk_fraction: 0.03,
            },
            Self::Maximum => TierAllocation {
                max_positions: 2,
                position_fraction: 0.45,
                risk_fraction: 0.04,
            },
        }
    }
}

/// How many positions a tier may hold and how much capital each may use.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierAllocation {
    /// Maximum concurrent positions.
    pub max_positions: usize,
    /// Capital per position (0.0 - 1.0).
    pub position_fraction: f64,
    /// Capital at risk per trade (0.0 - 1.0).
    pub risk_fraction: f64,
}

impl TierAllocation {
    /// Capital to allocate per position.
    pub fn position_size(&self, capital: f64) -> f64 {
        capital * self.position_fraction
    }

    /// Maximum capital to risk on one trade.
    pub fn max_risk_per_trade(&self, capital: f64) -> f64 {
        capital * self.risk_fraction
    }
}

/// Trade style used by the position advisor to pick a base risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TradeStyle {
    Scalping,
    Intraday,
    #[default]
    Swing,
    Positional,
}

impl TradeStyle {
    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "scalping" | "scalp" => Some(Self::Scalping),
            "intraday" | "day" => Some(Self::Intraday),
            "swing" => Some(Self::Swing),
            "positional" | "position" => Some(Self::Positional),
            _ => None,
        }
    }

    /// Base risk per trade, in percent of capital.
    pub fn base_risk_pct(&self) -> f64 {
        match self {
            Self::Scalping => 0.5,
            Self::Intraday => 1.0,
            Self::Swing => 2.0,
            Self::Positional => 3.0,
        }
    }
}

/// Result of sizing a position against a stop.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionSizing {
    /// Whole units to buy.
    pub units: u64,
    /// Capital lost if the stop is hit.
    pub capital_at_risk: f64,
    /// Capital deployed at entry.
    pub invested: f64,
    /// Whether the single-position exposure cap shrank the position.
    pub capped: bool,
}

/// Stop, targets and size for a long entry.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskRewardPlan {
    pub entry_price: f64,
    pub stop_loss: f64,
    /// Three profit targets.
    pub targets: [f64; 3],
    /// Distance from entry to stop.
    pub risk_per_unit: f64,
    /// Distance from entry to the first target.
    pub reward_per_unit: f64,
    pub risk_reward_ratio: f64,
    pub position_size: u64,
    /// Capital at risk after any exposure cap was applied.
    pub capital_at_risk: f64,
    pub max_loss: f64,
    pub max_profit: f64,
    /// Whether the exposure cap shrank the position.
    pub exposure_capped: bool,
}

impl RiskRewardPlan {
    pub fn target1(&self) -> f64 {
        self.targets[0]
    }

    pub fn target2(&self) -> f64 {
        self.targets[1]
    }

    pub fn target3(&self) -> f64 {
        self.targets[2]
    }
}

/// One profit target in a position recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetProjection {
    pub price: f64,
    /// Total profit if the target is reached.
    pub profit: f64,
    /// Profit as a percentage of invested capital.
    pub return_pct: f64,
}

/// Position sizing recommendation with Kelly guidance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionAdvice {
    pub style: TradeStyle,
    pub accelerated: bool,
    pub units: u64,
    pub investment: f64,
    pub capital_at_risk: f64,
    /// Risk per trade actually used, in percent of capital.
    pub risk_pct: f64,
    /// Investment as a percentage of capital.
    pub capital_pct: f64,
    pub targets: Vec<TargetProjection>,
    /// Quarter-Kelly suggestion, in percent of capital.
    pub kelly_pct: f64,
    pub confidence: f64,
}
