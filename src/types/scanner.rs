use serde::{Deserialize, Serialize};

/// Momentum candidate produced by the momentum scanner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MomentumStock {
    pub symbol: String,
    pub last_price: f64,
    /// Day change in percent.
    pub price_change: f64,
    /// Today's volume as a multiple of reference volume.
    pub volume_multiple: f64,
    /// Momentum score (0-100).
    pub score: f64,
    /// Human-readable signals that contributed to the score.
    pub signals: Vec<String>,
    pub entry_level: f64,
    pub stop_loss: f64,
    pub target: f64,
}

/// Which sector strength model to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SectorAnalysisType {
    #[default]
    RelativeStrength,
    Momentum,
    InstitutionalFlow,
    Breakout,
}

impl SectorAnalysisType {
    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "relative_strength" | "rs" => Some(Self::RelativeStrength),
            "momentum" => Some(Self::Momentum),
            "institutional_flow" | "flow" => Some(Self::InstitutionalFlow),
            "breakout" => Some(Self::Breakout),
            _ => None,
        }
    }
}

/// Recommendation attached to a sector strength score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectorCall {
    StrongBuy,
    Buy,
    Hold,
    Avoid,
}

impl SectorCall {
    /// Map a strength score to a recommendation.
    pub fn from_score(score: f64) -> Self {
        if score > 70.0 {
            Self::StrongBuy
        } else if score > 60.0 {
            Self::Buy
        } else if score > 40.0 {
            Self::Hold
        } else {
            Self::Avoid
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::StrongBuy => "Strong BUY - Sector showing excellent strength",
            Self::Buy => "BUY - Positive sector momentum",
            Self::Hold => "HOLD - Neutral sector performance",
            Self::Avoid => "AVOID - Weak sector, look elsewhere",
        }
    }
}

/// Strength assessment for one sector index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorAnalysis {
    pub sector: String,
    /// Day change in percent.
    pub price_change: f64,
    /// Strength score (0-100).
    pub strength_score: f64,
    pub recommendation: SectorCall,
}

/// How decisively money is rotating between sectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationStrength {
    Strong,
    Moderate,
    Weak,
}

/// Rotation from the weakest sector into the strongest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorRotation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotating_from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotating_to: Option<String>,
    pub strength: RotationStrength,
}

/// Ranked sectors with rotation summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorReport {
    pub analysis_type: SectorAnalysisType,
    /// All sectors, strongest first.
    pub sectors: Vec<SectorAnalysis>,
    pub top: Vec<SectorAnalysis>,
    pub weak: Vec<SectorAnalysis>,
    pub rotation: SectorRotation,
    /// Unix timestamp (milliseconds) when computed.
    pub timestamp: i64,
}

/// Kind of quick single-quote screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScanType {
    #[default]
    Momentum,
    OversoldBounce,
    Breakout,
    HighVolume,
}

impl ScanType {
    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "momentum" => Some(Self::Momentum),
            "oversold_bounce" | "oversold" => Some(Self::OversoldBounce),
            "breakout" => Some(Self::Breakout),
            "high_volume" | "volume" => Some(Self::HighVolume),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Momentum => "momentum",
            Self::OversoldBounce => "oversold_bounce",
            Self::Breakout => "breakout",
            Self::HighVolume => "high_volume",
        }
    }
}
