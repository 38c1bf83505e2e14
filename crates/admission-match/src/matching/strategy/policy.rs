use serde::{Deserialize, Serialize};

use super::config::TierThresholds;

/// Advisory classification of how closely a score matches a cutoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FitTier {
    BestFit,
    Safe,
    LowQuality,
    Dream,
}

impl FitTier {
    pub const fn ordered() -> [FitTier; 4] {
        [
            FitTier::BestFit,
            FitTier::Safe,
            FitTier::LowQuality,
            FitTier::Dream,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            FitTier::BestFit => "best-fit",
            FitTier::Safe => "safe",
            FitTier::LowQuality => "low-quality",
            FitTier::Dream => "dream",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            FitTier::BestFit => "Best Fit",
            FitTier::Safe => "Safe Option",
            FitTier::LowQuality => "Low Quality Match",
            FitTier::Dream => "Dream Option",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            FitTier::BestFit => "Close academic match. Highly recommended.",
            FitTier::Safe => "Easier to get in, still relevant to your level.",
            FitTier::LowQuality => {
                "Eligible but well below your level; peer group may be a poor fit."
            }
            FitTier::Dream => "Cutoff is above your score or outside the other bands. Risky.",
        }
    }
}

/// Tier for a score-minus-cutoff gap.
///
/// Gaps between the best-fit band and the safe band, and between the safe band
/// and the low-quality threshold, fall through to `Dream`.
pub(crate) fn decide_tier(gap: f64, thresholds: &TierThresholds) -> FitTier {
    if gap.abs() <= thresholds.best_fit_band {
        FitTier::BestFit
    } else if (thresholds.safe_min_gap..=thresholds.safe_max_gap).contains(&gap) {
        FitTier::Safe
    } else if gap >= thresholds.low_quality_min_gap {
        FitTier::LowQuality
    } else {
        FitTier::Dream
    }
}
