use serde::{Deserialize, Serialize};

/// Score-gap bands, in percentage points, separating the fit tiers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierThresholds {
    /// Largest absolute gap still counted as a best fit.
    pub best_fit_band: f64,
    pub safe_min_gap: f64,
    pub safe_max_gap: f64,
    /// Gap from which a match is considered too easy.
    pub low_quality_min_gap: f64,
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            best_fit_band: 2.0,
            safe_min_gap: 3.0,
            safe_max_gap: 7.0,
            low_quality_min_gap: 10.0,
        }
    }
}
