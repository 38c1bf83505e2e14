use serde::{Deserialize, Serialize};

use super::pagination::PageSize;
use super::strategy::TierThresholds;

/// Engine defaults applied when a query leaves them open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchingConfig {
    pub default_page_size: PageSize,
    pub thresholds: TierThresholds,
}
