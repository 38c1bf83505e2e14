//! Fit-strategy classification for the advisory view.
//!
//! Every match is bucketed by the gap between the student's score and the
//! match's first published cutoff. The classifier is independent of the
//! browsing pipeline and consumes the same canonical matches.

mod config;
mod policy;

pub use config::TierThresholds;
pub use policy::FitTier;

use std::collections::BTreeSet;

use policy::decide_tier;
use serde::{Deserialize, Serialize};

use super::domain::CanonicalMatch;
use super::filter::admits;

/// Canonical match annotated with its fit tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyMatch {
    #[serde(flatten)]
    pub canonical: CanonicalMatch,
    /// First present cutoff in round order, or 0 when none was published.
    pub best_cutoff: f64,
    pub cutoff_gap: f64,
    /// Score over best cutoff; 0 when the best cutoff is 0.
    pub quality_ratio: f64,
    pub tier: FitTier,
    /// Low-quality match whose cutoff sits far below the score.
    #[serde(default)]
    pub far_below: bool,
}

/// Quality ratio from which a low-quality match is flagged as far below the student.
pub const FAR_BELOW_RATIO: f64 = 1.3;

/// Stateless classifier holding the tier thresholds.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StrategyClassifier {
    thresholds: TierThresholds,
}

impl StrategyClassifier {
    pub fn new(thresholds: TierThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &TierThresholds {
        &self.thresholds
    }

    pub fn classify(&self, canonical: &CanonicalMatch, student_score: f64) -> StrategyMatch {
        let best_cutoff = canonical.cutoffs.first_present().unwrap_or(0.0);
        let cutoff_gap = student_score - best_cutoff;
        let quality_ratio = if best_cutoff > 0.0 {
            student_score / best_cutoff
        } else {
            0.0
        };

        let tier = decide_tier(cutoff_gap, &self.thresholds);

        StrategyMatch {
            canonical: canonical.clone(),
            best_cutoff,
            cutoff_gap,
            quality_ratio,
            tier,
            far_below: tier == FitTier::LowQuality && quality_ratio >= FAR_BELOW_RATIO,
        }
    }

    pub fn classify_all(
        &self,
        matches: &[CanonicalMatch],
        student_score: f64,
    ) -> Vec<StrategyMatch> {
        matches
            .iter()
            .map(|canonical| self.classify(canonical, student_score))
            .collect()
    }

    /// Classify, narrow with `filter`, and group by tier.
    pub fn report(
        &self,
        matches: &[CanonicalMatch],
        student_score: f64,
        filter: &StrategyFilter,
    ) -> StrategyReport {
        let classified = matches
            .iter()
            .filter(|canonical| filter.matches(canonical))
            .map(|canonical| self.classify(canonical, student_score));
        StrategyReport::group(student_score, classified)
    }
}

/// Optional narrowing applied before grouping; empty sets admit everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyFilter {
    #[serde(default)]
    pub cities: BTreeSet<String>,
    #[serde(default)]
    pub programs: BTreeSet<String>,
    #[serde(default)]
    pub institution_types: BTreeSet<String>,
}

impl StrategyFilter {
    pub fn matches(&self, canonical: &CanonicalMatch) -> bool {
        admits(&self.cities, &canonical.city)
            && admits(&self.programs, &canonical.program)
            && admits(&self.institution_types, &canonical.institution_type)
    }
}

/// Matches grouped by tier; each group keeps the input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StrategyReport {
    pub student_score: f64,
    pub best_fit: Vec<StrategyMatch>,
    pub safe: Vec<StrategyMatch>,
    pub low_quality: Vec<StrategyMatch>,
    pub dream: Vec<StrategyMatch>,
}

impl StrategyReport {
    pub fn group(student_score: f64, matches: impl IntoIterator<Item = StrategyMatch>) -> Self {
        let mut report = Self {
            student_score,
            ..Self::default()
        };

        for item in matches {
            match item.tier {
                FitTier::BestFit => report.best_fit.push(item),
                FitTier::Safe => report.safe.push(item),
                FitTier::LowQuality => report.low_quality.push(item),
                FitTier::Dream => report.dream.push(item),
            }
        }

        report
    }

    pub fn tier(&self, tier: FitTier) -> &[StrategyMatch] {
        match tier {
            FitTier::BestFit => &self.best_fit,
            FitTier::Safe => &self.safe,
            FitTier::LowQuality => &self.low_quality,
            FitTier::Dream => &self.dream,
        }
    }

    pub fn total(&self) -> usize {
        FitTier::ordered()
            .into_iter()
            .map(|tier| self.tier(tier).len())
            .sum()
    }

    pub fn counts(&self) -> Vec<TierCount> {
        FitTier::ordered()
            .into_iter()
            .map(|tier| TierCount {
                tier,
                label: tier.label(),
                title: tier.title(),
                count: self.tier(tier).len(),
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TierCount {
    pub tier: FitTier,
    pub label: &'static str,
    pub title: &'static str,
    pub count: usize,
}
