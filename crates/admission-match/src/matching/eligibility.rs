use serde::{Deserialize, Serialize};

use super::domain::{AdmissionRound, RoundCutoffs};

/// Outcome of comparing a student score with a record's round cutoffs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EligibilityResult {
    pub eligible: bool,
    /// Lowest present cutoff the score clears.
    pub best_cutoff: Option<f64>,
    pub qualifying_round: Option<AdmissionRound>,
}

impl EligibilityResult {
    const INELIGIBLE: Self = Self {
        eligible: false,
        best_cutoff: None,
        qualifying_round: None,
    };
}

/// Eligible when the score meets at least one present round cutoff.
///
/// Scores are not range-checked; a NaN score clears nothing.
pub fn evaluate(cutoffs: &RoundCutoffs, student_score: f64) -> EligibilityResult {
    cutoffs
        .present()
        .filter(|(_, cutoff)| student_score >= *cutoff)
        .min_by(|(_, left), (_, right)| left.total_cmp(right))
        .map(|(round, cutoff)| EligibilityResult {
            eligible: true,
            best_cutoff: Some(cutoff),
            qualifying_round: Some(round),
        })
        .unwrap_or(EligibilityResult::INELIGIBLE)
}

pub fn is_eligible(cutoffs: &RoundCutoffs, student_score: f64) -> bool {
    evaluate(cutoffs, student_score).eligible
}
