use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// City reported for rows whose source omitted one.
pub const UNKNOWN_CITY: &str = "Unknown";

/// One of the successive allocation passes that can publish a cutoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdmissionRound {
    Round1,
    Round2,
    Round3,
}

impl AdmissionRound {
    pub const fn ordered() -> [AdmissionRound; 3] {
        [
            AdmissionRound::Round1,
            AdmissionRound::Round2,
            AdmissionRound::Round3,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            AdmissionRound::Round1 => "Round 1",
            AdmissionRound::Round2 => "Round 2",
            AdmissionRound::Round3 => "Round 3",
        }
    }
}

/// Cutoffs published for each admission round. Absent rounds produced no cutoff.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RoundCutoffs {
    #[serde(default)]
    pub round1: Option<f64>,
    #[serde(default)]
    pub round2: Option<f64>,
    #[serde(default)]
    pub round3: Option<f64>,
}

impl RoundCutoffs {
    pub const fn new(round1: Option<f64>, round2: Option<f64>, round3: Option<f64>) -> Self {
        Self {
            round1,
            round2,
            round3,
        }
    }

    /// Cutoff published for `round`. A stored zero means nothing was published.
    pub fn get(&self, round: AdmissionRound) -> Option<f64> {
        let cutoff = match round {
            AdmissionRound::Round1 => self.round1,
            AdmissionRound::Round2 => self.round2,
            AdmissionRound::Round3 => self.round3,
        };
        cutoff.filter(|value| *value != 0.0)
    }

    /// Present cutoffs in round order.
    pub fn present(&self) -> impl Iterator<Item = (AdmissionRound, f64)> + '_ {
        AdmissionRound::ordered()
            .into_iter()
            .filter_map(move |round| self.get(round).map(|cutoff| (round, cutoff)))
    }

    pub fn is_empty(&self) -> bool {
        self.present().next().is_none()
    }

    /// First present cutoff in round1 → round2 → round3 order.
    pub fn first_present(&self) -> Option<f64> {
        self.present().map(|(_, cutoff)| cutoff).next()
    }

    /// Lowest cutoff across the present rounds.
    pub fn lowest(&self) -> Option<f64> {
        self.present()
            .map(|(_, cutoff)| cutoff)
            .reduce(|lowest, cutoff| if cutoff < lowest { cutoff } else { lowest })
    }
}

/// Raw cutoff row as supplied by the retrieval layer. Rows are not assumed unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CutoffRow {
    pub institution: String,
    pub program: String,
    pub category: String,
    #[serde(flatten)]
    pub cutoffs: RoundCutoffs,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub institution_type: String,
    #[serde(default)]
    pub year: Option<i32>,
}

/// Deduplicated, scored representation of a cutoff row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalMatch {
    pub institution: String,
    pub city: String,
    pub program: String,
    pub category: String,
    pub institution_type: String,
    #[serde(flatten)]
    pub cutoffs: RoundCutoffs,
    pub eligible: bool,
}

/// Identity of a cutoff record: compared by exact, case-sensitive equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MatchKey<'a> {
    pub institution: &'a str,
    pub program: &'a str,
    pub category: &'a str,
}

/// Anything carrying an (institution, program, category) identity.
pub trait Keyed {
    fn match_key(&self) -> MatchKey<'_>;
}

impl Keyed for CutoffRow {
    fn match_key(&self) -> MatchKey<'_> {
        MatchKey {
            institution: &self.institution,
            program: &self.program,
            category: &self.category,
        }
    }
}

impl Keyed for CanonicalMatch {
    fn match_key(&self) -> MatchKey<'_> {
        MatchKey {
            institution: &self.institution,
            program: &self.program,
            category: &self.category,
        }
    }
}

/// Admission categories selected by the caller.
///
/// Accepts either a single string or a list on the wire; blank entries are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "OneOrMany")]
pub struct CategorySelection(BTreeSet<String>);

/// Category value that lifts every category restriction.
pub const ALL_CATEGORIES: &str = "ALL";

impl CategorySelection {
    pub fn single(category: impl Into<String>) -> Self {
        Self::from_iter([category.into()])
    }

    pub fn as_set(&self) -> &BTreeSet<String> {
        &self.0
    }

    pub fn is_unrestricted(&self) -> bool {
        self.0.is_empty() || self.0.contains(ALL_CATEGORIES)
    }

    pub fn admits(&self, category: &str) -> bool {
        self.is_unrestricted() || self.0.contains(category)
    }
}

impl FromIterator<String> for CategorySelection {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .collect(),
        )
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl From<OneOrMany> for CategorySelection {
    fn from(value: OneOrMany) -> Self {
        match value {
            OneOrMany::One(category) => Self::from_iter([category]),
            OneOrMany::Many(categories) => Self::from_iter(categories),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowest_and_first_present_follow_round_order() {
        let cutoffs = RoundCutoffs::new(None, Some(72.5), Some(64.0));
        assert_eq!(cutoffs.first_present(), Some(72.5));
        assert_eq!(cutoffs.lowest(), Some(64.0));
        assert!(!cutoffs.is_empty());
        assert!(RoundCutoffs::default().is_empty());
        assert_eq!(RoundCutoffs::default().lowest(), None);
    }

    #[test]
    fn zero_cutoff_counts_as_unpublished() {
        let cutoffs = RoundCutoffs::new(Some(0.0), Some(70.0), None);
        assert_eq!(cutoffs.get(AdmissionRound::Round1), None);
        assert_eq!(cutoffs.first_present(), Some(70.0));
        assert_eq!(cutoffs.lowest(), Some(70.0));
        assert!(RoundCutoffs::new(Some(0.0), None, Some(0.0)).is_empty());
    }

    #[test]
    fn category_selection_accepts_string_or_list() {
        let single: CategorySelection = serde_json::from_str("\"GOPEN\"").expect("string parses");
        assert_eq!(single, CategorySelection::single("GOPEN"));

        let many: CategorySelection =
            serde_json::from_str("[\"OBC\", \" \", \"GOPEN\"]").expect("list parses");
        assert_eq!(many.as_set().len(), 2);
        assert!(many.admits("OBC"));
        assert!(!many.admits("SC"));
    }

    #[test]
    fn all_category_lifts_restriction() {
        let selection = CategorySelection::single(ALL_CATEGORIES);
        assert!(selection.is_unrestricted());
        assert!(selection.admits("anything"));
        assert!(CategorySelection::default().admits("GOPEN"));
    }

    #[test]
    fn cutoff_row_reads_flattened_rounds() {
        let row: CutoffRow = serde_json::from_str(
            r#"{"institution":"InstB","program":"IT","category":"OBC","round1":70,"round2":60}"#,
        )
        .expect("row parses");
        assert_eq!(row.cutoffs, RoundCutoffs::new(Some(70.0), Some(60.0), None));
        assert!(row.city.is_none());
        assert_eq!(row.institution_type, "");
    }
}
