use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::domain::CanonicalMatch;

/// Cutoff assumed for a match without any cutoff when sorting ascending.
pub const ABSENT_CUTOFF_ASCENDING: f64 = 100.0;
/// Cutoff assumed for a match without any cutoff when sorting descending.
pub const ABSENT_CUTOFF_DESCENDING: f64 = 0.0;

/// Ordering applied to a match list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortMode {
    /// Eligible first, then stated preferences, then lowest cutoff.
    #[default]
    Eligible,
    CutoffAsc,
    CutoffDesc,
    NameAsc,
    NameDesc,
    CityAsc,
}

impl SortMode {
    pub const fn all() -> [SortMode; 6] {
        [
            SortMode::Eligible,
            SortMode::CutoffAsc,
            SortMode::CutoffDesc,
            SortMode::NameAsc,
            SortMode::NameDesc,
            SortMode::CityAsc,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            SortMode::Eligible => "eligible",
            SortMode::CutoffAsc => "cutoff-asc",
            SortMode::CutoffDesc => "cutoff-desc",
            SortMode::NameAsc => "name-asc",
            SortMode::NameDesc => "name-desc",
            SortMode::CityAsc => "city-asc",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort mode '{0}'")]
pub struct UnknownSortMode(pub String);

impl FromStr for SortMode {
    type Err = UnknownSortMode;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = value.trim().to_ascii_lowercase();
        Self::all()
            .into_iter()
            .find(|mode| mode.label() == wanted)
            .ok_or_else(|| UnknownSortMode(value.to_string()))
    }
}

/// Caller's stated program and city preferences, most wanted first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub programs: Vec<String>,
    #[serde(default)]
    pub cities: Vec<String>,
}

/// Lowest present cutoff, or `ABSENT_CUTOFF_ASCENDING` when there is none.
pub fn best_available_cutoff(item: &CanonicalMatch) -> f64 {
    item.cutoffs.lowest().unwrap_or(ABSENT_CUTOFF_ASCENDING)
}

fn descending_cutoff(item: &CanonicalMatch) -> f64 {
    item.cutoffs.lowest().unwrap_or(ABSENT_CUTOFF_DESCENDING)
}

/// Position lookup for a preference list; the first occurrence of a value wins.
struct PreferenceIndex<'a> {
    positions: HashMap<&'a str, usize>,
}

impl<'a> PreferenceIndex<'a> {
    fn new(values: &'a [String]) -> Self {
        let mut positions = HashMap::with_capacity(values.len());
        for (index, value) in values.iter().enumerate() {
            positions.entry(value.as_str()).or_insert(index);
        }
        Self { positions }
    }

    fn compare(&self, left: &str, right: &str) -> Ordering {
        match (self.positions.get(left), self.positions.get(right)) {
            (Some(left), Some(right)) => left.cmp(right),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

/// Comparator for one sort mode. Borrowed preferences are read-only.
pub struct Ranker<'a> {
    mode: SortMode,
    programs: PreferenceIndex<'a>,
    cities: PreferenceIndex<'a>,
}

impl<'a> Ranker<'a> {
    pub fn new(mode: SortMode, preferences: &'a Preferences) -> Self {
        Self {
            mode,
            programs: PreferenceIndex::new(&preferences.programs),
            cities: PreferenceIndex::new(&preferences.cities),
        }
    }

    pub fn compare(&self, left: &CanonicalMatch, right: &CanonicalMatch) -> Ordering {
        match self.mode {
            SortMode::Eligible => self.eligibility_first(left, right),
            SortMode::CutoffAsc => {
                best_available_cutoff(left).total_cmp(&best_available_cutoff(right))
            }
            SortMode::CutoffDesc => descending_cutoff(right).total_cmp(&descending_cutoff(left)),
            SortMode::NameAsc => left.institution.cmp(&right.institution),
            SortMode::NameDesc => right.institution.cmp(&left.institution),
            SortMode::CityAsc => left.city.cmp(&right.city),
        }
    }

    fn eligibility_first(&self, left: &CanonicalMatch, right: &CanonicalMatch) -> Ordering {
        right
            .eligible
            .cmp(&left.eligible)
            .then_with(|| self.programs.compare(&left.program, &right.program))
            .then_with(|| self.cities.compare(&left.city, &right.city))
            .then_with(|| best_available_cutoff(left).total_cmp(&best_available_cutoff(right)))
    }

    /// Stable sort into a new list; equal keys keep their input order.
    pub fn rank(&self, matches: &[CanonicalMatch]) -> Vec<CanonicalMatch> {
        let mut ranked = matches.to_vec();
        ranked.sort_by(|left, right| self.compare(left, right));
        ranked
    }
}

pub fn rank(
    matches: &[CanonicalMatch],
    mode: SortMode,
    preferences: &Preferences,
) -> Vec<CanonicalMatch> {
    Ranker::new(mode, preferences).rank(matches)
}
