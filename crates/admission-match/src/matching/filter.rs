use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::domain::CanonicalMatch;

/// Empty sets impose no constraint.
pub(crate) fn admits(allowed: &BTreeSet<String>, value: &str) -> bool {
    allowed.is_empty() || allowed.contains(value)
}

/// Dimensions that carry a value set in a [`FilterSpec`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterDimension {
    City,
    Program,
    Category,
}

/// How a toggle treats the values already active on a dimension.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPolicy {
    /// Selecting a value replaces the active one; selecting it again clears it.
    #[default]
    Single,
    /// Selecting a value adds it; selecting it again removes only that value.
    Multi,
}

/// Conjunction of optional predicates over a match list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub cities: BTreeSet<String>,
    #[serde(default)]
    pub programs: BTreeSet<String>,
    #[serde(default)]
    pub categories: BTreeSet<String>,
    #[serde(default)]
    pub eligible_only: bool,
}

impl FilterSpec {
    pub fn is_empty(&self) -> bool {
        self.search_term().is_none()
            && self.cities.is_empty()
            && self.programs.is_empty()
            && self.categories.is_empty()
            && !self.eligible_only
    }

    fn search_term(&self) -> Option<&str> {
        self.search.as_deref().filter(|term| !term.is_empty())
    }

    pub fn matches(&self, item: &CanonicalMatch) -> bool {
        let needle = self.search_term().map(str::to_lowercase);
        self.matches_with(item, needle.as_deref())
    }

    fn matches_with(&self, item: &CanonicalMatch, needle: Option<&str>) -> bool {
        if self.eligible_only && !item.eligible {
            return false;
        }
        if !admits(&self.cities, &item.city)
            || !admits(&self.programs, &item.program)
            || !admits(&self.categories, &item.category)
        {
            return false;
        }

        match needle {
            Some(needle) => [&item.institution, &item.program, &item.city]
                .into_iter()
                .any(|field| field.to_lowercase().contains(needle)),
            None => true,
        }
    }

    /// Keep the matches that pass every predicate, in their original order.
    pub fn apply(&self, matches: &[CanonicalMatch]) -> Vec<CanonicalMatch> {
        let needle = self.search_term().map(str::to_lowercase);
        matches
            .iter()
            .filter(|item| self.matches_with(item, needle.as_deref()))
            .cloned()
            .collect()
    }

    fn values_mut(&mut self, dimension: FilterDimension) -> &mut BTreeSet<String> {
        match dimension {
            FilterDimension::City => &mut self.cities,
            FilterDimension::Program => &mut self.programs,
            FilterDimension::Category => &mut self.categories,
        }
    }

    /// Flip `value` on `dimension`. A blank value clears the dimension.
    pub fn toggle(&mut self, dimension: FilterDimension, value: &str, policy: SelectionPolicy) {
        let values = self.values_mut(dimension);
        if value.trim().is_empty() {
            values.clear();
            return;
        }

        let already_active = values.contains(value);
        match policy {
            SelectionPolicy::Single => {
                values.clear();
                if !already_active {
                    values.insert(value.to_string());
                }
            }
            SelectionPolicy::Multi => {
                if already_active {
                    values.remove(value);
                } else {
                    values.insert(value.to_string());
                }
            }
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
