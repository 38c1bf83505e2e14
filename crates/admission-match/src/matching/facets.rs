use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::domain::CanonicalMatch;

/// Distinct values present in a match set, for building filter menus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetOptions {
    pub cities: Vec<String>,
    pub programs: Vec<String>,
    pub categories: Vec<String>,
    pub institution_types: Vec<String>,
}

impl FacetOptions {
    pub fn from_matches(matches: &[CanonicalMatch]) -> Self {
        Self {
            cities: distinct(matches.iter().map(|item| item.city.as_str())),
            programs: distinct(matches.iter().map(|item| item.program.as_str())),
            categories: distinct(matches.iter().map(|item| item.category.as_str())),
            institution_types: distinct(
                matches.iter().map(|item| item.institution_type.as_str()),
            ),
        }
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .filter(|value| !value.trim().is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
