use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::domain::{CategorySelection, CutoffRow};
use super::filter::admits;

/// Narrowing a provider may apply while retrieving rows.
///
/// Purely an optimization: the engine reapplies it, so providers are free to
/// ignore it and return the full catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogQuery {
    #[serde(default)]
    pub categories: CategorySelection,
    #[serde(default)]
    pub programs: BTreeSet<String>,
    #[serde(default)]
    pub institution_types: BTreeSet<String>,
    #[serde(default)]
    pub cities: BTreeSet<String>,
    #[serde(default)]
    pub years: BTreeSet<i32>,
}

impl CatalogQuery {
    pub fn admits(&self, row: &CutoffRow) -> bool {
        self.categories.admits(&row.category)
            && admits(&self.programs, &row.program)
            && admits(&self.institution_types, &row.institution_type)
            && (self.cities.is_empty()
                || row
                    .city
                    .as_ref()
                    .is_some_and(|city| self.cities.contains(city)))
            && (self.years.is_empty() || row.year.is_some_and(|year| self.years.contains(&year)))
    }

    pub fn apply(&self, rows: &[CutoffRow]) -> Vec<CutoffRow> {
        rows.iter().filter(|row| self.admits(row)).cloned().collect()
    }
}

/// Source of raw cutoff rows (database, CSV export, fixture).
pub trait CutoffCatalog: Send + Sync {
    fn fetch(&self, query: &CatalogQuery) -> Result<Vec<CutoffRow>, CatalogError>;
}

/// Error enumeration for catalog provider failures.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}
