use std::sync::Arc;

use crate::matching::domain::{CanonicalMatch, CutoffRow, RoundCutoffs};
use crate::matching::repository::{CatalogError, CatalogQuery, CutoffCatalog};
use crate::matching::{MatchService, MatchingConfig};

pub(super) fn row(
    institution: &str,
    program: &str,
    category: &str,
    cutoffs: [Option<f64>; 3],
    city: Option<&str>,
) -> CutoffRow {
    CutoffRow {
        institution: institution.to_string(),
        program: program.to_string(),
        category: category.to_string(),
        cutoffs: RoundCutoffs::new(cutoffs[0], cutoffs[1], cutoffs[2]),
        city: city.map(str::to_string),
        institution_type: "Government".to_string(),
        year: Some(2024),
    }
}

pub(super) fn typed_row(
    institution: &str,
    program: &str,
    city: &str,
    institution_type: &str,
    round1: f64,
) -> CutoffRow {
    CutoffRow {
        institution_type: institution_type.to_string(),
        ..row(institution, program, "GOPEN", [Some(round1), None, None], Some(city))
    }
}

pub(super) fn canonical(
    institution: &str,
    program: &str,
    city: &str,
    eligible: bool,
    cutoffs: [Option<f64>; 3],
) -> CanonicalMatch {
    CanonicalMatch {
        institution: institution.to_string(),
        city: city.to_string(),
        program: program.to_string(),
        category: "GOPEN".to_string(),
        institution_type: "Government".to_string(),
        cutoffs: RoundCutoffs::new(cutoffs[0], cutoffs[1], cutoffs[2]),
        eligible,
    }
}

/// Mixed catalog: duplicates, missing cities, missing rounds, several categories.
pub(super) fn sample_catalog() -> Vec<CutoffRow> {
    vec![
        row(
            "Pune Institute of Technology",
            "Computer Engineering",
            "GOPEN",
            [Some(92.4), Some(90.1), None],
            Some("Pune"),
        ),
        row(
            "Pune Institute of Technology",
            "Computer Engineering",
            "GOPEN",
            [Some(89.0), None, None],
            Some("Pune"),
        ),
        row(
            "Pune Institute of Technology",
            "Information Technology",
            "GOPEN",
            [Some(88.7), Some(86.0), Some(84.5)],
            Some("Pune"),
        ),
        row(
            "Mumbai College of Engineering",
            "Computer Engineering",
            "GOPEN",
            [Some(95.2), None, None],
            Some("Mumbai"),
        ),
        row(
            "Mumbai College of Engineering",
            "Mechanical Engineering",
            "GOPEN",
            [Some(71.3), Some(68.0), None],
            Some("Mumbai"),
        ),
        row(
            "Nagpur Engineering School",
            "Civil Engineering",
            "GOPEN",
            [Some(55.0), None, None],
            None,
        ),
        row(
            "Nagpur Engineering School",
            "Computer Engineering",
            "OBC",
            [Some(80.0), Some(78.5), None],
            Some("Nagpur"),
        ),
        row(
            "Kolhapur Polytechnic",
            "Electrical Engineering",
            "GOPEN",
            [None, None, None],
            Some("Kolhapur"),
        ),
        row(
            "Aurangabad Technical Institute",
            "Information Technology",
            "GOPEN",
            [None, Some(79.0), None],
            Some("Aurangabad"),
        ),
    ]
}


pub(super) struct MemoryCatalog {
    rows: Vec<CutoffRow>,
}

impl MemoryCatalog {
    pub(super) fn new(rows: Vec<CutoffRow>) -> Self {
        Self { rows }
    }
}

impl CutoffCatalog for MemoryCatalog {
    fn fetch(&self, query: &CatalogQuery) -> Result<Vec<CutoffRow>, CatalogError> {
        Ok(query.apply(&self.rows))
    }
}

/// Provider that ignores the pre-filter and returns the whole catalog.
pub(super) struct UnfilteredCatalog {
    rows: Vec<CutoffRow>,
}

impl UnfilteredCatalog {
    pub(super) fn new(rows: Vec<CutoffRow>) -> Self {
        Self { rows }
    }
}

impl CutoffCatalog for UnfilteredCatalog {
    fn fetch(&self, _query: &CatalogQuery) -> Result<Vec<CutoffRow>, CatalogError> {
        Ok(self.rows.clone())
    }
}

pub(super) struct UnavailableCatalog;

impl CutoffCatalog for UnavailableCatalog {
    fn fetch(&self, _query: &CatalogQuery) -> Result<Vec<CutoffRow>, CatalogError> {
        Err(CatalogError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn build_service(rows: Vec<CutoffRow>) -> Arc<MatchService<MemoryCatalog>> {
    Arc::new(MatchService::new(
        Arc::new(MemoryCatalog::new(rows)),
        MatchingConfig::default(),
    ))
}

pub(super) fn institutions(matches: &[CanonicalMatch]) -> Vec<&str> {
    matches.iter().map(|item| item.institution.as_str()).collect()
}

pub(super) fn programs(matches: &[CanonicalMatch]) -> Vec<&str> {
    matches.iter().map(|item| item.program.as_str()).collect()
}
