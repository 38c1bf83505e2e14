use admission_match::catalog::CutoffCatalogImporter;
use admission_match::error::AppError;
use admission_match::matching::{CatalogError, CatalogQuery, CutoffCatalog, CutoffRow};
use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use std::cmp::Ordering;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::warn;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Cutoff rows held in memory after a CSV import.
///
/// Rows are served ordered by round 1 cutoff ascending, missing values last,
/// the same order the hosted cutoff table returns. Ties keep import order.
#[derive(Debug, Default, Clone)]
pub(crate) struct InMemoryCatalog {
    rows: Arc<Vec<CutoffRow>>,
}

impl InMemoryCatalog {
    pub(crate) fn new(mut rows: Vec<CutoffRow>) -> Self {
        rows.sort_by(by_round_one);
        Self {
            rows: Arc::new(rows),
        }
    }

    /// Import from `path`, or start empty when no export is configured.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self, AppError> {
        match path {
            Some(path) => Ok(Self::new(CutoffCatalogImporter::from_path(path)?)),
            None => {
                warn!("no cutoff catalog configured; serving an empty catalog");
                Ok(Self::default())
            }
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.rows.len()
    }
}

impl CutoffCatalog for InMemoryCatalog {
    fn fetch(&self, query: &CatalogQuery) -> Result<Vec<CutoffRow>, CatalogError> {
        Ok(query.apply(&self.rows))
    }
}

fn by_round_one(left: &CutoffRow, right: &CutoffRow) -> Ordering {
    match (left.cutoffs.round1, right.cutoffs.round1) {
        (Some(left), Some(right)) => left.total_cmp(&right),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use admission_match::matching::{
        CategorySelection, MatchQuery, MatchService, MatchingConfig, RoundCutoffs,
    };

    fn row(category: &str) -> CutoffRow {
        cutoff_row(category, Some(80.0))
    }

    fn cutoff_row(category: &str, round1: Option<f64>) -> CutoffRow {
        CutoffRow {
            institution: "InstA".to_string(),
            program: "CS".to_string(),
            category: category.to_string(),
            cutoffs: RoundCutoffs::new(round1, None, None),
            city: Some("Pune".to_string()),
            institution_type: "Government".to_string(),
            year: Some(2024),
        }
    }

    #[test]
    fn catalog_applies_the_retrieval_query() {
        let catalog = InMemoryCatalog::new(vec![row("GOPEN"), row("OBC")]);
        let query = CatalogQuery {
            categories: CategorySelection::single("OBC"),
            ..CatalogQuery::default()
        };

        let rows = catalog.fetch(&query).expect("fetch succeeds");

        assert_eq!(catalog.len(), 2);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].category, "OBC");
    }

    #[test]
    fn rows_are_served_by_round_one_cutoff() {
        let catalog = InMemoryCatalog::new(vec![
            cutoff_row("GOPEN", None),
            cutoff_row("GOPEN", Some(88.0)),
            cutoff_row("OBC", Some(74.5)),
            cutoff_row("GOPEN", Some(81.0)),
        ]);

        let rows = catalog.fetch(&CatalogQuery::default()).expect("fetch succeeds");

        let firsts: Vec<_> = rows.iter().map(|row| row.cutoffs.round1).collect();
        assert_eq!(firsts, vec![Some(74.5), Some(81.0), Some(88.0), None]);
    }

    #[test]
    fn lower_duplicate_wins_after_retrieval_order() {
        let catalog = InMemoryCatalog::new(vec![
            cutoff_row("GOPEN", Some(85.0)),
            cutoff_row("GOPEN", Some(80.0)),
        ]);
        let service = MatchService::new(Arc::new(catalog), MatchingConfig::default());

        let result = service.browse(&MatchQuery::new(82.0)).expect("browse succeeds");

        assert_eq!(result.matches.len(), 1);
        assert_eq!(result.matches[0].cutoffs.round1, Some(80.0));
        assert!(result.matches[0].eligible);
    }

    #[test]
    fn missing_path_loads_an_empty_catalog() {
        let catalog = InMemoryCatalog::load(None).expect("empty catalog");
        assert_eq!(catalog.len(), 0);
    }

    #[test]
    fn parse_date_reports_the_bad_value() {
        assert_eq!(
            parse_date("2024-06-30"),
            Ok(NaiveDate::from_ymd_opt(2024, 6, 30).expect("valid date"))
        );
        let err = parse_date("30/06/2024").expect_err("invalid format");
        assert!(err.contains("30/06/2024"));
    }
}
