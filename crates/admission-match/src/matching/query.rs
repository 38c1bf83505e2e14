use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::canonical::canonicalize;
use super::domain::{CanonicalMatch, CategorySelection, CutoffRow};
use super::facets::FacetOptions;
use super::filter::FilterSpec;
use super::pagination::{paginate, PageInfo, PageSize};
use super::projection::project_matches;
use super::ranking::{Preferences, Ranker, SortMode};
use super::repository::CatalogQuery;
use super::strategy::{StrategyClassifier, StrategyFilter, StrategyReport, TierThresholds};

/// Caller mistakes that are reported instead of degraded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("page size must be a positive integer, got {0}")]
    InvalidPageSize(i64),
}

fn first_page() -> i64 {
    1
}

/// Everything one browsing request depends on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchQuery {
    pub student_score: f64,
    #[serde(default)]
    pub categories: CategorySelection,
    #[serde(default)]
    pub institution_types: BTreeSet<String>,
    #[serde(default)]
    pub preferences: Preferences,
    #[serde(default)]
    pub filters: FilterSpec,
    #[serde(default)]
    pub sort: SortMode,
    /// Requested page, 1-based. Values outside the valid range are clamped.
    #[serde(default = "first_page")]
    pub page: i64,
    #[serde(default)]
    pub page_size: Option<PageSize>,
}

impl MatchQuery {
    pub fn new(student_score: f64) -> Self {
        Self {
            student_score,
            categories: CategorySelection::default(),
            institution_types: BTreeSet::new(),
            preferences: Preferences::default(),
            filters: FilterSpec::default(),
            sort: SortMode::default(),
            page: first_page(),
            page_size: None,
        }
    }

    /// Retrieval-side narrowing implied by this query.
    pub fn catalog_query(&self) -> CatalogQuery {
        CatalogQuery {
            categories: self.categories.clone(),
            institution_types: self.institution_types.clone(),
            ..CatalogQuery::default()
        }
    }

    /// Same query after a filter or sort change: back to page one.
    pub fn with_filters(&self, filters: FilterSpec) -> Self {
        Self {
            filters,
            page: first_page(),
            ..self.clone()
        }
    }

    pub fn with_sort(&self, sort: SortMode) -> Self {
        Self {
            sort,
            page: first_page(),
            ..self.clone()
        }
    }
}

/// One page of the browsing view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrowseResult {
    pub matches: Vec<CanonicalMatch>,
    pub page: PageInfo,
    /// Eligible matches across every page of the filtered list.
    pub eligible_count: usize,
    pub facets: FacetOptions,
}

/// Canonicalize and score the rows a query admits.
pub fn canonical_matches(
    rows: &[CutoffRow],
    catalog: &CatalogQuery,
    student_score: f64,
) -> Vec<CanonicalMatch> {
    let admitted = catalog.apply(rows);
    project_matches(&canonicalize(&admitted), student_score)
}

/// Run the browsing pipeline: canonicalize, score, rank, filter, paginate.
pub fn browse(rows: &[CutoffRow], query: &MatchQuery, default_page_size: PageSize) -> BrowseResult {
    let matches = canonical_matches(rows, &query.catalog_query(), query.student_score);
    let facets = FacetOptions::from_matches(&matches);

    let ranked = Ranker::new(query.sort, &query.preferences).rank(&matches);
    let filtered = query.filters.apply(&ranked);
    let eligible_count = filtered.iter().filter(|item| item.eligible).count();

    let page_size = query.page_size.unwrap_or(default_page_size);
    let requested_page = usize::try_from(query.page.max(1)).unwrap_or(usize::MAX);
    let page = paginate(&filtered, requested_page, page_size);

    debug!(
        rows = rows.len(),
        canonical = matches.len(),
        filtered = filtered.len(),
        eligible = eligible_count,
        page = page.info.current_page,
        total_pages = page.info.total_pages,
        sort = %query.sort,
        "browse query evaluated"
    );

    BrowseResult {
        matches: page.items,
        page: page.info,
        eligible_count,
        facets,
    }
}

/// Everything one advisory request depends on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyQuery {
    pub student_score: f64,
    #[serde(default)]
    pub categories: CategorySelection,
    #[serde(default)]
    pub preferences: Preferences,
    #[serde(default)]
    pub filter: StrategyFilter,
}

impl StrategyQuery {
    pub fn new(student_score: f64) -> Self {
        Self {
            student_score,
            categories: CategorySelection::default(),
            preferences: Preferences::default(),
            filter: StrategyFilter::default(),
        }
    }

    pub fn catalog_query(&self) -> CatalogQuery {
        CatalogQuery {
            categories: self.categories.clone(),
            ..CatalogQuery::default()
        }
    }
}

/// Run the advisory pipeline: canonicalize, score, rank eligibility-first, classify.
pub fn advise(
    rows: &[CutoffRow],
    query: &StrategyQuery,
    thresholds: &TierThresholds,
) -> StrategyReport {
    let matches = canonical_matches(rows, &query.catalog_query(), query.student_score);
    let ranked = Ranker::new(SortMode::Eligible, &query.preferences).rank(&matches);
    let report = StrategyClassifier::new(*thresholds).report(
        &ranked,
        query.student_score,
        &query.filter,
    );

    debug!(
        rows = rows.len(),
        canonical = matches.len(),
        classified = report.total(),
        best_fit = report.best_fit.len(),
        safe = report.safe.len(),
        low_quality = report.low_quality.len(),
        dream = report.dream.len(),
        "strategy query evaluated"
    );

    report
}
