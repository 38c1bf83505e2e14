//! Admission cutoff matching: canonicalization, eligibility, ranking,
//! filtering, pagination, and fit-strategy classification.
//!
//! Every stage is a pure function over borrowed input. Nothing is cached
//! between queries; callers pass an explicit [`MatchQuery`] or
//! [`StrategyQuery`] and receive a fresh result.

mod canonical;
mod config;
pub mod domain;
mod eligibility;
mod facets;
mod filter;
mod pagination;
mod projection;
mod query;
mod ranking;
pub mod repository;
pub mod router;
pub mod service;
pub mod strategy;

#[cfg(test)]
mod tests;

pub use canonical::canonicalize;
pub use config::MatchingConfig;
pub use domain::{
    AdmissionRound, CanonicalMatch, CategorySelection, CutoffRow, Keyed, MatchKey, RoundCutoffs,
    ALL_CATEGORIES, UNKNOWN_CITY,
};
pub use eligibility::{evaluate, is_eligible, EligibilityResult};
pub use facets::FacetOptions;
pub use filter::{FilterDimension, FilterSpec, SelectionPolicy};
pub use pagination::{
    paginate, total_pages, Page, PageCursor, PageInfo, PageSize, DEFAULT_PAGE_SIZE,
};
pub use projection::{project_match, project_matches};
pub use query::{
    advise, browse, canonical_matches, BrowseResult, MatchQuery, QueryError, StrategyQuery,
};
pub use ranking::{
    best_available_cutoff, rank, Preferences, Ranker, SortMode, UnknownSortMode,
    ABSENT_CUTOFF_ASCENDING, ABSENT_CUTOFF_DESCENDING,
};
pub use repository::{CatalogError, CatalogQuery, CutoffCatalog};
pub use router::match_router;
pub use service::{MatchService, MatchServiceError};
pub use strategy::{
    FitTier, StrategyClassifier, StrategyFilter, StrategyMatch, StrategyReport, TierCount,
    TierThresholds, FAR_BELOW_RATIO,
};
