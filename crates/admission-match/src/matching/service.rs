use std::sync::Arc;

use tracing::{debug, warn};

use super::config::MatchingConfig;
use super::query::{advise, browse, BrowseResult, MatchQuery, StrategyQuery};
use super::repository::{CatalogError, CutoffCatalog};
use super::strategy::StrategyReport;

/// Service composing a catalog provider with the matching engine.
pub struct MatchService<C> {
    catalog: Arc<C>,
    config: MatchingConfig,
}

impl<C> MatchService<C>
where
    C: CutoffCatalog + 'static,
{
    pub fn new(catalog: Arc<C>, config: MatchingConfig) -> Self {
        Self { catalog, config }
    }

    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    /// Ranked, filtered page of matches for the browsing view.
    pub fn browse(&self, query: &MatchQuery) -> Result<BrowseResult, MatchServiceError> {
        let rows = self.catalog.fetch(&query.catalog_query()).map_err(|err| {
            warn!(error = %err, "catalog fetch failed for browse query");
            err
        })?;
        debug!(rows = rows.len(), "catalog rows fetched for browse query");

        Ok(browse(&rows, query, self.config.default_page_size))
    }

    /// Tier-grouped matches for the advisory view.
    pub fn strategy(&self, query: &StrategyQuery) -> Result<StrategyReport, MatchServiceError> {
        let rows = self.catalog.fetch(&query.catalog_query()).map_err(|err| {
            warn!(error = %err, "catalog fetch failed for strategy query");
            err
        })?;
        debug!(rows = rows.len(), "catalog rows fetched for strategy query");

        Ok(advise(&rows, query, &self.config.thresholds))
    }
}

/// Error raised by the match service.
#[derive(Debug, thiserror::Error)]
pub enum MatchServiceError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
