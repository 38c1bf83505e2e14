use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::json;

use super::query::{MatchQuery, StrategyQuery};
use super::repository::{CatalogError, CutoffCatalog};
use super::service::{MatchService, MatchServiceError};

/// Router builder exposing the browsing and advisory views over HTTP.
pub fn match_router<C>(service: Arc<MatchService<C>>) -> Router
where
    C: CutoffCatalog + 'static,
{
    Router::new()
        .route("/api/v1/matches/browse", post(browse_handler::<C>))
        .route("/api/v1/matches/strategy", post(strategy_handler::<C>))
        .with_state(service)
}

pub(crate) async fn browse_handler<C>(
    State(service): State<Arc<MatchService<C>>>,
    axum::Json(query): axum::Json<MatchQuery>,
) -> Response
where
    C: CutoffCatalog + 'static,
{
    match service.browse(&query) {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn strategy_handler<C>(
    State(service): State<Arc<MatchService<C>>>,
    axum::Json(query): axum::Json<StrategyQuery>,
) -> Response
where
    C: CutoffCatalog + 'static,
{
    match service.strategy(&query) {
        Ok(report) => {
            let counts = report.counts();
            let payload = json!({
                "report": report,
                "counts": counts,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

fn error_response(error: MatchServiceError) -> Response {
    let status = match &error {
        MatchServiceError::Catalog(CatalogError::Unavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
    };
    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
