use std::sync::Arc;

use axum::Router;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use tower_http::cors::CorsLayer;

use pinned_core::error::AppError;
use pinned_core::models::RepositoryRecord;
use pinned_core::traits::{Fetcher, RepoCache};

use crate::dto::{HealthResponse, ReposQuery};
use crate::error::ApiError;
use crate::state::AppState;

/// Build the router with all routes and the CORS policy.
pub fn router<F, C>(state: Arc<AppState<F, C>>) -> Router
where
    F: Fetcher + 'static,
    C: RepoCache + 'static,
{
    Router::new()
        .route("/api/repos", get(pinned_repos::<F, C>))
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// `GET /api/repos?username=<id>&refresh=<bool>`
///
/// Consults the cache first (unless `refresh` is set), runs the extraction
/// pipeline on a miss, and populates the cache only on success.
pub async fn pinned_repos<F, C>(
    State(state): State<Arc<AppState<F, C>>>,
    Query(query): Query<ReposQuery>,
) -> Result<axum::Json<Vec<RepositoryRecord>>, ApiError>
where
    F: Fetcher,
    C: RepoCache,
{
    let username = query.username.as_deref().unwrap_or("").trim();
    if username.is_empty() {
        return Err(AppError::InvalidInput("Username is required".to_string()).into());
    }

    // A cache hit must short-circuit before any network I/O.
    if !query.refresh {
        if let Some(records) = state.cache.get(username).await {
            tracing::debug!(%username, "cache hit");
            return Ok(axum::Json(records.to_vec()));
        }
    }

    let records = state.service.extract(username).await?;
    state
        .cache
        .set(username.to_string(), records.clone())
        .await;

    Ok(axum::Json(records))
}

pub async fn health() -> impl IntoResponse {
    axum::Json(HealthResponse { status: "healthy" })
}
