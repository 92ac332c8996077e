use crate::errors::ApiResult;
use crate::state::AppState;
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use cache_engine::CacheStats;
use shared_http::api::{FlushResponse, InvalidateRequest, InvalidateResponse};
use tracing::info;

/// GET /api/admin/cache/stats
pub async fn stats(State(state): State<AppState>) -> Json<CacheStats> {
    Json(state.cache.stats())
}

/// POST /api/admin/cache/invalidate
pub async fn invalidate(
    State(state): State<AppState>,
    payload: Result<Json<InvalidateRequest>, JsonRejection>,
) -> ApiResult<Json<InvalidateResponse>> {
    let Json(request) = payload?;
    let removed = state.cache.invalidate(&request.pattern)?;

    info!(pattern = %request.pattern, removed, "Cache invalidated by admin");
    Ok(Json(InvalidateResponse {
        pattern: request.pattern,
        removed,
    }))
}

/// DELETE /api/admin/cache
pub async fn flush(State(state): State<AppState>) -> Json<FlushResponse> {
    let removed = state.cache.flush();
    info!(removed, "Cache flushed by admin");
    Json(FlushResponse { removed })
}
