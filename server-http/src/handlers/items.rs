use crate::errors::ApiResult;
use crate::state::AppState;
use atrium::content::{Item, ItemFilter, ItemInput, Listing, PageParams};
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use shared::Error;

pub const CACHE_TTL_SECS: u64 = 300;
pub const STALE_PATTERNS: &[&str] = &["GET:/api/items*"];

/// GET /api/items[?category=]
pub async fn list(
    State(state): State<AppState>,
    page: Result<Query<PageParams>, QueryRejection>,
    filter: Result<Query<ItemFilter>, QueryRejection>,
) -> ApiResult<Json<Listing<Item>>> {
    let Query(page) = page?;
    let Query(filter) = filter?;
    let page = page.resolve();

    let (rows, total) = state.items.list(&filter, page).await?;
    Ok(Json(Listing::new(rows, total, page)))
}

/// GET /api/items/{id}
pub async fn get(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Json<Item>> {
    let item = state.items.get(id).await?.ok_or(Error::NotFound)?;
    Ok(Json(item))
}

/// POST /api/items
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<ItemInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Item>)> {
    let Json(input) = payload?;
    let item = state.items.create(input.validate()?).await?;

    state.invalidate(STALE_PATTERNS);
    Ok((StatusCode::CREATED, Json(item)))
}

/// PUT /api/items/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<ItemInput>, JsonRejection>,
) -> ApiResult<Json<Item>> {
    let Json(input) = payload?;
    let item = state
        .items
        .update(id, input.validate()?)
        .await?
        .ok_or(Error::NotFound)?;

    state.invalidate(STALE_PATTERNS);
    Ok(Json(item))
}

/// DELETE /api/items/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<StatusCode> {
    if !state.items.delete(id).await? {
        return Err(Error::NotFound.into());
    }

    state.invalidate(STALE_PATTERNS);
    Ok(StatusCode::NO_CONTENT)
}
