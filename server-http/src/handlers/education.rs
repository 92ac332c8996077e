use crate::errors::ApiResult;
use crate::state::AppState;
use atrium::content::{EducationEntry, EducationInput, Listing, PageParams};
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use shared::Error;

pub const CACHE_TTL_SECS: u64 = 3600;
pub const STALE_PATTERNS: &[&str] = &["GET:/api/education*"];

pub async fn list(
    State(state): State<AppState>,
    page: Result<Query<PageParams>, QueryRejection>,
) -> ApiResult<Json<Listing<EducationEntry>>> {
    let Query(page) = page?;
    let page = page.resolve();

    let (rows, total) = state.education.list(page).await?;
    Ok(Json(Listing::new(rows, total, page)))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<EducationEntry>> {
    let entry = state.education.get(id).await?.ok_or(Error::NotFound)?;
    Ok(Json(entry))
}

pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<EducationInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<EducationEntry>)> {
    let Json(input) = payload?;
    let entry = state.education.create(input.validate()?).await?;

    state.invalidate(STALE_PATTERNS);
    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<EducationInput>, JsonRejection>,
) -> ApiResult<Json<EducationEntry>> {
    let Json(input) = payload?;
    let entry = state
        .education
        .update(id, input.validate()?)
        .await?
        .ok_or(Error::NotFound)?;

    state.invalidate(STALE_PATTERNS);
    Ok(Json(entry))
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<StatusCode> {
    if !state.education.delete(id).await? {
        return Err(Error::NotFound.into());
    }

    state.invalidate(STALE_PATTERNS);
    Ok(StatusCode::NO_CONTENT)
}
