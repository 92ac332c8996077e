use crate::errors::ApiResult;
use crate::state::AppState;
use atrium::content::{Listing, NewsArticle, NewsFilter, NewsInput, NewsKind, PageParams};
use axum::{
    Extension, Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use shared::Error;

pub const CACHE_TTL_SECS: u64 = 60;

fn invalidate_kind(state: &AppState, kind: NewsKind) {
    let family = format!("GET:/api/{}*", kind.collection());
    state.invalidate(&[&family]);
}

/// GET /api/news, GET /api/events[?upcoming=true]
pub async fn list(
    State(state): State<AppState>,
    Extension(kind): Extension<NewsKind>,
    page: Result<Query<PageParams>, QueryRejection>,
    filter: Result<Query<NewsFilter>, QueryRejection>,
) -> ApiResult<Json<Listing<NewsArticle>>> {
    let Query(page) = page?;
    let Query(filter) = filter?;
    let page = page.resolve();

    let (rows, total) = state.news.list(kind, &filter, page).await?;
    Ok(Json(Listing::new(rows, total, page)))
}

pub async fn get(
    State(state): State<AppState>,
    Extension(kind): Extension<NewsKind>,
    Path(id): Path<i64>,
) -> ApiResult<Json<NewsArticle>> {
    let article = state.news.get(kind, id).await?.ok_or(Error::NotFound)?;
    Ok(Json(article))
}

pub async fn create(
    State(state): State<AppState>,
    Extension(kind): Extension<NewsKind>,
    payload: Result<Json<NewsInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<NewsArticle>)> {
    let Json(input) = payload?;
    let article = state.news.create(kind, input.validate(kind)?).await?;

    invalidate_kind(&state, kind);
    Ok((StatusCode::CREATED, Json(article)))
}

pub async fn update(
    State(state): State<AppState>,
    Extension(kind): Extension<NewsKind>,
    Path(id): Path<i64>,
    payload: Result<Json<NewsInput>, JsonRejection>,
) -> ApiResult<Json<NewsArticle>> {
    let Json(input) = payload?;
    let article = state
        .news
        .update(kind, id, input.validate(kind)?)
        .await?
        .ok_or(Error::NotFound)?;

    invalidate_kind(&state, kind);
    Ok(Json(article))
}

pub async fn delete(
    State(state): State<AppState>,
    Extension(kind): Extension<NewsKind>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    if !state.news.delete(kind, id).await? {
        return Err(Error::NotFound.into());
    }

    invalidate_kind(&state, kind);
    Ok(StatusCode::NO_CONTENT)
}
