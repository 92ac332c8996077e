use crate::errors::ApiResult;
use crate::state::AppState;
use atrium::content::{Listing, Media, MediaInput, MediaKind, PageParams};
use axum::{
    Extension, Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use serde::Deserialize;
use shared::Error;

pub const CACHE_TTL_SECS: u64 = 600;

const ALL_MEDIA_PATTERN: &str = "GET:/api/media*";

#[derive(Debug, Default, Deserialize)]
pub struct MediaQuery {
    pub kind: Option<MediaKind>,
}

/// Writes to one kind make both its own collection and the combined
/// `/api/media` listing stale.
fn invalidate_kind(state: &AppState, kind: MediaKind) {
    let family = format!("GET:/api/{}*", kind.collection());
    state.invalidate(&[ALL_MEDIA_PATTERN, &family]);
}

/// GET /api/media[?kind=photo]
pub async fn list_all(
    State(state): State<AppState>,
    page: Result<Query<PageParams>, QueryRejection>,
    query: Result<Query<MediaQuery>, QueryRejection>,
) -> ApiResult<Json<Listing<Media>>> {
    let Query(page) = page?;
    let Query(query) = query?;
    let page = page.resolve();

    let (rows, total) = state.media.list(query.kind, page).await?;
    Ok(Json(Listing::new(rows, total, page)))
}

/// GET /api/{photos,videos,designs,testimonials}
pub async fn list(
    State(state): State<AppState>,
    Extension(kind): Extension<MediaKind>,
    page: Result<Query<PageParams>, QueryRejection>,
) -> ApiResult<Json<Listing<Media>>> {
    let Query(page) = page?;
    let page = page.resolve();

    let (rows, total) = state.media.list(Some(kind), page).await?;
    Ok(Json(Listing::new(rows, total, page)))
}

pub async fn get(
    State(state): State<AppState>,
    Extension(kind): Extension<MediaKind>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Media>> {
    let media = state.media.get(kind, id).await?.ok_or(Error::NotFound)?;
    Ok(Json(media))
}

pub async fn create(
    State(state): State<AppState>,
    Extension(kind): Extension<MediaKind>,
    payload: Result<Json<MediaInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Media>)> {
    let Json(input) = payload?;
    let media = state.media.create(kind, input.validate(kind)?).await?;

    invalidate_kind(&state, kind);
    Ok((StatusCode::CREATED, Json(media)))
}

pub async fn update(
    State(state): State<AppState>,
    Extension(kind): Extension<MediaKind>,
    Path(id): Path<i64>,
    payload: Result<Json<MediaInput>, JsonRejection>,
) -> ApiResult<Json<Media>> {
    let Json(input) = payload?;
    let media = state
        .media
        .update(kind, id, input.validate(kind)?)
        .await?
        .ok_or(Error::NotFound)?;

    invalidate_kind(&state, kind);
    Ok(Json(media))
}

pub async fn delete(
    State(state): State<AppState>,
    Extension(kind): Extension<MediaKind>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    if !state.media.delete(kind, id).await? {
        return Err(Error::NotFound.into());
    }

    invalidate_kind(&state, kind);
    Ok(StatusCode::NO_CONTENT)
}
