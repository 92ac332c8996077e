use crate::errors::ApiResult;
use crate::state::AppState;
use atrium::content::{
    Listing, PageParams, Submission, SubmissionFilter, SubmissionInput, SubmissionKind,
    SubmissionStatus,
};
use axum::{
    Extension, Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use shared::Error;
use shared_http::api::StatusUpdateRequest;
use tracing::info;

/// POST /api/get-involved/{membership,donations,feedback,ideas,partnerships}
pub async fn submit(
    State(state): State<AppState>,
    Extension(kind): Extension<SubmissionKind>,
    payload: Result<Json<SubmissionInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Submission>)> {
    let Json(input) = payload?;
    let submission = state.submissions.create(kind, input.validate(kind)?).await?;

    info!(id = submission.id, kind = kind.as_str(), "New get-involved submission");
    Ok((StatusCode::CREATED, Json(submission)))
}

/// GET /api/get-involved[?kind=&status=]
pub async fn list(
    State(state): State<AppState>,
    page: Result<Query<PageParams>, QueryRejection>,
    filter: Result<Query<SubmissionFilter>, QueryRejection>,
) -> ApiResult<Json<Listing<Submission>>> {
    let Query(page) = page?;
    let Query(filter) = filter?;
    let page = page.resolve();

    let (rows, total) = state.submissions.list(&filter, page).await?;
    Ok(Json(Listing::new(rows, total, page)))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Submission>> {
    let submission = state.submissions.get(id).await?.ok_or(Error::NotFound)?;
    Ok(Json(submission))
}

/// PATCH /api/get-involved/entry/{id}/status
pub async fn set_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<StatusUpdateRequest>, JsonRejection>,
) -> ApiResult<Json<Submission>> {
    let Json(request) = payload?;
    let status: SubmissionStatus = request.status.parse()?;

    let submission = state
        .submissions
        .set_status(id, status)
        .await?
        .ok_or(Error::NotFound)?;
    Ok(Json(submission))
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<StatusCode> {
    if !state.submissions.delete(id).await? {
        return Err(Error::NotFound.into());
    }
    Ok(StatusCode::NO_CONTENT)
}
