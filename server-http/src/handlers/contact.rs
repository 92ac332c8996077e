use crate::errors::ApiResult;
use crate::state::AppState;
use atrium::content::{ContactInput, ContactMessage, Listing, PageParams};
use atrium::mail::contact_notification;
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use shared::Error;
use tracing::{info, warn};

/// POST /api/contact
///
/// The message is stored first; the notification email is best effort and
/// a delivery failure does not fail the request.
pub async fn submit(
    State(state): State<AppState>,
    payload: Result<Json<ContactInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ContactMessage>)> {
    let Json(input) = payload?;
    let message = state.contact.create(input.validate()?).await?;
    info!(id = message.id, "Contact message received");

    let email = contact_notification(&message, &state.config.contact_recipient);
    if let Err(e) = state.mailer.send(email).await {
        warn!(id = message.id, error = %e, "Contact notification not delivered");
    }

    Ok((StatusCode::CREATED, Json(message)))
}

/// GET /api/contact
pub async fn list(
    State(state): State<AppState>,
    page: Result<Query<PageParams>, QueryRejection>,
) -> ApiResult<Json<Listing<ContactMessage>>> {
    let Query(page) = page?;
    let page = page.resolve();

    let (rows, total) = state.contact.list(page).await?;
    Ok(Json(Listing::new(rows, total, page)))
}

/// PATCH /api/contact/{id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<ContactMessage>> {
    let message = state.contact.mark_read(id).await?.ok_or(Error::NotFound)?;
    Ok(Json(message))
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<StatusCode> {
    if !state.contact.delete(id).await? {
        return Err(Error::NotFound.into());
    }
    Ok(StatusCode::NO_CONTENT)
}
