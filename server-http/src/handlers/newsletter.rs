use crate::errors::ApiResult;
use crate::state::AppState;
use atrium::content::validation::email;
use atrium::content::{Listing, PageParams, SubscribeInput, Subscriber, UnsubscribeInput};
use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use shared::Error;
use shared_http::api::MessageResponse;

/// POST /api/newsletter/subscribe
///
/// Subscribing an existing address re-activates it.
pub async fn subscribe(
    State(state): State<AppState>,
    payload: Result<Json<SubscribeInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Subscriber>)> {
    let Json(input) = payload?;
    let subscriber = state.newsletter.subscribe(input.validate()?).await?;
    Ok((StatusCode::CREATED, Json(subscriber)))
}

/// POST /api/newsletter/unsubscribe
pub async fn unsubscribe(
    State(state): State<AppState>,
    payload: Result<Json<UnsubscribeInput>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Json(input) = payload?;
    let address = email(&input.email)?;

    if !state.newsletter.unsubscribe(&address).await? {
        return Err(Error::NotFound.into());
    }
    Ok(Json(MessageResponse::new("Unsubscribed")))
}

/// GET /api/newsletter/subscribers
pub async fn list(
    State(state): State<AppState>,
    page: Result<Query<PageParams>, QueryRejection>,
) -> ApiResult<Json<Listing<Subscriber>>> {
    let Query(page) = page?;
    let page = page.resolve();

    let (rows, total) = state.newsletter.list(page).await?;
    Ok(Json(Listing::new(rows, total, page)))
}
