use crate::errors::ApiError;
use crate::state::AppState;
use atrium::auth::{AuthError, Claims, extract_bearer_token};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};

/// Admin-only guard: `Authorization: Bearer <jwt>` must carry a valid,
/// unrevoked token. The verified claims are attached to the request.
pub async fn require_admin(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AuthError::MissingToken)?;

    let token = extract_bearer_token(auth_header).ok_or(AuthError::InvalidToken)?;
    let claims = state.auth.tokens().verify(token).await?;

    request.extensions_mut().insert(claims);

    Ok(next.run(request).await)
}

/// Claims of the admin behind the current request.
#[derive(Debug, Clone)]
pub struct AuthenticatedAdmin(pub Claims);

impl<S> FromRequestParts<S> for AuthenticatedAdmin
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(AuthenticatedAdmin)
            .ok_or(ApiError::Auth(AuthError::MissingToken))
    }
}
