use crate::errors::ApiResult;
use crate::middleware::AuthenticatedAdmin;
use crate::state::AppState;
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use shared_http::api::{
    AdminResponse, ChangePasswordRequest, LoginRequest, LoginResponse, MessageResponse,
};
use tracing::info;

/// POST /api/auth/login
///
/// Exchange admin credentials for a bearer token.
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<LoginResponse>> {
    let Json(request) = payload?;
    let (admin, issued) = state
        .auth
        .login(request.username.trim(), &request.password)
        .await?;

    Ok(Json(LoginResponse {
        token: issued.token,
        expires_in: issued.expires_in,
        username: admin.username,
    }))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    AuthenticatedAdmin(claims): AuthenticatedAdmin,
) -> ApiResult<Json<AdminResponse>> {
    let admin = state.auth.get_admin(&claims.sub).await?;

    Ok(Json(AdminResponse {
        id: admin.id,
        username: admin.username,
        created_at: admin.created_at,
        updated_at: admin.updated_at,
    }))
}

/// POST /api/auth/logout
///
/// Revokes the presented token; it is rejected from now until it expires.
pub async fn logout(
    State(state): State<AppState>,
    AuthenticatedAdmin(claims): AuthenticatedAdmin,
) -> ApiResult<Json<MessageResponse>> {
    state.auth.tokens().revoke(&claims).await;
    info!(username = %claims.username, "Admin logged out");

    Ok(Json(MessageResponse::new("Logged out")))
}

/// PUT /api/auth/password
pub async fn change_password(
    State(state): State<AppState>,
    AuthenticatedAdmin(claims): AuthenticatedAdmin,
    payload: Result<Json<ChangePasswordRequest>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Json(request) = payload?;
    state
        .auth
        .change_password(&claims.sub, &request.current_password, &request.new_password)
        .await?;

    info!(username = %claims.username, "Admin password changed");
    Ok(Json(MessageResponse::new("Password updated")))
}
