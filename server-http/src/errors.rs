use atrium::auth::AuthError;
use axum::{
    Json,
    extract::multipart::MultipartError,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use shared::Error;
use shared_http::api::ErrorResponse;
use tracing::error;

/// Error type returned by every handler; rendered as `{ "error": ... }`.
#[derive(Debug)]
pub enum ApiError {
    Domain(Error),
    Auth(AuthError),
    BadRequest(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            ApiError::Domain(err) => match err {
                Error::NotFound => (StatusCode::NOT_FOUND, "not found".to_string()),
                Error::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
                Error::InvalidPattern(_) => (StatusCode::BAD_REQUEST, err.to_string()),
                Error::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
                Error::Database(_) | Error::Mail(_) | Error::Storage(_) | Error::Internal(_) => {
                    error!(error = %err, "Request failed");
                    (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string())
                }
            },
            ApiError::Auth(err) => match err {
                AuthError::InvalidCredentials => {
                    (StatusCode::UNAUTHORIZED, "Invalid username or password".to_string())
                }
                AuthError::MissingToken | AuthError::InvalidToken | AuthError::TokenRevoked => {
                    (StatusCode::UNAUTHORIZED, err.to_string())
                }
                AuthError::AdminNotFound => (StatusCode::NOT_FOUND, err.to_string()),
                AuthError::AdminAlreadyExists => (StatusCode::CONFLICT, err.to_string()),
                AuthError::WeakPassword => (
                    StatusCode::BAD_REQUEST,
                    "Password must be at least 8 characters with a letter and a digit".to_string(),
                ),
                AuthError::StorageError(_)
                | AuthError::TokenEncoding(_)
                | AuthError::PasswordHashError(_) => {
                    error!(error = %err, "Authentication failed");
                    (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string())
                }
            },
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError::Domain(err)
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        ApiError::Auth(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        ApiError::BadRequest(err.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
