use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Missing bearer token")]
    MissingToken,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Token has been revoked")]
    TokenRevoked,

    #[error("Admin not found")]
    AdminNotFound,

    #[error("Admin already exists")]
    AdminAlreadyExists,

    #[error("Password does not meet strength requirements")]
    WeakPassword,

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Token encoding error: {0}")]
    TokenEncoding(String),

    #[error("Password hashing error: {0}")]
    PasswordHashError(String),
}

impl From<sqlx::Error> for AuthError {
    fn from(err: sqlx::Error) -> Self {
        AuthError::StorageError(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        AuthError::TokenEncoding(err.to_string())
    }
}
