use serde::Deserialize;

/// Request body for login endpoint
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

// === Cache Admin Models ===

#[derive(Debug, Deserialize)]
pub struct InvalidateRequest {
    pub pattern: String,
}

// === Get Involved Models ===

#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: String,
}
