use crate::errors::{ApiError, ApiResult};
use crate::state::AppState;
use atrium::uploads::StoredFile;
use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
};
use shared::Error;

const FILE_FIELD: &str = "file";

/// POST /api/uploads (multipart, field `file`)
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<(StatusCode, Json<StoredFile>)> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let original_name = field.file_name().map(String::from);
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let data = field.bytes().await?;

        let stored = state
            .uploads
            .save(original_name.as_deref(), &content_type, data)
            .await?;
        return Ok((StatusCode::CREATED, Json(stored)));
    }

    Err(ApiError::bad_request("multipart field 'file' is required"))
}

/// DELETE /api/uploads/{filename}
pub async fn delete(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> ApiResult<StatusCode> {
    if !state.uploads.delete(&filename).await? {
        return Err(Error::NotFound.into());
    }
    Ok(StatusCode::NO_CONTENT)
}
