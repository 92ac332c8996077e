use async_trait::async_trait;
use bytes::Bytes;
use serde::Serialize;
use shared::{Error, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use uuid::Uuid;

/// Route prefix under which stored files are served.
pub const PUBLIC_PREFIX: &str = "/uploads";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredFile {
    pub filename: String,
    pub original_name: Option<String>,
    pub url: String,
    pub size: u64,
    pub content_type: String,
}

#[async_trait]
pub trait UploadStore: Send + Sync {
    async fn save(
        &self,
        original_name: Option<&str>,
        content_type: &str,
        data: Bytes,
    ) -> Result<StoredFile>;

    /// Returns `false` when no such file exists.
    async fn delete(&self, filename: &str) -> Result<bool>;
}

/// Files on local disk under a single flat directory, named by uuid.
#[derive(Debug, Clone)]
pub struct LocalUploadStore {
    dir: PathBuf,
    public_base_url: String,
    max_bytes: usize,
}

impl LocalUploadStore {
    /// Create the directory if needed.
    pub async fn open(
        dir: impl Into<PathBuf>,
        public_base_url: &str,
        max_bytes: usize,
    ) -> Result<Self> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| Error::Storage(format!("{}: {}", dir.display(), e)))?;

        info!(dir = %dir.display(), max_bytes, "Upload store ready");
        Ok(Self {
            dir,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
            max_bytes,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    fn public_url(&self, filename: &str) -> String {
        format!("{}{}/{}", self.public_base_url, PUBLIC_PREFIX, filename)
    }
}

#[async_trait]
impl UploadStore for LocalUploadStore {
    async fn save(
        &self,
        original_name: Option<&str>,
        content_type: &str,
        data: Bytes,
    ) -> Result<StoredFile> {
        if data.is_empty() {
            return Err(Error::validation("uploaded file is empty"));
        }
        if data.len() > self.max_bytes {
            return Err(Error::validation(format!(
                "file exceeds the {} byte upload limit",
                self.max_bytes
            )));
        }

        let content_type = content_type.trim().to_ascii_lowercase();
        if !is_allowed_type(&content_type) {
            return Err(Error::validation(format!(
                "unsupported file type '{}'",
                content_type
            )));
        }

        let extension = extension_for(&content_type, original_name);
        let filename = format!("{}.{}", Uuid::new_v4(), extension);
        let path = self.dir.join(&filename);

        tokio::fs::write(&path, &data)
            .await
            .map_err(|e| Error::Storage(format!("{}: {}", path.display(), e)))?;

        info!(filename = %filename, size = data.len(), "Stored upload");
        Ok(StoredFile {
            url: self.public_url(&filename),
            filename,
            original_name: original_name.map(String::from),
            size: data.len() as u64,
            content_type,
        })
    }

    async fn delete(&self, filename: &str) -> Result<bool> {
        if !is_safe_filename(filename) {
            warn!(filename = %filename, "Rejected upload path");
            return Err(Error::validation("invalid filename"));
        }

        match tokio::fs::remove_file(self.dir.join(filename)).await {
            Ok(()) => {
                info!(filename = %filename, "Deleted upload");
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(Error::Storage(e.to_string())),
        }
    }
}

fn is_allowed_type(content_type: &str) -> bool {
    content_type.starts_with("image/")
        || content_type.starts_with("video/")
        || content_type == "application/pdf"
}

fn extension_for(content_type: &str, original_name: Option<&str>) -> String {
    let known = match content_type {
        "image/jpeg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        "image/svg+xml" => Some("svg"),
        "video/mp4" => Some("mp4"),
        "video/webm" => Some("webm"),
        "video/quicktime" => Some("mov"),
        "application/pdf" => Some("pdf"),
        _ => None,
    };
    if let Some(ext) = known {
        return ext.to_string();
    }

    original_name
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .filter(|ext| ext.len() <= 8 && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_else(|| "bin".to_string())
}

/// A single path component made of `[A-Za-z0-9._-]`, never hidden or relative.
fn is_safe_filename(filename: &str) -> bool {
    !filename.is_empty()
        && !filename.starts_with('.')
        && !filename.contains("..")
        && filename
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
}
