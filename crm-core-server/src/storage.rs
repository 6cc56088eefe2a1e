//! Object storage for uploaded files
//!
//! Uploads go through [`ObjectStorage`]. The shipped adapter,
//! [`LocalObjectStorage`], writes below a directory and publishes objects
//! under `PUBLIC_BASE_URL`.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::config::ServerConfig;

#[derive(Debug, Error)]
pub enum StorageError {
    /// The upload itself is unacceptable (size, type, path).
    #[error("{0}")]
    Rejected(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoredObject {
    pub path: String,
    pub public_url: String,
}

#[async_trait]
pub trait ObjectStorage: Send + Sync {
    async fn put(&self, path: &str, bytes: &[u8]) -> Result<StoredObject, StorageError>;

    /// Removes an object. Removing a missing object succeeds.
    async fn delete(&self, path: &str) -> Result<(), StorageError>;
}

pub struct LocalObjectStorage {
    root: PathBuf,
    public_base_url: String,
}

impl LocalObjectStorage {
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn resolve(&self, path: &str) -> Result<PathBuf, StorageError> {
        let relative = Path::new(path);
        let safe = relative
            .components()
            .all(|component| matches!(component, Component::Normal(_)));
        if path.is_empty() || !safe {
            return Err(StorageError::Rejected(format!("Invalid storage path: {path}")));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl ObjectStorage for LocalObjectStorage {
    async fn put(&self, path: &str, bytes: &[u8]) -> Result<StoredObject, StorageError> {
        let target = self.resolve(path)?;
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&target, bytes).await?;
        tracing::debug!(path, size = bytes.len(), "Stored object");

        Ok(StoredObject {
            path: path.to_string(),
            public_url: format!("{}/{}", self.public_base_url, path),
        })
    }

    async fn delete(&self, path: &str) -> Result<(), StorageError> {
        let target = self.resolve(path)?;
        match tokio::fs::remove_file(&target).await {
            Ok(()) => {
                tracing::debug!(path, "Removed object");
                Ok(())
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// Size and type limits applied to every uploaded file.
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    pub max_file_size_bytes: usize,
    pub allowed_mime: Vec<String>,
}

impl From<&ServerConfig> for UploadPolicy {
    fn from(config: &ServerConfig) -> Self {
        Self {
            max_file_size_bytes: config.max_file_size_bytes,
            allowed_mime: config.allowed_mime.clone(),
        }
    }
}

impl UploadPolicy {
    pub fn validate(&self, filename: &str, content_type: Option<&str>, size: usize) -> Result<(), StorageError> {
        if size > self.max_file_size_bytes {
            return Err(StorageError::Rejected(format!(
                "File {filename} exceeds the maximum size of {} bytes",
                self.max_file_size_bytes
            )));
        }
        let mime = content_type.unwrap_or("application/octet-stream");
        if !mime_allowed(mime, &self.allowed_mime) {
            return Err(StorageError::Rejected(format!(
                "File type {mime} is not allowed for {filename}"
            )));
        }
        Ok(())
    }
}

/// `type/*` patterns match every subtype; comparison ignores case and MIME parameters.
pub fn mime_allowed(mime: &str, patterns: &[String]) -> bool {
    let essence = mime.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
    patterns.iter().any(|pattern| {
        let pattern = pattern.trim();
        match pattern.strip_suffix("/*") {
            Some(top_level) => essence
                .split_once('/')
                .is_some_and(|(kind, _)| kind.eq_ignore_ascii_case(top_level)),
            None => pattern.eq_ignore_ascii_case(&essence),
        }
    })
}

/// Replaces every character outside `[A-Za-z0-9._-]` with `_`.
pub fn sanitize_filename(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') { c } else { '_' })
        .collect();
    if sanitized.is_empty() {
        "file".to_string()
    } else {
        sanitized
    }
}

pub fn upload_path(user_id: Uuid, millis: i64, filename: &str) -> String {
    format!("uploads/{user_id}/{millis}-{}", sanitize_filename(filename))
}
