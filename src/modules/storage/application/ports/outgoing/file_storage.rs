use async_trait::async_trait;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct StoredFile {
    pub folder: String,
    pub file_name: String,
    /// `"{folder}/{file_name}"`, the key used by `read` and `delete`
    pub path: String,
    pub size: u64,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FileStorageError {
    #[error("File not found")]
    NotFound,

    #[error("Invalid storage path")]
    InvalidPath,

    #[error("Storage IO error: {0}")]
    Io(String),
}

#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Stores the bytes under a generated `"{uuid}.{ext}"` name.
    async fn save(
        &self,
        folder: &str,
        original_name: &str,
        bytes: &[u8],
    ) -> Result<StoredFile, FileStorageError>;

    async fn read(&self, path: &str) -> Result<Vec<u8>, FileStorageError>;

    async fn delete(&self, path: &str) -> Result<(), FileStorageError>;
}
