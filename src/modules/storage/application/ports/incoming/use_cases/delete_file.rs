use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DeleteFileError {
    #[error("File not found")]
    NotFound,

    #[error("Invalid file path")]
    InvalidPath,

    #[error("Storage error: {0}")]
    StorageError(String),
}

#[async_trait]
pub trait DeleteFileUseCase: Send + Sync {
    async fn execute(&self, folder: &str, file_name: &str) -> Result<(), DeleteFileError>;
}
