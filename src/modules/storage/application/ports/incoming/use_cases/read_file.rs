use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ReadFileError {
    #[error("File not found")]
    NotFound,

    #[error("Invalid file path")]
    InvalidPath,

    #[error("Storage error: {0}")]
    StorageError(String),
}

#[async_trait]
pub trait ReadFileUseCase: Send + Sync {
    async fn execute(&self, folder: &str, file_name: &str) -> Result<Vec<u8>, ReadFileError>;
}
