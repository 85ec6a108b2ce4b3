use async_trait::async_trait;
use uuid::Uuid;

use crate::storage::application::domain::UploadPolicyError;
use crate::storage::application::ports::outgoing::StoredFile;

//
// ──────────────────────────────────────────────────────────
// Upload File Command
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone)]
pub struct UploadFileCommand {
    folder: String,
    file_name: String,
    bytes: Vec<u8>,
    uploader_id: Uuid,
}

impl UploadFileCommand {
    pub fn new(folder: String, file_name: String, bytes: Vec<u8>, uploader_id: Uuid) -> Self {
        Self {
            folder: folder.trim().to_string(),
            file_name: file_name.trim().to_string(),
            bytes,
            uploader_id,
        }
    }

    pub fn folder(&self) -> &str {
        &self.folder
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn uploader_id(&self) -> Uuid {
        self.uploader_id
    }
}

//
// ──────────────────────────────────────────────────────────
// Use Case Error
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UploadFileError {
    #[error(transparent)]
    Rejected(#[from] UploadPolicyError),

    #[error("Invalid folder name")]
    InvalidFolder,

    #[error("Storage error: {0}")]
    StorageError(String),
}

#[async_trait]
pub trait UploadFileUseCase: Send + Sync {
    async fn execute(&self, command: UploadFileCommand) -> Result<StoredFile, UploadFileError>;
}
