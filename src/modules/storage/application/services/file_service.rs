use std::sync::Arc;

use async_trait::async_trait;

use crate::storage::application::domain::UploadPolicy;
use crate::storage::application::ports::incoming::use_cases::{
    DeleteFileError, DeleteFileUseCase, ReadFileError, ReadFileUseCase, UploadFileCommand,
    UploadFileError, UploadFileUseCase,
};
use crate::storage::application::ports::outgoing::{FileStorage, FileStorageError, StoredFile};

pub struct FileService {
    storage: Arc<dyn FileStorage + Send + Sync>,
    policy: UploadPolicy,
}

impl FileService {
    pub fn new(storage: Arc<dyn FileStorage + Send + Sync>, policy: UploadPolicy) -> Self {
        Self { storage, policy }
    }
}

fn storage_path(folder: &str, file_name: &str) -> String {
    format!("{}/{}", folder, file_name)
}

#[async_trait]
impl UploadFileUseCase for FileService {
    async fn execute(&self, command: UploadFileCommand) -> Result<StoredFile, UploadFileError> {
        self.policy
            .check(command.file_name(), command.bytes().len() as u64)?;

        let stored = self
            .storage
            .save(command.folder(), command.file_name(), command.bytes())
            .await
            .map_err(|e| match e {
                FileStorageError::InvalidPath => UploadFileError::InvalidFolder,
                other => UploadFileError::StorageError(other.to_string()),
            })?;

        tracing::info!(
            path = %stored.path,
            size = stored.size,
            uploader_id = %command.uploader_id(),
            "File stored"
        );
        Ok(stored)
    }
}

#[async_trait]
impl ReadFileUseCase for FileService {
    async fn execute(&self, folder: &str, file_name: &str) -> Result<Vec<u8>, ReadFileError> {
        self.storage
            .read(&storage_path(folder, file_name))
            .await
            .map_err(|e| match e {
                FileStorageError::NotFound => ReadFileError::NotFound,
                FileStorageError::InvalidPath => ReadFileError::InvalidPath,
                FileStorageError::Io(msg) => ReadFileError::StorageError(msg),
            })
    }
}

#[async_trait]
impl DeleteFileUseCase for FileService {
    async fn execute(&self, folder: &str, file_name: &str) -> Result<(), DeleteFileError> {
        let path = storage_path(folder, file_name);
        self.storage.delete(&path).await.map_err(|e| match e {
            FileStorageError::NotFound => DeleteFileError::NotFound,
            FileStorageError::InvalidPath => DeleteFileError::InvalidPath,
            FileStorageError::Io(msg) => DeleteFileError::StorageError(msg),
        })?;

        tracing::info!(path = %path, "File deleted");
        Ok(())
    }
}
