use std::sync::Arc;

use crate::storage::application::domain::UploadPolicy;
use crate::storage::application::ports::incoming::use_cases::{
    DeleteFileUseCase, ReadFileUseCase, UploadFileUseCase,
};
use crate::storage::application::ports::outgoing::FileStorage;
use crate::storage::application::services::FileService;

#[derive(Clone)]
pub struct FileUseCases {
    pub upload: Arc<dyn UploadFileUseCase + Send + Sync>,
    pub read: Arc<dyn ReadFileUseCase + Send + Sync>,
    pub delete: Arc<dyn DeleteFileUseCase + Send + Sync>,
}

impl FileUseCases {
    pub fn new(storage: Arc<dyn FileStorage + Send + Sync>, policy: UploadPolicy) -> Self {
        let service = Arc::new(FileService::new(storage, policy));
        Self {
            upload: service.clone(),
            read: service.clone(),
            delete: service,
        }
    }
}
