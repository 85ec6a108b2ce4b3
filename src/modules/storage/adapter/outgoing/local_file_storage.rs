use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use uuid::Uuid;

use crate::config::FileStorageSettings;
use crate::storage::application::ports::outgoing::{FileStorage, FileStorageError, StoredFile};

/// Files live under `root/{folder}/{uuid}.{ext}`.
#[derive(Debug, Clone)]
pub struct LocalFileStorage {
    root: PathBuf,
    public_base_url: Option<String>,
}

impl LocalFileStorage {
    pub fn new(root: impl Into<PathBuf>, public_base_url: Option<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.map(|u| u.trim_end_matches('/').to_string()),
        }
    }

    pub fn from_settings(settings: &FileStorageSettings) -> Self {
        Self::new(&settings.root_path, settings.public_base_url.clone())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> Result<PathBuf, FileStorageError> {
        let mut segments = path.split('/');
        match (segments.next(), segments.next(), segments.next()) {
            (Some(folder), Some(name), None) => {
                validate_segment(folder)?;
                validate_segment(name)?;
                Ok(self.root.join(folder).join(name))
            }
            _ => Err(FileStorageError::InvalidPath),
        }
    }
}

/// A single path component: no separators, no dot-prefixed names.
fn validate_segment(segment: &str) -> Result<(), FileStorageError> {
    let valid = !segment.is_empty()
        && segment.len() <= 255
        && !segment.starts_with('.')
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));

    if valid {
        Ok(())
    } else {
        Err(FileStorageError::InvalidPath)
    }
}

fn io_error(err: std::io::Error) -> FileStorageError {
    match err.kind() {
        ErrorKind::NotFound => FileStorageError::NotFound,
        _ => FileStorageError::Io(err.to_string()),
    }
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    async fn save(
        &self,
        folder: &str,
        original_name: &str,
        bytes: &[u8],
    ) -> Result<StoredFile, FileStorageError> {
        validate_segment(folder)?;

        let file_name = match Path::new(original_name).extension().and_then(|e| e.to_str()) {
            Some(ext) => format!("{}.{}", Uuid::new_v4(), ext.to_lowercase()),
            None => Uuid::new_v4().to_string(),
        };

        let dir = self.root.join(folder);
        tokio::fs::create_dir_all(&dir).await.map_err(io_error)?;
        tokio::fs::write(dir.join(&file_name), bytes)
            .await
            .map_err(io_error)?;

        let path = format!("{}/{}", folder, file_name);
        tracing::debug!(path = %path, "File written");

        Ok(StoredFile {
            folder: folder.to_string(),
            url: self
                .public_base_url
                .as_ref()
                .map(|base| format!("{}/{}", base, path)),
            file_name,
            path,
            size: bytes.len() as u64,
        })
    }

    async fn read(&self, path: &str) -> Result<Vec<u8>, FileStorageError> {
        let full = self.resolve(path)?;
        tokio::fs::read(full).await.map_err(io_error)
    }

    async fn delete(&self, path: &str) -> Result<(), FileStorageError> {
        let full = self.resolve(path)?;
        tokio::fs::remove_file(full).await.map_err(io_error)
    }
}
