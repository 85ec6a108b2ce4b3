use std::path::Path;

use crate::config::FileStorageSettings;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UploadPolicyError {
    #[error("File is empty")]
    EmptyFile,

    #[error("File exceeds the maximum size of {max} bytes")]
    FileTooLarge { max: u64 },

    #[error("Invalid file name")]
    InvalidFileName,

    #[error("File extension '{0}' is not allowed")]
    ExtensionNotAllowed(String),
}

/// Limits applied to every upload before it reaches storage.
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    pub max_file_size_bytes: u64,
    pub max_file_name_len: usize,
    pub allowed_extensions: Vec<String>,
}

impl UploadPolicy {
    pub const DEFAULT_MAX_FILE_NAME_LEN: usize = 255;

    pub fn new(max_file_size_bytes: u64, allowed_extensions: &[String]) -> Self {
        Self {
            max_file_size_bytes,
            max_file_name_len: Self::DEFAULT_MAX_FILE_NAME_LEN,
            allowed_extensions: allowed_extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_lowercase())
                .collect(),
        }
    }

    pub fn from_settings(settings: &FileStorageSettings) -> Self {
        Self::new(settings.max_file_size_bytes, &settings.allowed_extensions)
    }

    /// Returns the lowercased extension of an acceptable upload.
    pub fn check(&self, file_name: &str, size: u64) -> Result<String, UploadPolicyError> {
        if size == 0 {
            return Err(UploadPolicyError::EmptyFile);
        }
        if size > self.max_file_size_bytes {
            return Err(UploadPolicyError::FileTooLarge {
                max: self.max_file_size_bytes,
            });
        }

        let file_name = file_name.trim();
        if file_name.is_empty() || file_name.len() > self.max_file_name_len {
            return Err(UploadPolicyError::InvalidFileName);
        }

        let extension = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .ok_or(UploadPolicyError::InvalidFileName)?;

        if !self.allowed_extensions.contains(&extension) {
            return Err(UploadPolicyError::ExtensionNotAllowed(extension));
        }

        Ok(extension)
    }
}
