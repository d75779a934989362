//! Upload admission rules
//!
//! Runs against the declared size and content type only, so a request can be
//! refused before its body is read back or the storage backend is contacted.

use crate::domain::errors::DomainError;
use crate::domain::value_objects::ContentType;

/// Hard ceiling for a single image: 20 MiB
pub const MAX_FILE_SIZE: u64 = 20 * 1024 * 1024;

/// Validation result type
pub type ValidationResult<T> = Result<T, DomainError>;

/// Size and type constraints applied to every upload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadPolicy {
    max_file_size: u64,
}

impl UploadPolicy {
    pub fn new(max_file_size: u64) -> Self {
        Self { max_file_size }
    }

    pub fn max_file_size(&self) -> u64 {
        self.max_file_size
    }

    /// Check size first, then type; the first violation wins
    pub fn validate(
        &self,
        declared_size: u64,
        content_type: Option<&str>,
    ) -> ValidationResult<ContentType> {
        self.validate_size(declared_size)?;
        ContentType::parse(content_type)
    }

    pub fn validate_size(&self, declared_size: u64) -> ValidationResult<()> {
        if declared_size > self.max_file_size {
            return Err(DomainError::FileTooLarge {
                size: declared_size,
                max: self.max_file_size,
            });
        }
        Ok(())
    }
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self::new(MAX_FILE_SIZE)
    }
}
