use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info};

use crate::application::dto::{ImageRecordDto, UploadRequest};
use crate::application::ports::{ImageRepository, ObjectStore, RepositoryError, StorageError};
use crate::domain::entities::ImageRecord;
use crate::domain::errors::DomainError;
use crate::domain::validation::UploadPolicy;
use crate::domain::value_objects::{StorageKey, StoragePath};

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("{0}")]
    Validation(#[from] DomainError),

    #[error("Failed to read upload content: {0}")]
    Content(#[source] std::io::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Where uploads go and what they may be
#[derive(Debug, Clone)]
pub struct UploadSettings {
    /// Public base URL of the object store, used to build `fileUrl`
    pub endpoint: String,
    pub bucket: String,
    pub policy: UploadPolicy,
}

impl UploadSettings {
    /// `<endpoint>/<bucket>/<path>`
    pub fn public_url(&self, path: &StoragePath) -> String {
        format!(
            "{}/{}/{}",
            self.endpoint.trim_end_matches('/'),
            self.bucket,
            path
        )
    }
}

/// Use case: Upload an image
pub struct UploadImageUseCase {
    object_store: Arc<dyn ObjectStore>,
    image_repo: Arc<dyn ImageRepository>,
    settings: UploadSettings,
}

impl UploadImageUseCase {
    pub fn new(
        object_store: Arc<dyn ObjectStore>,
        image_repo: Arc<dyn ImageRepository>,
        settings: UploadSettings,
    ) -> Self {
        Self {
            object_store,
            image_repo,
            settings,
        }
    }

    pub fn max_file_size(&self) -> u64 {
        self.settings.policy.max_file_size()
    }

    /// Execute upload workflow
    pub async fn execute(&self, request: UploadRequest) -> Result<ImageRecordDto, UploadError> {
        let UploadRequest {
            content,
            declared_size,
            content_type,
            original_file_name,
            uploader_address,
        } = request;

        // 1. Validate declared metadata; nothing has been opened yet
        let content_type = self
            .settings
            .policy
            .validate(declared_size, content_type.as_deref())
            .inspect_err(|e| debug!(declared_size, error = %e, "upload rejected"))?;

        // 2. Derive key and partitioned path
        let storage_key = StorageKey::generate(original_file_name.as_deref());
        let storage_path = StoragePath::for_key(&storage_key);

        // 3. Stream to the backend. The reader is owned by the call and dropped
        // when it returns, whatever the outcome.
        let reader = content.open().await.map_err(UploadError::Content)?;
        self.object_store
            .put_object(
                &self.settings.bucket,
                storage_path.as_str(),
                reader,
                declared_size,
                content_type.as_str(),
            )
            .await?;

        // 4. Build the record and hand it to the metadata store
        let public_url = self.settings.public_url(&storage_path);
        let record = ImageRecord::new(
            storage_key,
            original_file_name,
            public_url,
            storage_path.clone(),
            declared_size,
            content_type,
            uploader_address,
        );

        let saved = self.image_repo.save(record).await.inspect_err(|e| {
            error!(
                bucket = %self.settings.bucket,
                path = %storage_path,
                error = %e,
                "object written but metadata save failed"
            )
        })?;

        info!(
            id = %saved.id(),
            path = %saved.storage_path(),
            size = saved.byte_size(),
            content_type = %saved.content_type(),
            "image uploaded"
        );

        Ok(ImageRecordDto::from(saved))
    }
}
