use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{ContentType, ImageId, StorageKey, StoragePath};

/// Metadata describing one stored image.
///
/// Built once after the object has been written to the backend and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRecord {
    id: ImageId,
    storage_key: StorageKey,
    original_file_name: Option<String>,
    public_url: String,
    storage_path: StoragePath,
    byte_size: u64,
    content_type: ContentType,
    uploaded_at: DateTime<Utc>,
    uploader_address: String,
}

impl ImageRecord {
    /// Create a record for a completed upload; assigns `id` and `uploaded_at`
    pub fn new(
        storage_key: StorageKey,
        original_file_name: Option<String>,
        public_url: String,
        storage_path: StoragePath,
        byte_size: u64,
        content_type: ContentType,
        uploader_address: String,
    ) -> Self {
        Self {
            id: ImageId::new(),
            storage_key,
            original_file_name,
            public_url,
            storage_path,
            byte_size,
            content_type,
            uploaded_at: Utc::now(),
            uploader_address,
        }
    }

    /// Reconstruct from storage (e.g., database)
    #[allow(clippy::too_many_arguments)]
    pub fn reconstruct(
        id: ImageId,
        storage_key: StorageKey,
        original_file_name: Option<String>,
        public_url: String,
        storage_path: StoragePath,
        byte_size: u64,
        content_type: ContentType,
        uploaded_at: DateTime<Utc>,
        uploader_address: String,
    ) -> Self {
        Self {
            id,
            storage_key,
            original_file_name,
            public_url,
            storage_path,
            byte_size,
            content_type,
            uploaded_at,
            uploader_address,
        }
    }

    // Getters
    pub fn id(&self) -> &ImageId {
        &self.id
    }

    pub fn storage_key(&self) -> &StorageKey {
        &self.storage_key
    }

    pub fn original_file_name(&self) -> Option<&str> {
        self.original_file_name.as_deref()
    }

    pub fn public_url(&self) -> &str {
        &self.public_url
    }

    pub fn storage_path(&self) -> &StoragePath {
        &self.storage_path
    }

    pub fn byte_size(&self) -> u64 {
        self.byte_size
    }

    pub fn content_type(&self) -> &ContentType {
        &self.content_type
    }

    pub fn uploaded_at(&self) -> DateTime<Utc> {
        self.uploaded_at
    }

    pub fn uploader_address(&self) -> &str {
        &self.uploader_address
    }
}
