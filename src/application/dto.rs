use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::ports::ContentSource;
use crate::domain::entities::ImageRecord;

/// DTO for an uploaded image, as returned to API clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImageRecordDto {
    pub id: String,
    /// Generated storage key
    pub file_name: String,
    pub original_file_name: Option<String>,
    pub file_url: String,
    pub file_size: u64,
    pub content_type: String,
    /// RFC 3339 upload timestamp
    pub upload_time: String,
}

impl From<ImageRecord> for ImageRecordDto {
    fn from(record: ImageRecord) -> Self {
        Self {
            id: record.id().to_string(),
            file_name: record.storage_key().to_string(),
            original_file_name: record.original_file_name().map(|n| n.to_string()),
            file_url: record.public_url().to_string(),
            file_size: record.byte_size(),
            content_type: record.content_type().to_string(),
            upload_time: record.uploaded_at().to_rfc3339(),
        }
    }
}

/// Upload request handed to the use case.
///
/// `content` stays unopened until validation has passed.
pub struct UploadRequest {
    pub content: Box<dyn ContentSource>,
    pub declared_size: u64,
    pub content_type: Option<String>,
    pub original_file_name: Option<String>,
    pub uploader_address: String,
}

impl std::fmt::Debug for UploadRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadRequest")
            .field("declared_size", &self.declared_size)
            .field("content_type", &self.content_type)
            .field("original_file_name", &self.original_file_name)
            .field("uploader_address", &self.uploader_address)
            .finish_non_exhaustive()
    }
}
