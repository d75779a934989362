use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    response::Json,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;
use utoipa::ToSchema;

use crate::api::client_ip::ClientAddress;
use crate::api::errors::ApiError;
use crate::application::dto::{ImageRecordDto, UploadRequest};
use crate::application::use_cases::UploadImageUseCase;
use crate::infrastructure::storage::SpooledFile;

/// Multipart field carrying the image
pub const FILE_FIELD: &str = "file";

/// Successful upload envelope
#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    pub success: bool,
    pub message: String,
    pub data: ImageRecordDto,
}

/// Failure envelope, produced by `ApiError`
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}

/// POST /api/images/upload
/// Upload one image from the `file` part of a multipart form
#[utoipa::path(
    post,
    path = "/api/images/upload",
    tag = "images",
    request_body(
        content_type = "multipart/form-data",
        description = "Image in the `file` part; at most the configured maximum size"
    ),
    responses(
        (status = 200, description = "Image stored", body = UploadResponse),
        (status = 400, description = "Rejected upload", body = ErrorResponse),
        (status = 500, description = "Storage or metadata failure", body = ErrorResponse)
    )
)]
pub async fn upload_handler(
    State(use_case): State<Arc<UploadImageUseCase>>,
    ClientAddress(uploader_address): ClientAddress,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut multipart = multipart?;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            debug!(name = ?field.name(), "skipping multipart field");
            continue;
        }

        let original_file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);

        // Buffer the part so its size is known before validation
        let spooled = SpooledFile::spool(field, use_case.max_file_size()).await?;

        let request = UploadRequest {
            declared_size: spooled.size(),
            content: Box::new(spooled),
            content_type,
            original_file_name,
            uploader_address,
        };

        let data = use_case.execute(request).await?;

        return Ok(Json(UploadResponse {
            success: true,
            message: "Image uploaded successfully".to_string(),
            data,
        }));
    }

    Err(ApiError::bad_request(format!(
        "Required part '{}' is not present",
        FILE_FIELD
    )))
}
