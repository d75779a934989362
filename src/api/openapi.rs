use axum::response::Json;
use utoipa::OpenApi;

use crate::api::handlers::health::HealthResponse;
use crate::api::handlers::upload::{ErrorResponse, UploadResponse};
use crate::application::dto::ImageRecordDto;

/// OpenAPI document for the image upload API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Image Upload API",
        version = "1.0.0",
        description = "Accepts image uploads, stores them in an object store and returns their public URL"
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(
        crate::api::handlers::health::health_handler,
        crate::api::handlers::upload::upload_handler,
    ),
    components(
        schemas(
            ImageRecordDto,
            UploadResponse,
            ErrorResponse,
            HealthResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "images", description = "Image upload operations")
    )
)]
pub struct ApiDoc;

/// GET /api-docs/openapi.json
pub async fn openapi_handler() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
