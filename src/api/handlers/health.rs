use axum::{http::StatusCode, response::Json};
use serde::Serialize;
use utoipa::ToSchema;

/// Liveness response
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
}

/// GET /api/images/health
/// Liveness only; no dependency is checked
#[utoipa::path(
    get,
    path = "/api/images/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    )
)]
pub async fn health_handler() -> (StatusCode, Json<HealthResponse>) {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "UP".to_string(),
            service: "Image Upload Service".to_string(),
        }),
    )
}
