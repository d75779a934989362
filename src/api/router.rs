use axum::{
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::api::handlers::{health_handler, upload_handler};
use crate::api::middleware::{create_cors_layer, request_logging_middleware};
use crate::api::openapi::openapi_handler;
use crate::application::use_cases::UploadImageUseCase;

/// Application state container
#[derive(Clone)]
pub struct AppState {
    pub upload_use_case: Arc<UploadImageUseCase>,
    pub allowed_origins: Option<String>,
}

/// Create router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    let upload_state = Arc::clone(&state.upload_use_case);

    Router::new()
        .route("/api/images/health", get(health_handler))
        .route(
            "/api/images/upload",
            // Spooling stops past the configured maximum, so the size
            // check reports oversize uploads instead of a generic 413
            post(upload_handler)
                .with_state(upload_state)
                .layer(DefaultBodyLimit::disable()),
        )
        .route("/api-docs/openapi.json", get(openapi_handler))
        .layer(create_cors_layer(state.allowed_origins.as_deref()))
        .layer(axum_middleware::from_fn(request_logging_middleware))
}
