//! Liveness and service-info handlers.

use axum::response::IntoResponse;
use axum::Json;

/// Root endpoint with service identity.
pub async fn root() -> impl IntoResponse {
    Json(serde_json::json!({
        "name": "Curator Knowledge Management System",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
    }))
}

/// Health check endpoint.
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
