//! HTTP API endpoint handlers.

use axum::Json;

use crate::infrastructure::dto::http::HealthDto;

/// Health check endpoint
pub async fn health_check() -> Json<HealthDto> {
    Json(HealthDto {
        status: "ok".to_string(),
    })
}
