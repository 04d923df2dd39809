//! HTTP DTOs exchanged with the REST collaborator.

use serde::{Deserialize, Serialize};

/// Body of the session lookup endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUserDto {
    #[serde(default)]
    pub nickname: Option<String>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthDto {
    pub status: String,
}
