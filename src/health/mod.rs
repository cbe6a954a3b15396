//! Liveness endpoint.
//!
//! Answers `/health` locally, for any method, without touching either
//! upstream: it verifies only that the proxy process is alive and
//! accepting connections. Probes keep succeeding while both backends are
//! down.

use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body returned by the liveness endpoint. Created fresh per request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    fn now() -> Self {
        Self {
            status: "OK".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Handler for `/health`.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::now())
}
