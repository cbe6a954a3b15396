//! Structured error responses for failed forwards.
//!
//! Transport-level upstream failures terminate here: the client gets a
//! JSON body naming the unavailable upstream instead of a connection
//! reset or a hung socket.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::proxy::forwarder::ForwardError;

/// Wire shape of a synthesized proxy error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Short category, e.g. "API v1 service unavailable".
    pub error: String,
    /// Underlying failure detail.
    pub message: String,
}

impl From<&ForwardError> for ErrorBody {
    fn from(err: &ForwardError) -> Self {
        Self {
            error: format!("{} service unavailable", err.upstream()),
            message: err.detail(),
        }
    }
}

/// Render a failed forward as the client-facing 500 response.
pub fn error_response(err: &ForwardError) -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorBody::from(err))).into_response()
}
