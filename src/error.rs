//! Error types for the compiler host
//!
//! Provides unified error handling using thiserror. Cache lookups and
//! insertions never fail; errors only come from construction and from
//! malformed host requests.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Driver Error Enum ==
/// Unified error type for the cache and host driver.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DriverError {
    /// Cache was configured with a capacity that cannot hold any entry
    #[error("Invalid cache capacity: {0} (must be at least 1)")]
    InvalidCapacity(usize),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for DriverError {
    fn into_response(self) -> Response {
        let status = match &self {
            DriverError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            DriverError::InvalidCapacity(_) | DriverError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the compiler host.
pub type Result<T> = std::result::Result<T, DriverError>;
