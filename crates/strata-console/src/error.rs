//! Error types for the console crate.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Errors that can occur while building or serving the console.
///
/// Backend failures during capability discovery never show up here; the
/// probe converts them into a [`CapabilityState`](crate::CapabilityState).
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// Failed to start the server.
    #[error("failed to start console: {0}")]
    StartupFailed(String),

    /// Shell construction options are unusable.
    #[error("invalid console configuration: {0}")]
    InvalidConfig(String),

    /// Invalid request.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl IntoResponse for ConsoleError {
    fn into_response(self) -> Response {
        let status = match &self {
            ConsoleError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, self.to_string()).into_response()
    }
}
