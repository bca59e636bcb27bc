//! Server error types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use keyshelf_store::StoreError;
use thiserror::Error;
use tracing::error;

/// Errors that can occur while starting or running the server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// I/O error (bind, accept).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors returned to HTTP clients.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or mismatched bearer token.
    #[error("{0}")]
    Unauthorized(String),

    /// Malformed request payload.
    #[error("{0}")]
    BadRequest(String),

    /// Credential name not on the allow-list.
    #[error("Unknown key: {0}")]
    InvalidName(String),

    /// No value stored for the credential.
    #[error("No value found for key: {0}")]
    NotFound(String),

    /// Unknown route.
    #[error("Unknown endpoint")]
    UnknownEndpoint,

    /// The credential store failed.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) | Self::InvalidName(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) | Self::UnknownEndpoint => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::InvalidName(name) => Self::InvalidName(name),
            StoreError::NotFound(name) => Self::NotFound(name),
            StoreError::StoreUnavailable(msg) => {
                error!("credential store failure: {msg}");
                Self::Internal(format!("Credential store unavailable: {msg}"))
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (self.status(), body).into_response()
    }
}
