//! HTTP API server for Keyshelf.
//!
//! This crate provides:
//! - Bearer-token authentication against a single process-wide API key
//! - `GET /credentials`, `GET /credentials/{name}`, `POST /credentials/{name}`
//! - JSON error bodies for every failure

pub mod auth;
pub mod error;
pub mod handlers;
pub mod server;

pub use auth::{ApiKey, ApiKeySource};
pub use error::{ApiError, ServerError};
pub use server::{AppState, Server, ServerConfig};

/// Result type for server operations.
pub type Result<T> = std::result::Result<T, ServerError>;
