//! Error types for credential store operations.

use keyshelf_core::{CredentialName, UnknownCredential};
use thiserror::Error;

/// Errors that can occur during credential store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Unknown key: {0} (available keys: {available})", available = CredentialName::available())]
    InvalidName(String),

    #[error("No value found for key: {0}")]
    NotFound(String),

    #[error("Credential store unavailable: {0}")]
    StoreUnavailable(String),
}

impl From<UnknownCredential> for StoreError {
    fn from(err: UnknownCredential) -> Self {
        Self::InvalidName(err.0)
    }
}

/// Convenience result alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
