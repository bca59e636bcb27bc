//! # keyshelf-core
//!
//! Shared building blocks for Keyshelf:
//!
//! - **Credentials**: the fixed allow-list of credential names and the
//!   service namespace they are filed under
//! - **Masking**: the display rule for sensitive values
//! - **Configuration**: the optional JSON5 config file and its defaults
//! - **Utilities**: path resolution, environment handling, secret strings

pub mod config;
pub mod credential;
pub mod env;
pub mod error;
pub mod mask;
pub mod paths;
pub mod secret;

// Re-exports for convenience
pub use config::{BackendKind, Config, ServerSettings};
pub use credential::{CredentialName, UnknownCredential, SERVICE_NAME};
pub use error::ConfigError;
pub use mask::mask_value;
pub use secret::SecretString;
