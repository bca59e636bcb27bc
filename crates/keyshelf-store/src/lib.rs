//! Credential store adapter for Keyshelf.
//!
//! [`CredentialStore`] enforces the credential allow-list and exposes
//! get/set/list over a pluggable [`SecretBackend`]. The production backend
//! is the operating system's credential store ([`KeychainBackend`]).

pub mod backend;
pub mod error;
pub mod keychain;
pub mod memory;
pub mod store;

pub use backend::SecretBackend;
pub use error::{Result, StoreError};
pub use keychain::KeychainBackend;
pub use memory::MemoryBackend;
pub use store::CredentialStore;
