//! Storage backend abstraction.

use async_trait::async_trait;
use keyshelf_core::SecretString;

use crate::error::Result;

/// A place credentials can be read from and written to.
///
/// Entries are addressed by `(service, account)`. Backends see only names
/// that already passed the allow-list check.
#[async_trait]
pub trait SecretBackend: Send + Sync {
    /// Short backend name for logs.
    fn name(&self) -> &'static str;

    /// Read an entry. `Ok(None)` means no entry exists.
    async fn read(&self, service: &str, account: &str) -> Result<Option<SecretString>>;

    /// Create or overwrite an entry.
    async fn write(&self, service: &str, account: &str, value: &SecretString) -> Result<()>;
}
