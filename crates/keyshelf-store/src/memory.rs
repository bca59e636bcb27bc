//! In-process backend.
//!
//! Nothing survives the process. Useful for tests and for trying the CLI or
//! server without touching the real credential store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use keyshelf_core::SecretString;
use parking_lot::RwLock;

use crate::backend::SecretBackend;
use crate::error::{Result, StoreError};

/// A map-backed [`SecretBackend`].
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: RwLock<HashMap<(String, String), SecretString>>,
    accesses: AtomicU64,
    unavailable: bool,
}

impl MemoryBackend {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend that fails every call with
    /// [`StoreError::StoreUnavailable`], like a store whose access prompt
    /// was declined.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    /// Number of read/write calls that reached this backend.
    pub fn access_count(&self) -> u64 {
        self.accesses.load(Ordering::Relaxed)
    }

    fn touch(&self) -> Result<()> {
        self.accesses.fetch_add(1, Ordering::Relaxed);
        if self.unavailable {
            return Err(StoreError::StoreUnavailable(
                "access denied by credential store".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl SecretBackend for MemoryBackend {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn read(&self, service: &str, account: &str) -> Result<Option<SecretString>> {
        self.touch()?;
        let key = (service.to_string(), account.to_string());
        Ok(self.entries.read().get(&key).cloned())
    }

    async fn write(&self, service: &str, account: &str, value: &SecretString) -> Result<()> {
        self.touch()?;
        let key = (service.to_string(), account.to_string());
        self.entries.write().insert(key, value.clone());
        Ok(())
    }
}
