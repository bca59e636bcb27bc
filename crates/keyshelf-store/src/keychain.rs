//! OS credential store backend.
//!
//! Uses the platform store through the `keyring` crate:
//! - macOS: Keychain (Security.framework)
//! - Windows: Credential Manager
//! - Linux: Secret Service, fronted by a kernel keyutils cache
//!
//! Every call may block on an OS authentication prompt, so the keyring calls
//! run on Tokio's blocking pool. A denied prompt surfaces as
//! [`StoreError::StoreUnavailable`]; nothing is retried.

use async_trait::async_trait;
use keyshelf_core::SecretString;
use tracing::debug;

use crate::backend::SecretBackend;
use crate::error::{Result, StoreError};

/// Backend that talks to the operating system's credential store.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeychainBackend;

impl KeychainBackend {
    /// Create a new keychain backend.
    pub fn new() -> Self {
        Self
    }
}

fn entry(service: &str, account: &str) -> Result<keyring::Entry> {
    keyring::Entry::new(service, account).map_err(|e| {
        StoreError::StoreUnavailable(format!("cannot open entry {service}/{account}: {e}"))
    })
}

fn read_blocking(service: &str, account: &str) -> Result<Option<SecretString>> {
    match entry(service, account)?.get_password() {
        Ok(value) => Ok(Some(SecretString::new(value))),
        Err(keyring::Error::NoEntry) => Ok(None),
        Err(e) => Err(StoreError::StoreUnavailable(format!(
            "keychain read failed for {account}: {e}"
        ))),
    }
}

fn write_blocking(service: &str, account: &str, value: &SecretString) -> Result<()> {
    entry(service, account)?
        .set_password(value.expose_secret())
        .map_err(|e| {
            StoreError::StoreUnavailable(format!("keychain write failed for {account}: {e}"))
        })
}

#[async_trait]
impl SecretBackend for KeychainBackend {
    fn name(&self) -> &'static str {
        "keychain"
    }

    async fn read(&self, service: &str, account: &str) -> Result<Option<SecretString>> {
        let (service, account) = (service.to_string(), account.to_string());
        debug!(%service, %account, "reading from OS credential store");
        tokio::task::spawn_blocking(move || read_blocking(&service, &account))
            .await
            .map_err(|e| StoreError::StoreUnavailable(format!("keychain task failed: {e}")))?
    }

    async fn write(&self, service: &str, account: &str, value: &SecretString) -> Result<()> {
        let (service, account, value) =
            (service.to_string(), account.to_string(), value.clone());
        debug!(%service, %account, "writing to OS credential store");
        tokio::task::spawn_blocking(move || write_blocking(&service, &account, &value))
            .await
            .map_err(|e| StoreError::StoreUnavailable(format!("keychain task failed: {e}")))?
    }
}
