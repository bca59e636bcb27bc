//! The credential store adapter.
//!
//! [`CredentialStore`] is what the CLI and the HTTP server talk to. It checks
//! every name against the allow-list before the backend is touched and files
//! all entries under a single service namespace.

use std::collections::BTreeSet;
use std::sync::Arc;

use keyshelf_core::{CredentialName, SecretString, SERVICE_NAME};
use tracing::debug;

use crate::backend::SecretBackend;
use crate::error::{Result, StoreError};
use crate::keychain::KeychainBackend;

/// Allow-listed get/set/list over a [`SecretBackend`].
#[derive(Clone)]
pub struct CredentialStore {
    service: String,
    backend: Arc<dyn SecretBackend>,
}

impl CredentialStore {
    /// Create a store over `backend` using the default service namespace.
    pub fn new(backend: Arc<dyn SecretBackend>) -> Self {
        Self::with_service(SERVICE_NAME, backend)
    }

    /// Create a store over `backend` filing entries under `service`.
    pub fn with_service(service: impl Into<String>, backend: Arc<dyn SecretBackend>) -> Self {
        Self {
            service: service.into(),
            backend,
        }
    }

    /// Create a store backed by the operating system's credential store.
    pub fn keychain() -> Self {
        Self::new(Arc::new(KeychainBackend::new()))
    }

    /// The service namespace entries are filed under.
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Name of the underlying backend.
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Retrieve the value stored under `name`.
    pub async fn get(&self, name: &str) -> Result<SecretString> {
        let name: CredentialName = name.parse()?;
        self.get_credential(name).await
    }

    /// Retrieve the value stored under an already-validated name.
    pub async fn get_credential(&self, name: CredentialName) -> Result<SecretString> {
        debug!(%name, service = %self.service, "get credential");
        self.backend
            .read(&self.service, name.as_str())
            .await?
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }

    /// Create or overwrite the value stored under `name`.
    pub async fn set(&self, name: &str, value: &str) -> Result<()> {
        let name: CredentialName = name.parse()?;
        self.set_credential(name, &SecretString::new(value)).await
    }

    /// Create or overwrite the value stored under an already-validated name.
    pub async fn set_credential(&self, name: CredentialName, value: &SecretString) -> Result<()> {
        debug!(%name, service = %self.service, "set credential");
        self.backend.write(&self.service, name.as_str(), value).await
    }

    /// Names from the allow-list that currently have a stored value.
    pub async fn list_keys(&self) -> Result<BTreeSet<CredentialName>> {
        Ok(self
            .entries()
            .await?
            .into_iter()
            .map(|(name, _)| name)
            .collect())
    }

    /// Every stored credential with its value, in canonical order.
    pub async fn entries(&self) -> Result<Vec<(CredentialName, SecretString)>> {
        let mut entries = Vec::new();
        for name in CredentialName::ALL {
            if let Some(value) = self.backend.read(&self.service, name.as_str()).await? {
                entries.push((name, value));
            }
        }
        debug!(count = entries.len(), service = %self.service, "listed credentials");
        Ok(entries)
    }
}
