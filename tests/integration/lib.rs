//! Shared harness for Keyshelf integration tests.

use std::net::SocketAddr;
use std::sync::Arc;

use keyshelf_server::{ApiKey, Server, ServerConfig};
use keyshelf_store::{CredentialStore, MemoryBackend};
use tokio::net::TcpListener;

/// A server running on an ephemeral loopback port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub api_key: String,
    pub store: CredentialStore,
    pub backend: Arc<MemoryBackend>,
}

impl TestServer {
    /// Start a server over an in-memory backend with the given API key.
    pub async fn start(api_key: &str) -> Self {
        let backend = Arc::new(MemoryBackend::new());
        let store = CredentialStore::new(backend.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral port");
        let addr = listener.local_addr().expect("local addr");

        let config = ServerConfig::new(
            addr.ip().to_string(),
            addr.port(),
            ApiKey::resolve_from(Some(api_key.to_string()), None),
        );
        let server = Server::new(config, store.clone());
        tokio::spawn(async move {
            let _ = server.serve(listener).await;
        });

        Self {
            addr,
            api_key: api_key.to_string(),
            store,
            backend,
        }
    }

    /// Absolute URL for `path`.
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Value for the `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.api_key)
    }
}
