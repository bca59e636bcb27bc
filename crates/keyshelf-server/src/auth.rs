//! API key provisioning and bearer-token authentication.
//!
//! The key is resolved once at startup and never changes:
//! 1. explicit value (command line)
//! 2. `KEYSHELF_API_KEY` environment variable
//! 3. a random 32-byte hex token, valid only for this process

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use keyshelf_core::{env, SecretString};
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::server::AppState;

/// Number of random bytes in a generated key.
const GENERATED_KEY_BYTES: usize = 32;

/// Where the API key came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiKeySource {
    /// Passed on the command line.
    Explicit,
    /// Read from `KEYSHELF_API_KEY`.
    Environment,
    /// Generated at startup; lost when the process exits.
    Generated,
}

/// The single API key clients must present.
#[derive(Debug, Clone)]
pub struct ApiKey {
    key: SecretString,
    source: ApiKeySource,
}

impl ApiKey {
    /// Resolve the key from an optional explicit value, then the environment,
    /// then a freshly generated token.
    pub fn resolve(explicit: Option<String>) -> Self {
        Self::resolve_from(explicit, env::get_var(env::vars::API_KEY))
    }

    /// Resolve the key from explicit and environment values.
    pub fn resolve_from(explicit: Option<String>, from_env: Option<String>) -> Self {
        if let Some(key) = explicit.filter(|k| !k.is_empty()) {
            return Self::new(key, ApiKeySource::Explicit);
        }
        if let Some(key) = from_env.filter(|k| !k.is_empty()) {
            return Self::new(key, ApiKeySource::Environment);
        }
        Self {
            key: SecretString::random_hex(GENERATED_KEY_BYTES),
            source: ApiKeySource::Generated,
        }
    }

    fn new(key: String, source: ApiKeySource) -> Self {
        Self {
            key: SecretString::new(key),
            source,
        }
    }

    /// Where this key came from.
    pub fn source(&self) -> ApiKeySource {
        self.source
    }

    /// Whether the key only lives as long as this process.
    pub fn is_ephemeral(&self) -> bool {
        self.source == ApiKeySource::Generated
    }

    /// The key itself. Only for printing a generated key to the operator.
    pub fn expose(&self) -> &str {
        self.key.expose_secret()
    }

    /// Check a presented token against the key.
    pub fn verify(&self, token: &str) -> bool {
        SecretString::from(token) == self.key
    }
}

/// Extract the bearer token from request headers and verify it.
pub fn authenticate(headers: &HeaderMap, api_key: &ApiKey) -> Result<(), ApiError> {
    let header = headers
        .get("authorization")
        .ok_or_else(|| ApiError::Unauthorized("Missing API key".to_string()))?;

    let token = header
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| ApiError::Unauthorized("Invalid API key".to_string()))?;

    if api_key.verify(token) {
        Ok(())
    } else {
        Err(ApiError::Unauthorized("Invalid API key".to_string()))
    }
}

/// Middleware rejecting every request that lacks a valid bearer token.
pub async fn require_api_key(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if let Err(e) = authenticate(&headers, &state.api_key) {
        warn!(
            method = %request.method(),
            path = %request.uri().path(),
            "rejected request: {e}"
        );
        return Err(e);
    }

    debug!(method = %request.method(), path = %request.uri().path(), "authenticated request");
    Ok(next.run(request).await)
}
