//! Configuration schema.
//!
//! The config file is optional; every field has a default and command-line
//! flags and environment variables take precedence over it.

mod loader;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default bind host for the HTTP server.
pub const DEFAULT_HOST: &str = "localhost";

/// Default bind port for the HTTP server.
pub const DEFAULT_PORT: u16 = 8000;

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerSettings,

    /// Which credential backend to use.
    pub backend: BackendKind,
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Host to bind to.
    pub host: String,

    /// Port to listen on.
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

/// Credential backend selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// The operating system's credential store.
    #[default]
    Keychain,
    /// In-process map, lost on exit.
    Memory,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keychain => f.write_str("keychain"),
            Self::Memory => f.write_str("memory"),
        }
    }
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "keychain" => Ok(Self::Keychain),
            "memory" => Ok(Self::Memory),
            other => Err(format!(
                "unknown backend '{other}' (expected 'keychain' or 'memory')"
            )),
        }
    }
}
