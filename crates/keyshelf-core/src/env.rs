//! Environment variable handling.

use std::env;

/// Well-known environment variable names.
pub mod vars {
    /// API key for the HTTP server.
    pub const API_KEY: &str = "KEYSHELF_API_KEY";
    /// Bind host for the HTTP server.
    pub const HOST: &str = "KEYSHELF_HOST";
    /// Bind port for the HTTP server.
    pub const PORT: &str = "KEYSHELF_PORT";
    /// Store backend (`keychain` or `memory`).
    pub const BACKEND: &str = "KEYSHELF_BACKEND";
    /// Path to the config file.
    pub const CONFIG: &str = "KEYSHELF_CONFIG";
}

/// Get an environment variable, returning None if not set or empty.
pub fn get_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

/// Get an environment variable as a u16 (e.g., for ports).
pub fn get_u16(name: &str) -> Option<u16> {
    get_var(name).and_then(|v| v.parse().ok())
}
