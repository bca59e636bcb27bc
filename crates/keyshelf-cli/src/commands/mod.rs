//! CLI command implementations.

pub mod get;
pub mod list;
pub mod serve;
pub mod store;
pub mod store_file;
