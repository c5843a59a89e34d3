//! Service configuration.

use std::path::PathBuf;

/// Service configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// SQLite database file
    pub database_path: PathBuf,
    /// Request body read timeout in milliseconds
    pub request_timeout_ms: u64,
    /// Page size used when a listing request has no `limit`
    pub default_page_limit: u32,
    /// Upper bound applied to a requested `limit`
    pub max_page_limit: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("./storefront.db"),
            request_timeout_ms: 5000, // 5 seconds default
            default_page_limit: 100,
            max_page_limit: 1000,
        }
    }
}
