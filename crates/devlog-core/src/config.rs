//! Client Configuration
//!
//! Defaults for the backend URL and the names of the persisted
//! key-value slots. The browser build uses [`ClientConfig::default`];
//! native embedders and tests override individual fields.
//!
//! ```rust
//! use devlog_core::config::ClientConfig;
//!
//! let config = ClientConfig::default().with_default_base_url("http://127.0.0.1:9000");
//! assert_eq!(config.token_key, "devlog_token");
//! ```

use serde::{Deserialize, Serialize};

/// Backend URL used when nothing has been persisted yet
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Storage key holding the backend base URL
pub const BASE_URL_KEY: &str = "devlog_base";

/// Storage key holding the bearer token
pub const TOKEN_KEY: &str = "devlog_token";

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub default_base_url: String,
    pub base_url_key: String,
    pub token_key: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            default_base_url: DEFAULT_BASE_URL.to_string(),
            base_url_key: BASE_URL_KEY.to_string(),
            token_key: TOKEN_KEY.to_string(),
        }
    }
}

impl ClientConfig {
    /// Override the fallback backend URL
    pub fn with_default_base_url(mut self, url: impl Into<String>) -> Self {
        self.default_base_url = url.into();
        self
    }

    /// Override the storage key names (useful to run two clients side by side)
    pub fn with_keys(mut self, base_url_key: impl Into<String>, token_key: impl Into<String>) -> Self {
        self.base_url_key = base_url_key.into();
        self.token_key = token_key.into();
        self
    }
}
