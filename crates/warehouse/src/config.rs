//! Warehouse client configuration.

use board_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Warehouse client configuration.
///
/// The URL has no usable default: it identifies the event warehouse the
/// pipeline bills queries against, so a missing value is a fatal
/// configuration error rather than something to guess at.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WarehouseConfig {
    /// Warehouse HTTP URL
    #[serde(default)]
    pub url: String,
    /// Database holding the event archive
    #[serde(default = "default_database")]
    pub database: String,
    /// Username (optional)
    pub username: Option<String>,
    /// Password (optional)
    pub password: Option<String>,
    /// HTTP transport timeout in seconds. Analytical queries over the full
    /// event archive routinely run for minutes.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_database() -> String {
    "gharchive".to_string()
}

fn default_timeout_secs() -> u64 {
    600
}

impl Default for WarehouseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            database: default_database(),
            username: None,
            password: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl WarehouseConfig {
    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(Error::config(
                "warehouse URL is required (set BOTBOARD_WAREHOUSE_URL)",
            ));
        }
        Ok(())
    }
}
