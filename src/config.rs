//! Application configuration, layered from defaults, an optional config
//! file, and `BOTBOARD_*` environment variables.

use anyhow::{Context, Result};
use backfill::BackfillConfig;
use serde::{Deserialize, Serialize};
use store::StoreConfig;
use warehouse::WarehouseConfig;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub warehouse: WarehouseConfig,

    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub backfill: BackfillConfig,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            warehouse: WarehouseConfig::default(),
            store: StoreConfig::default(),
            backfill: BackfillConfig::default(),
        }
    }
}

/// Load configuration from files and environment.
///
/// Warehouse credentials are validated where the warehouse client is built,
/// not here: the serve binary never talks to the warehouse and must start
/// without one.
pub fn load_config() -> Result<Config> {
    let config = config::Config::builder()
        // Start with defaults
        .add_source(config::Config::try_from(&Config::default())?)
        // Load from config file if exists
        .add_source(
            config::File::with_name("config/default")
                .required(false)
                .format(config::FileFormat::Toml),
        )
        // Override with environment variables
        .add_source(
            config::Environment::default()
                .separator("__")
                .prefix("BOTBOARD")
                .try_parsing(true),
        )
        .build()
        .context("Failed to build configuration")?;

    let mut config: Config = config
        .try_deserialize()
        .context("Failed to deserialize configuration")?;

    // Manual overrides for nested config from environment
    // The config crate's nested parsing doesn't work reliably with
    // underscored field names
    if let Ok(url) = std::env::var("BOTBOARD_WAREHOUSE_URL") {
        config.warehouse.url = url;
    }
    if let Ok(database) = std::env::var("BOTBOARD_WAREHOUSE_DATABASE") {
        config.warehouse.database = database;
    }
    if let Ok(username) = std::env::var("BOTBOARD_WAREHOUSE_USERNAME") {
        config.warehouse.username = Some(username);
    }
    if let Ok(password) = std::env::var("BOTBOARD_WAREHOUSE_PASSWORD") {
        config.warehouse.password = Some(password);
    }
    if let Ok(path) = std::env::var("BOTBOARD_STORE_PATH") {
        config.store.path = path.into();
    }
    if let Ok(days) = std::env::var("BOTBOARD_BACKFILL_LOOKBACK_DAYS") {
        config.backfill.lookback_days = days
            .parse()
            .context("BOTBOARD_BACKFILL_LOOKBACK_DAYS must be a non-negative integer")?;
    }
    if let Ok(location) = std::env::var("BOTBOARD_BACKFILL_LOCATION") {
        config.backfill.location = location;
    }

    Ok(config)
}
