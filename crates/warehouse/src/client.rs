//! The warehouse client boundary and its ClickHouse HTTP adapter.

use crate::config::WarehouseConfig;
use crate::row::WarehouseRow;
use async_trait::async_trait;
use board_core::{Error, Result};
use std::time::Duration;
use tracing::{debug, info};

/// Executes analytical queries against a columnar event store.
///
/// Implementations must surface execution errors as `Err`; a query that
/// succeeds with no rows returns `Ok(vec![])`.
#[async_trait]
pub trait Warehouse: Send + Sync {
    /// Execute `sql` in the given location/region, returning map-shaped rows.
    async fn execute(&self, sql: &str, location: &str) -> Result<Vec<WarehouseRow>>;
}

/// Warehouse adapter speaking the ClickHouse HTTP interface.
///
/// Queries are POSTed with `FORMAT JSONEachRow` appended so results come
/// back one JSON object per line, which maps directly onto the boundary's
/// dynamically shaped rows.
pub struct ClickHouseWarehouse {
    http: reqwest::Client,
    config: WarehouseConfig,
}

impl ClickHouseWarehouse {
    pub fn new(config: WarehouseConfig) -> Result<Self> {
        config.validate()?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::config(format!("failed to build HTTP client: {}", e)))?;

        info!(
            url = %config.url,
            database = %config.database,
            "Created warehouse client"
        );

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &WarehouseConfig {
        &self.config
    }
}

#[async_trait]
impl Warehouse for ClickHouseWarehouse {
    async fn execute(&self, sql: &str, location: &str) -> Result<Vec<WarehouseRow>> {
        let query = format!(
            "{} FORMAT JSONEachRow",
            sql.trim_end().trim_end_matches(';')
        );

        debug!(location = location, bytes = query.len(), "Executing warehouse query");

        let mut request = self
            .http
            .post(self.config.url.as_str())
            .query(&[("database", self.config.database.as_str())])
            .body(query);

        if let Some(ref user) = self.config.username {
            request = request.header("X-ClickHouse-User", user.as_str());
        }
        if let Some(ref pass) = self.config.password {
            request = request.header("X-ClickHouse-Key", pass.as_str());
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::warehouse(format!("transport error: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::warehouse(format!("failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(Error::warehouse(format!(
                "query failed with {}: {}",
                status,
                body.trim()
            )));
        }

        let mut rows = Vec::new();
        for line in body.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let json: serde_json::Value = serde_json::from_str(line)
                .map_err(|e| Error::warehouse(format!("malformed result line: {}", e)))?;
            rows.push(WarehouseRow::from_json(json)?);
        }

        debug!(rows = rows.len(), "Warehouse query returned");
        Ok(rows)
    }
}
