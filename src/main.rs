//! Botboard backfill binary.
//!
//! Recomputes review-bot adoption snapshots for a date range: per day, one
//! templated breakdown query and one denominator query against the event
//! warehouse, then idempotent upserts into the snapshot store. A failing
//! day is logged and skipped; only configuration or template errors change
//! the exit code.

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::{info, warn};

use backfill::BackfillRunner;
use botboard::{cli, config::load_config};
use store::SnapshotStore;
use warehouse::ClickHouseWarehouse;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    telemetry::init_tracing_from_env();

    info!("Starting botboard backfill v{}", env!("CARGO_PKG_VERSION"));

    let args: Vec<String> = std::env::args().skip(1).collect();
    let today = Utc::now().date_naive();
    let (start, end) = match cli::parse_range(&args, today) {
        Ok(range) => range,
        Err(message) => {
            eprintln!("{}", message);
            std::process::exit(1);
        }
    };

    // Fatal before any work: unreadable config or missing warehouse URL.
    let config = load_config()?;

    let warehouse = Arc::new(
        ClickHouseWarehouse::new(config.warehouse.clone())
            .context("Failed to create warehouse client")?,
    );

    let store = Arc::new(SnapshotStore::open(&config.store)?);
    store.initialize()?;
    info!("Snapshot store initialized");

    let runner = BackfillRunner::new(warehouse, store, config.backfill.clone());
    let report = runner.run(start, end).await?;

    if !report.is_clean() {
        // Per-day failures were already logged with their days; they do not
        // change the exit code.
        warn!(
            failed = report.failed(),
            attempted = report.attempted(),
            "Backfill finished with failed days; rerun those days individually"
        );
    }

    Ok(())
}
