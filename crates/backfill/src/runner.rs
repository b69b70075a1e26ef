//! The backfill runner: a fold over the date range with per-day failure
//! isolation.

use crate::report::{BackfillReport, DayOutcome, DayResult};
use board_core::{dates, Result, Snapshot};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use store::SnapshotStore;
use tracing::{error, info};
use warehouse::{
    fetch_active_repo_count, fetch_tool_breakdown, Warehouse, DEFAULT_LOOKBACK_DAYS,
};

/// Backfill configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackfillConfig {
    /// Trailing days included when computing "active" status
    #[serde(default = "default_lookback_days")]
    pub lookback_days: u32,
    /// Location/region tag forwarded to the warehouse with every query
    #[serde(default = "default_location")]
    pub location: String,
}

fn default_lookback_days() -> u32 {
    DEFAULT_LOOKBACK_DAYS
}

fn default_location() -> String {
    "US".to_string()
}

impl Default for BackfillConfig {
    fn default() -> Self {
        Self {
            lookback_days: default_lookback_days(),
            location: default_location(),
        }
    }
}

/// Recomputes snapshots for a date range, one day at a time.
///
/// The warehouse and store are injected so tests can substitute fakes.
/// Days run strictly sequentially: the two queries behind a day must agree
/// on the lookback window, and the warehouse bills per query, so nothing
/// here runs concurrently.
pub struct BackfillRunner {
    warehouse: Arc<dyn Warehouse>,
    store: Arc<SnapshotStore>,
    config: BackfillConfig,
}

impl BackfillRunner {
    pub fn new(
        warehouse: Arc<dyn Warehouse>,
        store: Arc<SnapshotStore>,
        config: BackfillConfig,
    ) -> Self {
        Self {
            warehouse,
            store,
            config,
        }
    }

    /// Run the backfill for every day from `start` to `end` inclusive.
    ///
    /// A failing day is logged and recorded in the report; it never aborts
    /// the rest of the range. The only error this returns is an inverted
    /// range, which is rejected before any work begins.
    pub async fn run(&self, start: NaiveDate, end: NaiveDate) -> Result<BackfillReport> {
        let days = dates::days_inclusive(start, end)?;

        info!(
            start = %start,
            end = %end,
            lookback_days = self.config.lookback_days,
            "Starting backfill"
        );

        let mut report = BackfillReport::default();
        for day in days {
            let outcome = match self.run_day(day).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!(day = %day, error = %e, "Backfill day failed");
                    DayOutcome::Failed {
                        error: e.to_string(),
                    }
                }
            };

            match &outcome {
                DayOutcome::Completed { snapshots } => {
                    info!(day = %day, snapshots = snapshots, "Completed day");
                }
                DayOutcome::Empty => {
                    info!(day = %day, "No data returned for day, skipping");
                }
                DayOutcome::Failed { .. } => {}
            }

            report.days.push(DayResult { day, outcome });
        }

        info!(
            attempted = report.attempted(),
            completed = report.completed(),
            empty = report.empty(),
            failed = report.failed(),
            "Backfill completed"
        );

        Ok(report)
    }

    /// Process one day: breakdown query, denominator query, snapshot upserts.
    async fn run_day(&self, day: NaiveDate) -> Result<DayOutcome> {
        let usage = fetch_tool_breakdown(
            self.warehouse.as_ref(),
            &self.config.location,
            day,
            self.config.lookback_days,
        )
        .await?;

        if usage.is_empty() {
            return Ok(DayOutcome::Empty);
        }

        // Same window as the breakdown query, so every tool row of this day
        // shares one denominator.
        let window_start = dates::window_start(day, self.config.lookback_days);
        let total_active_repos = fetch_active_repo_count(
            self.warehouse.as_ref(),
            &self.config.location,
            window_start,
            day,
        )
        .await?;

        let mut written = 0;
        for tool in usage {
            let snapshot = Snapshot {
                date: day,
                tool: tool.tool,
                repo_count: tool.repo_count,
                pct_of_active_repos: tool.pct_of_active_repos,
                total_active_repos,
            };
            self.store.upsert(&snapshot)?;
            written += 1;
        }

        Ok(DayOutcome::Completed { snapshots: written })
    }
}
