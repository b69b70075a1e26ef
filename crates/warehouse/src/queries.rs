//! The two analytical queries behind every snapshot day.
//!
//! Both templates filter on the same inclusive `toDate(created_at)` bounds
//! so the per-tool counts and the active-repository denominator always
//! observe an identical lookback window.

use crate::client::Warehouse;
use crate::row::WarehouseRow;
use crate::template::QueryTemplate;
use board_core::{dates, Result};
use chrono::NaiveDate;
use tracing::debug;

/// Trailing days included when computing "active" status for a target date.
pub const DEFAULT_LOOKBACK_DAYS: u32 = 7;

/// Per-tool breakdown: distinct repositories where each review bot commented
/// on a pull request within the window, plus its share of all repositories
/// with PR activity.
const TOOL_BREAKDOWN_SQL: &str = r#"
WITH bot_review_activity AS (
    SELECT DISTINCT
        actor_login AS tool,
        repo_name
    FROM events
    WHERE event_type IN ('PullRequestReviewEvent', 'PullRequestReviewCommentEvent')
      AND actor_login LIKE '%[bot]'
      AND toDate(created_at) >= toDate('{start_date}')
      AND toDate(created_at) <= toDate('{target_date}')
),
pr_active AS (
    SELECT uniqExact(repo_name) AS total
    FROM events
    WHERE event_type = 'PullRequestEvent'
      AND toDate(created_at) >= toDate('{start_date}')
      AND toDate(created_at) <= toDate('{target_date}')
)
SELECT
    tool,
    uniqExact(repo_name) AS repo_count,
    round(uniqExact(repo_name) * 100 / greatest((SELECT total FROM pr_active), 1), 2) AS pct_of_active_repos
FROM bot_review_activity
GROUP BY tool
ORDER BY repo_count DESC
"#;

/// Denominator: distinct repositories with at least one pull-request event
/// in the window.
const ACTIVE_REPO_COUNT_SQL: &str = r#"
SELECT uniqExact(repo_name) AS total_active_repos
FROM events
WHERE event_type = 'PullRequestEvent'
  AND toDate(created_at) >= toDate('{start_date}')
  AND toDate(created_at) <= toDate('{end_date}')
"#;

/// Build the per-tool breakdown query for the window ending on `target`.
pub fn tool_breakdown_query(target: NaiveDate, lookback_days: u32) -> Result<String> {
    let start = dates::window_start(target, lookback_days);
    QueryTemplate::new(TOOL_BREAKDOWN_SQL).render(&[
        ("start_date", &start.to_string()),
        ("target_date", &target.to_string()),
    ])
}

/// Build the active-repository denominator query for `[start, end]`.
pub fn active_repo_count_query(start: NaiveDate, end: NaiveDate) -> Result<String> {
    QueryTemplate::new(ACTIVE_REPO_COUNT_SQL).render(&[
        ("start_date", &start.to_string()),
        ("end_date", &end.to_string()),
    ])
}

/// One row of the per-tool breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolUsage {
    pub tool: String,
    pub repo_count: u64,
    pub pct_of_active_repos: f64,
}

impl ToolUsage {
    pub fn from_row(row: &WarehouseRow) -> Result<Self> {
        Ok(Self {
            tool: row.require_str("tool")?.to_string(),
            repo_count: row.require_u64("repo_count")?,
            pct_of_active_repos: row.require_f64("pct_of_active_repos")?,
        })
    }
}

/// Execute the breakdown query for the window ending on `target`.
pub async fn fetch_tool_breakdown(
    warehouse: &dyn Warehouse,
    location: &str,
    target: NaiveDate,
    lookback_days: u32,
) -> Result<Vec<ToolUsage>> {
    let sql = tool_breakdown_query(target, lookback_days)?;
    let rows = warehouse.execute(&sql, location).await?;
    rows.iter().map(ToolUsage::from_row).collect()
}

/// Execute the denominator query for `[start, end]`.
///
/// A window with no qualifying events yields 0, not an error.
pub async fn fetch_active_repo_count(
    warehouse: &dyn Warehouse,
    location: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<u64> {
    let sql = active_repo_count_query(start, end)?;
    let rows = warehouse.execute(&sql, location).await?;

    match rows.first() {
        Some(row) => row.require_u64("total_active_repos"),
        None => {
            debug!(%start, %end, "Denominator query returned no rows, using 0");
            Ok(0)
        }
    }
}
