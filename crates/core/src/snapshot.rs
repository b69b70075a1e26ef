//! The stored measurement record: one row per (date, tool).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One measurement of a review bot's footprint on a given day.
///
/// `total_active_repos` is the denominator shared by every tool row of the
/// same date. `pct_of_active_repos` is stored as computed by the breakdown
/// query rather than derived at read time, so historical rows stay stable
/// if the query definition drifts. `repo_count <= total_active_repos` is
/// expected but not enforced at write time; readers must tolerate drift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// The day being measured (end of the lookback window).
    pub date: NaiveDate,
    /// Bot/tool identifier, e.g. "coderabbitai[bot]". Unique per date.
    pub tool: String,
    /// Distinct repositories where the tool was active in the window.
    pub repo_count: u64,
    /// `repo_count / total_active_repos * 100`, as the query computed it.
    pub pct_of_active_repos: f64,
    /// Distinct repositories with qualifying PR activity in the window.
    pub total_active_repos: u64,
}
