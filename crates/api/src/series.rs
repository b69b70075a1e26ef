//! Reassembling stored snapshots into a chartable time series.

use board_core::{dates, Snapshot};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// The wire shape the chart consumes: parallel sequences, one slot per
/// distinct date, ascending.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardSeries {
    /// Unix epoch seconds at midnight UTC, one per distinct date, ascending
    pub timestamps: Vec<i64>,
    /// `total_active_repos` per date, parallel to `timestamps`
    pub active_repos: Vec<u64>,
    /// Tool name → repo_count per date, 0 where the tool has no snapshot
    pub tools: BTreeMap<String, Vec<u64>>,
}

impl LeaderboardSeries {
    /// The degraded response: same shape, all sequences empty.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build the series from an unordered batch of snapshots.
    pub fn from_snapshots(snapshots: &[Snapshot]) -> Self {
        let dates: BTreeSet<NaiveDate> = snapshots.iter().map(|s| s.date).collect();
        let date_index: BTreeMap<NaiveDate, usize> =
            dates.iter().enumerate().map(|(i, d)| (*d, i)).collect();

        let mut active_repos = vec![0u64; dates.len()];
        let mut tools: BTreeMap<String, Vec<u64>> = BTreeMap::new();

        for snapshot in snapshots {
            let slot = date_index[&snapshot.date];
            // Every tool row of a date carries the same denominator, so
            // repeated assignment is harmless.
            active_repos[slot] = snapshot.total_active_repos;
            let counts = tools
                .entry(snapshot.tool.clone())
                .or_insert_with(|| vec![0u64; date_index.len()]);
            counts[slot] = snapshot.repo_count;
        }

        Self {
            timestamps: dates.iter().map(|d| dates::to_unix_seconds(*d)).collect(),
            active_repos,
            tools,
        }
    }
}
