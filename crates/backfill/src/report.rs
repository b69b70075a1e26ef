//! Per-day outcomes of a backfill run.

use chrono::NaiveDate;

/// What happened to a single day of the range.
#[derive(Debug, Clone, PartialEq)]
pub enum DayOutcome {
    /// Snapshots were written for this day.
    Completed { snapshots: usize },
    /// The breakdown query returned zero rows; nothing was written.
    Empty,
    /// The day failed; the run continued with the next day.
    Failed { error: String },
}

/// One day and its outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct DayResult {
    pub day: NaiveDate,
    pub outcome: DayOutcome,
}

/// Outcome report of a whole run, one entry per attempted day.
#[derive(Debug, Clone, Default)]
pub struct BackfillReport {
    pub days: Vec<DayResult>,
}

impl BackfillReport {
    pub fn attempted(&self) -> usize {
        self.days.len()
    }

    pub fn completed(&self) -> usize {
        self.days
            .iter()
            .filter(|d| matches!(d.outcome, DayOutcome::Completed { .. }))
            .count()
    }

    pub fn empty(&self) -> usize {
        self.days
            .iter()
            .filter(|d| d.outcome == DayOutcome::Empty)
            .count()
    }

    pub fn failed(&self) -> usize {
        self.days
            .iter()
            .filter(|d| matches!(d.outcome, DayOutcome::Failed { .. }))
            .count()
    }

    /// True when no day failed (empty days are still clean).
    pub fn is_clean(&self) -> bool {
        self.failed() == 0
    }
}
