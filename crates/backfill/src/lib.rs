//! Backfill orchestration: iterate a date range, run the breakdown and
//! denominator queries per day, and upsert snapshots with per-day failure
//! isolation.

pub mod report;
pub mod runner;

pub use report::{BackfillReport, DayOutcome, DayResult};
pub use runner::{BackfillConfig, BackfillRunner};
