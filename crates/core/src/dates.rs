//! Calendar-day helpers for backfill ranges.

use crate::{Error, Result};
use chrono::{Days, NaiveDate, NaiveTime};

/// Date format used everywhere rows and CLI arguments carry dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .map_err(|e| Error::invalid_date_range(format!("invalid date '{}': {}", s, e)))
}

/// Iterate every day from `start` to `end`, both inclusive.
///
/// Returns an error when `end` precedes `start`; a single-day range
/// (`start == end`) yields exactly one day.
pub fn days_inclusive(start: NaiveDate, end: NaiveDate) -> Result<DayCursor> {
    if end < start {
        return Err(Error::invalid_date_range(format!(
            "end date {} precedes start date {}",
            end, start
        )));
    }
    Ok(DayCursor {
        next: Some(start),
        end,
    })
}

/// Forward-only cursor over an inclusive day range.
#[derive(Debug, Clone)]
pub struct DayCursor {
    next: Option<NaiveDate>,
    end: NaiveDate,
}

impl Iterator for DayCursor {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        let day = self.next?;
        self.next = if day < self.end {
            day.checked_add_days(Days::new(1))
        } else {
            None
        };
        Some(day)
    }
}

/// The first day of the lookback window ending on `target`.
///
/// A lookback of 0 collapses the window to the target day itself.
pub fn window_start(target: NaiveDate, lookback_days: u32) -> NaiveDate {
    target
        .checked_sub_days(Days::new(u64::from(lookback_days)))
        .unwrap_or(NaiveDate::MIN)
}

/// Unix epoch seconds at midnight UTC of the given day.
pub fn to_unix_seconds(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp()
}
