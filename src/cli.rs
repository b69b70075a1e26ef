//! Argument grammar of the backfill binary.
//!
//! Three forms: no arguments (the last week through today), a single
//! integer (that many days back through today), or an explicit
//! `start end` pair of `YYYY-MM-DD` dates. Anything else is a usage error
//! the binary exits on immediately.

use board_core::{dates, window_start};
use chrono::NaiveDate;

pub const USAGE: &str =
    "Usage: botboard-backfill [days_back] | botboard-backfill <start_date> <end_date> (dates as YYYY-MM-DD)";

/// Default span covered when invoked with no arguments.
const DEFAULT_DAYS_BACK: u32 = 7;

/// Upper bound on `days_back`. The event archive only reaches back to 2011,
/// so anything past this is an operator typo, not a real backfill.
const MAX_DAYS_BACK: u32 = 10_000;

/// Resolve CLI arguments into an inclusive backfill range.
pub fn parse_range(args: &[String], today: NaiveDate) -> Result<(NaiveDate, NaiveDate), String> {
    match args {
        [] => Ok((window_start(today, DEFAULT_DAYS_BACK), today)),
        [days_back] => {
            let days: u32 = days_back
                .parse()
                .map_err(|_| format!("Invalid days_back '{}'\n{}", days_back, USAGE))?;
            if days > MAX_DAYS_BACK {
                return Err(format!(
                    "days_back {} exceeds the maximum of {}\n{}",
                    days, MAX_DAYS_BACK, USAGE
                ));
            }
            Ok((window_start(today, days), today))
        }
        [start, end] => {
            let start = dates::parse_date(start)
                .map_err(|_| format!("Invalid date format. Use YYYY-MM-DD\n{}", USAGE))?;
            let end = dates::parse_date(end)
                .map_err(|_| format!("Invalid date format. Use YYYY-MM-DD\n{}", USAGE))?;
            if end < start {
                return Err(format!(
                    "End date {} precedes start date {}\n{}",
                    end, start, USAGE
                ));
            }
            Ok((start, end))
        }
        _ => Err(USAGE.to_string()),
    }
}
