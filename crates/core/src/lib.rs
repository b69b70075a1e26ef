//! Core types for the botboard pipeline: the snapshot record, calendar
//! helpers, and the unified error type shared by every crate.

pub mod dates;
pub mod error;
pub mod snapshot;

pub use dates::{days_inclusive, parse_date, to_unix_seconds, window_start, DATE_FORMAT};
pub use error::{Error, Result};
pub use snapshot::Snapshot;
