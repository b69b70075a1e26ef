//! Unified error types for the botboard pipeline.
//!
//! The taxonomy mirrors how errors are handled:
//! - `Config` and the template errors are fatal at startup.
//! - `Warehouse`, `Store`, and `MissingColumn` are per-day errors that the
//!   backfill runner recovers from.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the botboard pipeline.
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or invalid configuration. Fatal before any work begins.
    #[error("configuration error: {0}")]
    Config(String),

    /// A named placeholder was not found in a query template. Raised at
    /// construction time, before any warehouse call.
    #[error("template placeholder not found: {{{0}}}")]
    MissingPlaceholder(String),

    /// Placeholders remained unresolved after rendering a template.
    #[error("template has unresolved placeholders: {0}")]
    UnresolvedPlaceholders(String),

    /// Warehouse query execution failed. Distinct from a zero-row result,
    /// which is a valid `Ok(vec![])`.
    #[error("warehouse error: {0}")]
    Warehouse(String),

    /// Snapshot store read or write failed.
    #[error("store error: {0}")]
    Store(String),

    /// A result row lacked an expected column or held an unusable value.
    #[error("missing or invalid column in result row: {0}")]
    MissingColumn(String),

    /// Backfill was invoked with an end date before the start date.
    #[error("invalid date range: {0}")]
    InvalidDateRange(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn warehouse(msg: impl Into<String>) -> Self {
        Self::Warehouse(msg.into())
    }

    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }

    pub fn missing_column(column: impl Into<String>) -> Self {
        Self::MissingColumn(column.into())
    }

    pub fn invalid_date_range(msg: impl Into<String>) -> Self {
        Self::InvalidDateRange(msg.into())
    }

    /// Whether this error is fatal at startup rather than recoverable
    /// within a backfill run.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Config(_) | Self::MissingPlaceholder(_) | Self::UnresolvedPlaceholders(_)
        )
    }
}
