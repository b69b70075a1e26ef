//! Warehouse access for the botboard pipeline: named-placeholder query
//! templates, the client boundary, and the two queries every snapshot day
//! is built from.

pub mod client;
pub mod config;
pub mod queries;
pub mod row;
pub mod template;

pub use client::{ClickHouseWarehouse, Warehouse};
pub use config::WarehouseConfig;
pub use queries::{
    active_repo_count_query, fetch_active_repo_count, fetch_tool_breakdown,
    tool_breakdown_query, ToolUsage, DEFAULT_LOOKBACK_DAYS,
};
pub use row::{Value, WarehouseRow};
pub use template::QueryTemplate;
