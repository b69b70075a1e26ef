//! Snapshot store: a small SQLite table keyed by (date, tool), written
//! only by backfill runs and read back by the API.

pub mod config;
pub mod snapshot_store;

pub use config::StoreConfig;
pub use snapshot_store::SnapshotStore;
