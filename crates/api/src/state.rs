//! Application state shared across handlers.

use std::sync::Arc;
use store::SnapshotStore;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Snapshot store written by backfill runs
    pub store: Arc<SnapshotStore>,
}

impl AppState {
    pub fn new(store: Arc<SnapshotStore>) -> Self {
        Self { store }
    }
}
