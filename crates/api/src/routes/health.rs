//! Health check endpoint.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub store_connected: bool,
    pub snapshot_count: u64,
}

/// GET /health - store connectivity and row count.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    match state.store.count() {
        Ok(snapshot_count) => Json(HealthResponse {
            status: "ok".to_string(),
            store_connected: true,
            snapshot_count,
        }),
        Err(_) => Json(HealthResponse {
            status: "degraded".to_string(),
            store_connected: false,
            snapshot_count: 0,
        }),
    }
}
