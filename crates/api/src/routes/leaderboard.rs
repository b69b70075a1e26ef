//! The leaderboard time-series endpoint.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{Days, NaiveDate, Utc};
use serde::Deserialize;
use tracing::warn;

use crate::series::LeaderboardSeries;
use crate::state::AppState;

/// Default range when the caller gives no dates: the last two years.
const DEFAULT_RANGE_DAYS: u64 = 2 * 365;

/// Query parameters, ISO calendar dates, both inclusive.
///
/// The chart front end sends camelCase names; the snake_case spellings are
/// kept as aliases for hand-written queries.
#[derive(Debug, Deserialize)]
pub struct RangeParams {
    #[serde(rename = "startDate", alias = "start_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(rename = "endDate", alias = "end_date")]
    pub end_date: Option<NaiveDate>,
}

/// GET /api/leaderboard - time series for the requested date range.
///
/// Store failures degrade to the empty shape rather than an error status;
/// the chart renders an empty plot instead of breaking.
pub async fn leaderboard_handler(
    State(state): State<AppState>,
    Query(params): Query<RangeParams>,
) -> Json<LeaderboardSeries> {
    let end = params.end_date.unwrap_or_else(|| Utc::now().date_naive());
    let start = params
        .start_date
        .unwrap_or_else(|| end.checked_sub_days(Days::new(DEFAULT_RANGE_DAYS)).unwrap_or(end));

    if end < start {
        warn!(%start, %end, "Inverted leaderboard range requested");
        return Json(LeaderboardSeries::empty());
    }

    match state.store.query_range(start, end) {
        Ok(snapshots) => Json(LeaderboardSeries::from_snapshots(&snapshots)),
        Err(e) => {
            warn!(error = %e, "Snapshot store unavailable, returning empty series");
            Json(LeaderboardSeries::empty())
        }
    }
}
