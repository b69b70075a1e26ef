//! Read API for botboard: serves the stored snapshot series to the chart
//! front end.

pub mod routes;
pub mod series;
pub mod state;

pub use routes::router;
pub use series::LeaderboardSeries;
pub use state::AppState;
