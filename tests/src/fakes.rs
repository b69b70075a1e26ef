//! Fake warehouse for driving the backfill runner without a real event
//! store.

use async_trait::async_trait;
use board_core::{Error, Result};
use chrono::NaiveDate;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use warehouse::{Value, Warehouse, WarehouseRow};

/// One breakdown row, as the real warehouse would shape it.
pub fn tool_row(tool: &str, repo_count: i64, pct: f64) -> WarehouseRow {
    WarehouseRow::new()
        .with("tool", Value::Text(tool.to_string()))
        .with("repo_count", Value::Int(repo_count))
        .with("pct_of_active_repos", Value::Float(pct))
}

/// Fake warehouse scripted per target day.
///
/// This implements the same `Warehouse` trait as the real client. Queries
/// are classified by content: the rendered SQL carries its window bounds as
/// date literals (the target day is the latest one), and only the
/// denominator query selects `total_active_repos`. Every executed query is
/// captured so tests can assert on what was — and was not — issued.
#[derive(Default)]
pub struct FakeWarehouse {
    tool_rows: HashMap<NaiveDate, Vec<WarehouseRow>>,
    denominators: HashMap<NaiveDate, u64>,
    fail_days: HashSet<NaiveDate>,
    queries: Mutex<Vec<String>>,
}

impl FakeWarehouse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a day's breakdown rows and denominator.
    pub fn with_day(mut self, day: NaiveDate, rows: Vec<WarehouseRow>, denominator: u64) -> Self {
        self.tool_rows.insert(day, rows);
        self.denominators.insert(day, denominator);
        self
    }

    /// Script breakdown rows with no denominator entry: the denominator
    /// query for that day returns zero rows.
    pub fn with_breakdown_only(mut self, day: NaiveDate, rows: Vec<WarehouseRow>) -> Self {
        self.tool_rows.insert(day, rows);
        self
    }

    /// Make every query targeting `day` fail.
    pub fn fail_on(mut self, day: NaiveDate) -> Self {
        self.fail_days.insert(day);
        self
    }

    /// All queries executed so far.
    pub fn executed_queries(&self) -> Vec<String> {
        self.queries.lock().clone()
    }

    /// The latest date literal in the rendered SQL is the window's end, i.e.
    /// the day being backfilled.
    fn target_day(sql: &str) -> Option<NaiveDate> {
        sql.split('\'')
            .filter_map(|token| token.parse::<NaiveDate>().ok())
            .max()
    }
}

#[async_trait]
impl Warehouse for FakeWarehouse {
    async fn execute(&self, sql: &str, _location: &str) -> Result<Vec<WarehouseRow>> {
        self.queries.lock().push(sql.to_string());

        let day = Self::target_day(sql)
            .ok_or_else(|| Error::warehouse("fake warehouse: no date literal in query"))?;

        if self.fail_days.contains(&day) {
            return Err(Error::warehouse(format!("injected failure for {}", day)));
        }

        if sql.contains("total_active_repos") {
            return Ok(match self.denominators.get(&day) {
                Some(total) => vec![WarehouseRow::new()
                    .with("total_active_repos", Value::Int(*total as i64))],
                None => vec![],
            });
        }

        Ok(self.tool_rows.get(&day).cloned().unwrap_or_default())
    }
}
