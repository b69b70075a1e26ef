//! Persistent snapshot table keyed by (date, tool).

use crate::config::StoreConfig;
use board_core::{dates, Error, Result, Snapshot};
use chrono::NaiveDate;
use parking_lot::Mutex;
use rusqlite::{params, Connection};
use std::time::Duration;
use tracing::{debug, info};

const CREATE_SNAPSHOTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS snapshots (
    date                TEXT NOT NULL,
    tool                TEXT NOT NULL,
    repo_count          INTEGER NOT NULL,
    pct_of_active_repos REAL NOT NULL,
    total_active_repos  INTEGER NOT NULL,
    created_at          TEXT NOT NULL DEFAULT (datetime('now')),
    PRIMARY KEY (date, tool)
);
CREATE INDEX IF NOT EXISTS idx_snapshots_date ON snapshots(date);
"#;

/// SQLite-backed snapshot store.
///
/// Dates are stored as ISO-8601 text, so lexical range comparisons match
/// calendar order. The connection is guarded by a mutex; SQLite's single
/// writer keeps concurrent upserts for different keys from corrupting each
/// other, and upserts for the same key are last-write-wins.
pub struct SnapshotStore {
    conn: Mutex<Connection>,
}

impl SnapshotStore {
    /// Open (creating if absent) the store at the configured path.
    pub fn open(config: &StoreConfig) -> Result<Self> {
        let conn = Connection::open(&config.path)
            .map_err(|e| Error::store(format!("failed to open {}: {}", config.path.display(), e)))?;

        conn.busy_timeout(Duration::from_secs(5))
            .map_err(|e| Error::store(format!("failed to set busy timeout: {}", e)))?;
        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| Error::store(format!("failed to set journal_mode=WAL: {}", e)))?;
        conn.pragma_update(None, "synchronous", "NORMAL")
            .map_err(|e| Error::store(format!("failed to set synchronous=NORMAL: {}", e)))?;

        info!(path = %config.path.display(), "Opened snapshot store");

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// In-memory store for tests.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| Error::store(format!("failed to open in-memory store: {}", e)))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create the snapshots table and index if absent. Safe to call
    /// repeatedly.
    pub fn initialize(&self) -> Result<()> {
        self.conn
            .lock()
            .execute_batch(CREATE_SNAPSHOTS_TABLE)
            .map_err(|e| Error::store(format!("failed to initialize schema: {}", e)))?;
        debug!("Snapshot store schema initialized");
        Ok(())
    }

    /// Write or replace the row for `(snapshot.date, snapshot.tool)`.
    pub fn upsert(&self, snapshot: &Snapshot) -> Result<()> {
        self.conn
            .lock()
            .execute(
                r#"
                INSERT INTO snapshots (date, tool, repo_count, pct_of_active_repos, total_active_repos)
                VALUES (?1, ?2, ?3, ?4, ?5)
                ON CONFLICT(date, tool) DO UPDATE SET
                    repo_count = excluded.repo_count,
                    pct_of_active_repos = excluded.pct_of_active_repos,
                    total_active_repos = excluded.total_active_repos
                "#,
                params![
                    snapshot.date.to_string(),
                    snapshot.tool,
                    snapshot.repo_count as i64,
                    snapshot.pct_of_active_repos,
                    snapshot.total_active_repos as i64,
                ],
            )
            .map_err(|e| Error::store(format!("upsert failed: {}", e)))?;
        Ok(())
    }

    /// All snapshots with `date` in `[start, end]`, in no particular order.
    pub fn query_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Snapshot>> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare(
                r#"
                SELECT date, tool, repo_count, pct_of_active_repos, total_active_repos
                FROM snapshots
                WHERE date >= ?1 AND date <= ?2
                "#,
            )
            .map_err(|e| Error::store(format!("prepare failed: {}", e)))?;

        let rows = stmt
            .query_map(params![start.to_string(), end.to_string()], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, i64>(2)?,
                    row.get::<_, f64>(3)?,
                    row.get::<_, i64>(4)?,
                ))
            })
            .map_err(|e| Error::store(format!("query failed: {}", e)))?;

        let mut snapshots = Vec::new();
        for row in rows {
            let (date, tool, repo_count, pct, total) =
                row.map_err(|e| Error::store(format!("row decode failed: {}", e)))?;
            snapshots.push(Snapshot {
                date: dates::parse_date(&date)
                    .map_err(|e| Error::store(format!("corrupt date in stored row: {}", e)))?,
                tool,
                repo_count: repo_count.max(0) as u64,
                pct_of_active_repos: pct,
                total_active_repos: total.max(0) as u64,
            });
        }
        Ok(snapshots)
    }

    /// Total stored rows, used by the health endpoint.
    pub fn count(&self) -> Result<u64> {
        let conn = self.conn.lock();
        let count: i64 = conn
            .query_row("SELECT count(*) FROM snapshots", [], |row| row.get(0))
            .map_err(|e| Error::store(format!("count failed: {}", e)))?;
        Ok(count.max(0) as u64)
    }
}
