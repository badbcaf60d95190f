//! SQLite storage backend

use super::traits::{ChartStore, StorageResult};
use crate::chart::{MedicalChart, UserId};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::Mutex;

/// SQLite-backed chart store
///
/// One row per user: the chart is stored as JSON alongside its
/// `last_updated` timestamp (kept as a column for ordering and
/// inspection). Thread-safe via internal mutex on the connection.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open or create a store at the given path
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        Self::init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory store (useful for testing)
    pub fn open_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn init_schema(conn: &Connection) -> StorageResult<()> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS charts (
                user_id TEXT PRIMARY KEY,
                chart_json TEXT NOT NULL,
                last_updated TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_charts_last_updated
                ON charts(last_updated);

            -- Concurrent reads during writes
            PRAGMA journal_mode = WAL;
            "#,
        )?;
        Ok(())
    }

    fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl ChartStore for SqliteStore {
    fn load(&self, id: &UserId) -> StorageResult<Option<MedicalChart>> {
        let conn = self.conn();
        let json: Option<String> = conn
            .query_row(
                "SELECT chart_json FROM charts WHERE user_id = ?1",
                params![id.as_str()],
                |row| row.get(0),
            )
            .optional()?;

        match json {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    fn save(&self, id: &UserId, chart: &MedicalChart) -> StorageResult<()> {
        let json = serde_json::to_string(chart)?;
        let conn = self.conn();
        conn.execute(
            r#"
            INSERT INTO charts (user_id, chart_json, last_updated)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(user_id) DO UPDATE SET
                chart_json = excluded.chart_json,
                last_updated = excluded.last_updated
            "#,
            params![id.as_str(), json, chart.last_updated.to_rfc3339()],
        )?;
        Ok(())
    }

    fn delete(&self, id: &UserId) -> StorageResult<bool> {
        let conn = self.conn();
        let rows = conn.execute("DELETE FROM charts WHERE user_id = ?1", params![id.as_str()])?;
        Ok(rows > 0)
    }

    fn list(&self) -> StorageResult<Vec<UserId>> {
        let conn = self.conn();
        let mut stmt = conn.prepare("SELECT user_id FROM charts ORDER BY user_id")?;
        let ids = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ids.into_iter().map(UserId::from).collect())
    }

    fn contains(&self, id: &UserId) -> StorageResult<bool> {
        let conn = self.conn();
        let exists: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM charts WHERE user_id = ?1)",
            params![id.as_str()],
            |row| row.get(0),
        )?;
        Ok(exists)
    }
}
