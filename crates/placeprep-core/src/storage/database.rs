//! SQLite-based session storage and statistics.
//!
//! Provides persistent storage for:
//! - Naturally completed timer phases
//! - Session statistics (daily and all-time)
//! - Key-value store for front-end state (the serialized focus timer)

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::data_dir;
use crate::error::{DatabaseError, Result};
use crate::timer::TimerMode;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: i64,
    pub mode: String,
    pub duration_min: u64,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Stats {
    pub total_sessions: u64,
    pub completed_work_sessions: u64,
    pub total_focus_min: u64,
    pub total_break_min: u64,
    pub today_sessions: u64,
    pub today_focus_min: u64,
}

/// SQLite database for session storage.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `<data_dir>/placeprep.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        Self::open_at(&data_dir()?.join("placeprep.db"))
    }

    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    #[cfg(test)]
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS sessions (
                id           INTEGER PRIMARY KEY AUTOINCREMENT,
                mode         TEXT NOT NULL,
                duration_min INTEGER NOT NULL,
                completed_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_sessions_completed_at ON sessions(completed_at);
            CREATE INDEX IF NOT EXISTS idx_sessions_mode ON sessions(mode);",
        )?;
        Ok(())
    }

    /// Record a phase that ran down to zero.
    ///
    /// # Errors
    /// Returns an error if the insert fails.
    pub fn record_session(
        &self,
        mode: TimerMode,
        duration_min: u64,
        completed_at: DateTime<Utc>,
    ) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO sessions (mode, duration_min, completed_at) VALUES (?1, ?2, ?3)",
            params![mode.as_str(), duration_min, completed_at.to_rfc3339()],
        )?;
        let id = self.conn.last_insert_rowid();
        info!(id, mode = mode.as_str(), duration_min, "session recorded");
        Ok(id)
    }

    /// Most recent sessions first.
    pub fn recent_sessions(&self, limit: usize) -> Result<Vec<SessionRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, mode, duration_min, completed_at
             FROM sessions
             ORDER BY completed_at DESC, id DESC
             LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit as i64], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, u64>(2)?,
                row.get::<_, String>(3)?,
            ))
        })?;

        let mut sessions = Vec::new();
        for row in rows {
            let (id, mode, duration_min, completed_at) = row?;
            let completed_at = DateTime::parse_from_rfc3339(&completed_at)
                .map_err(|e| DatabaseError::QueryFailed(format!("bad timestamp: {e}")))?
                .with_timezone(&Utc);
            sessions.push(SessionRecord {
                id,
                mode,
                duration_min,
                completed_at,
            });
        }
        Ok(sessions)
    }

    pub fn stats_today(&self) -> Result<Stats> {
        self.stats_since(Some(today_start()))
    }

    pub fn stats_all(&self) -> Result<Stats> {
        self.stats_since(None)
    }

    fn stats_since(&self, since: Option<String>) -> Result<Stats> {
        let mut stmt = self.conn.prepare(
            "SELECT mode, COUNT(*), COALESCE(SUM(duration_min), 0)
             FROM sessions
             WHERE ?1 IS NULL OR completed_at >= ?1
             GROUP BY mode",
        )?;
        let rows = stmt.query_map(params![since], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, u64>(1)?,
                row.get::<_, u64>(2)?,
            ))
        })?;

        let mut stats = Stats::default();
        for row in rows {
            let (mode, count, minutes) = row?;
            stats.total_sessions += count;
            if mode == TimerMode::Work.as_str() {
                stats.completed_work_sessions += count;
                stats.total_focus_min += minutes;
            } else {
                stats.total_break_min += minutes;
            }
        }

        let (today_sessions, today_focus_min) = self.conn.query_row(
            "SELECT COUNT(*), COALESCE(SUM(duration_min), 0)
             FROM sessions
             WHERE mode = ?1 AND completed_at >= ?2",
            params![TimerMode::Work.as_str(), today_start()],
            |row| Ok((row.get::<_, u64>(0)?, row.get::<_, u64>(1)?)),
        )?;
        stats.today_sessions = today_sessions;
        stats.today_focus_min = today_focus_min;

        Ok(stats)
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        match stmt.query_row(params![key], |row| row.get::<_, String>(0)) {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }
}

fn today_start() -> String {
    format!("{}T00:00:00+00:00", Utc::now().format("%Y-%m-%d"))
}
