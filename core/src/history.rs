//! Append-only SQLite log of past lookups.
//!
//! One table, store-assigned monotonic ids; `ORDER BY id DESC` defines
//! recency. Rows are never updated or deleted. The schema is applied
//! idempotently when the store is opened, which happens once at process
//! start before any traffic is accepted.
//!
//! Wall-clock reads go through the [`Clock`] trait so tests can pin
//! timestamps.

use std::path::Path;
use std::sync::{Mutex, PoisonError};

use chrono::{Local, NaiveDateTime};
use rusqlite::{Connection, params};
use thiserror::Error;

/// Timestamp layout persisted in `searched_at`.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS searches (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL,
    searched_at TEXT NOT NULL,
    followers INTEGER,
    public_repos INTEGER
)";

/// Errors from the history store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not create store directory: {0}")]
    Io(#[from] std::io::Error),

    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Injectable time source.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Local wall clock, second precision once formatted.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// One persisted lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRecord {
    pub id: i64,
    pub username: String,
    pub searched_at: String,
    pub followers: u32,
    pub public_repos: u32,
}

/// Durable search history backed by a single SQLite file.
///
/// The connection `Mutex` serializes concurrent writers; ids are assigned
/// by the store so there is no read-modify-write race to worry about.
pub struct HistoryStore {
    conn: Mutex<Connection>,
    clock: Box<dyn Clock>,
}

impl HistoryStore {
    /// Open (creating if absent) the store at `path` with the system clock.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Self::open_with_clock(path, Box::new(SystemClock))
    }

    /// Open with an explicit clock (for testing).
    pub fn open_with_clock(
        path: impl AsRef<Path>,
        clock: Box<dyn Clock>,
    ) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        conn.execute(SCHEMA, [])?;
        Ok(Self {
            conn: Mutex::new(conn),
            clock,
        })
    }

    /// Append a record for a successful lookup. Returns the assigned id.
    ///
    /// The write is synchronous: once this returns the row is durable.
    pub fn record(
        &self,
        username: &str,
        followers: u32,
        public_repos: u32,
    ) -> Result<i64, StoreError> {
        let searched_at = self.clock.now().format(TIMESTAMP_FORMAT).to_string();
        let conn = self.lock();
        conn.execute(
            "INSERT INTO searches (username, searched_at, followers, public_repos)
             VALUES (?1, ?2, ?3, ?4)",
            params![username, searched_at, followers, public_repos],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// The most recent `limit` lookups, newest first.
    pub fn recent_searches(&self, limit: usize) -> Result<Vec<SearchRecord>, StoreError> {
        let conn = self.lock();
        let mut stmt = conn.prepare(
            "SELECT id, username, searched_at, followers, public_repos
             FROM searches ORDER BY id DESC LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit as i64], |row| {
            Ok(SearchRecord {
                id: row.get(0)?,
                username: row.get(1)?,
                searched_at: row.get(2)?,
                followers: row.get(3)?,
                public_repos: row.get(4)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Total number of persisted lookups.
    pub fn search_count(&self) -> Result<i64, StoreError> {
        let conn = self.lock();
        Ok(conn.query_row("SELECT COUNT(*) FROM searches", [], |row| row.get(0))?)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Connection> {
        // A poisoned lock only means another thread panicked mid-query;
        // the connection itself is still usable.
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
