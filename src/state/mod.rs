//! state
//!
//! Embedded SQLite store for per-user client state: the ticket watch
//! list, locally recorded time entries, and a small settings table.
//!
//! # Design
//!
//! The store lives in a single file in the user's home directory and is
//! opened once per process. Failures here are always soft: a store that
//! cannot be opened or upgraded is disabled for the session and every
//! state operation degrades to "not available". The remote client never
//! depends on local state being present.
//!
//! # Schema versioning
//!
//! The `settings` table carries a `version` row. A fresh file gets the
//! full current schema and version 1. Older files are upgraded one
//! version at a time; a failed upgrade step leaves the recorded version
//! where it was so the next process re-attempts from there.

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OptionalExtension};
use thiserror::Error;

/// Latest schema version. Upgrade scripts in [`UPGRADES`] must cover every
/// step from 1 up to this value.
pub const SCHEMA_VERSION: i64 = 1;

/// Sequential upgrade scripts, one per target version. `(2, sql)` would
/// bring a version-1 file to version 2. Version 1 is the initial build.
const UPGRADES: &[(i64, &str)] = &[];

/// Initial schema, created when no version row exists.
const INITIAL_SCHEMA: &str = r#"
CREATE TABLE settings (key varchar(20), value varchar(100));
INSERT INTO settings VALUES ('version', 1);

CREATE TABLE ticket_watch_list (ticket_num varchar(10) not null);
CREATE UNIQUE INDEX idx_watch_ticket ON ticket_watch_list(ticket_num);

CREATE TABLE ticket_time_entry (
    ticket_num varchar(10) not null,
    started_at datetime,
    ended_at datetime,
    sent boolean default false
);
"#;

/// Errors from local state operations.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("failed to open state database '{path}': {source}")]
    Open {
        path: PathBuf,
        source: rusqlite::Error,
    },

    #[error("failed to upgrade state schema to version {version}: {source}")]
    Upgrade {
        version: i64,
        source: rusqlite::Error,
    },

    #[error(transparent)]
    Sql(#[from] rusqlite::Error),
}

/// Outcome of a watch request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchOutcome {
    /// The ticket was added to the watch list.
    Added,
    /// The ticket was already on the watch list; nothing changed.
    AlreadyWatching,
}

/// Outcome of an unwatch request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnwatchOutcome {
    /// The ticket was removed from the watch list.
    Removed,
    /// The ticket was not on the watch list; nothing changed.
    NotWatching,
}

/// Handle to the opened, schema-current state database.
pub struct StateStore {
    conn: Connection,
}

impl StateStore {
    /// Open (and if needed create or upgrade) the state database at `path`.
    ///
    /// Callers treat an error here as "store disabled for this session":
    /// warn once and carry `None` instead of crashing.
    pub fn open(path: &Path) -> Result<Self, StateError> {
        let conn = Connection::open(path).map_err(|source| StateError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        let store = Self { conn };
        store.upgrade()?;
        Ok(store)
    }

    /// In-memory store for tests.
    pub fn open_in_memory() -> Result<Self, StateError> {
        let store = Self {
            conn: Connection::open_in_memory()?,
        };
        store.upgrade()?;
        Ok(store)
    }

    /// Create or upgrade the schema to [`SCHEMA_VERSION`].
    fn upgrade(&self) -> Result<(), StateError> {
        let mut version = match self.version()? {
            Some(v) => v,
            None => {
                self.conn.execute_batch(INITIAL_SCHEMA)?;
                1
            }
        };

        for (target, sql) in UPGRADES {
            if version >= *target {
                continue;
            }
            self.conn
                .execute_batch(sql)
                .map_err(|source| StateError::Upgrade {
                    version: *target,
                    source,
                })?;
            self.set_setting("version", &target.to_string())?;
            version = *target;
        }

        Ok(())
    }

    /// The recorded schema version, or `None` for a fresh file.
    pub fn version(&self) -> Result<Option<i64>, StateError> {
        // On a fresh database the settings table itself does not exist yet.
        let have_settings: bool = self
            .conn
            .query_row(
                "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'settings'",
                [],
                |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false);
        if !have_settings {
            return Ok(None);
        }

        let v: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM settings WHERE key = 'version'",
                [],
                |row| row.get(0),
            )
            .optional()?;
        Ok(v.and_then(|s| s.parse().ok()))
    }

    /// Fetch a settings value.
    pub fn setting(&self, key: &str) -> Result<Option<String>, StateError> {
        let v = self
            .conn
            .query_row(
                "SELECT value FROM settings WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(v)
    }

    /// Set a settings value, inserting the row when absent.
    pub fn set_setting(&self, key: &str, value: &str) -> Result<(), StateError> {
        let updated = self.conn.execute(
            "UPDATE settings SET value = ?2 WHERE key = ?1",
            params![key, value],
        )?;
        if updated == 0 {
            self.conn.execute(
                "INSERT INTO settings (key, value) VALUES (?1, ?2)",
                params![key, value],
            )?;
        }
        Ok(())
    }

    /// Add a ticket number to the watch list. Idempotent.
    pub fn watch(&self, ticket_num: &str) -> Result<WatchOutcome, StateError> {
        if self.is_watching(ticket_num)? {
            return Ok(WatchOutcome::AlreadyWatching);
        }
        self.conn.execute(
            "INSERT INTO ticket_watch_list (ticket_num) VALUES (?1)",
            params![ticket_num],
        )?;
        Ok(WatchOutcome::Added)
    }

    /// Remove a ticket number from the watch list. Idempotent.
    pub fn unwatch(&self, ticket_num: &str) -> Result<UnwatchOutcome, StateError> {
        let removed = self.conn.execute(
            "DELETE FROM ticket_watch_list WHERE ticket_num = ?1",
            params![ticket_num],
        )?;
        if removed == 0 {
            Ok(UnwatchOutcome::NotWatching)
        } else {
            Ok(UnwatchOutcome::Removed)
        }
    }

    /// Whether a ticket number is on the watch list.
    pub fn is_watching(&self, ticket_num: &str) -> Result<bool, StateError> {
        let found: Option<String> = self
            .conn
            .query_row(
                "SELECT ticket_num FROM ticket_watch_list WHERE ticket_num = ?1",
                params![ticket_num],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }

    /// All watched ticket numbers, lexicographically ordered.
    pub fn watched(&self) -> Result<Vec<String>, StateError> {
        let mut stmt = self
            .conn
            .prepare("SELECT ticket_num FROM ticket_watch_list ORDER BY ticket_num")?;
        let rows = stmt.query_map([], |row| row.get(0))?;
        let mut list = Vec::new();
        for row in rows {
            list.push(row?);
        }
        Ok(list)
    }

    /// Record a time entry locally. `sent` marks whether the entry made it
    /// to the remote service.
    pub fn record_time_entry(
        &self,
        ticket_num: &str,
        started_at: &str,
        ended_at: &str,
        sent: bool,
    ) -> Result<(), StateError> {
        self.conn.execute(
            "INSERT INTO ticket_time_entry (ticket_num, started_at, ended_at, sent)
             VALUES (?1, ?2, ?3, ?4)",
            params![ticket_num, started_at, ended_at, sent],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_store_initializes_at_version_one() {
        let store = StateStore::open_in_memory().unwrap();
        assert_eq!(store.version().unwrap(), Some(1));
        // All three tables usable
        assert!(store.watched().unwrap().is_empty());
        store.record_time_entry("TT1", "2024-03-01 09:00:00", "2024-03-01 09:30:00", false)
            .unwrap();
        assert_eq!(store.setting("version").unwrap().as_deref(), Some("1"));
    }

    #[test]
    fn watch_is_idempotent() {
        let store = StateStore::open_in_memory().unwrap();
        assert_eq!(store.watch("TT9886").unwrap(), WatchOutcome::Added);
        assert_eq!(store.watch("TT9886").unwrap(), WatchOutcome::AlreadyWatching);
        assert_eq!(store.watched().unwrap(), vec!["TT9886".to_string()]);
    }

    #[test]
    fn unwatch_reports_not_watching() {
        let store = StateStore::open_in_memory().unwrap();
        assert_eq!(store.unwatch("TT1").unwrap(), UnwatchOutcome::NotWatching);
        store.watch("TT1").unwrap();
        assert_eq!(store.unwatch("TT1").unwrap(), UnwatchOutcome::Removed);
        assert!(!store.is_watching("TT1").unwrap());
    }

    #[test]
    fn watched_list_is_lexicographic() {
        let store = StateStore::open_in_memory().unwrap();
        store.watch("TT20").unwrap();
        store.watch("TT100").unwrap();
        store.watch("TT3").unwrap();
        assert_eq!(
            store.watched().unwrap(),
            vec!["TT100".to_string(), "TT20".to_string(), "TT3".to_string()]
        );
    }

    #[test]
    fn settings_upsert() {
        let store = StateStore::open_in_memory().unwrap();
        assert_eq!(store.setting("missing").unwrap(), None);
        store.set_setting("last_user", "19x8261").unwrap();
        store.set_setting("last_user", "19x9999").unwrap();
        assert_eq!(store.setting("last_user").unwrap().as_deref(), Some("19x9999"));
    }
}
