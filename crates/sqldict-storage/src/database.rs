// SPDX-FileCopyrightText: 2026 SqlDict Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Connection lifecycle and error mapping.
//!
//! Stores never keep a connection open between operations: each operation
//! opens one, applies the busy timeout, runs, and closes it again.

use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::ErrorCode;
use sqldict_config::StoreConfig;
use sqldict_core::SqlDictError;
use tracing::{debug, warn};

/// Per-connection settings derived from a [`StoreConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionOptions {
    /// How long a statement waits on a locked file before failing with `Busy`.
    pub busy_timeout: Duration,
    /// Switch the file to write-ahead logging when the table is initialized.
    pub wal_mode: bool,
}

impl Default for ConnectionOptions {
    fn default() -> Self {
        Self::from(&StoreConfig::default())
    }
}

impl From<&StoreConfig> for ConnectionOptions {
    fn from(config: &StoreConfig) -> Self {
        Self {
            busy_timeout: Duration::from_millis(config.busy_timeout_ms),
            wal_mode: config.wal_mode,
        }
    }
}

/// Where operations connect to, and how.
#[derive(Debug, Clone)]
pub(crate) struct Target {
    pub(crate) path: PathBuf,
    pub(crate) options: ConnectionOptions,
}

/// Open a blocking connection with the busy timeout applied.
pub(crate) fn open_blocking(
    path: &Path,
    options: ConnectionOptions,
) -> Result<rusqlite::Connection, SqlDictError> {
    let conn = rusqlite::Connection::open(path).map_err(map_sqlite_err)?;
    conn.busy_timeout(options.busy_timeout)
        .map_err(map_sqlite_err)?;
    Ok(conn)
}

/// Open a connection served by a background thread.
///
/// The busy timeout is applied by the caller inside its first `call`.
pub(crate) async fn open_async(path: &Path) -> Result<tokio_rusqlite::Connection, SqlDictError> {
    tokio_rusqlite::Connection::open(path)
        .await
        .map_err(map_sqlite_err)
}

pub(crate) fn close_blocking(conn: rusqlite::Connection, op: &'static str) {
    match conn.close() {
        Ok(()) => debug!(op, "connection closed"),
        Err((_, e)) => warn!(op, error = %e, "failed to close connection"),
    }
}

pub(crate) async fn close_async(conn: tokio_rusqlite::Connection, op: &'static str) {
    match conn.close().await {
        Ok(()) => debug!(op, "connection closed"),
        Err(e) => warn!(op, error = %e, "failed to close connection"),
    }
}

/// Switch the database file to write-ahead logging.
pub(crate) fn enable_wal(conn: &rusqlite::Connection) -> rusqlite::Result<()> {
    let mode: String = conn.query_row("PRAGMA journal_mode=WAL;", [], |row| row.get(0))?;
    if !mode.eq_ignore_ascii_case("wal") {
        debug!(mode = %mode, "journal mode left unchanged");
    }
    Ok(())
}

/// Convert a rusqlite error into a store error.
///
/// Lock contention that outlived the busy timeout becomes `Busy`, everything
/// else is `Storage`.
pub(crate) fn map_sqlite_err(e: rusqlite::Error) -> SqlDictError {
    let busy = matches!(
        e.sqlite_error_code(),
        Some(ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked)
    );
    if busy {
        SqlDictError::Busy {
            source: Box::new(e),
        }
    } else {
        SqlDictError::Storage {
            source: Box::new(e),
        }
    }
}

/// Convert a tokio-rusqlite error into `SqlDictError::Storage`.
pub(crate) fn map_tr_err(e: tokio_rusqlite::Error<rusqlite::Error>) -> SqlDictError {
    SqlDictError::Storage {
        source: Box::new(e),
    }
}
