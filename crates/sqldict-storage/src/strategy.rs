// SPDX-FileCopyrightText: 2026 SqlDict Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The two ways an operation gets a connection and waits for it.
//!
//! [`run_blocking`] opens a connection on the calling thread and blocks it
//! until the statement finishes. [`run_suspended`] hands the same closure to
//! a tokio-rusqlite background thread and yields to the runtime while it runs.
//! Either way the connection lives for exactly one operation.

use rusqlite::Connection;
use sqldict_core::SqlDictError;
use tracing::debug;

use crate::database::{
    Target, close_async, close_blocking, map_sqlite_err, map_tr_err, open_async, open_blocking,
};

/// Run `f` on a fresh connection, blocking the caller.
pub(crate) fn run_blocking<R, F>(target: &Target, op: &'static str, f: F) -> Result<R, SqlDictError>
where
    F: FnOnce(&mut Connection) -> rusqlite::Result<R>,
{
    let mut conn = open_blocking(&target.path, target.options)?;
    debug!(op, path = %target.path.display(), "connection opened");
    let result = f(&mut conn).map_err(map_sqlite_err);
    close_blocking(conn, op);
    result
}

/// Run `f` on a fresh background connection, suspending the caller.
pub(crate) async fn run_suspended<R, F>(
    target: &Target,
    op: &'static str,
    f: F,
) -> Result<R, SqlDictError>
where
    F: FnOnce(&mut Connection) -> rusqlite::Result<R> + Send + 'static,
    R: Send + 'static,
{
    let conn = open_async(&target.path).await?;
    debug!(op, path = %target.path.display(), "connection opened");
    let busy_timeout = target.options.busy_timeout;
    let result = conn
        .call(
            move |conn| -> Result<Result<R, SqlDictError>, rusqlite::Error> {
                let outcome = conn.busy_timeout(busy_timeout).and_then(|()| f(conn));
                Ok(outcome.map_err(map_sqlite_err))
            },
        )
        .await
        .map_err(map_tr_err);
    close_async(conn, op).await;
    result?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::ConnectionOptions;
    use tempfile::tempdir;

    fn target(dir: &tempfile::TempDir) -> Target {
        Target {
            path: dir.path().join("strategy.db"),
            options: ConnectionOptions::default(),
        }
    }

    #[test]
    fn blocking_runs_closure_and_maps_errors() {
        let dir = tempdir().unwrap();
        let target = target(&dir);
        let one: i64 = run_blocking(&target, "query", |c| c.query_row("SELECT 1", [], |r| r.get(0)))
            .unwrap();
        assert_eq!(one, 1);

        let err = run_blocking(&target, "query", |c| c.execute("SELECT * FROM missing", []))
            .unwrap_err();
        assert!(matches!(err, SqlDictError::Storage { .. }));
    }

    #[tokio::test]
    async fn suspended_runs_closure_and_maps_errors() {
        let dir = tempdir().unwrap();
        let target = target(&dir);
        let one: i64 = run_suspended(&target, "query", |c| c.query_row("SELECT 1", [], |r| r.get(0)))
            .await
            .unwrap();
        assert_eq!(one, 1);

        let err = run_suspended(&target, "query", |c| c.execute("SELECT * FROM missing", []))
            .await
            .unwrap_err();
        assert!(matches!(err, SqlDictError::Storage { .. }));
    }

    #[test]
    fn unopenable_path_is_storage_error() {
        let dir = tempdir().unwrap();
        let target = Target {
            path: dir.path().join("no").join("such").join("dir.db"),
            options: ConnectionOptions::default(),
        };
        let err = run_blocking(&target, "query", |c| c.execute_batch("SELECT 1")).unwrap_err();
        assert!(matches!(err, SqlDictError::Storage { .. }));
    }
}
