// SPDX-FileCopyrightText: 2026 SqlDict Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-entry reads, writes and full-table scans.

use rusqlite::types::Value;
use rusqlite::{Connection, TransactionBehavior, params};

/// Fetch the value column for `key`, if a row exists.
pub(crate) fn fetch(conn: &Connection, sql: &str, key: &Value) -> rusqlite::Result<Option<Value>> {
    let result = conn.query_row(sql, params![key], |row| row.get::<_, Value>(0));
    match result {
        Ok(value) => Ok(Some(value)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Insert or overwrite one row.
pub(crate) fn upsert(
    conn: &mut Connection,
    sql: &str,
    key: &Value,
    value: &Value,
) -> rusqlite::Result<()> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    tx.execute(sql, params![key, value])?;
    tx.commit()
}

/// Delete the row for `key`, returning how many rows went away.
pub(crate) fn remove(conn: &mut Connection, sql: &str, key: &Value) -> rusqlite::Result<usize> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    let removed = tx.execute(sql, params![key])?;
    tx.commit()?;
    Ok(removed)
}

/// Run a `COUNT(*)` query, optionally bound to a key.
pub(crate) fn count(conn: &Connection, sql: &str, key: Option<&Value>) -> rusqlite::Result<i64> {
    match key {
        Some(key) => conn.query_row(sql, params![key], |row| row.get(0)),
        None => conn.query_row(sql, [], |row| row.get(0)),
    }
}

/// Read one column from every row.
pub(crate) fn scan_column(conn: &Connection, sql: &str) -> rusqlite::Result<Vec<Value>> {
    let mut stmt = conn.prepare(sql)?;
    let values = stmt
        .query_map([], |row| row.get::<_, Value>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(values)
}

/// Read both columns from every row.
pub(crate) fn scan_pairs(conn: &Connection, sql: &str) -> rusqlite::Result<Vec<(Value, Value)>> {
    let mut stmt = conn.prepare(sql)?;
    let pairs = stmt
        .query_map([], |row| Ok((row.get::<_, Value>(0)?, row.get::<_, Value>(1)?)))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(pairs)
}
