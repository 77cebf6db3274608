// SPDX-FileCopyrightText: 2026 SqlDict Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Table creation and bulk seeding.

use rusqlite::types::Value;
use rusqlite::{Connection, TransactionBehavior, params};

use crate::database::enable_wal;
use crate::schema::Statements;

/// Create the table and insert absent entries in one transaction.
pub(crate) fn initialize(
    conn: &mut Connection,
    statements: &Statements,
    wal_mode: bool,
    entries: &[(Value, Value)],
) -> rusqlite::Result<usize> {
    if wal_mode {
        enable_wal(conn)?;
    }

    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    tx.execute(&statements.create, [])?;
    let mut inserted = 0;
    {
        let mut stmt = tx.prepare(&statements.insert_ignore)?;
        for (key, value) in entries {
            inserted += stmt.execute(params![key, value])?;
        }
    }
    tx.commit()?;
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::TableSpec;

    #[test]
    fn rolls_back_when_an_insert_fails() {
        let mut conn = Connection::open_in_memory().unwrap();
        let statements = Statements::new(&TableSpec::default());
        conn.execute_batch(
            "CREATE TABLE \"kv_store\" (\"key\" TEXT PRIMARY KEY, \"val\" BLOB);
             CREATE TRIGGER reject_bad BEFORE INSERT ON kv_store WHEN NEW.key = 'bad'
             BEGIN SELECT RAISE(ABORT, 'rejected'); END;",
        )
        .unwrap();

        let entries = vec![
            (Value::Text("ok".into()), Value::Integer(1)),
            (Value::Text("bad".into()), Value::Integer(2)),
        ];
        assert!(initialize(&mut conn, &statements, false, &entries).is_err());

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM kv_store", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }
}
