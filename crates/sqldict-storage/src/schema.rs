// SPDX-FileCopyrightText: 2026 SqlDict Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Table layout, rendered SQL and table initialization.

use std::path::Path;

use rusqlite::types::Value;
use sqldict_config::StoreConfig;
use sqldict_config::validation::validate_store;
use sqldict_core::SqlDictError;
use sqldict_core::identifiers::quote_ident;
use tracing::info;

use crate::database::{ConnectionOptions, Target};
use crate::{queries, strategy};

/// Names and declared types of a store's table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSpec {
    pub table: String,
    pub key_col: String,
    pub val_col: String,
    pub key_type: String,
    pub value_type: String,
}

impl Default for TableSpec {
    fn default() -> Self {
        Self::from_validated(&StoreConfig::default())
    }
}

impl TableSpec {
    /// Build the table layout from store parameters, rejecting unsafe names and types.
    pub fn from_config(config: &StoreConfig) -> Result<Self, SqlDictError> {
        validate_store(config, "").map_err(sqldict_config::to_store_error)?;
        Ok(Self::from_validated(config))
    }

    fn from_validated(config: &StoreConfig) -> Self {
        Self {
            table: config.table_name.clone(),
            key_col: config.key_col.clone(),
            val_col: config.val_col.clone(),
            key_type: config.key_type.clone(),
            value_type: config.value_type.clone(),
        }
    }

    /// `CREATE TABLE IF NOT EXISTS` for this layout.
    pub fn create_statement(&self) -> String {
        format!(
            "CREATE TABLE IF NOT EXISTS {} ({} {} PRIMARY KEY, {} {})",
            quote_ident(&self.table),
            quote_ident(&self.key_col),
            self.key_type,
            quote_ident(&self.val_col),
            self.value_type,
        )
    }
}

/// Every statement a store issues, rendered once per handle.
#[derive(Debug)]
pub(crate) struct Statements {
    pub(crate) create: String,
    pub(crate) insert_ignore: String,
    pub(crate) upsert: String,
    pub(crate) select_value: String,
    pub(crate) count_key: String,
    pub(crate) count_all: String,
    pub(crate) select_keys: String,
    pub(crate) select_values: String,
    pub(crate) select_items: String,
    pub(crate) delete: String,
}

impl Statements {
    pub(crate) fn new(spec: &TableSpec) -> Self {
        let t = quote_ident(&spec.table);
        let k = quote_ident(&spec.key_col);
        let v = quote_ident(&spec.val_col);
        Self {
            create: spec.create_statement(),
            insert_ignore: format!("INSERT OR IGNORE INTO {t} ({k}, {v}) VALUES (?1, ?2)"),
            upsert: format!("INSERT OR REPLACE INTO {t} ({k}, {v}) VALUES (?1, ?2)"),
            select_value: format!("SELECT {v} FROM {t} WHERE {k} = ?1 LIMIT 1"),
            count_key: format!("SELECT COUNT(*) FROM {t} WHERE {k} = ?1"),
            count_all: format!("SELECT COUNT(*) FROM {t}"),
            select_keys: format!("SELECT {k} FROM {t}"),
            select_values: format!("SELECT {v} FROM {t}"),
            select_items: format!("SELECT {k}, {v} FROM {t}"),
            delete: format!("DELETE FROM {t} WHERE {k} = ?1"),
        }
    }
}

fn check_path(path: &Path) -> Result<(), SqlDictError> {
    if path.as_os_str().is_empty() {
        return Err(SqlDictError::Config(
            "store path must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Create the table if missing and insert `entries` whose keys are absent.
///
/// Existing rows are never overwritten. Creation and the bulk insert commit
/// as one transaction. Returns the number of rows actually inserted.
pub fn ensure_table(
    path: &Path,
    spec: &TableSpec,
    options: ConnectionOptions,
    entries: Vec<(Value, Value)>,
) -> Result<usize, SqlDictError> {
    check_path(path)?;
    let statements = Statements::new(spec);
    let target = Target {
        path: path.to_path_buf(),
        options,
    };
    let inserted = strategy::run_blocking(&target, "ensure_table", |conn| {
        queries::table::initialize(conn, &statements, options.wal_mode, &entries)
    })?;
    info!(table = %spec.table, path = %path.display(), inserted, "table ready");
    Ok(inserted)
}

/// Suspendable counterpart of [`ensure_table`].
pub async fn ensure_table_async(
    path: &Path,
    spec: &TableSpec,
    options: ConnectionOptions,
    entries: Vec<(Value, Value)>,
) -> Result<usize, SqlDictError> {
    check_path(path)?;
    let statements = Statements::new(spec);
    let target = Target {
        path: path.to_path_buf(),
        options,
    };
    let inserted = strategy::run_suspended(&target, "ensure_table", move |conn| {
        queries::table::initialize(conn, &statements, options.wal_mode, &entries)
    })
    .await?;
    info!(table = %spec.table, path = %path.display(), inserted, "table ready");
    Ok(inserted)
}
