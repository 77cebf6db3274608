// SPDX-FileCopyrightText: 2026 SqlDict Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the SqlDict key-value store.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};
use sqldict_core::SerializerKind;

/// Top-level SqlDict configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SqlDictConfig {
    /// Backing file and table layout.
    #[serde(default)]
    pub store: StoreConfig,
}

/// Parameters of a single store handle.
///
/// A store is fully described by these values; it keeps no other state.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    /// Path to the database file. `~` is expanded and `.db` is appended when missing.
    #[serde(default = "default_path")]
    pub path: String,

    /// Name of the key-value table.
    #[serde(default = "default_table_name")]
    pub table_name: String,

    /// Name of the primary-key column.
    #[serde(default = "default_key_col")]
    pub key_col: String,

    /// Name of the value column.
    #[serde(default = "default_val_col")]
    pub val_col: String,

    /// Declared type of the key column, used verbatim in `CREATE TABLE`.
    #[serde(default = "default_key_type")]
    pub key_type: String,

    /// Declared type of the value column, used verbatim in `CREATE TABLE`.
    #[serde(default = "default_value_type")]
    pub value_type: String,

    /// Value serializer: `json` or `none`.
    #[serde(default)]
    pub serializer: SerializerKind,

    /// How long an operation waits on a file locked by another writer.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl StoreConfig {
    /// Default settings for a store backed by `path`.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_table_name(mut self, table_name: impl Into<String>) -> Self {
        self.table_name = table_name.into();
        self
    }

    pub fn with_columns(mut self, key_col: impl Into<String>, val_col: impl Into<String>) -> Self {
        self.key_col = key_col.into();
        self.val_col = val_col.into();
        self
    }

    pub fn with_column_types(
        mut self,
        key_type: impl Into<String>,
        value_type: impl Into<String>,
    ) -> Self {
        self.key_type = key_type.into();
        self.value_type = value_type.into();
        self
    }

    pub fn with_serializer(mut self, serializer: SerializerKind) -> Self {
        self.serializer = serializer;
        self
    }

    pub fn with_busy_timeout_ms(mut self, busy_timeout_ms: u64) -> Self {
        self.busy_timeout_ms = busy_timeout_ms;
        self
    }

    pub fn with_wal_mode(mut self, wal_mode: bool) -> Self {
        self.wal_mode = wal_mode;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            table_name: default_table_name(),
            key_col: default_key_col(),
            val_col: default_val_col(),
            key_type: default_key_type(),
            value_type: default_value_type(),
            serializer: SerializerKind::default(),
            busy_timeout_ms: default_busy_timeout_ms(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("sqldict").join("sqldict.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("sqldict.db"))
        .to_string_lossy()
        .into_owned()
}

fn default_table_name() -> String {
    "kv_store".to_string()
}

fn default_key_col() -> String {
    "key".to_string()
}

fn default_val_col() -> String {
    "val".to_string()
}

fn default_key_type() -> String {
    "TEXT".to_string()
}

fn default_value_type() -> String {
    "BLOB".to_string()
}

fn default_busy_timeout_ms() -> u64 {
    5_000
}

fn default_wal_mode() -> bool {
    true
}
