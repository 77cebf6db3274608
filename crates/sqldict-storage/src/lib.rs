// SPDX-FileCopyrightText: 2026 SqlDict Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite-backed persistent dictionaries.
//!
//! [`SqlDict`] blocks the calling thread for each operation and
//! [`AsyncSqlDict`] suspends the calling task instead. Both store one
//! key/value pair per row of a single table, open a fresh connection per
//! operation, and can share a file with each other and with other processes.

mod boundary;
pub mod database;
mod handle;
pub mod models;
pub mod path;
mod queries;
pub mod schema;
mod strategy;

mod async_dict;
mod dict;

pub use async_dict::AsyncSqlDict;
pub use database::ConnectionOptions;
pub use dict::SqlDict;
pub use models::*;
pub use path::resolve_path;
pub use schema::{TableSpec, ensure_table, ensure_table_async};
pub use sqldict_config::StoreConfig;
