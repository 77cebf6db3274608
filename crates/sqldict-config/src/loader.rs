// SPDX-FileCopyrightText: 2026 SqlDict Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered loading of `sqldict.toml` files and `SQLDICT_*` variables.
//!
//! Supports XDG hierarchy: `./sqldict.toml` > `~/.config/sqldict/sqldict.toml` > `/etc/sqldict/sqldict.toml`
//! with environment variable overrides via `SQLDICT_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is returned as-is

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::SqlDictConfig;

const SYSTEM_CONFIG: &str = "/etc/sqldict/sqldict.toml";
const LOCAL_CONFIG: &str = "sqldict.toml";

/// Load the store configuration from every standard location.
///
/// Later sources win:
/// 1. Compiled defaults
/// 2. `/etc/sqldict/sqldict.toml` (system-wide)
/// 3. `~/.config/sqldict/sqldict.toml` (user XDG config)
/// 4. `./sqldict.toml` (local directory)
/// 5. `SQLDICT_*` environment variables
pub fn load_config() -> Result<SqlDictConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no files, no env vars).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<SqlDictConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SqlDictConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load one explicit file, still honoring `SQLDICT_*` overrides.
pub fn load_config_from_path(path: &Path) -> Result<SqlDictConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SqlDictConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// The unextracted figment behind [`load_config`], for callers that want
/// provenance metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(SqlDictConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG))
        .merge(env_provider())
}

/// Location of the per-user config file, if the platform has a config dir.
pub fn user_config_path() -> Option<std::path::PathBuf> {
    dirs::config_dir().map(|d| d.join("sqldict").join(LOCAL_CONFIG))
}

/// Paths searched for TOML config files, lowest precedence first.
pub fn config_search_paths() -> Vec<std::path::PathBuf> {
    let mut paths = vec![std::path::PathBuf::from(SYSTEM_CONFIG)];
    paths.extend(user_config_path());
    paths.push(std::path::PathBuf::from(LOCAL_CONFIG));
    paths
}

/// `SQLDICT_STORE_TABLE_NAME` maps to `store.table_name`, not
/// `store.table.name`, so only the section prefix is split off.
///
/// Keys arrive in their original case.
fn env_provider() -> Env {
    Env::prefixed("SQLDICT_").map(|key| env_key(key.as_str()).into())
}

fn env_key(var: &str) -> String {
    var.to_ascii_lowercase().replacen("store_", "store.", 1)
}
