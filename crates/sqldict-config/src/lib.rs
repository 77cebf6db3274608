// SPDX-FileCopyrightText: 2026 SqlDict Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Store configuration for SqlDict.
//!
//! Settings come from compiled defaults, up to three `sqldict.toml` files and
//! `SQLDICT_*` environment variables. Unknown keys are rejected, values are
//! validated after parsing, and every failure is reported as a
//! [`ConfigError`] that miette can render.
//!
//! ```no_run
//! let config = sqldict_config::load_and_validate().unwrap_or_else(|errors| {
//!     sqldict_config::render_errors(&errors);
//!     std::process::exit(2);
//! });
//! println!("store file: {}", config.store.path);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

use tracing::debug;

pub use diagnostic::{ConfigError, render_errors, to_store_error};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::{SqlDictConfig, StoreConfig};

/// Load from the standard file hierarchy and environment, then validate.
pub fn load_and_validate() -> Result<SqlDictConfig, Vec<ConfigError>> {
    let config = check(loader::load_config(), collect_toml_sources)?;
    debug!(path = %config.store.path, table = %config.store.table_name, "configuration loaded");
    Ok(config)
}

/// Parse and validate a TOML document, without files or environment.
pub fn load_and_validate_str(toml_content: &str) -> Result<SqlDictConfig, Vec<ConfigError>> {
    check(loader::load_config_from_str(toml_content), || {
        vec![("<inline>".to_string(), toml_content.to_string())]
    })
}

/// Validate a parsed config, or convert the parse error using `sources`
/// (only read on failure) to place spans.
fn check(
    parsed: Result<SqlDictConfig, figment::Error>,
    sources: impl FnOnce() -> Vec<(String, String)>,
) -> Result<SqlDictConfig, Vec<ConfigError>> {
    match parsed {
        Ok(config) => validation::validate_config(&config).map(|()| config),
        Err(err) => Err(diagnostic::figment_to_config_errors(err, &sources())),
    }
}

/// Contents of the config files that exist, keyed by the path figment reports.
fn collect_toml_sources() -> Vec<(String, String)> {
    loader::config_search_paths()
        .into_iter()
        .filter_map(|path| {
            let content = std::fs::read_to_string(&path).ok()?;
            let name = std::fs::canonicalize(&path)
                .unwrap_or(path)
                .display()
                .to_string();
            Some((name, content))
        })
        .collect()
}
