// SPDX-FileCopyrightText: 2026 SqlDict Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Resolution of user-supplied store names to database file paths.

use std::path::PathBuf;

use sqldict_core::SqlDictError;

/// Extension every backing file carries.
pub const DB_EXTENSION: &str = "db";

/// Turn a store name into the path of its backing file.
///
/// A leading `~` expands to the current user's home directory, and `.db` is
/// appended unless the name already ends with it. Blank names are rejected.
/// The file itself is neither created nor checked here.
pub fn resolve_path(name: &str) -> Result<PathBuf, SqlDictError> {
    if name.trim().is_empty() {
        return Err(SqlDictError::Config(
            "store path must not be empty".to_string(),
        ));
    }
    let expanded = expand_home(name)?;
    Ok(with_db_extension(expanded))
}

fn expand_home(name: &str) -> Result<PathBuf, SqlDictError> {
    let rest = match name.strip_prefix('~') {
        Some("") => "",
        Some(rest) if rest.starts_with('/') || rest.starts_with(std::path::MAIN_SEPARATOR) => {
            rest.trim_start_matches(['/', std::path::MAIN_SEPARATOR])
        }
        // `~user` forms and plain names are taken literally.
        _ => return Ok(PathBuf::from(name)),
    };
    let home = dirs::home_dir().ok_or_else(|| {
        SqlDictError::Config(format!("cannot expand `{name}`: no home directory"))
    })?;
    Ok(if rest.is_empty() { home } else { home.join(rest) })
}

fn with_db_extension(path: PathBuf) -> PathBuf {
    if path.extension().is_some_and(|ext| ext == DB_EXTENSION) {
        return path;
    }
    let mut raw = path.into_os_string();
    raw.push(".");
    raw.push(DB_EXTENSION);
    PathBuf::from(raw)
}
