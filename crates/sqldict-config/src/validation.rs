// SPDX-FileCopyrightText: 2026 SqlDict Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes:
//! non-empty paths, safe SQL identifiers and plausible column type names.

use sqldict_core::identifiers::{is_valid_identifier, is_valid_type_name};

use crate::diagnostic::ConfigError;
use crate::model::{SqlDictConfig, StoreConfig};

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &SqlDictConfig) -> Result<(), Vec<ConfigError>> {
    validate_store(&config.store, "store.")
}

/// Validate the parameters of one store.
///
/// `prefix` is prepended to field names in messages (e.g. `store.`).
pub fn validate_store(store: &StoreConfig, prefix: &str) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if store.path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: format!("{prefix}path must not be empty"),
        });
    }

    for (field, value) in [
        ("table_name", &store.table_name),
        ("key_col", &store.key_col),
        ("val_col", &store.val_col),
    ] {
        if !is_valid_identifier(value) {
            errors.push(ConfigError::Validation {
                message: format!(
                    "{prefix}{field} `{value}` must start with a letter or underscore and contain only letters, digits and underscores"
                ),
            });
        }
    }

    if store.key_col.eq_ignore_ascii_case(&store.val_col) {
        errors.push(ConfigError::Validation {
            message: format!(
                "{prefix}key_col and {prefix}val_col must differ, both are `{}`",
                store.key_col
            ),
        });
    }

    for (field, value) in [("key_type", &store.key_type), ("value_type", &store.value_type)] {
        if !is_valid_type_name(value) {
            errors.push(ConfigError::Validation {
                message: format!("{prefix}{field} `{value}` is not a valid column type name"),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
