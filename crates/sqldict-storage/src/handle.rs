// SPDX-FileCopyrightText: 2026 SqlDict Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! State shared by the blocking and suspendable stores.

use std::path::Path;
use std::sync::Arc;

use sqldict_config::StoreConfig;
use sqldict_core::SqlDictError;

use crate::database::{ConnectionOptions, Target};
use crate::path::resolve_path;
use crate::schema::{Statements, TableSpec};

/// A resolved file, a validated table layout and its rendered SQL.
///
/// Holds no connection; cloning is cheap.
#[derive(Debug, Clone)]
pub(crate) struct StoreHandle {
    pub(crate) target: Target,
    pub(crate) spec: TableSpec,
    pub(crate) statements: Arc<Statements>,
}

impl StoreHandle {
    pub(crate) fn from_config(config: &StoreConfig) -> Result<Self, SqlDictError> {
        let spec = TableSpec::from_config(config)?;
        let path = resolve_path(&config.path)?;
        Ok(Self {
            target: Target {
                path,
                options: ConnectionOptions::from(config),
            },
            statements: Arc::new(Statements::new(&spec)),
            spec,
        })
    }

    pub(crate) fn path(&self) -> &Path {
        &self.target.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_path_and_renders_statements() {
        let handle = StoreHandle::from_config(
            &StoreConfig::new("/tmp/sqldict-handle").with_table_name("sessions"),
        )
        .unwrap();
        assert_eq!(handle.path(), Path::new("/tmp/sqldict-handle.db"));
        assert!(handle.statements.create.contains("\"sessions\""));
    }

    #[test]
    fn invalid_config_fails_before_touching_disk() {
        let err = StoreHandle::from_config(&StoreConfig::new("")).unwrap_err();
        assert!(matches!(err, SqlDictError::Config(_)));
    }
}
