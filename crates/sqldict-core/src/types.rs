// SPDX-FileCopyrightText: 2026 SqlDict Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the codec boundary and the storage layer.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// A single cell as the storage engine sees it.
///
/// The storage crate converts it to and from its driver's value type at the
/// statement boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum StoredValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl StoredValue {
    /// Short name of the storage class, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Integer(_) => "integer",
            Self::Real(_) => "real",
            Self::Text(_) => "text",
            Self::Blob(_) => "blob",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

/// Serializer selectable from configuration.
///
/// `Json` stores values as JSON bytes in a blob column. `None` disables
/// serialization and stores scalar values in their native column form.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SerializerKind {
    #[default]
    Json,
    None,
}
