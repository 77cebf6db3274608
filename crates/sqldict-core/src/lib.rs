// SPDX-FileCopyrightText: 2026 SqlDict Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the SqlDict key-value store.
//!
//! This crate provides the error taxonomy, the stored-cell model, the codec
//! capability and the mapping traits shared by the storage and configuration
//! crates. It has no dependency on the storage engine.

pub mod codec;
pub mod error;
pub mod identifiers;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use codec::{BytesCodec, Codec, JsonCodec, NativeCodec};
pub use error::SqlDictError;
pub use traits::{AsyncMapStore, MapStore};
pub use types::{SerializerKind, StoredValue};
