// SPDX-FileCopyrightText: 2026 SqlDict Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared types re-exported for callers of the storage crate.
//!
//! The canonical definitions live in `sqldict-core` so codecs and store
//! traits can be used without pulling in SQLite.

pub use sqldict_core::{
    AsyncMapStore, BytesCodec, Codec, JsonCodec, MapStore, NativeCodec, SerializerKind,
    SqlDictError, StoredValue,
};
