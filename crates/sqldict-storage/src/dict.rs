// SPDX-FileCopyrightText: 2026 SqlDict Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Blocking dictionary over a SQLite table.

use std::fmt;
use std::marker::PhantomData;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use sqldict_config::StoreConfig;
use sqldict_core::{Codec, MapStore, SerializerKind, SqlDictError};
use tracing::debug;

use crate::boundary::{
    decode_key, decode_pair, decode_value, encode_entries, encode_key, encode_value, missing,
    row_count,
};
use crate::handle::StoreHandle;
use crate::queries::entries;
use crate::schema::ensure_table;
use crate::strategy::run_blocking;

/// A persistent `K -> V` mapping backed by one SQLite table.
///
/// Every operation opens its own connection and blocks the calling thread
/// until it completes, so handles on the same file may be used from
/// different threads or processes at once. Values are encoded with `C`;
/// keys are always stored as native cells.
///
/// ```no_run
/// use sqldict_storage::{MapStore, SqlDict, StoreConfig};
///
/// let dict: SqlDict<String, Vec<i64>> = SqlDict::open(&StoreConfig::new("cache"))?;
/// dict.set(&"a".to_string(), &vec![1, 2, 3])?;
/// assert_eq!(dict.get(&"a".to_string())?, vec![1, 2, 3]);
/// # Ok::<(), sqldict_storage::SqlDictError>(())
/// ```
pub struct SqlDict<K, V, C = SerializerKind> {
    handle: StoreHandle,
    codec: C,
    _types: PhantomData<fn() -> (K, V)>,
}

impl<K, V> SqlDict<K, V, SerializerKind>
where
    K: Serialize + DeserializeOwned,
    V: Serialize + DeserializeOwned,
{
    /// Open the store described by `config`, creating its table if needed.
    pub fn open(config: &StoreConfig) -> Result<Self, SqlDictError> {
        Self::with_codec(config, config.serializer)
    }

    /// Open the store and insert `entries` whose keys are not yet present.
    pub fn open_with_entries<I>(config: &StoreConfig, entries: I) -> Result<Self, SqlDictError>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        Self::with_codec_and_entries(config, config.serializer, entries)
    }
}

impl<K, V, C> SqlDict<K, V, C>
where
    K: Serialize + DeserializeOwned,
    C: Codec<V>,
{
    /// Open the store with an explicit value codec.
    ///
    /// `config.serializer` is ignored.
    pub fn with_codec(config: &StoreConfig, codec: C) -> Result<Self, SqlDictError> {
        Self::with_codec_and_entries(config, codec, std::iter::empty())
    }

    pub fn with_codec_and_entries<I>(
        config: &StoreConfig,
        codec: C,
        entries: I,
    ) -> Result<Self, SqlDictError>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let handle = StoreHandle::from_config(config)?;
        let encoded = encode_entries(&codec, entries)?;
        ensure_table(handle.path(), &handle.spec, handle.target.options, encoded)?;
        debug!(path = %handle.path().display(), table = %handle.spec.table, codec = codec.name(), "store opened");
        Ok(Self {
            handle,
            codec,
            _types: PhantomData,
        })
    }

    /// Resolved path of the backing file.
    pub fn path(&self) -> &Path {
        self.handle.path()
    }

    pub fn table(&self) -> &str {
        &self.handle.spec.table
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }
}

impl<K, V, C> MapStore<K, V> for SqlDict<K, V, C>
where
    K: Serialize + DeserializeOwned,
    C: Codec<V>,
{
    fn get(&self, key: &K) -> Result<V, SqlDictError> {
        self.try_get(key)?.ok_or_else(|| missing(key))
    }

    fn try_get(&self, key: &K) -> Result<Option<V>, SqlDictError> {
        let raw_key = encode_key(key)?;
        let sql = &self.handle.statements.select_value;
        let raw = run_blocking(&self.handle.target, "get", |conn| {
            entries::fetch(conn, sql, &raw_key)
        })?;
        raw.map(|raw| decode_value(&self.codec, raw)).transpose()
    }

    fn set(&self, key: &K, value: &V) -> Result<(), SqlDictError> {
        let raw_key = encode_key(key)?;
        let raw_value = encode_value(&self.codec, value)?;
        let sql = &self.handle.statements.upsert;
        run_blocking(&self.handle.target, "set", |conn| {
            entries::upsert(conn, sql, &raw_key, &raw_value)
        })
    }

    fn contains(&self, key: &K) -> Result<bool, SqlDictError> {
        let raw_key = encode_key(key)?;
        let sql = &self.handle.statements.count_key;
        let count = run_blocking(&self.handle.target, "contains", |conn| {
            entries::count(conn, sql, Some(&raw_key))
        })?;
        Ok(count > 0)
    }

    fn delete(&self, key: &K) -> Result<(), SqlDictError> {
        let raw_key = encode_key(key)?;
        let sql = &self.handle.statements.delete;
        let removed = run_blocking(&self.handle.target, "delete", |conn| {
            entries::remove(conn, sql, &raw_key)
        })?;
        debug!(table = %self.handle.spec.table, removed, "delete");
        Ok(())
    }

    fn len(&self) -> Result<usize, SqlDictError> {
        let sql = &self.handle.statements.count_all;
        row_count(run_blocking(&self.handle.target, "len", |conn| {
            entries::count(conn, sql, None)
        })?)
    }

    fn keys(&self) -> Result<Vec<K>, SqlDictError> {
        let sql = &self.handle.statements.select_keys;
        run_blocking(&self.handle.target, "keys", |conn| {
            entries::scan_column(conn, sql)
        })?
        .into_iter()
        .map(decode_key)
        .collect()
    }

    fn values(&self) -> Result<Vec<V>, SqlDictError> {
        let sql = &self.handle.statements.select_values;
        run_blocking(&self.handle.target, "values", |conn| {
            entries::scan_column(conn, sql)
        })?
        .into_iter()
        .map(|raw| decode_value(&self.codec, raw))
        .collect()
    }

    fn items(&self) -> Result<Vec<(K, V)>, SqlDictError> {
        let sql = &self.handle.statements.select_items;
        run_blocking(&self.handle.target, "items", |conn| {
            entries::scan_pairs(conn, sql)
        })?
        .into_iter()
        .map(|pair| decode_pair(&self.codec, pair))
        .collect()
    }
}

impl<K, V, C> Clone for SqlDict<K, V, C>
where
    C: Clone,
{
    fn clone(&self) -> Self {
        Self {
            handle: self.handle.clone(),
            codec: self.codec.clone(),
            _types: PhantomData,
        }
    }
}

impl<K, V, C> fmt::Debug for SqlDict<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqlDict")
            .field("path", &self.handle.path())
            .field("table", &self.handle.spec.table)
            .finish_non_exhaustive()
    }
}
