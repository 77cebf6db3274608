// SPDX-FileCopyrightText: 2026 SqlDict Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Suspendable dictionary over a SQLite table.

use std::fmt;
use std::marker::PhantomData;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use sqldict_config::StoreConfig;
use sqldict_core::{AsyncMapStore, Codec, SerializerKind, SqlDictError};
use tracing::debug;

use crate::boundary::{
    decode_key, decode_pair, decode_value, encode_entries, encode_key, encode_value, missing,
    row_count,
};
use crate::handle::StoreHandle;
use crate::queries::entries;
use crate::schema::ensure_table_async;
use crate::strategy::run_suspended;

/// The async twin of [`SqlDict`](crate::SqlDict).
///
/// Same table layout, same codecs, same per-operation connections. Each
/// operation is a suspension point: while SQLite works (or waits on a lock)
/// the task yields and other tasks keep running. A blocking and a
/// suspendable handle on the same file see each other's writes.
pub struct AsyncSqlDict<K, V, C = SerializerKind> {
    handle: StoreHandle,
    codec: C,
    _types: PhantomData<fn() -> (K, V)>,
}

impl<K, V> AsyncSqlDict<K, V, SerializerKind>
where
    K: Serialize + DeserializeOwned,
    V: Serialize + DeserializeOwned,
{
    /// Open the store described by `config`, creating its table if needed.
    pub async fn open(config: &StoreConfig) -> Result<Self, SqlDictError> {
        Self::with_codec(config, config.serializer).await
    }

    /// Open the store and insert `entries` whose keys are not yet present.
    pub async fn open_with_entries<I>(config: &StoreConfig, entries: I) -> Result<Self, SqlDictError>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        Self::with_codec_and_entries(config, config.serializer, entries).await
    }
}

impl<K, V, C> AsyncSqlDict<K, V, C>
where
    K: Serialize + DeserializeOwned,
    C: Codec<V>,
{
    pub async fn with_codec(config: &StoreConfig, codec: C) -> Result<Self, SqlDictError> {
        Self::with_codec_and_entries(config, codec, std::iter::empty()).await
    }

    pub async fn with_codec_and_entries<I>(
        config: &StoreConfig,
        codec: C,
        entries: I,
    ) -> Result<Self, SqlDictError>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let handle = StoreHandle::from_config(config)?;
        let encoded = encode_entries(&codec, entries)?;
        ensure_table_async(handle.path(), &handle.spec, handle.target.options, encoded).await?;
        debug!(path = %handle.path().display(), table = %handle.spec.table, codec = codec.name(), "async store opened");
        Ok(Self {
            handle,
            codec,
            _types: PhantomData,
        })
    }

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

#[async_trait]
impl<K, V, C> AsyncMapStore<K, V> for AsyncSqlDict<K, V, C>
where
    K: Serialize + DeserializeOwned + Send + Sync + 'static,
    V: Send + Sync + 'static,
    C: Codec<V>,
{
    async fn get(&self, key: &K) -> Result<V, SqlDictError> {
        self.try_get(key).await?.ok_or_else(|| missing(key))
    }

    async fn try_get(&self, key: &K) -> Result<Option<V>, SqlDictError> {
        let raw_key = encode_key(key)?;
        let statements = Arc::clone(&self.handle.statements);
        let raw = run_suspended(&self.handle.target, "get", move |conn| {
            entries::fetch(conn, &statements.select_value, &raw_key)
        })
        .await?;
        raw.map(|raw| decode_value(&self.codec, raw)).transpose()
    }

    async fn set(&self, key: &K, value: &V) -> Result<(), SqlDictError> {
        let raw_key = encode_key(key)?;
        let raw_value = encode_value(&self.codec, value)?;
        let statements = Arc::clone(&self.handle.statements);
        run_suspended(&self.handle.target, "set", move |conn| {
            entries::upsert(conn, &statements.upsert, &raw_key, &raw_value)
        })
        .await
    }

    async fn contains(&self, key: &K) -> Result<bool, SqlDictError> {
        let raw_key = encode_key(key)?;
        let statements = Arc::clone(&self.handle.statements);
        let count = run_suspended(&self.handle.target, "contains", move |conn| {
            entries::count(conn, &statements.count_key, Some(&raw_key))
        })
        .await?;
        Ok(count > 0)
    }

    async fn delete(&self, key: &K) -> Result<(), SqlDictError> {
        let raw_key = encode_key(key)?;
        let statements = Arc::clone(&self.handle.statements);
        let removed = run_suspended(&self.handle.target, "delete", move |conn| {
            entries::remove(conn, &statements.delete, &raw_key)
        })
        .await?;
        debug!(table = %self.handle.spec.table, removed, "delete");
        Ok(())
    }

    async fn len(&self) -> Result<usize, SqlDictError> {
        let statements = Arc::clone(&self.handle.statements);
        let count = run_suspended(&self.handle.target, "len", move |conn| {
            entries::count(conn, &statements.count_all, None)
        })
        .await?;
        row_count(count)
    }

    async fn keys(&self) -> Result<Vec<K>, SqlDictError> {
        let statements = Arc::clone(&self.handle.statements);
        run_suspended(&self.handle.target, "keys", move |conn| {
            entries::scan_column(conn, &statements.select_keys)
        })
        .await?
        .into_iter()
        .map(decode_key)
        .collect()
    }

    async fn values(&self) -> Result<Vec<V>, SqlDictError> {
        let statements = Arc::clone(&self.handle.statements);
        run_suspended(&self.handle.target, "values", move |conn| {
            entries::scan_column(conn, &statements.select_values)
        })
        .await?
        .into_iter()
        .map(|raw| decode_value(&self.codec, raw))
        .collect()
    }

    async fn items(&self) -> Result<Vec<(K, V)>, SqlDictError> {
        let statements = Arc::clone(&self.handle.statements);
        run_suspended(&self.handle.target, "items", move |conn| {
            entries::scan_pairs(conn, &statements.select_items)
        })
        .await?
        .into_iter()
        .map(|pair| decode_pair(&self.codec, pair))
        .collect()
    }
}

impl<K, V, C> Clone for AsyncSqlDict<K, V, C>
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

impl<K, V, C> fmt::Debug for AsyncSqlDict<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncSqlDict")
            .field("path", &self.handle.path())
            .field("table", &self.handle.spec.table)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SqlDict;
    use serde_json::{Value, json};
    use sqldict_core::MapStore;
    use tempfile::{TempDir, tempdir};

    fn config(dir: &TempDir, name: &str) -> StoreConfig {
        StoreConfig::new(dir.path().join(name).to_string_lossy().into_owned())
    }

    fn s(v: &str) -> String {
        v.to_string()
    }

    #[tokio::test]
    async fn cache_scenario() {
        let dir = tempdir().unwrap();
        let dict: AsyncSqlDict<String, Value> =
            AsyncSqlDict::open(&config(&dir, "cache")).await.unwrap();

        dict.set(&s("a"), &json!([1, 2, 3])).await.unwrap();
        dict.set(&s("b"), &json!({"x": 1})).await.unwrap();

        let mut keys = dict.keys().await.unwrap();
        keys.sort();
        assert_eq!(keys, vec![s("a"), s("b")]);
        assert_eq!(dict.get(&s("b")).await.unwrap(), json!({"x": 1}));
        assert_eq!(dict.len().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn missing_and_delete() {
        let dir = tempdir().unwrap();
        let dict: AsyncSqlDict<String, i64> =
            AsyncSqlDict::open(&config(&dir, "delete")).await.unwrap();

        assert!(dict.get(&s("k")).await.unwrap_err().is_not_found());
        assert_eq!(dict.get_or(&s("k"), 5).await.unwrap(), 5);

        dict.set(&s("k"), &1).await.unwrap();
        assert!(dict.contains(&s("k")).await.unwrap());
        dict.delete(&s("k")).await.unwrap();
        dict.delete(&s("k")).await.unwrap();
        assert!(!dict.contains(&s("k")).await.unwrap());
        assert!(dict.is_empty().await.unwrap());
    }

    #[tokio::test]
    async fn scans_and_seed_entries() {
        let dir = tempdir().unwrap();
        let dict: AsyncSqlDict<String, i64> = AsyncSqlDict::open_with_entries(
            &config(&dir, "scan"),
            vec![(s("a"), 1), (s("b"), 2)],
        )
        .await
        .unwrap();

        let mut values = dict.values().await.unwrap();
        values.sort();
        assert_eq!(values, vec![1, 2]);

        let mut items = dict.items().await.unwrap();
        items.sort();
        assert_eq!(items, vec![(s("a"), 1), (s("b"), 2)]);
    }

    #[tokio::test]
    async fn integer_keys_scan_back_on_the_default_layout() {
        let dir = tempdir().unwrap();
        let dict: AsyncSqlDict<i64, String> =
            AsyncSqlDict::open(&config(&dir, "intkeys")).await.unwrap();
        dict.set(&7, &s("seven")).await.unwrap();

        assert_eq!(dict.keys().await.unwrap(), vec![7]);
        assert_eq!(dict.items().await.unwrap(), vec![(7, s("seven"))]);
    }

    #[tokio::test]
    async fn interleaved_operations_on_one_handle() {
        let dir = tempdir().unwrap();
        let dict: AsyncSqlDict<String, i64> =
            AsyncSqlDict::open(&config(&dir, "interleave")).await.unwrap();

        let (ka, kb, kc) = (s("a"), s("b"), s("c"));
        let (a, b, c) = tokio::join!(dict.set(&ka, &1), dict.set(&kb, &2), dict.set(&kc, &3));
        a.unwrap();
        b.unwrap();
        c.unwrap();
        assert_eq!(dict.len().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn blocking_and_async_handles_share_rows() {
        let dir = tempdir().unwrap();
        let cfg = config(&dir, "mixed");
        let suspendable: AsyncSqlDict<String, i64> = AsyncSqlDict::open(&cfg).await.unwrap();
        suspendable.set(&s("from_async"), &1).await.unwrap();

        let blocking: SqlDict<String, i64> = SqlDict::open(&cfg).unwrap();
        assert_eq!(blocking.get(&s("from_async")).unwrap(), 1);
        blocking.set(&s("from_blocking"), &2).unwrap();

        assert_eq!(suspendable.get(&s("from_blocking")).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn corrupt_value_is_codec_error() {
        let dir = tempdir().unwrap();
        let dict: AsyncSqlDict<String, Value> =
            AsyncSqlDict::open(&config(&dir, "corrupt")).await.unwrap();
        rusqlite::Connection::open(dict.path())
            .unwrap()
            .execute("INSERT INTO kv_store (key, val) VALUES ('bad', x'ff00')", [])
            .unwrap();

        assert!(dict.get(&s("bad")).await.unwrap_err().is_codec());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn handle_is_usable_from_spawned_tasks() {
        let dir = tempdir().unwrap();
        let dict: Arc<AsyncSqlDict<String, i64>> =
            Arc::new(AsyncSqlDict::open(&config(&dir, "spawned")).await.unwrap());

        let mut tasks = Vec::new();
        for i in 0..8_i64 {
            let dict = Arc::clone(&dict);
            tasks.push(tokio::spawn(async move {
                dict.set(&format!("k{i}"), &i).await
            }));
        }
        for task in tasks {
            task.await.unwrap().unwrap();
        }
        assert_eq!(dict.len().await.unwrap(), 8);
    }
}
