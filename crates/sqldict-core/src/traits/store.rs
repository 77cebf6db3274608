// SPDX-FileCopyrightText: 2026 SqlDict Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dictionary-like access to a persistent key-value table.

use async_trait::async_trait;

use crate::error::SqlDictError;

/// A persistent mapping driven from synchronous code.
///
/// Every method is a single independent operation against the backing file.
/// Sequences returned by [`keys`](MapStore::keys), [`values`](MapStore::values)
/// and [`items`](MapStore::items) are fully read before the call returns and
/// come back in no particular order.
pub trait MapStore<K, V> {
    /// Returns the value stored under `key`, or [`SqlDictError::KeyNotFound`].
    fn get(&self, key: &K) -> Result<V, SqlDictError>;

    /// Returns the value stored under `key`, or `None` if there is no row.
    fn try_get(&self, key: &K) -> Result<Option<V>, SqlDictError>;

    /// Returns the value stored under `key`, or `default` if there is no row.
    ///
    /// Codec and storage failures are still reported.
    fn get_or(&self, key: &K, default: V) -> Result<V, SqlDictError> {
        Ok(self.try_get(key)?.unwrap_or(default))
    }

    /// Inserts or overwrites the value stored under `key`.
    fn set(&self, key: &K, value: &V) -> Result<(), SqlDictError>;

    /// Returns true if a row exists for `key`.
    fn contains(&self, key: &K) -> Result<bool, SqlDictError>;

    /// Removes the row for `key`. Removing an absent key is a no-op.
    fn delete(&self, key: &K) -> Result<(), SqlDictError>;

    /// Number of rows in the table.
    fn len(&self) -> Result<usize, SqlDictError>;

    fn is_empty(&self) -> Result<bool, SqlDictError> {
        Ok(self.len()? == 0)
    }

    fn keys(&self) -> Result<Vec<K>, SqlDictError>;

    fn values(&self) -> Result<Vec<V>, SqlDictError>;

    fn items(&self) -> Result<Vec<(K, V)>, SqlDictError>;
}

/// A persistent mapping whose operations are suspension points.
///
/// Same contract as [`MapStore`]; each call yields to the runtime while the
/// connection opens, while the statement runs, and while it commits.
#[async_trait]
pub trait AsyncMapStore<K, V>: Send + Sync
where
    K: Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    async fn get(&self, key: &K) -> Result<V, SqlDictError>;

    async fn try_get(&self, key: &K) -> Result<Option<V>, SqlDictError>;

    async fn get_or(&self, key: &K, default: V) -> Result<V, SqlDictError> {
        Ok(self.try_get(key).await?.unwrap_or(default))
    }

    async fn set(&self, key: &K, value: &V) -> Result<(), SqlDictError>;

    async fn contains(&self, key: &K) -> Result<bool, SqlDictError>;

    async fn delete(&self, key: &K) -> Result<(), SqlDictError>;

    async fn len(&self) -> Result<usize, SqlDictError>;

    async fn is_empty(&self) -> Result<bool, SqlDictError> {
        Ok(self.len().await? == 0)
    }

    async fn keys(&self) -> Result<Vec<K>, SqlDictError>;

    async fn values(&self) -> Result<Vec<V>, SqlDictError>;

    async fn items(&self) -> Result<Vec<(K, V)>, SqlDictError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MemoryMap {
        rows: RefCell<HashMap<String, i64>>,
    }

    impl MapStore<String, i64> for MemoryMap {
        fn get(&self, key: &String) -> Result<i64, SqlDictError> {
            self.try_get(key)?
                .ok_or_else(|| SqlDictError::KeyNotFound { key: key.clone() })
        }

        fn try_get(&self, key: &String) -> Result<Option<i64>, SqlDictError> {
            Ok(self.rows.borrow().get(key).copied())
        }

        fn set(&self, key: &String, value: &i64) -> Result<(), SqlDictError> {
            self.rows.borrow_mut().insert(key.clone(), *value);
            Ok(())
        }

        fn contains(&self, key: &String) -> Result<bool, SqlDictError> {
            Ok(self.rows.borrow().contains_key(key))
        }

        fn delete(&self, key: &String) -> Result<(), SqlDictError> {
            self.rows.borrow_mut().remove(key);
            Ok(())
        }

        fn len(&self) -> Result<usize, SqlDictError> {
            Ok(self.rows.borrow().len())
        }

        fn keys(&self) -> Result<Vec<String>, SqlDictError> {
            Ok(self.rows.borrow().keys().cloned().collect())
        }

        fn values(&self) -> Result<Vec<i64>, SqlDictError> {
            Ok(self.rows.borrow().values().copied().collect())
        }

        fn items(&self) -> Result<Vec<(String, i64)>, SqlDictError> {
            Ok(self
                .rows
                .borrow()
                .iter()
                .map(|(k, v)| (k.clone(), *v))
                .collect())
        }
    }

    #[test]
    fn get_or_falls_back_only_for_missing_keys() {
        let map = MemoryMap::default();
        map.set(&"a".to_string(), &1).unwrap();

        assert_eq!(map.get_or(&"a".to_string(), 9).unwrap(), 1);
        assert_eq!(map.get_or(&"b".to_string(), 9).unwrap(), 9);
        assert!(map.get(&"b".to_string()).unwrap_err().is_not_found());
    }

    #[test]
    fn is_empty_tracks_len() {
        let map = MemoryMap::default();
        assert!(map.is_empty().unwrap());
        map.set(&"a".to_string(), &1).unwrap();
        assert!(!map.is_empty().unwrap());
        map.delete(&"a".to_string()).unwrap();
        assert!(map.is_empty().unwrap());
    }
}
