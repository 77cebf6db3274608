// SPDX-FileCopyrightText: 2026 SqlDict Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversion between caller types and SQLite cells.
//!
//! Keys are always stored natively so they stay comparable inside SQLite;
//! values go through the store's codec.

use rusqlite::types::Value;
use serde::Serialize;
use serde::de::DeserializeOwned;
use sqldict_core::codec::{from_native, to_native};
use sqldict_core::{Codec, SqlDictError, StoredValue};

pub(crate) fn to_sql(value: StoredValue) -> Value {
    match value {
        StoredValue::Null => Value::Null,
        StoredValue::Integer(i) => Value::Integer(i),
        StoredValue::Real(f) => Value::Real(f),
        StoredValue::Text(s) => Value::Text(s),
        StoredValue::Blob(b) => Value::Blob(b),
    }
}

pub(crate) fn from_sql(value: Value) -> StoredValue {
    match value {
        Value::Null => StoredValue::Null,
        Value::Integer(i) => StoredValue::Integer(i),
        Value::Real(f) => StoredValue::Real(f),
        Value::Text(s) => StoredValue::Text(s),
        Value::Blob(b) => StoredValue::Blob(b),
    }
}

pub(crate) fn encode_key<K: Serialize>(key: &K) -> Result<Value, SqlDictError> {
    let stored = to_native(key)?;
    if stored.is_null() {
        return Err(SqlDictError::codec("key", "keys must not be null"));
    }
    Ok(to_sql(stored))
}

/// Decode a key cell.
///
/// A TEXT key column stores integer, real and boolean keys as their decimal
/// text, so a text cell that does not fit `K` is retried as a number.
pub(crate) fn decode_key<K: DeserializeOwned>(raw: Value) -> Result<K, SqlDictError> {
    match raw {
        Value::Text(text) => match from_native(StoredValue::Text(text.clone())) {
            Ok(key) => Ok(key),
            Err(err) => numeric_text(&text).map_or(Err(err), from_native),
        },
        other => from_native(from_sql(other)),
    }
}

fn numeric_text(text: &str) -> Option<StoredValue> {
    if let Ok(int) = text.parse::<i64>() {
        return Some(StoredValue::Integer(int));
    }
    text.parse::<f64>()
        .ok()
        .filter(|real| real.is_finite())
        .map(StoredValue::Real)
}

pub(crate) fn encode_value<V, C: Codec<V>>(codec: &C, value: &V) -> Result<Value, SqlDictError> {
    codec.dumps(value).map(to_sql)
}

pub(crate) fn decode_value<V, C: Codec<V>>(codec: &C, raw: Value) -> Result<V, SqlDictError> {
    codec.loads(from_sql(raw))
}

pub(crate) fn encode_entries<K, V, C, I>(
    codec: &C,
    entries: I,
) -> Result<Vec<(Value, Value)>, SqlDictError>
where
    K: Serialize,
    C: Codec<V>,
    I: IntoIterator<Item = (K, V)>,
{
    entries
        .into_iter()
        .map(|(key, value)| Ok((encode_key(&key)?, encode_value(codec, &value)?)))
        .collect()
}

pub(crate) fn decode_pair<K, V, C>(codec: &C, (key, value): (Value, Value)) -> Result<(K, V), SqlDictError>
where
    K: DeserializeOwned,
    C: Codec<V>,
{
    Ok((decode_key(key)?, decode_value(codec, value)?))
}

/// `KeyNotFound` carrying the key rendered as JSON.
pub(crate) fn missing<K: Serialize>(key: &K) -> SqlDictError {
    let rendered = serde_json::to_string(key).unwrap_or_else(|_| "<unprintable key>".to_string());
    SqlDictError::KeyNotFound { key: rendered }
}

pub(crate) fn row_count(count: i64) -> Result<usize, SqlDictError> {
    usize::try_from(count).map_err(|_| SqlDictError::Internal(format!("invalid row count {count}")))
}
