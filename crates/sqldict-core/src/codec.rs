// SPDX-FileCopyrightText: 2026 SqlDict Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The codec boundary between caller values and stored cells.
//!
//! A [`Codec`] turns a value into a [`StoredValue`] on write and back on
//! read. Stores never inspect values themselves; everything they persist
//! passes through exactly one codec.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value as Json;

use crate::error::SqlDictError;
use crate::types::{SerializerKind, StoredValue};

const JSON: &str = "json";
const NATIVE: &str = "none";
const BYTES: &str = "bytes";

/// Pluggable serializer for stored values.
pub trait Codec<V>: Send + Sync + 'static {
    /// Name reported in codec errors.
    fn name(&self) -> &'static str;

    /// Encodes a value into the cell written to the value column.
    fn dumps(&self, value: &V) -> Result<StoredValue, SqlDictError>;

    /// Decodes a cell read from the value column.
    fn loads(&self, stored: StoredValue) -> Result<V, SqlDictError>;
}

/// Stores values as JSON bytes in a blob cell.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl<V> Codec<V> for JsonCodec
where
    V: Serialize + DeserializeOwned,
{
    fn name(&self) -> &'static str {
        JSON
    }

    fn dumps(&self, value: &V) -> Result<StoredValue, SqlDictError> {
        serde_json::to_vec(value)
            .map(StoredValue::Blob)
            .map_err(|e| SqlDictError::codec_with_source(JSON, "failed to serialize value", e))
    }

    fn loads(&self, stored: StoredValue) -> Result<V, SqlDictError> {
        let parsed = match stored {
            StoredValue::Blob(bytes) => serde_json::from_slice(&bytes),
            // Rows written by hand or by other tools often hold JSON as text.
            StoredValue::Text(text) => serde_json::from_str(&text),
            other => {
                return Err(SqlDictError::codec(
                    JSON,
                    format!("expected a blob, found {}", other.kind()),
                ));
            }
        };
        parsed.map_err(|e| SqlDictError::codec_with_source(JSON, "failed to deserialize value", e))
    }
}

/// Stores scalar values in their native column form, without serialization.
///
/// Strings become text, integers and booleans become integers, floats become
/// reals and `None`/unit become null. Sequences and maps are rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeCodec;

impl<V> Codec<V> for NativeCodec
where
    V: Serialize + DeserializeOwned,
{
    fn name(&self) -> &'static str {
        NATIVE
    }

    fn dumps(&self, value: &V) -> Result<StoredValue, SqlDictError> {
        to_native(value)
    }

    fn loads(&self, stored: StoredValue) -> Result<V, SqlDictError> {
        from_native(stored)
    }
}

/// Passes raw bytes through as a blob cell.
#[derive(Debug, Clone, Copy, Default)]
pub struct BytesCodec;

impl Codec<Vec<u8>> for BytesCodec {
    fn name(&self) -> &'static str {
        BYTES
    }

    fn dumps(&self, value: &Vec<u8>) -> Result<StoredValue, SqlDictError> {
        Ok(StoredValue::Blob(value.clone()))
    }

    fn loads(&self, stored: StoredValue) -> Result<Vec<u8>, SqlDictError> {
        match stored {
            StoredValue::Blob(bytes) => Ok(bytes),
            StoredValue::Text(text) => Ok(text.into_bytes()),
            other => Err(SqlDictError::codec(
                BYTES,
                format!("expected a blob, found {}", other.kind()),
            )),
        }
    }
}

impl<V> Codec<V> for SerializerKind
where
    V: Serialize + DeserializeOwned,
{
    fn name(&self) -> &'static str {
        match self {
            Self::Json => JSON,
            Self::None => NATIVE,
        }
    }

    fn dumps(&self, value: &V) -> Result<StoredValue, SqlDictError> {
        match self {
            Self::Json => JsonCodec.dumps(value),
            Self::None => to_native(value),
        }
    }

    fn loads(&self, stored: StoredValue) -> Result<V, SqlDictError> {
        match self {
            Self::Json => JsonCodec.loads(stored),
            Self::None => from_native(stored),
        }
    }
}

/// Maps a serde scalar onto its native cell.
///
/// Keys always go through this mapping, whatever the value codec is.
pub fn to_native<T>(value: &T) -> Result<StoredValue, SqlDictError>
where
    T: Serialize + ?Sized,
{
    let json = serde_json::to_value(value)
        .map_err(|e| SqlDictError::codec_with_source(NATIVE, "failed to serialize value", e))?;
    match json {
        Json::Null => Ok(StoredValue::Null),
        Json::Bool(flag) => Ok(StoredValue::Integer(i64::from(flag))),
        Json::Number(number) => {
            if let Some(int) = number.as_i64() {
                Ok(StoredValue::Integer(int))
            } else if number.is_u64() {
                Err(SqlDictError::codec(
                    NATIVE,
                    format!("integer {number} does not fit in a signed 64-bit column"),
                ))
            } else {
                number.as_f64().map(StoredValue::Real).ok_or_else(|| {
                    SqlDictError::codec(NATIVE, format!("number {number} is not representable"))
                })
            }
        }
        Json::String(text) => Ok(StoredValue::Text(text)),
        Json::Array(_) | Json::Object(_) => Err(SqlDictError::codec(
            NATIVE,
            "only scalar values can be stored without a serializer",
        )),
    }
}

/// Maps a native cell back onto a serde scalar.
///
/// Integer cells holding 0 or 1 also decode into `bool`, since booleans are
/// written as integers.
pub fn from_native<T>(stored: StoredValue) -> Result<T, SqlDictError>
where
    T: DeserializeOwned,
{
    let flag = match stored {
        StoredValue::Integer(0) => Some(false),
        StoredValue::Integer(1) => Some(true),
        _ => None,
    };
    let json = match stored {
        StoredValue::Null => Json::Null,
        StoredValue::Integer(int) => Json::from(int),
        StoredValue::Real(real) => serde_json::Number::from_f64(real)
            .map(Json::Number)
            .ok_or_else(|| {
                SqlDictError::codec(NATIVE, format!("non-finite real {real} cannot be decoded"))
            })?,
        StoredValue::Text(text) => Json::String(text),
        StoredValue::Blob(bytes) => String::from_utf8(bytes)
            .map(Json::String)
            .map_err(|e| SqlDictError::codec_with_source(NATIVE, "blob is not valid UTF-8 text", e))?,
    };

    match serde_json::from_value(json) {
        Ok(value) => Ok(value),
        Err(err) => match flag {
            Some(flag) => serde_json::from_value(Json::Bool(flag)).map_err(|_| {
                SqlDictError::codec_with_source(
                    NATIVE,
                    "stored value does not match the requested type",
                    err,
                )
            }),
            None => Err(SqlDictError::codec_with_source(
                NATIVE,
                "stored value does not match the requested type",
                err,
            )),
        },
    }
}
