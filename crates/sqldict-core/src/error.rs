// SPDX-FileCopyrightText: 2026 SqlDict Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the SqlDict key-value store.

use thiserror::Error;

/// The error type returned by every store, codec, and configuration operation.
#[derive(Debug, Error)]
pub enum SqlDictError {
    /// Invalid store parameters (empty path, bad identifier, bad column type).
    #[error("configuration error: {0}")]
    Config(String),

    /// No row exists for the requested key.
    #[error("key not found: {key}")]
    KeyNotFound {
        /// The key, rendered as JSON text.
        key: String,
    },

    /// The database file is locked by another writer and the busy timeout expired.
    #[error("database is busy: {source}")]
    Busy {
        /// The SQLite busy or locked failure.
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The codec failed to encode or decode a value.
    #[error("codec error ({codec}): {message}")]
    Codec {
        /// Name of the codec that failed (`json`, `none`, `bytes`, or `key`).
        codec: &'static str,
        /// What went wrong, e.g. "failed to deserialize value".
        message: String,
        /// The serializer's own error, when there is one.
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Storage engine errors (open failure, query failure, closed connection).
    #[error("storage error: {source}")]
    Storage {
        /// The rusqlite or tokio-rusqlite error.
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl SqlDictError {
    /// Builds a codec error without an underlying cause.
    pub fn codec(codec: &'static str, message: impl Into<String>) -> Self {
        Self::Codec {
            codec,
            message: message.into(),
            source: None,
        }
    }

    /// Builds a codec error wrapping the serializer's own error.
    pub fn codec_with_source<E>(codec: &'static str, message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Codec {
            codec,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Returns true if this error reports a missing key.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::KeyNotFound { .. })
    }

    /// Returns true if this error reports a locked database file.
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Busy { .. })
    }

    /// Returns true if this error came from the codec.
    pub fn is_codec(&self) -> bool {
        matches!(self, Self::Codec { .. })
    }
}
