// SPDX-FileCopyrightText: 2026 SqlDict Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Turning figment failures into readable store diagnostics.
//!
//! Each figment error becomes one [`ConfigError`]. Unknown keys get a
//! "did you mean" hint and, when the offending file is known, a span
//! pointing at the key.

#![allow(unused_assignments)] // false positive from the miette derive

use figment::error::Kind;
use miette::{Diagnostic, NamedSource, SourceSpan};
use sqldict_core::SqlDictError;
use thiserror::Error;

/// Similarity a candidate key needs before it is offered as a correction.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// A problem with the store configuration, renderable through miette.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("`{key}` is not a store setting")]
    #[diagnostic(
        code(sqldict::config::unknown_key),
        help("{}", unknown_key_help(suggestion.as_deref(), valid_keys))
    )]
    UnknownKey {
        key: String,
        /// Closest valid key, if one is close enough.
        suggestion: Option<String>,
        /// Comma-separated keys accepted at this level.
        valid_keys: String,
        #[label("unknown setting")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    #[error("`{key}` has the wrong type: {detail}")]
    #[diagnostic(code(sqldict::config::invalid_type), help("use {expected}"))]
    InvalidType {
        /// Dotted path of the setting, e.g. `store.busy_timeout_ms`.
        key: String,
        detail: String,
        expected: String,
        #[label("here")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    #[error("required setting `{key}` is missing")]
    #[diagnostic(
        code(sqldict::config::missing_key),
        help("set `{key}` in sqldict.toml or through a SQLDICT_ variable")
    )]
    MissingKey { key: String },

    /// A value parsed but is not usable (empty path, unsafe identifier, ...).
    #[error("invalid store setting: {message}")]
    #[diagnostic(code(sqldict::config::validation))]
    Validation { message: String },

    #[error("could not load configuration: {0}")]
    #[diagnostic(code(sqldict::config::other))]
    Other(String),
}

fn unknown_key_help(suggestion: Option<&str>, valid_keys: &str) -> String {
    let mut help = String::new();
    if let Some(s) = suggestion {
        help.push_str(&format!("did you mean `{s}`? "));
    }
    help.push_str(&format!("accepted keys: {valid_keys}"));
    help
}

impl From<ConfigError> for SqlDictError {
    fn from(error: ConfigError) -> Self {
        SqlDictError::Config(error.to_string())
    }
}

/// Flatten diagnostics into one `SqlDictError::Config`, messages joined by `; `.
pub fn to_store_error(errors: Vec<ConfigError>) -> SqlDictError {
    let joined = errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ");
    SqlDictError::Config(joined)
}

/// Split a figment error into one diagnostic per underlying failure.
///
/// `toml_sources` pairs file names with their contents and is only used to
/// attach spans.
pub fn figment_to_config_errors(
    err: figment::Error,
    toml_sources: &[(String, String)],
) -> Vec<ConfigError> {
    err.into_iter()
        .map(|error| convert_error(&error, toml_sources))
        .collect()
}

fn convert_error(error: &figment::Error, toml_sources: &[(String, String)]) -> ConfigError {
    let invalid = |detail: String, expected: String| ConfigError::InvalidType {
        key: error.path.join("."),
        detail,
        expected,
        span: None,
        src: None,
    };

    match &error.kind {
        Kind::UnknownField(field, expected) => {
            let located = locate_key(error, field, toml_sources);
            let (span, src) = match located {
                Some((span, src)) => (Some(span), Some(src)),
                None => (None, None),
            };
            ConfigError::UnknownKey {
                key: field.clone(),
                suggestion: suggest_key(field, expected),
                valid_keys: expected.join(", "),
                span,
                src,
            }
        }
        Kind::MissingField(field) => ConfigError::MissingKey {
            key: field.to_string(),
        },
        Kind::InvalidType(actual, expected) | Kind::InvalidValue(actual, expected) => {
            invalid(format!("got {actual}"), expected.clone())
        }
        Kind::UnknownVariant(variant, expected) => invalid(
            format!("`{variant}` is not recognized"),
            format!("one of {}", expected.join(", ")),
        ),
        _ => ConfigError::Other(error.to_string()),
    }
}

/// Span of `field` inside the file figment says the error came from.
fn locate_key(
    error: &figment::Error,
    field: &str,
    toml_sources: &[(String, String)],
) -> Option<(SourceSpan, NamedSource<String>)> {
    let figment::Source::File(origin) = error.metadata.as_ref()?.source.as_ref()? else {
        return None;
    };
    let origin = origin.display().to_string();
    let (name, content) = toml_sources.iter().find(|(name, _)| *name == origin)?;
    let offset = find_key_offset(content, &error.path, field)?;
    Some((
        SourceSpan::new(offset.into(), field.len()),
        NamedSource::new(name, content.clone()),
    ))
}

/// Byte offset of the line assigning `field`, searching below the section
/// named by the first element of `path` (or from the top when `path` is empty).
pub fn find_key_offset(content: &str, path: &[String], field: &str) -> Option<usize> {
    let start = match path.first() {
        Some(section) => {
            let header = format!("[{section}]");
            content.find(&header)? + header.len()
        }
        None => 0,
    };

    let mut offset = start;
    for line in content[start..].split_inclusive('\n') {
        let body = line.trim_start();
        let assigns = body
            .strip_prefix(field)
            .is_some_and(|rest| rest.trim_start().starts_with('='));
        if assigns {
            return Some(offset + line.len() - body.len());
        }
        offset += line.len();
    }
    None
}

/// Closest entry of `valid_keys` to `unknown` by Jaro-Winkler similarity.
pub fn suggest_key(unknown: &str, valid_keys: &[&str]) -> Option<String> {
    valid_keys
        .iter()
        .map(|candidate| (strsim::jaro_winkler(unknown, candidate), *candidate))
        .filter(|(score, _)| *score > SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, candidate)| candidate.to_string())
}

/// Print every diagnostic to stderr, falling back to plain text if
/// graphical rendering fails.
pub fn render_errors(errors: &[ConfigError]) {
    let handler = miette::GraphicalReportHandler::new();
    for error in errors {
        let mut out = String::new();
        if handler.render_report(&mut out, error as &dyn Diagnostic).is_ok() {
            eprint!("{out}");
        } else {
            eprintln!("Error: {error}");
        }
    }
}
