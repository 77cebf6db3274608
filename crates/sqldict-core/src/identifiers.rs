// SPDX-FileCopyrightText: 2026 SqlDict Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQL identifier quoting and validation.
//!
//! Table names, column names and column type tokens are interpolated into SQL
//! text, so they are validated up front and identifiers are always quoted.

/// Quote a SQL identifier using ANSI double-quoting.
///
/// Embedded double-quotes are escaped by doubling them.
///
/// ```
/// use sqldict_core::identifiers::quote_ident;
///
/// assert_eq!(quote_ident("kv_store"), "\"kv_store\"");
/// assert_eq!(quote_ident("a\"b"), "\"a\"\"b\"");
/// ```
#[inline]
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Returns true if `name` is a plain identifier: an ASCII letter or `_`
/// followed by ASCII alphanumerics or `_`.
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Returns true if `token` looks like a column type name such as `TEXT`,
/// `INTEGER` or `VARCHAR(64)`.
pub fn is_valid_type_name(token: &str) -> bool {
    let token = token.trim();
    let mut chars = token.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {}
        _ => return false,
    }
    let mut depth = 0_i32;
    for c in chars {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            c if c.is_ascii_alphanumeric() || matches!(c, '_' | ' ' | ',') => {}
            _ => return false,
        }
    }
    depth == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_ident_escapes_embedded_quotes() {
        assert_eq!(quote_ident("users"), "\"users\"");
        assert_eq!(quote_ident("select"), "\"select\"");
        assert_eq!(quote_ident("x\"; DROP"), "\"x\"\"; DROP\"");
    }

    #[test]
    fn plain_identifiers_are_accepted() {
        for name in ["kv_store", "key", "val", "_private", "t2"] {
            assert!(is_valid_identifier(name), "{name} should be valid");
        }
    }

    #[test]
    fn unsafe_identifiers_are_rejected() {
        for name in ["", "2fast", "kv store", "kv;drop", "naïve", "a-b", "\"q\""] {
            assert!(!is_valid_identifier(name), "{name:?} should be rejected");
        }
    }

    #[test]
    fn common_type_names_are_accepted() {
        for token in ["TEXT", "BLOB", "INTEGER", "String", "VARCHAR(64)", "DECIMAL(10, 2)", "double precision"] {
            assert!(is_valid_type_name(token), "{token} should be valid");
        }
    }

    #[test]
    fn injected_type_names_are_rejected() {
        for token in ["", "1TEXT", "TEXT)", "TEXT(", "TEXT; DROP TABLE kv", "BLOB -- comment", "TEXT'"] {
            assert!(!is_valid_type_name(token), "{token:?} should be rejected");
        }
    }
}
