//! Common utilities for TypeScript code generation.
//!
//! This module provides shared helper functions used by naming and printing.

/// Check if an identifier needs quoting to be used as a property or enum key.
///
/// Returns true if the name:
/// - Is empty
/// - Doesn't start with a letter, underscore, or dollar sign
/// - Contains characters other than alphanumeric, underscore, or dollar sign
pub fn needs_bracket_notation(name: &str) -> bool {
    name.is_empty()
        || !name
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        || !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Escape a string for use in a double-quoted JavaScript/TypeScript literal.
/// Escapes backslashes and double quotes.
pub fn escape_js_string(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Render a single-quoted string literal, escaping backslashes and single quotes.
pub fn single_quoted(s: &str) -> String {
    format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'"))
}

/// Quote a string if needed for use as a property key or enum key.
/// Returns the name quoted with escaped special characters if needed,
/// or the name unchanged if it's a valid identifier.
pub fn quote_if_needed(name: &str) -> String {
    if needs_bracket_notation(name) {
        format!("\"{}\"", escape_js_string(name))
    } else {
        name.to_string()
    }
}

/// Key for an enum member whose value is `value`.
///
/// TypeScript rejects numeric member names, so those get a leading `_`.
pub fn enum_member_key(value: &str) -> String {
    let is_numeric =
        value.parse::<f64>().is_ok() && value.chars().any(|c| c.is_ascii_digit());
    if is_numeric {
        quote_if_needed(&format!("_{value}"))
    } else {
        quote_if_needed(value)
    }
}

/// Capitalize the first letter of a string.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}
