//! Primitive normalizers shared by the rule table.
//!
//! Each function looks at a single raw value and either produces the
//! normalized primitive or `None`. Policy (defaults, omission) lives in
//! [`rules`](crate::rules); nothing here knows about settings.

use percent_encoding::{CONTROLS, utf8_percent_encode};

use crate::value::RawValue;

const TRUTHY: [&str; 4] = ["1", "true", "yes", "on"];
const FALSY: [&str; 4] = ["0", "false", "no", "off"];

/// Synonyms that all mean "prompt the user".
pub const ASK_ALIASES: [&str; 5] = ["ask", "prompt", "query", "interrogate", "demand"];

/// Interpret a boolean-alike: real booleans, integers `1`/`0`, and the strings
/// in [`TRUTHY`]/[`FALSY`] (case-insensitive, surrounding whitespace ignored).
pub fn bool_alike(raw: &RawValue) -> Option<bool> {
    match raw {
        RawValue::Bool(b) => Some(*b),
        RawValue::Number(n) => match n.as_i64() {
            Some(1) => Some(true),
            Some(0) => Some(false),
            _ => None,
        },
        RawValue::String(s) => {
            let s = s.trim().to_ascii_lowercase();
            if TRUTHY.contains(&s.as_str()) {
                Some(true)
            } else if FALSY.contains(&s.as_str()) {
                Some(false)
            } else {
                None
            }
        }
        _ => None,
    }
}

/// Whether `raw` is one of the [`ASK_ALIASES`], in any case.
pub fn is_ask_alias(raw: &RawValue) -> bool {
    match raw {
        RawValue::String(s) => {
            let s = s.trim();
            ASK_ALIASES.iter().any(|alias| alias.eq_ignore_ascii_case(s))
        }
        _ => false,
    }
}

/// Integer or integer string. Floats and booleans are not integers.
pub fn integer_alike(raw: &RawValue) -> Option<i64> {
    match raw {
        RawValue::Number(n) => n.as_i64(),
        RawValue::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Sanitize a URL-ish string: whitespace and control characters are removed,
/// non-ASCII characters are percent-encoded. Empty results are `None`.
pub fn sanitize_url(s: &str) -> Option<String> {
    let stripped: String = s
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect();
    if stripped.is_empty() {
        return None;
    }
    Some(utf8_percent_encode(&stripped, CONTROLS).to_string())
}

/// Normalize a path string to forward slashes with no stray whitespace or
/// control characters and no trailing slash. A lone `/` survives.
pub fn normalize_path(s: &str) -> Option<String> {
    let cleaned: String = s
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .map(|c| if c == '\\' { '/' } else { c })
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    let trimmed = cleaned.trim_end_matches('/');
    if trimmed.is_empty() {
        return Some("/".to_string());
    }
    Some(trimmed.to_string())
}
