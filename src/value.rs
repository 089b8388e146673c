//! Renders values for embedding in a statement.

use crate::errors::TransformError;

/// Format a value for splicing into a statement.
///
/// With `raw = false` the value becomes a single-quoted literal with
/// backslash and single-quote escaped; parsing the literal back always yields
/// the original string. With `raw = true` the value is emitted verbatim, but
/// an empty or whitespace-only value is rejected since it would produce a
/// syntactically meaningless statement.
pub fn format_value(value: &str, raw: bool) -> Result<String, TransformError> {
    if raw {
        if value.trim().is_empty() {
            return Err(TransformError::InvalidValue {
                message: "raw value for empty string not supported".to_string(),
            });
        }
        return Ok(value.to_string());
    }
    Ok(quote(value))
}

/// Produce a single-quoted literal equivalent to the original string.
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for ch in value.chars() {
        if ch == '\\' || ch == '\'' {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('\'');
    out
}

/// Parse a single-quoted literal produced by [`quote`], recovering the
/// original string. Returns `None` when `literal` is not a single-quoted
/// literal or ends mid-escape.
pub fn unquote(literal: &str) -> Option<String> {
    let inner = literal.strip_prefix('\'')?.strip_suffix('\'')?;
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            match chars.next() {
                Some(next @ ('\\' | '\'')) => out.push(next),
                Some(next) => {
                    out.push('\\');
                    out.push(next);
                }
                None => return None,
            }
        } else {
            out.push(ch);
        }
    }
    Some(out)
}
