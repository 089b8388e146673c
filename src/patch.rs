//! Pure content computation for add/update/remove.
//!
//! Every mutation is a byte-span splice against the original buffer, never a
//! global find-and-replace, so identical text elsewhere in the file is never
//! disturbed and every byte outside the altered span survives verbatim.

use crate::errors::TransformError;
use crate::scan::{ConfigKind, Definition};

/// Insertion point used by `add` when the caller gives none.
pub const DEFAULT_ANCHOR: &str = "/* That's all, stop editing!";

/// Separator between an inserted statement and its anchor.
pub const DEFAULT_BUFFER: &str = "\n\n";

/// Which side of the anchor a new statement lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Placement {
    #[default]
    Before,
    After,
}

/// Render the canonical statement form for a name/value pair.
pub fn canonical_statement(kind: ConfigKind, name: &str, value: &str) -> String {
    match kind {
        ConfigKind::Constant => format!("define( '{name}', {value} );"),
        ConfigKind::Variable => format!("${name} = {value};"),
    }
}

/// Splice `statement` next to the first occurrence of `anchor`, separated by
/// `buffer`. Fails when the anchor is absent from the source.
pub fn insert_at_anchor(
    text: &str,
    anchor: &str,
    placement: Placement,
    buffer: &str,
    statement: &str,
) -> Result<String, TransformError> {
    let pos = text
        .find(anchor)
        .ok_or_else(|| TransformError::AnchorNotFound {
            anchor: anchor.to_string(),
        })?;

    let mut out = String::with_capacity(text.len() + statement.len() + buffer.len());
    match placement {
        Placement::Before => {
            out.push_str(&text[..pos]);
            out.push_str(statement);
            out.push_str(buffer);
            out.push_str(&text[pos..]);
        }
        Placement::After => {
            let end = pos + anchor.len();
            out.push_str(&text[..end]);
            out.push_str(buffer);
            out.push_str(statement);
            out.push_str(&text[end..]);
        }
    }
    Ok(out)
}

/// Rebuild the statement from its segments with only the value bytes
/// replaced, then splice it over the original span. Prefix and suffix
/// fragments (inline whitespace quirks, a trailing boolean argument) survive
/// untouched.
pub fn splice_value(text: &str, def: &Definition, new_value: &str) -> String {
    let mut statement = String::with_capacity(def.span.len() + new_value.len());
    statement.push_str(def.prefix.slice(text));
    statement.push_str(&text[def.body.start..def.value.start]);
    statement.push_str(new_value);
    statement.push_str(&text[def.value.end..def.body.end]);
    if let Some(suffix) = def.suffix {
        statement.push_str(suffix.slice(text));
    }
    replace_statement(text, def, &statement)
}

/// Replace the entire matched span with `statement`.
pub fn replace_statement(text: &str, def: &Definition, statement: &str) -> String {
    let mut out = String::with_capacity(text.len() + statement.len());
    out.push_str(&text[..def.span.start]);
    out.push_str(statement);
    out.push_str(&text[def.span.end..]);
    out
}

/// Delete the matched span together with its own trailing line terminator
/// (and any horizontal whitespace before it), so removal leaves neither a
/// blank line nor a dangling fragment. Content after the terminator, or a
/// trailing comment on the same line, is never swallowed.
pub fn delete_statement(text: &str, def: &Definition) -> String {
    let bytes = text.as_bytes();
    let mut end = def.span.end;

    let mut probe = end;
    while probe < bytes.len() && (bytes[probe] == b' ' || bytes[probe] == b'\t') {
        probe += 1;
    }
    match bytes.get(probe) {
        Some(b'\r') => {
            end = probe + 1;
            if bytes.get(end) == Some(&b'\n') {
                end += 1;
            }
        }
        Some(b'\n') => {
            end = probe + 1;
        }
        _ => {}
    }

    let mut out = String::with_capacity(text.len() - (end - def.span.start));
    out.push_str(&text[..def.span.start]);
    out.push_str(&text[end..]);
    out
}
