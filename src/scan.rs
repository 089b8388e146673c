//! Byte-span scanner for constant and variable definitions.
//!
//! The scanner walks the raw file text and emits a [`Definition`] for every
//! statement matching one of two shapes:
//!
//! - `define( 'NAME', VALUE [, true|false] );` (constant)
//! - `$name = VALUE;` (variable)
//!
//! Matching is line-anchored: a statement must begin at the start of file or
//! immediately after a line terminator (`\n`, `\r\n`, or lone `\r`), optionally
//! preceded by horizontal whitespace. Values are scanned with single/double
//! quote and backslash-escape tracking, so a `;` or `)` inside a quoted string
//! never terminates the statement early. Values may span multiple lines.
//!
//! Known limitation: statement-like text inside an unrelated multi-line string
//! literal or block comment can still be picked up, since the scanner does not
//! model those constructs.

use std::fmt;

use crate::errors::TransformError;

/// The two statement shapes the scanner recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKind {
    Constant,
    Variable,
}

impl ConfigKind {
    /// Parse the external string form. Any string other than `constant` or
    /// `variable` is rejected.
    pub fn parse(kind: &str) -> Result<Self, TransformError> {
        match kind {
            "constant" => Ok(ConfigKind::Constant),
            "variable" => Ok(ConfigKind::Variable),
            other => Err(TransformError::UnknownType {
                kind: other.to_string(),
            }),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ConfigKind::Constant => "constant",
            ConfigKind::Variable => "variable",
        }
    }
}

impl fmt::Display for ConfigKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Half-open byte range into the scanned source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn slice<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start..self.end]
    }
}

/// One matched statement, with exact byte spans into the source it was
/// scanned from.
///
/// The segment spans decompose the statement so a value substitution can
/// rebuild it touching nothing but the value bytes:
///
/// - `prefix`: statement head through the name (constants: up to the comma
///   introducing the value; variables: through the `=`)
/// - `body`: the value-bearing fragment, including surrounding whitespace
///   (and for variables the terminating `;`)
/// - `suffix`: constants only; the optional boolean argument plus the `);`
///   tail
///
/// `prefix + body + suffix` concatenate to exactly `span`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    pub kind: ConfigKind,
    pub name: String,
    /// Entire statement, from its leading horizontal whitespace through the
    /// terminating `;`. Never includes the trailing line terminator.
    pub span: Span,
    pub prefix: Span,
    pub body: Span,
    pub suffix: Option<Span>,
    /// The value text exactly as written, inside `body`.
    pub value: Span,
    /// File-order index; duplicate names resolve to the highest index.
    pub index: usize,
}

impl Definition {
    /// The matched statement text.
    pub fn raw<'a>(&self, text: &'a str) -> &'a str {
        self.span.slice(text)
    }

    /// The value text as written (quoted literals keep their quotes).
    pub fn value_text<'a>(&self, text: &'a str) -> &'a str {
        self.value.slice(text)
    }
}

/// Scan the full source text and return all definitions in file order.
pub fn scan(text: &str) -> Vec<Definition> {
    let mut definitions = Vec::new();
    let mut line_start = Some(0usize);

    while let Some(start) = line_start {
        if start >= text.len() {
            break;
        }
        let matched = match_constant(text, start).or_else(|| match_variable(text, start));
        match matched {
            Some(mut def) => {
                def.index = definitions.len();
                let end = def.span.end;
                definitions.push(def);
                // Anything after the terminator on this line (e.g. a trailing
                // comment) is skipped; resume at the next line boundary.
                line_start = next_line_start(text, end);
            }
            None => {
                line_start = next_line_start(text, start);
            }
        }
    }

    definitions
}

/// Position just past the next line terminator at or after `from`.
/// `\r\n` counts as a single terminator; `\n` and lone `\r` each count alone.
fn next_line_start(text: &str, from: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut i = from;
    while i < bytes.len() {
        match bytes[i] {
            b'\n' => return Some(i + 1),
            b'\r' => {
                if bytes.get(i + 1) == Some(&b'\n') {
                    return Some(i + 2);
                }
                return Some(i + 1);
            }
            _ => i += 1,
        }
    }
    None
}

fn is_hspace(b: u8) -> bool {
    b == b' ' || b == b'\t'
}

fn is_word(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn skip_hspace(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && is_hspace(bytes[i]) {
        i += 1;
    }
    i
}

fn skip_space(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    i
}

/// Trim trailing whitespace from `end` back toward `floor`.
fn rtrim(bytes: &[u8], floor: usize, mut end: usize) -> usize {
    while end > floor && bytes[end - 1].is_ascii_whitespace() {
        end -= 1;
    }
    end
}

/// Try to match a constant definition starting at the line boundary `start`.
fn match_constant(text: &str, start: usize) -> Option<Definition> {
    let bytes = text.as_bytes();
    let mut i = skip_hspace(bytes, start);

    if bytes.len() < i + 6 || !bytes[i..i + 6].eq_ignore_ascii_case(b"define") {
        return None;
    }
    i += 6;
    i = skip_space(bytes, i);
    if bytes.get(i) != Some(&b'(') {
        return None;
    }
    i = skip_space(bytes, i + 1);

    let quote = match bytes.get(i) {
        Some(&q @ (b'\'' | b'"')) => q,
        _ => return None,
    };
    i += 1;
    let name_start = i;
    while i < bytes.len() && is_word(bytes[i]) {
        i += 1;
    }
    if bytes.get(i) != Some(&quote) {
        return None;
    }
    let name = text[name_start..i].to_string();
    i = skip_space(bytes, i + 1);
    let prefix = Span { start, end: i };

    if bytes.get(i) != Some(&b',') {
        return None;
    }
    let body_start = i;
    i = skip_space(bytes, i + 1);
    let value_start = i;

    let (value_end, suffix_start, stmt_end) = find_constant_terminator(bytes, value_start)?;

    Some(Definition {
        kind: ConfigKind::Constant,
        name,
        span: Span {
            start,
            end: stmt_end,
        },
        prefix,
        body: Span {
            start: body_start,
            end: suffix_start,
        },
        suffix: Some(Span {
            start: suffix_start,
            end: stmt_end,
        }),
        value: Span {
            start: value_start,
            end: value_end,
        },
        index: 0,
    })
}

/// Scan a constant value, tracking quote state, until the statement
/// terminator: either `, true|false ) ;` or `) ;`, outside any string.
///
/// Returns `(value_end, suffix_start, stmt_end)` where `value_end` excludes
/// trailing whitespace and `stmt_end` is just past the `;`.
fn find_constant_terminator(bytes: &[u8], from: usize) -> Option<(usize, usize, usize)> {
    let mut in_single = false;
    let mut in_double = false;
    let mut escape = false;
    let mut i = from;

    while i < bytes.len() {
        let b = bytes[i];
        if escape {
            escape = false;
            i += 1;
            continue;
        }
        if in_single || in_double {
            match b {
                b'\\' => escape = true,
                b'\'' if in_single => in_single = false,
                b'"' if in_double => in_double = false,
                _ => {}
            }
            i += 1;
            continue;
        }
        match b {
            b'\'' => in_single = true,
            b'"' => in_double = true,
            b',' => {
                if let Some(end) = match_bool_tail(bytes, i) {
                    return Some((rtrim(bytes, from, i), i, end));
                }
            }
            b')' => {
                if let Some(end) = match_close(bytes, i) {
                    return Some((rtrim(bytes, from, i), i, end));
                }
            }
            _ => {}
        }
        i += 1;
    }

    None
}

/// Match `, true|false ) ;` starting at the comma. Returns the position just
/// past the `;`.
fn match_bool_tail(bytes: &[u8], comma: usize) -> Option<usize> {
    let mut i = skip_space(bytes, comma + 1);
    let word_start = i;
    while i < bytes.len() && is_word(bytes[i]) {
        i += 1;
    }
    let word = &bytes[word_start..i];
    if !word.eq_ignore_ascii_case(b"true") && !word.eq_ignore_ascii_case(b"false") {
        return None;
    }
    match_close(bytes, skip_space(bytes, i))
}

/// Match `) ;` starting at the closing paren. Returns the position just past
/// the `;`.
fn match_close(bytes: &[u8], paren: usize) -> Option<usize> {
    if bytes.get(paren) != Some(&b')') {
        return None;
    }
    let i = skip_space(bytes, paren + 1);
    if bytes.get(i) != Some(&b';') {
        return None;
    }
    Some(i + 1)
}

/// Try to match a variable assignment starting at the line boundary `start`.
fn match_variable(text: &str, start: usize) -> Option<Definition> {
    let bytes = text.as_bytes();
    let mut i = skip_hspace(bytes, start);

    if bytes.get(i) != Some(&b'$') {
        return None;
    }
    i += 1;
    let name_start = i;
    while i < bytes.len() && is_word(bytes[i]) {
        i += 1;
    }
    if i == name_start {
        return None;
    }
    let name = text[name_start..i].to_string();
    i = skip_space(bytes, i);
    if bytes.get(i) != Some(&b'=') {
        return None;
    }
    i += 1;
    let prefix = Span { start, end: i };
    let body_start = i;
    let value_start = skip_space(bytes, i);

    let (value_end, stmt_end) = find_semicolon(bytes, value_start)?;

    Some(Definition {
        kind: ConfigKind::Variable,
        name,
        span: Span {
            start,
            end: stmt_end,
        },
        prefix,
        body: Span {
            start: body_start,
            end: stmt_end,
        },
        suffix: None,
        value: Span {
            start: value_start,
            end: value_end,
        },
        index: 0,
    })
}

/// Scan a variable value, tracking quote state, until the first `;` outside
/// any string. Returns `(value_end, stmt_end)`.
fn find_semicolon(bytes: &[u8], from: usize) -> Option<(usize, usize)> {
    let mut in_single = false;
    let mut in_double = false;
    let mut escape = false;
    let mut i = from;

    while i < bytes.len() {
        let b = bytes[i];
        if escape {
            escape = false;
            i += 1;
            continue;
        }
        if in_single || in_double {
            match b {
                b'\\' => escape = true,
                b'\'' if in_single => in_single = false,
                b'"' if in_double => in_double = false,
                _ => {}
            }
            i += 1;
            continue;
        }
        match b {
            b'\'' => in_single = true,
            b'"' => in_double = true,
            b';' => return Some((rtrim(bytes, from, i), i + 1)),
            _ => {}
        }
        i += 1;
    }

    None
}
