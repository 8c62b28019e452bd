//! Parser for line-oriented `key=value` property blocks.
//!
//! The syntax follows the familiar properties-file conventions:
//!
//! - a line whose first non-blank character is `#` is a comment;
//! - blank lines are skipped;
//! - a line ending in an unescaped `\` continues onto the next physical line,
//!   the two parts joined by a single space;
//! - the first unescaped `=` separates key from value; without one, the whole
//!   line is the key and the value is empty;
//! - `\t`, `\n`, `\r`, `\f` and `\uXXXX` are decoded, and any other escaped
//!   character stands for itself.
//!
//! Comments are only recognized at the start of a logical line; a `#` line that
//! is reached through a continuation is part of the value.

use tracing::warn;

/// One parsed `key=value` pair. The key is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub key: String,
    pub value: String,
}

impl Property {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Render as a single argument, e.g. `-p:Version=1.2.3` for prefix `-p`.
    pub fn to_arg(&self, prefix: &str) -> String {
        format!("{prefix}:{}={}", self.key, self.value)
    }

    /// Render as a bare `key=value` setting.
    pub fn to_setting(&self) -> String {
        format!("{}={}", self.key, self.value)
    }
}

/// Parse a properties block into its entries, in source order.
///
/// Parsing never fails: malformed input is absorbed (an unterminated
/// continuation simply ends the logical line, a line with an empty key is
/// dropped). `None`, empty and blank input yield no entries.
pub fn parse_properties(raw: Option<&str>) -> Vec<Property> {
    let Some(text) = raw else {
        return Vec::new();
    };

    let mut lines = text.lines();
    let mut out = Vec::new();
    while let Some(line) = lines.next() {
        let start = line.trim_start();
        if start.is_empty() || start.starts_with('#') {
            continue;
        }

        let logical = read_logical_line(line, &mut lines);
        match split_entry(&logical) {
            Some(property) => out.push(property),
            None => warn!(line = %logical, "ignoring property line without a key"),
        }
    }
    out
}

/// Collect `first` and any continuation lines into one logical line.
fn read_logical_line<'a>(first: &'a str, lines: &mut impl Iterator<Item = &'a str>) -> String {
    let mut pieces: Vec<&str> = Vec::new();
    let mut current = first;
    loop {
        match strip_continuation(current) {
            Some(head) => {
                pieces.push(head);
                match lines.next() {
                    Some(next) => current = next,
                    None => break,
                }
            }
            None => {
                pieces.push(current);
                break;
            }
        }
    }

    let mut logical = String::new();
    for piece in pieces.iter().map(|p| p.trim()).filter(|p| !p.is_empty()) {
        if !logical.is_empty() {
            logical.push(' ');
        }
        logical.push_str(piece);
    }
    logical
}

/// If `line` ends with an odd number of backslashes, return it without the last one.
fn strip_continuation(line: &str) -> Option<&str> {
    let trailing = line.chars().rev().take_while(|&c| c == '\\').count();
    if trailing % 2 == 1 {
        Some(&line[..line.len() - 1])
    } else {
        None
    }
}

fn split_entry(line: &str) -> Option<Property> {
    let (key, value) = match find_separator(line) {
        Some(pos) => (&line[..pos], &line[pos + 1..]),
        None => (line, ""),
    };
    let key = unescape(key.trim());
    if key.trim().is_empty() {
        return None;
    }
    Some(Property::new(key, unescape(value.trim())))
}

/// Byte offset of the first `=` not preceded by an escaping backslash.
fn find_separator(line: &str) -> Option<usize> {
    let mut escaped = false;
    for (pos, ch) in line.char_indices() {
        match ch {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '=' => return Some(pos),
            _ => {}
        }
    }
    None
}

fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{c}'),
            Some('u') => {
                let hex: String = chars.clone().take(4).collect();
                let decoded = (hex.len() == 4 && hex.chars().all(|c| c.is_ascii_hexdigit()))
                    .then(|| u32::from_str_radix(&hex, 16).ok())
                    .flatten()
                    .and_then(char::from_u32);
                match decoded {
                    Some(c) => {
                        out.push(c);
                        chars.nth(3);
                    }
                    None => out.push('u'),
                }
            }
            Some(other) => out.push(other),
            // a lone trailing backslash has nothing to escape
            None => {}
        }
    }
    out
}
