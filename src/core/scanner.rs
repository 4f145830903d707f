//! Lexical scanner for quoted translation keys.
//!
//! A line is searched for `"..."` or `'...'` literals whose content looks
//! like a dotted or kebab-case key. Code structure such as comments, escapes
//! and template interpolation is not considered.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::utils::utf16_len;

/// A quote, then ASCII key characters, then the same quote.
static KEY_LITERAL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([A-Za-z0-9_.\-]*)"|'([A-Za-z0-9_.\-]*)'"#).unwrap());

/// A quoted key found on one line.
///
/// Columns are zero-based UTF-16 code units. `start_col` is the first
/// character of the key (one past the opening quote) and `end_col` is
/// `start_col + key length`, i.e. the position of the closing quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchToken {
    pub line: usize,
    pub start_col: usize,
    pub end_col: usize,
    pub key: String,
}

impl MatchToken {
    /// Whether `column` lies on the key or on its closing quote.
    pub fn contains(&self, column: usize) -> bool {
        column >= self.start_col && column <= self.end_col
    }
}

/// Scan one line for quoted keys.
///
/// The returned iterator is lazy and borrows `text`; clone it or call again
/// to restart from the beginning of the line.
pub fn scan_line(text: &str, line: usize) -> KeyTokens<'_> {
    KeyTokens {
        text,
        line,
        byte_pos: 0,
        utf16_pos: 0,
    }
}

/// Iterator over the non-empty quoted keys of one line.
#[derive(Debug, Clone)]
pub struct KeyTokens<'a> {
    text: &'a str,
    line: usize,
    /// Where the next search starts.
    byte_pos: usize,
    /// UTF-16 column of `byte_pos`.
    utf16_pos: usize,
}

impl Iterator for KeyTokens<'_> {
    type Item = MatchToken;

    fn next(&mut self) -> Option<MatchToken> {
        while self.byte_pos < self.text.len() {
            let caps = KEY_LITERAL_REGEX.captures_at(self.text, self.byte_pos)?;
            let whole = caps.get(0)?;
            let content = caps.get(1).or_else(|| caps.get(2))?;

            let start_col =
                self.utf16_pos + utf16_len(&self.text[self.byte_pos..content.start()]);
            let key = content.as_str();

            // The quotes are ASCII, so the span after the content adds one unit.
            self.utf16_pos = start_col + key.len() + 1;
            self.byte_pos = whole.end();

            if key.is_empty() {
                continue;
            }

            return Some(MatchToken {
                line: self.line,
                start_col,
                end_col: start_col + key.len(),
                key: key.to_string(),
            });
        }
        None
    }
}
