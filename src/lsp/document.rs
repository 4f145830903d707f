//! In-memory text of open documents and incremental edits.

use tower_lsp::lsp_types::{Position, TextDocumentContentChangeEvent};

use crate::utils::utf16_to_byte_offset;

/// Byte offset of an LSP position (line, UTF-16 character) in `text`.
///
/// Positions past the end of a line clamp to the line end; lines past the
/// end of the document clamp to the document end.
pub fn position_to_offset(text: &str, position: Position) -> usize {
    let mut line_start = 0;
    for _ in 0..position.line {
        match text[line_start..].find('\n') {
            Some(i) => line_start += i + 1,
            None => return text.len(),
        }
    }
    let line_end = text[line_start..]
        .find('\n')
        .map_or(text.len(), |i| line_start + i);
    line_start + utf16_to_byte_offset(&text[line_start..line_end], position.character as usize)
}

/// Apply one content change. A change without a range replaces the text.
pub fn apply_change(text: &mut String, change: TextDocumentContentChangeEvent) {
    match change.range {
        None => *text = change.text,
        Some(range) => {
            let start = position_to_offset(text, range.start);
            let end = position_to_offset(text, range.end).max(start);
            text.replace_range(start..end, &change.text);
        }
    }
}
