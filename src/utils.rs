//! Common utility functions shared across the codebase.

/// Number of UTF-16 code units needed to encode `text`.
///
/// Editor protocols count columns in UTF-16 code units, so byte offsets from
/// the scanner are converted with this before they leave the crate.
///
/// # Examples
///
/// ```
/// use lang_lsp::utils::utf16_len;
///
/// assert_eq!(utf16_len("abc"), 3);
/// assert_eq!(utf16_len("é"), 1);
/// assert_eq!(utf16_len("😀"), 2);
/// assert_eq!(utf16_len(""), 0);
/// ```
pub fn utf16_len(text: &str) -> usize {
    text.chars().map(char::len_utf16).sum()
}

/// Byte offset in `line` of the UTF-16 `column`.
///
/// Columns past the end of the line clamp to the line length. A column that
/// falls inside a surrogate pair resolves to the start of that character.
pub fn utf16_to_byte_offset(line: &str, column: usize) -> usize {
    let mut units = 0;
    for (offset, c) in line.char_indices() {
        if units >= column {
            return offset;
        }
        units += c.len_utf16();
        if units > column {
            return offset;
        }
    }
    line.len()
}
