//! Report formatting and printing utilities.
//!
//! Displays translated keys in cargo-style format. Separate from the lookup
//! engine so lang-lsp can be used as a library.

use std::io::{self, Write};
use std::path::Path;

use colored::Colorize;
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use crate::core::TranslationMatch;
use crate::utils::utf16_to_byte_offset;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Translated keys found in one scanned file.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileReport {
    pub file_path: String,
    #[serde(skip)]
    pub source: String,
    pub matches: Vec<TranslationMatch>,
}

/// Print file reports in cargo-style format to stdout.
pub fn report(files: &[FileReport], locale_label: &str) {
    report_to(files, locale_label, &mut io::stdout().lock());
}

/// Print file reports to a custom writer.
pub fn report_to<W: Write>(files: &[FileReport], locale_label: &str, writer: &mut W) {
    // Calculate max line number width for alignment
    let max_line_width = files
        .iter()
        .flat_map(|f| f.matches.iter())
        .map(|m| (m.line + 1).to_string().len())
        .max()
        .unwrap_or(1);

    for file in files {
        let lines: Vec<&str> = file.source.split('\n').collect();
        for m in &file.matches {
            let source_line = lines.get(m.line).copied().unwrap_or_default();
            print_match(
                &file.file_path,
                m,
                source_line,
                locale_label,
                writer,
                max_line_width,
            );
        }
    }

    print_summary(files, writer);
}

/// Print matches as a JSON array to stdout.
pub fn report_json(files: &[FileReport]) -> anyhow::Result<()> {
    let mut out = io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, files)?;
    writeln!(out)?;
    Ok(())
}

/// Print a warning when no dictionary exists under the root.
pub fn print_no_dictionaries_warning(root: &Path, suffix: &str) {
    print_no_dictionaries_warning_to(root, suffix, &mut io::stderr().lock());
}

pub fn print_no_dictionaries_warning_to<W: Write>(root: &Path, suffix: &str, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} no dictionaries matching {} found under {}",
        "warning:".bold().yellow(),
        format!("*{}", suffix).cyan(),
        root.display()
    );
}

// ============================================================
// Internal Functions
// ============================================================

fn print_match<W: Write>(
    file_path: &str,
    m: &TranslationMatch,
    source_line: &str,
    locale_label: &str,
    writer: &mut W,
    max_line_width: usize,
) {
    let line = m.line + 1;
    let col = m.start_col + 1;

    let _ = writeln!(
        writer,
        "{}: \"{}\"  {}",
        "info".bold().cyan(),
        m.key,
        m.namespace.dimmed().cyan()
    );

    // Print clickable location: --> path:line:col
    let _ = writeln!(writer, "  {} {}:{}:{}", "-->".blue(), file_path, line, col);

    let _ = writeln!(
        writer,
        "{:>width$} {}",
        "",
        "|".blue(),
        width = max_line_width
    );
    let _ = writeln!(
        writer,
        "{:>width$} {} {}",
        line.to_string().blue(),
        "|".blue(),
        source_line,
        width = max_line_width
    );

    let prefix = &source_line[..utf16_to_byte_offset(source_line, m.start_col)];
    let caret_padding = UnicodeWidthStr::width(prefix);
    let carets = "^".repeat(UnicodeWidthStr::width(m.key.as_str()).max(1));
    let _ = writeln!(
        writer,
        "{:>width$} {} {:>padding$}{}",
        "",
        "|".blue(),
        "",
        carets.cyan(),
        width = max_line_width,
        padding = caret_padding
    );

    let _ = writeln!(
        writer,
        "{:>width$} {} {} {}: {}",
        "",
        "=".blue(),
        "note:".bold(),
        locale_label,
        m.translation,
        width = max_line_width
    );

    let _ = writeln!(writer); // Empty line between matches
}

fn print_summary<W: Write>(files: &[FileReport], writer: &mut W) {
    let total: usize = files.iter().map(|f| f.matches.len()).sum();
    let file_count = files.len();
    let files_word = if file_count == 1 { "file" } else { "files" };

    let msg = if total == 0 {
        format!(
            "Scanned {} {} - no translated keys found",
            file_count, files_word
        )
    } else {
        format!(
            "Found {} translated {} in {} {}",
            total,
            if total == 1 { "key" } else { "keys" },
            file_count,
            files_word
        )
    };
    let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), msg.green());
}
