//! Conversions between resolver results and LSP messages.

use serde_json::Value;
use tower_lsp::lsp_types::{
    Diagnostic, DiagnosticSeverity, Hover, HoverContents, MarkupContent, MarkupKind, Position,
    Range,
};

use crate::core::TranslationMatch;

/// Name used as the diagnostic source and client settings owner.
pub const SERVER_NAME: &str = "lang-lsp";

/// Client settings section, e.g. `"langLsp": { "enableDiagnostics": false }`.
pub const SETTINGS_SECTION: &str = "langLsp";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LangLspSettings {
    pub enable_diagnostics: bool,
}

impl LangLspSettings {
    /// Overlay the fields present in `value` on `self`.
    ///
    /// Missing, null, or mistyped fields keep their current value, so an
    /// empty settings object means "use the defaults".
    pub fn merged(self, value: &Value) -> Self {
        Self {
            enable_diagnostics: value
                .get("enableDiagnostics")
                .and_then(Value::as_bool)
                .unwrap_or(self.enable_diagnostics),
        }
    }
}

fn range_of(m: &TranslationMatch) -> Range {
    Range::new(
        Position::new(m.line as u32, m.start_col as u32),
        Position::new(m.line as u32, m.end_col as u32),
    )
}

/// One information diagnostic per translated key.
pub fn to_diagnostics(matches: &[TranslationMatch], locale_label: &str) -> Vec<Diagnostic> {
    matches
        .iter()
        .map(|m| Diagnostic {
            range: range_of(m),
            severity: Some(DiagnosticSeverity::INFORMATION),
            source: Some(SERVER_NAME.to_string()),
            message: format!("{}: {}", locale_label, m.translation),
            ..Default::default()
        })
        .collect()
}

/// Markdown hover for a resolved key.
pub fn to_hover(m: &TranslationMatch, locale_label: &str) -> Hover {
    Hover {
        contents: HoverContents::Markup(MarkupContent {
            kind: MarkupKind::Markdown,
            value: format!("**Translation ({}):**\n\n{}", locale_label, m.translation),
        }),
        range: Some(range_of(m)),
    }
}
