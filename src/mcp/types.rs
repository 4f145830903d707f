use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::config::{Config, DiscoveryBackend};
use crate::core::TranslationMatch;

// ============================================================
// Parameter Types
// ============================================================

/// Parameters for find_language_strings
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FindLanguageStringsParams {
    /// Absolute path of the project root to search for dictionaries
    pub project_root_path: String,
    /// Source file to scan, absolute or relative to the project root
    pub file_path: Option<String>,
    /// Source text to scan instead of reading `filePath`
    pub text: Option<String>,
    /// Maximum number of items to return (default 50, max 200)
    pub limit: Option<u32>,
    /// Number of items to skip
    pub offset: Option<u32>,
}

/// Parameters for get_translation
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetTranslationParams {
    /// Absolute path of the project root to search for dictionaries
    pub project_root_path: String,
    /// Source file, absolute or relative to the project root
    pub file_path: Option<String>,
    /// Source text to use instead of reading `filePath`
    pub text: Option<String>,
    /// Zero-based line
    pub line: u32,
    /// Zero-based character offset in UTF-16 code units
    pub character: u32,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListDictionariesParams {
    /// Absolute path of the project root to search for dictionaries
    pub project_root_path: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetConfigParams {
    /// Absolute path of the project root
    pub project_root_path: String,
}

// ============================================================
// Result Types
// ============================================================

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub offset: usize,
    pub limit: usize,
    pub has_more: bool,
}

/// A translated key found in the scanned text
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MatchItem {
    pub line: usize,
    pub start_col: usize,
    pub end_col: usize,
    pub key: String,
    pub translation: String,
    pub namespace: String,
}

impl From<TranslationMatch> for MatchItem {
    fn from(m: TranslationMatch) -> Self {
        Self {
            line: m.line,
            start_col: m.start_col,
            end_col: m.end_col,
            key: m.key,
            translation: m.translation,
            namespace: m.namespace,
        }
    }
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LanguageStringsResult {
    pub total_count: usize,
    pub items: Vec<MatchItem>,
    pub pagination: Pagination,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TranslationResult {
    pub found: bool,
    #[serde(rename = "match", skip_serializing_if = "Option::is_none")]
    pub item: Option<MatchItem>,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DictionaryInfo {
    pub file_path: String,
    pub namespace: String,
    pub key_count: usize,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DictionariesResult {
    pub project_root_path: String,
    /// Dictionaries in lookup precedence order
    pub dictionaries: Vec<DictionaryInfo>,
}

/// Configuration DTO for MCP
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfigDto {
    /// True if config was loaded from a file, false if using defaults
    pub from_file: bool,
    pub config: ConfigValues,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfigValues {
    pub dictionary_suffix: String,
    pub locale_label: String,
    pub default_namespace: String,
    pub discovery: DiscoveryBackend,
    pub search_program: String,
    pub ignores: Vec<String>,
    pub candidate_ttl_secs: u64,
    pub candidate_capacity: usize,
    pub dictionary_max_age_secs: u64,
    pub dictionary_capacity: usize,
    pub enable_diagnostics: bool,
}

impl From<Config> for ConfigValues {
    fn from(c: Config) -> Self {
        Self {
            dictionary_suffix: c.dictionary_suffix,
            locale_label: c.locale_label,
            default_namespace: c.default_namespace,
            discovery: c.discovery,
            search_program: c.search_program,
            ignores: c.ignores,
            candidate_ttl_secs: c.candidate_ttl_secs,
            candidate_capacity: c.candidate_capacity,
            dictionary_max_age_secs: c.dictionary_max_age_secs,
            dictionary_capacity: c.dictionary_capacity,
            enable_diagnostics: c.enable_diagnostics,
        }
    }
}
