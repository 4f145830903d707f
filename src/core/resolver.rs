//! Document scanning and cursor resolution on top of discovery and the
//! dictionary cache.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use serde::Serialize;
use tracing::debug;

use super::{
    cache::{Clock, SystemClock},
    dictionary::{DictionaryCache, DictionaryEntry, DictionaryOptions},
    discovery::{DiscoveryOptions, FileDiscoverer},
    scanner::{MatchToken, scan_line},
};
use crate::config::Config;

/// A key found in a document together with its translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationMatch {
    pub line: usize,
    pub start_col: usize,
    pub end_col: usize,
    pub key: String,
    pub translation: String,
    pub namespace: String,
}

impl TranslationMatch {
    fn new(token: MatchToken, translation: &str, namespace: &str) -> Self {
        Self {
            line: token.line,
            start_col: token.start_col,
            end_col: token.end_col,
            key: token.key,
            translation: translation.to_string(),
            namespace: namespace.to_string(),
        }
    }
}

/// First dictionary, in discovery order, that translates `key`.
///
/// Returns the translation and the dictionary's namespace. Later
/// dictionaries defining the same key are shadowed.
pub fn lookup<'d>(dictionaries: &'d [Arc<DictionaryEntry>], key: &str) -> Option<(&'d str, &'d str)> {
    dictionaries
        .iter()
        .find_map(|d| d.translate(key).map(|t| (t, d.namespace.as_str())))
}

/// Resolves translation keys for documents under one root.
///
/// The discoverer and dictionary cache are shared handles, so several
/// resolvers (or a test) can observe the same caches.
pub struct Resolver<C: Clock = SystemClock> {
    root: PathBuf,
    discoverer: Arc<FileDiscoverer<C>>,
    dictionaries: Arc<DictionaryCache<C>>,
}

impl Resolver<SystemClock> {
    /// Build a resolver with fresh caches configured from `config`.
    pub fn from_config(root: impl Into<PathBuf>, config: &Config) -> Self {
        Self::new(
            root,
            Arc::new(FileDiscoverer::new(DiscoveryOptions::from(config))),
            Arc::new(DictionaryCache::new(DictionaryOptions::from(config))),
        )
    }
}

impl<C: Clock> Resolver<C> {
    pub fn new(
        root: impl Into<PathBuf>,
        discoverer: Arc<FileDiscoverer<C>>,
        dictionaries: Arc<DictionaryCache<C>>,
    ) -> Self {
        Self {
            root: root.into(),
            discoverer,
            dictionaries,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn discoverer(&self) -> &FileDiscoverer<C> {
        &self.discoverer
    }

    pub fn dictionaries(&self) -> &DictionaryCache<C> {
        &self.dictionaries
    }

    /// Dictionaries for the root in discovery order, or `None` when no
    /// candidate files exist.
    pub async fn load(&self) -> Option<Vec<Arc<DictionaryEntry>>> {
        let paths = self.discoverer.list_candidate_files(&self.root).await;
        if paths.is_empty() {
            debug!(root = %self.root.display(), "no dictionaries found");
            return None;
        }
        Some(self.dictionaries.load_dictionaries(&paths).await)
    }

    /// Every translated key in `text`, in document order.
    pub async fn scan_document(&self, text: &str) -> Vec<TranslationMatch> {
        let Some(dictionaries) = self.load().await else {
            return Vec::new();
        };

        text.split('\n')
            .enumerate()
            .flat_map(|(line_no, line)| scan_line(line, line_no))
            .filter_map(|token| {
                let (translation, namespace) = lookup(&dictionaries, &token.key)?;
                Some(TranslationMatch::new(token, translation, namespace))
            })
            .collect()
    }

    /// The translated key under `(line, column)`, if any.
    ///
    /// `column` counts UTF-16 code units. The position of the closing quote
    /// still belongs to the key.
    pub async fn resolve_at(
        &self,
        text: &str,
        line: usize,
        column: usize,
    ) -> Option<TranslationMatch> {
        let dictionaries = self.load().await?;

        let current_line = text.split('\n').nth(line)?;
        let token = scan_line(current_line, line).find(|t| t.contains(column))?;
        let (translation, namespace) = lookup(&dictionaries, &token.key)?;
        Some(TranslationMatch::new(token, translation, namespace))
    }
}
