//! Parsed translation dictionaries, cached by path and modification time.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::{
        Arc, Mutex, MutexGuard, PoisonError,
        atomic::{AtomicUsize, Ordering},
    },
    time::{Duration, SystemTime},
};

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use tracing::debug;

use super::cache::{Clock, ExpiringLru, SystemClock, capacity};
use crate::config::Config;

/// One parsed dictionary file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryEntry {
    /// Modification time observed when the file was read.
    pub mtime: SystemTime,
    pub messages: HashMap<String, String>,
    pub namespace: String,
}

impl DictionaryEntry {
    /// Translation for `key`, if this dictionary has a non-empty one.
    pub fn translate(&self, key: &str) -> Option<&str> {
        self.messages
            .get(key)
            .map(String::as_str)
            .filter(|t| !t.is_empty())
    }
}

/// Settings for [`DictionaryCache`].
#[derive(Debug, Clone)]
pub struct DictionaryOptions {
    pub suffix: String,
    pub default_namespace: String,
    pub capacity: usize,
    pub max_age: Duration,
}

impl From<&Config> for DictionaryOptions {
    fn from(config: &Config) -> Self {
        Self {
            suffix: config.dictionary_suffix.clone(),
            default_namespace: config.default_namespace.clone(),
            capacity: config.dictionary_capacity,
            max_age: config.dictionary_max_age(),
        }
    }
}

impl Default for DictionaryOptions {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

/// Counters for cache behaviour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Entries reused because the mtime was unchanged.
    pub hits: usize,
    /// Entries missing, expired, or stale.
    pub misses: usize,
    /// Files actually read from disk.
    pub reads: usize,
}

#[derive(Default)]
struct Counters {
    hits: AtomicUsize,
    misses: AtomicUsize,
    reads: AtomicUsize,
}

type EntryCache<C> = ExpiringLru<PathBuf, Arc<DictionaryEntry>, C>;

/// Loads dictionaries, reusing a parse while the file's mtime is unchanged.
///
/// Failures are never cached: a file that cannot be read or parsed is
/// skipped and tried again on the next load.
pub struct DictionaryCache<C: Clock = SystemClock> {
    options: DictionaryOptions,
    entries: Mutex<EntryCache<C>>,
    counters: Counters,
}

impl DictionaryCache<SystemClock> {
    pub fn new(options: DictionaryOptions) -> Self {
        Self::with_clock(options, SystemClock)
    }
}

impl<C: Clock> DictionaryCache<C> {
    pub fn with_clock(options: DictionaryOptions, clock: C) -> Self {
        let entries = ExpiringLru::new(capacity(options.capacity), options.max_age, clock);
        Self {
            options,
            entries: Mutex::new(entries),
            counters: Counters::default(),
        }
    }

    /// Load every path in order, skipping those that fail.
    pub async fn load_dictionaries(&self, paths: &[PathBuf]) -> Vec<Arc<DictionaryEntry>> {
        let mut loaded = Vec::with_capacity(paths.len());
        for path in paths {
            match self.load(path).await {
                Ok(entry) => loaded.push(entry),
                Err(err) => debug!(path = %path.display(), error = %err, "skipping dictionary"),
            }
        }
        loaded
    }

    async fn load(&self, path: &Path) -> Result<Arc<DictionaryEntry>> {
        let mtime = tokio::fs::metadata(path)
            .await
            .and_then(|m| m.modified())
            .with_context(|| format!("Failed to stat dictionary: {:?}", path))?;

        let cached = self.lock().get(&path.to_path_buf()).cloned();
        if let Some(entry) = cached
            && entry.mtime == mtime
        {
            self.counters.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(entry);
        }
        self.counters.misses.fetch_add(1, Ordering::Relaxed);

        self.counters.reads.fetch_add(1, Ordering::Relaxed);
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read dictionary: {:?}", path))?;
        let messages = parse_dictionary(&content)
            .with_context(|| format!("Failed to parse dictionary: {:?}", path))?;

        let entry = Arc::new(DictionaryEntry {
            mtime,
            messages,
            namespace: namespace_from_path(
                path,
                &self.options.suffix,
                &self.options.default_namespace,
            ),
        });
        debug!(
            path = %path.display(),
            keys = entry.messages.len(),
            namespace = %entry.namespace,
            "dictionary loaded"
        );
        self.lock().insert(path.to_path_buf(), Arc::clone(&entry));
        Ok(entry)
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.counters.hits.load(Ordering::Relaxed),
            misses: self.counters.misses.load(Ordering::Relaxed),
            reads: self.counters.reads.load(Ordering::Relaxed),
        }
    }

    /// Number of entries currently held.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, EntryCache<C>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Parse a flat JSON object of translations.
///
/// Values that are not strings (nested objects, arrays, numbers) are not
/// translations and are left out.
pub fn parse_dictionary(content: &str) -> Result<HashMap<String, String>> {
    let object: Map<String, Value> = serde_json::from_str(content)?;
    Ok(object
        .into_iter()
        .filter_map(|(key, value)| match value {
            Value::String(s) => Some((key, s)),
            _ => None,
        })
        .collect())
}

/// Namespace of a dictionary: the file name before `suffix`.
///
/// `locales/invoice_en.json` is `invoice`. Names that do not end in the
/// suffix, or consist of nothing but the suffix, get `default`.
pub fn namespace_from_path(path: &Path, suffix: &str, default: &str) -> String {
    path.file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.strip_suffix(suffix))
        .filter(|stem| !stem.is_empty())
        .unwrap_or(default)
        .to_string()
}
