//! Candidate dictionary discovery.
//!
//! Finds every file under a root whose name ends with the dictionary suffix
//! and caches the list per root for a fixed time. A search that cannot run
//! or fails yields an empty list, which is cached like any other result.

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
    sync::{
        Arc, Mutex, PoisonError,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use glob::Pattern;
use tokio::process::Command;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use super::cache::{Clock, ExpiringLru, SystemClock, capacity};
use crate::config::{Config, DiscoveryBackend};

/// Settings for [`FileDiscoverer`].
#[derive(Debug, Clone)]
pub struct DiscoveryOptions {
    pub backend: DiscoveryBackend,
    pub search_program: String,
    pub suffix: String,
    pub ignores: Vec<Pattern>,
    pub ttl: Duration,
    pub capacity: usize,
}

impl From<&Config> for DiscoveryOptions {
    fn from(config: &Config) -> Self {
        Self {
            backend: config.discovery,
            search_program: config.search_program.clone(),
            suffix: config.dictionary_suffix.clone(),
            ignores: config.ignore_patterns(),
            ttl: config.candidate_ttl(),
            capacity: config.candidate_capacity,
        }
    }
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

/// Lists candidate dictionary files per root, with a TTL cache in front.
pub struct FileDiscoverer<C: Clock = SystemClock> {
    options: DiscoveryOptions,
    cache: Mutex<ExpiringLru<String, Arc<Vec<PathBuf>>, C>>,
    searches: AtomicUsize,
}

impl FileDiscoverer<SystemClock> {
    pub fn new(options: DiscoveryOptions) -> Self {
        Self::with_clock(options, SystemClock)
    }
}

impl<C: Clock> FileDiscoverer<C> {
    pub fn with_clock(options: DiscoveryOptions, clock: C) -> Self {
        let cache = ExpiringLru::new(capacity(options.capacity), options.ttl, clock);
        Self {
            options,
            cache: Mutex::new(cache),
            searches: AtomicUsize::new(0),
        }
    }

    /// Candidate files for `root`, in search order.
    ///
    /// `root` is used verbatim as the cache key.
    pub async fn list_candidate_files(&self, root: &Path) -> Arc<Vec<PathBuf>> {
        let key = root.to_string_lossy().into_owned();

        if let Some(cached) = self.lock().get(&key) {
            debug!(root = %key, count = cached.len(), "candidate files cache hit");
            return Arc::clone(cached);
        }

        self.searches.fetch_add(1, Ordering::Relaxed);
        let found = match self.options.backend {
            DiscoveryBackend::Fd => self.search_external(root).await,
            DiscoveryBackend::Walk => self.search_walk(root).await,
        };
        let files = Arc::new(self.filter(found));
        debug!(root = %key, count = files.len(), "candidate files discovered");

        self.lock().insert(key, Arc::clone(&files));
        files
    }

    /// Forget the cached list for one root.
    pub fn invalidate(&self, root: &Path) {
        let key = root.to_string_lossy().into_owned();
        self.lock().remove(&key);
    }

    /// How many searches have actually run (cache misses).
    pub fn search_count(&self) -> usize {
        self.searches.load(Ordering::Relaxed)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ExpiringLru<String, Arc<Vec<PathBuf>>, C>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run the external search tool, e.g. `fd -e json -p '_en\.json$' <root>`.
    async fn search_external(&self, root: &Path) -> Vec<PathBuf> {
        let extension = Path::new(&self.options.suffix)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("json");
        let pattern = format!("{}$", regex::escape(&self.options.suffix));

        let output = Command::new(&self.options.search_program)
            .arg("-e")
            .arg(extension)
            .arg("-p")
            .arg(&pattern)
            .arg(root)
            .kill_on_drop(true)
            .output()
            .await;

        match output {
            Ok(output) if output.status.success() => parse_search_output(&output.stdout),
            Ok(output) => {
                warn!(
                    program = %self.options.search_program,
                    status = %output.status,
                    "dictionary search failed; treating as no dictionaries"
                );
                Vec::new()
            }
            Err(err) => {
                warn!(
                    program = %self.options.search_program,
                    error = %err,
                    "dictionary search could not run; treating as no dictionaries"
                );
                Vec::new()
            }
        }
    }

    async fn search_walk(&self, root: &Path) -> Vec<PathBuf> {
        let root = root.to_path_buf();
        let suffix = self.options.suffix.clone();
        match tokio::task::spawn_blocking(move || walk_for_suffix(&root, &suffix)).await {
            Ok(files) => files,
            Err(err) => {
                warn!(error = %err, "dictionary walk aborted; treating as no dictionaries");
                Vec::new()
            }
        }
    }

    /// Drop ignored paths and repeated entries, keeping first occurrences.
    fn filter(&self, files: Vec<PathBuf>) -> Vec<PathBuf> {
        let mut seen = HashSet::new();
        files
            .into_iter()
            .filter(|path| !self.options.ignores.iter().any(|p| p.matches_path(path)))
            .filter(|path| seen.insert(path.clone()))
            .collect()
    }
}

/// Split search output into paths, one per non-empty line.
pub fn parse_search_output(stdout: &[u8]) -> Vec<PathBuf> {
    String::from_utf8_lossy(stdout)
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.is_empty())
        .map(PathBuf::from)
        .collect()
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with('.'))
}

/// In-process equivalent of the `fd` search: skips hidden entries, returns
/// files ending in `suffix`, sorted by path.
fn walk_for_suffix(root: &Path, suffix: &str) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_entry(|e| !is_hidden(e))
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.file_name()
                .to_str()
                .is_some_and(|name| name.ends_with(suffix))
        })
        .map(|e| e.into_path())
        .collect();
    files.sort();
    files
}
