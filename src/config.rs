use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Ok, Result, bail};
use clap::ValueEnum;
use glob::Pattern;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".langlsprc.json";

/// How candidate dictionary files are enumerated under a root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, JsonSchema, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DiscoveryBackend {
    /// Spawn the external `fd` search tool.
    Fd,
    /// Walk the directory tree in-process.
    Walk,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_dictionary_suffix")]
    pub dictionary_suffix: String,
    #[serde(default = "default_locale_label")]
    pub locale_label: String,
    #[serde(default = "default_namespace")]
    pub default_namespace: String,
    #[serde(default = "default_discovery")]
    pub discovery: DiscoveryBackend,
    #[serde(default = "default_search_program")]
    pub search_program: String,
    #[serde(default = "default_ignores")]
    pub ignores: Vec<String>,
    #[serde(default = "default_candidate_ttl_secs")]
    pub candidate_ttl_secs: u64,
    #[serde(default = "default_candidate_capacity")]
    pub candidate_capacity: usize,
    #[serde(default = "default_dictionary_max_age_secs")]
    pub dictionary_max_age_secs: u64,
    #[serde(default = "default_dictionary_capacity")]
    pub dictionary_capacity: usize,
    #[serde(default = "default_enable_diagnostics")]
    pub enable_diagnostics: bool,
}

fn default_dictionary_suffix() -> String {
    "_en.json".to_string()
}

fn default_locale_label() -> String {
    "en".to_string()
}

fn default_namespace() -> String {
    "common".to_string()
}

fn default_discovery() -> DiscoveryBackend {
    DiscoveryBackend::Fd
}

fn default_search_program() -> String {
    "fd".to_string()
}

// Search output is filtered through these before loading; an empty list keeps
// every candidate the search tool reports.
fn default_ignores() -> Vec<String> {
    vec!["**/node_modules/**".to_string()]
}

fn default_candidate_ttl_secs() -> u64 {
    5 * 60
}

fn default_candidate_capacity() -> usize {
    50
}

fn default_dictionary_max_age_secs() -> u64 {
    60 * 60
}

fn default_dictionary_capacity() -> usize {
    50
}

fn default_enable_diagnostics() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dictionary_suffix: default_dictionary_suffix(),
            locale_label: default_locale_label(),
            default_namespace: default_namespace(),
            discovery: default_discovery(),
            search_program: default_search_program(),
            ignores: default_ignores(),
            candidate_ttl_secs: default_candidate_ttl_secs(),
            candidate_capacity: default_candidate_capacity(),
            dictionary_max_age_secs: default_dictionary_max_age_secs(),
            dictionary_capacity: default_dictionary_capacity(),
            enable_diagnostics: default_enable_diagnostics(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if a glob pattern in `ignores` is invalid, the
    /// dictionary suffix is empty, or a cache bound is zero.
    pub fn validate(&self) -> Result<()> {
        if self.dictionary_suffix.is_empty() {
            bail!("'dictionarySuffix' must not be empty");
        }

        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        if self.candidate_ttl_secs == 0 || self.dictionary_max_age_secs == 0 {
            bail!("'candidateTtlSecs' and 'dictionaryMaxAgeSecs' must be greater than zero");
        }
        if self.candidate_capacity == 0 || self.dictionary_capacity == 0 {
            bail!("'candidateCapacity' and 'dictionaryCapacity' must be greater than zero");
        }

        Ok(())
    }

    /// Compiled `ignores` patterns. Invalid patterns are dropped; call
    /// [`Config::validate`] first to surface them.
    pub fn ignore_patterns(&self) -> Vec<Pattern> {
        self.ignores
            .iter()
            .filter_map(|p| Pattern::new(p).ok())
            .collect()
    }

    pub fn candidate_ttl(&self) -> Duration {
        Duration::from_secs(self.candidate_ttl_secs)
    }

    pub fn dictionary_max_age(&self) -> Duration {
        Duration::from_secs(self.dictionary_max_age_secs)
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
