//! Translation lookup engine.
//!
//! ## Components
//!
//! - `discovery`: find candidate dictionary files under a root (TTL cached)
//! - `dictionary`: parse dictionaries, reusing parses while mtimes are unchanged
//! - `scanner`: lexical scan of a line for quoted keys
//! - `resolver`: whole-document scans and cursor lookups
//! - `cache`: the expiring LRU both caches are built on

pub mod cache;
pub mod dictionary;
pub mod discovery;
pub mod resolver;
pub mod scanner;

pub use cache::{Clock, ExpiringLru, ManualClock, SystemClock};
pub use dictionary::{
    CacheStats, DictionaryCache, DictionaryEntry, DictionaryOptions, namespace_from_path,
    parse_dictionary,
};
pub use discovery::{DiscoveryOptions, FileDiscoverer};
pub use resolver::{Resolver, TranslationMatch, lookup};
pub use scanner::{KeyTokens, MatchToken, scan_line};
