//! Quickdex Core Library
//!
//! Search-and-indexing core for a desktop quick launcher.
//!
//! # Features
//! - Fuzzy subsequence matcher with reproducible scoring
//! - SQLite item store with per-provider versioned reindexing
//! - Usage-history ranking keyed by normalized search terms
//! - Name-keyed action dispatch for dynamically applicable items

pub mod actions;
pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod index;
pub mod matcher;
pub mod providers;
pub mod search;

pub use actions::{ActionHandler, ActionRegistry};
pub use catalog::{Activation, Catalog, CUSTOM_PROVIDER_ID};
pub use config::{Config, FolderConfig, ShortcutConfig};
pub use db::{
    Database, DatabaseStats, HistoryEntry, IconInfo, IconSource, Item, ProviderStats,
    UpsertOutcome,
};
pub use error::{Error, QuickdexError, Result};
pub use index::{IndexPass, IndexReport, PassFailure, PassSummary};
pub use matcher::{fuzzy_match, match_score, normalize_term, Match, MATCH_MARKER};
pub use providers::{
    FolderProvider, ItemProvider, Launcher, ProviderRegistry, ShortcutProvider,
    StandardActionsProvider,
};
pub use search::{SearchResult, SearchScope};

/// Default cache directory name
pub const CACHE_DIR_NAME: &str = "quickdex";

/// Default config directory name
pub const CONFIG_DIR_NAME: &str = "quickdex";
