//! Database layer for quickdex
//!
//! SQLite storage for indexed items, per-term invocation history and
//! per-provider index version counters.

mod history;
mod items;
mod schema;
mod stats;
mod versions;

pub use history::HistoryEntry;
pub(crate) use history::parse_timestamp;
pub use items::{IconInfo, IconSource, Item, UpsertOutcome};
pub(crate) use items::{ITEM_COLUMNS, ITEM_COLUMN_COUNT};
pub use schema::Database;
pub use stats::{DatabaseStats, ProviderStats};
pub use versions::INITIAL_INDEX_VERSION;
use std::path::PathBuf;

impl Database {
    /// Get the default database path
    pub fn default_path() -> PathBuf {
        dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(crate::CACHE_DIR_NAME)
            .join("index.sqlite")
    }
}
