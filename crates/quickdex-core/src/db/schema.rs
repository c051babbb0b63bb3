//! Database schema and initialization

use crate::error::Result;
use rusqlite::{params, Connection};
use std::path::Path;

/// Main database handle
pub struct Database {
    pub(crate) conn: Connection,
}

const SCHEMA_VERSION: i32 = 3;

const CREATE_TABLES: &str = r#"
-- Indexed items, one row per (provider_id, item_id)
CREATE TABLE IF NOT EXISTS items (
    id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
    provider_id TEXT NOT NULL,
    item_id TEXT NOT NULL,
    title TEXT NOT NULL,
    description TEXT NOT NULL,
    is_transient INTEGER NOT NULL,
    icon_source INTEGER NOT NULL,
    icon_path TEXT NOT NULL,
    index_version INTEGER NULL,
    parent_id INTEGER NULL,
    path TEXT NULL,
    launch_args TEXT NULL,
    on_enter TEXT NULL,
    on_tab TEXT NULL,
    on_query_applicable TEXT NULL,
    UNIQUE (provider_id, item_id)
);

-- Per-item, per-normalized-term invocation history
CREATE TABLE IF NOT EXISTS item_history (
    id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
    item_id INTEGER NOT NULL,
    term TEXT NOT NULL,
    last_invocation TEXT NOT NULL,
    invocation_count INTEGER NOT NULL,
    UNIQUE (item_id, term)
);

-- Schema version tracking
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY
);
"#;

impl Database {
    /// Open database at path, creating if necessary
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        Ok(Self { conn })
    }

    /// Open in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Initialize database schema
    pub fn initialize(&self) -> Result<()> {
        self.conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA cache_size = -16000;
             PRAGMA busy_timeout = 5000;",
        )?;

        self.conn.execute_batch(CREATE_TABLES)?;

        // Run migrations to upgrade existing databases (BEFORE setting version)
        self.migrate()?;

        self.conn.execute(
            "INSERT OR REPLACE INTO schema_version (version) VALUES (?1)",
            params![SCHEMA_VERSION],
        )?;

        Ok(())
    }

    /// Get current schema version
    pub fn schema_version(&self) -> Result<Option<i32>> {
        let version = self
            .conn
            .query_row(
                "SELECT version FROM schema_version ORDER BY version DESC LIMIT 1",
                [],
                |row| row.get(0),
            )
            .ok();
        Ok(version)
    }

    /// Run migrations to upgrade schema to current version
    pub fn migrate(&self) -> Result<()> {
        let current = self.schema_version()?.unwrap_or(0);

        if current < 2 {
            self.migrate_to_v2()?;
        }

        if current < 3 {
            self.migrate_to_v3()?;
        }

        Ok(())
    }

    fn has_column(&self, table: &str, column: &str) -> bool {
        self.conn
            .query_row(
                "SELECT COUNT(*) > 0 FROM pragma_table_info(?1) WHERE name = ?2",
                params![table, column],
                |row| row.get(0),
            )
            .unwrap_or(false)
    }

    fn migrate_to_v2(&self) -> Result<()> {
        if !self.has_column("items", "launch_args") {
            self.conn
                .execute("ALTER TABLE items ADD COLUMN launch_args TEXT NULL", [])?;
        }

        self.conn.execute(
            "INSERT OR REPLACE INTO schema_version (version) VALUES (?1)",
            params![2],
        )?;

        Ok(())
    }

    fn migrate_to_v3(&self) -> Result<()> {
        // Version counters moved from per-provider settings into the store
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS provider_versions (
                provider_id TEXT PRIMARY KEY NOT NULL,
                next_index_version INTEGER NOT NULL,
                updated_at TEXT NOT NULL
            )",
            [],
        )?;

        self.conn.execute_batch(
            "CREATE INDEX IF NOT EXISTS idx_items_provider_version ON items(provider_id, index_version);
             CREATE INDEX IF NOT EXISTS idx_items_parent ON items(parent_id);
             CREATE INDEX IF NOT EXISTS idx_items_transient ON items(is_transient);
             CREATE INDEX IF NOT EXISTS idx_item_history_item ON item_history(item_id);",
        )?;

        self.conn.execute(
            "INSERT OR REPLACE INTO schema_version (version) VALUES (?1)",
            params![3],
        )?;

        Ok(())
    }
}
