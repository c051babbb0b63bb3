//! Item operations

use super::Database;
use crate::error::{QuickdexError, Result};
use rusqlite::{params, ErrorCode, Row};
use serde::{Deserialize, Serialize};

/// Column list shared by every query that materializes an [`Item`]
pub(crate) const ITEM_COLUMNS: &str = "items.id, items.provider_id, items.item_id, items.title, \
     items.description, items.is_transient, items.icon_source, items.icon_path, \
     items.index_version, items.parent_id, items.path, items.launch_args, items.on_enter, \
     items.on_tab, items.on_query_applicable";

/// Number of columns in [`ITEM_COLUMNS`]
pub(crate) const ITEM_COLUMN_COUNT: usize = 15;

/// Where a renderer should load an item's icon from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IconSource {
    #[default]
    File,
    Shell,
    Resource,
    ControlPanelApplet,
    Theme,
}

impl IconSource {
    pub fn as_i64(self) -> i64 {
        match self {
            Self::File => 0,
            Self::Shell => 1,
            Self::Resource => 2,
            Self::ControlPanelApplet => 3,
            Self::Theme => 4,
        }
    }

    pub fn from_i64(value: i64) -> Self {
        match value {
            1 => Self::Shell,
            2 => Self::Resource,
            3 => Self::ControlPanelApplet,
            4 => Self::Theme,
            _ => Self::File,
        }
    }
}

/// Icon descriptor
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IconInfo {
    pub source: IconSource,
    pub path: String,
}

impl IconInfo {
    pub fn new(source: IconSource, path: impl Into<String>) -> Self {
        Self {
            source,
            path: path.into(),
        }
    }
}

/// Indexed item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Surrogate id, assigned on first insert
    pub id: Option<i64>,
    pub provider_id: String,
    pub item_id: String,
    pub title: String,
    pub description: String,
    /// Discarded on the next process start
    pub is_transient: bool,
    pub icon: IconInfo,
    /// Pass that last emitted the item; `None` for user-created items
    pub index_version: Option<i64>,

    // Facets
    pub parent_id: Option<i64>,
    pub path: Option<String>,
    pub launch_args: Option<String>,
    pub on_enter: Option<String>,
    pub on_tab: Option<String>,
    /// Action predicate gating visibility independent of text match
    pub on_query_applicable: Option<String>,
}

impl Item {
    /// Create new item with empty description and no facets
    pub fn new(
        provider_id: impl Into<String>,
        item_id: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            provider_id: provider_id.into(),
            item_id: item_id.into(),
            title: title.into(),
            description: String::new(),
            is_transient: false,
            icon: IconInfo::default(),
            index_version: None,
            parent_id: None,
            path: None,
            launch_args: None,
            on_enter: None,
            on_tab: None,
            on_query_applicable: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_icon(mut self, icon: IconInfo) -> Self {
        self.icon = icon;
        self
    }

    pub fn with_transient(mut self, is_transient: bool) -> Self {
        self.is_transient = is_transient;
        self
    }

    pub fn with_index_version(mut self, version: i64) -> Self {
        self.index_version = Some(version);
        self
    }

    pub fn with_parent(mut self, parent_id: i64) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_launch_args(mut self, args: impl Into<String>) -> Self {
        self.launch_args = Some(args.into());
        self
    }

    pub fn with_on_enter(mut self, action: impl Into<String>) -> Self {
        self.on_enter = Some(action.into());
        self
    }

    pub fn with_on_tab(mut self, action: impl Into<String>) -> Self {
        self.on_tab = Some(action.into());
        self
    }

    pub fn with_on_query_applicable(mut self, action: impl Into<String>) -> Self {
        self.on_query_applicable = Some(action.into());
        self
    }

    /// Whether visibility is gated by an action predicate
    pub fn is_dynamic(&self) -> bool {
        self.on_query_applicable.is_some()
    }

    /// Build an item from a row selected with [`ITEM_COLUMNS`]
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: Some(row.get(0)?),
            provider_id: row.get(1)?,
            item_id: row.get(2)?,
            title: row.get(3)?,
            description: row.get(4)?,
            is_transient: row.get::<_, i64>(5)? != 0,
            icon: IconInfo {
                source: IconSource::from_i64(row.get(6)?),
                path: row.get(7)?,
            },
            index_version: row.get(8)?,
            parent_id: row.get(9)?,
            path: row.get(10)?,
            launch_args: row.get(11)?,
            on_enter: row.get(12)?,
            on_tab: row.get(13)?,
            on_query_applicable: row.get(14)?,
        })
    }
}

/// Result of [`Database::upsert_item`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted(i64),
    Updated(i64),
}

impl UpsertOutcome {
    /// Surrogate id of the affected row
    pub fn id(self) -> i64 {
        match self {
            Self::Inserted(id) | Self::Updated(id) => id,
        }
    }
}

impl Database {
    /// Insert a new item, failing if its (provider_id, item_id) pair exists
    pub fn insert_item(&self, item: &Item) -> Result<i64> {
        let result = self.conn.execute(
            "INSERT INTO items (provider_id, item_id, title, description, is_transient, icon_source,
                                icon_path, index_version, parent_id, path, launch_args, on_enter,
                                on_tab, on_query_applicable)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
            params![
                item.provider_id,
                item.item_id,
                item.title,
                item.description,
                item.is_transient,
                item.icon.source.as_i64(),
                item.icon.path,
                item.index_version,
                item.parent_id,
                item.path,
                item.launch_args,
                item.on_enter,
                item.on_tab,
                item.on_query_applicable
            ],
        );
        match result {
            Ok(_) => Ok(self.conn.last_insert_rowid()),
            Err(rusqlite::Error::SqliteFailure(e, _)) if e.code == ErrorCode::ConstraintViolation => {
                Err(QuickdexError::DuplicateKey {
                    provider_id: item.provider_id.clone(),
                    item_id: item.item_id.clone(),
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Update the row for (provider_id, item_id) in place, inserting if absent
    pub fn upsert_item(&self, item: &Item) -> Result<UpsertOutcome> {
        let Some(id) = self.find_item_id(&item.provider_id, &item.item_id)? else {
            return self.insert_item(item).map(UpsertOutcome::Inserted);
        };

        self.conn.execute(
            "UPDATE items SET title = ?2, description = ?3, is_transient = ?4, icon_source = ?5,
                              icon_path = ?6, index_version = ?7, parent_id = ?8, path = ?9,
                              launch_args = ?10, on_enter = ?11, on_tab = ?12,
                              on_query_applicable = ?13
             WHERE id = ?1",
            params![
                id,
                item.title,
                item.description,
                item.is_transient,
                item.icon.source.as_i64(),
                item.icon.path,
                item.index_version,
                item.parent_id,
                item.path,
                item.launch_args,
                item.on_enter,
                item.on_tab,
                item.on_query_applicable
            ],
        )?;
        Ok(UpsertOutcome::Updated(id))
    }

    /// Get item by surrogate id
    pub fn get_item(&self, id: i64) -> Result<Item> {
        let result = self.conn.query_row(
            &format!("SELECT {} FROM items WHERE id = ?1", ITEM_COLUMNS),
            params![id],
            Item::from_row,
        );
        match result {
            Ok(item) => Ok(item),
            Err(rusqlite::Error::QueryReturnedNoRows) => Err(QuickdexError::NotFound(id)),
            Err(e) => Err(e.into()),
        }
    }

    /// Find item by its provider-scoped key
    pub fn find_item(&self, provider_id: &str, item_id: &str) -> Result<Option<Item>> {
        let result = self.conn.query_row(
            &format!(
                "SELECT {} FROM items WHERE provider_id = ?1 AND item_id = ?2",
                ITEM_COLUMNS
            ),
            params![provider_id, item_id],
            Item::from_row,
        );
        match result {
            Ok(item) => Ok(Some(item)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn find_item_id(&self, provider_id: &str, item_id: &str) -> Result<Option<i64>> {
        let result = self.conn.query_row(
            "SELECT id FROM items WHERE provider_id = ?1 AND item_id = ?2",
            params![provider_id, item_id],
            |row| row.get(0),
        );
        match result {
            Ok(id) => Ok(Some(id)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List all items owned by a provider
    pub fn list_provider_items(&self, provider_id: &str) -> Result<Vec<Item>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM items WHERE provider_id = ?1 ORDER BY title, item_id",
            ITEM_COLUMNS
        ))?;
        let items = stmt
            .query_map(params![provider_id], Item::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(items)
    }

    /// List direct children of a container item
    pub fn list_children(&self, parent_id: i64) -> Result<Vec<Item>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM items WHERE parent_id = ?1 ORDER BY title, description",
            ITEM_COLUMNS
        ))?;
        let items = stmt
            .query_map(params![parent_id], Item::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(items)
    }

    /// Count all items
    pub fn count_items(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM items", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Delete a provider's items older than `current_version`, with their history
    pub fn delete_stale_items(&self, provider_id: &str, current_version: i64) -> Result<usize> {
        self.in_transaction(|| {
            self.conn.execute(
                "DELETE FROM item_history WHERE item_id IN
                     (SELECT id FROM items WHERE provider_id = ?1 AND index_version < ?2)",
                params![provider_id, current_version],
            )?;
            let rows = self.conn.execute(
                "DELETE FROM items WHERE provider_id = ?1 AND index_version < ?2",
                params![provider_id, current_version],
            )?;
            Ok(rows)
        })
    }

    /// Delete a provider's user-created items (null index version), with their history
    pub fn delete_unowned_items(&self, provider_id: &str) -> Result<usize> {
        self.in_transaction(|| {
            self.conn.execute(
                "DELETE FROM item_history WHERE item_id IN
                     (SELECT id FROM items WHERE provider_id = ?1 AND index_version IS NULL)",
                params![provider_id],
            )?;
            let rows = self.conn.execute(
                "DELETE FROM items WHERE provider_id = ?1 AND index_version IS NULL",
                params![provider_id],
            )?;
            Ok(rows)
        })
    }

    /// Delete every transient item, with its history
    pub fn delete_transient_items(&self) -> Result<usize> {
        self.in_transaction(|| {
            self.conn.execute(
                "DELETE FROM item_history WHERE item_id IN
                     (SELECT id FROM items WHERE is_transient <> 0)",
                [],
            )?;
            let rows = self
                .conn
                .execute("DELETE FROM items WHERE is_transient <> 0", [])?;
            Ok(rows)
        })
    }

    /// Run `f` atomically, joining the enclosing transaction if one is open
    pub(crate) fn in_transaction<T>(&self, f: impl FnOnce() -> Result<T>) -> Result<T> {
        if !self.conn.is_autocommit() {
            return f();
        }
        let tx = self.conn.unchecked_transaction()?;
        let value = f()?;
        tx.commit()?;
        Ok(value)
    }
}
