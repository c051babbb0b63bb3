//! Catalog facade
//!
//! Owns the database, the action and provider registries and the
//! configuration, and exposes the operations a launcher front end drives:
//! reindexing, searching, and activating results.

use crate::actions::ActionRegistry;
use crate::config::Config;
use crate::db::{DatabaseStats, IconInfo, IconSource, Item};
use crate::error::{QuickdexError, Result};
use crate::index::{IndexReport, PassFailure, PassSummary};
use crate::providers::{
    FolderProvider, ItemProvider, Launcher, ProviderRegistry, ShortcutProvider,
    StandardActionsProvider,
};
use crate::search::{SearchResult, SearchScope};
use crate::Database;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

/// Provider id of ad hoc user-entered items
pub const CUSTOM_PROVIDER_ID: &str = "custom";

/// What activating a result did
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Activation {
    /// An action ran against a target item
    Action {
        name: String,
        target_id: Option<i64>,
        handled: bool,
    },
    /// Open the item's children
    Browse { id: i64 },
    /// Nothing to run
    Unhandled,
}

/// Launcher core: index, search, history and action dispatch
pub struct Catalog {
    db: Database,
    actions: ActionRegistry,
    providers: ProviderRegistry,
    config: Config,
}

impl Catalog {
    /// Open the database at `path` and set up the built-in providers
    pub fn open(path: impl AsRef<Path>, config: Config, launcher: Arc<dyn Launcher>) -> Result<Self> {
        let db = Database::open(path)?;
        Self::new(db, config, launcher)
    }

    /// Initialize `db`, discard last session's transient items and register
    /// the built-in providers
    pub fn new(db: Database, config: Config, launcher: Arc<dyn Launcher>) -> Result<Self> {
        db.initialize()?;
        let removed = db.delete_transient_items()?;
        tracing::info!("Discarded {} transient items", removed);

        let folders = FolderProvider::new(config.folders.clone());
        let shortcuts = ShortcutProvider::new(config.shortcuts.clone());
        let mut catalog = Self {
            db,
            actions: ActionRegistry::new(),
            providers: ProviderRegistry::new(),
            config,
        };
        catalog.register_provider(Arc::new(folders));
        catalog.register_provider(Arc::new(shortcuts));
        catalog.register_provider(Arc::new(StandardActionsProvider::new(launcher)));
        Ok(catalog)
    }

    /// Register a provider and install its actions
    pub fn register_provider(&mut self, provider: Arc<dyn ItemProvider>) {
        provider.register_actions(&mut self.actions);
        self.providers.register(provider);
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn providers(&self) -> &ProviderRegistry {
        &self.providers
    }

    pub fn actions(&self) -> &ActionRegistry {
        &self.actions
    }

    /// Run one pass per registered provider
    ///
    /// A provider whose enumeration fails is rolled back and reported; the
    /// remaining providers still run. Storage failures abort the whole run.
    pub fn update_index(&mut self) -> Result<IndexReport> {
        let mut report = IndexReport::default();
        for provider in self.providers.iter() {
            match self.db.run_provider_pass(provider.as_ref()) {
                Ok(summary) => report.passes.push(summary),
                Err(e) if e.is_enumeration_failure() => report.failures.push(PassFailure {
                    provider_id: provider.provider_id().to_string(),
                    reason: e.to_string(),
                }),
                Err(e) => return Err(e),
            }
        }
        Ok(report)
    }

    /// Run a pass for a single provider
    pub fn update_provider(&mut self, provider_id: &str) -> Result<PassSummary> {
        let provider = self
            .providers
            .get(provider_id)
            .ok_or_else(|| QuickdexError::UnknownProvider(provider_id.to_string()))?;
        self.db.run_provider_pass(provider.as_ref())
    }

    /// Ranked results for `term` within `scope`
    pub fn search(&self, term: &str, scope: SearchScope) -> Result<Vec<SearchResult>> {
        self.db.search_items(term, scope, &self.actions)
    }

    /// Record that the item was activated with `term`
    pub fn record_invocation(&self, id: i64, term: &str) -> Result<()> {
        self.db.record_invocation(id, term)
    }

    /// Dispatch an action by name
    pub fn resolve_action(&self, name: &str, target: Option<&Item>) -> bool {
        self.actions.resolve(name, target)
    }

    pub fn get_item(&self, id: i64) -> Result<Item> {
        self.db.get_item(id)
    }

    /// Delete a provider's user-created items
    pub fn clear_unowned(&self, provider_id: &str) -> Result<usize> {
        let removed = self.db.delete_unowned_items(provider_id)?;
        tracing::info!("Removed {} unowned items of '{}'", removed, provider_id);
        Ok(removed)
    }

    pub fn stats(&self) -> Result<DatabaseStats> {
        self.db.get_stats()
    }

    /// Add an item for a URL or existing path the user typed
    ///
    /// Returns `None` when the target is neither. An already known target
    /// returns the stored item unchanged.
    pub fn add_custom_item(&self, target: &str) -> Result<Option<Item>> {
        let target = target.trim();
        let Some((location, description)) = custom_target(target) else {
            return Ok(None);
        };

        if let Some(existing) = self.db.find_item(CUSTOM_PROVIDER_ID, &location)? {
            return Ok(Some(existing));
        }

        let item = Item::new(CUSTOM_PROVIDER_ID, &location, &location)
            .with_description(description)
            .with_transient(!self.config.store_custom_items)
            .with_icon(IconInfo::new(IconSource::Shell, &location))
            .with_path(&location);
        let id = self.db.insert_item(&item)?;
        tracing::debug!("Added custom item {} for {}", id, location);
        self.db.get_item(id).map(Some)
    }

    /// Enter on a result
    pub fn activate(&self, id: i64, term: &str, scope: SearchScope) -> Result<Activation> {
        let item = self.get_item(id)?;
        self.record_invocation(id, term)?;

        if let Some(action) = &item.on_enter {
            let target = self.action_target(&item, scope)?;
            return Ok(self.run_action(action, target));
        }

        // Fall back to the default action among the item's children
        let children = self.search("", SearchScope::Children(id))?;
        if let Some(first) = children.into_iter().next() {
            if let Some(action) = &first.item.on_enter {
                let target = if first.item.is_dynamic() {
                    item
                } else {
                    first.item.clone()
                };
                return Ok(self.run_action(action, target));
            }
        }

        Ok(Activation::Unhandled)
    }

    /// Tab on a result
    pub fn complete(&self, id: i64, term: &str, scope: SearchScope) -> Result<Activation> {
        let item = self.get_item(id)?;
        self.record_invocation(id, term)?;

        match &item.on_tab {
            Some(action) => {
                let target = self.action_target(&item, scope)?;
                Ok(self.run_action(action, target))
            }
            None => Ok(Activation::Browse { id }),
        }
    }

    // A dynamic item shown inside a container acts on the container
    fn action_target(&self, item: &Item, scope: SearchScope) -> Result<Item> {
        match scope {
            SearchScope::Children(parent_id) if item.is_dynamic() => self.get_item(parent_id),
            _ => Ok(item.clone()),
        }
    }

    fn run_action(&self, name: &str, target: Item) -> Activation {
        let handled = self.actions.resolve(name, Some(&target));
        Activation::Action {
            name: name.to_string(),
            target_id: target.id,
            handled,
        }
    }
}

/// Resolve a typed target to (location, description)
fn custom_target(target: &str) -> Option<(String, String)> {
    if target.is_empty() {
        return None;
    }

    let lower = target.to_lowercase();
    if ["http://", "https://", "mailto:"]
        .iter()
        .any(|prefix| lower.starts_with(prefix))
    {
        return Some((target.to_string(), target.to_string()));
    }
    if lower.starts_with("www.") {
        let url = format!("http://{}", target);
        return Some((url, target.to_string()));
    }

    let path = Path::new(target);
    if path.exists() {
        let description = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| target.to_string());
        return Some((target.to_string(), description));
    }

    // Bare host names such as "example.com"
    if target.contains('.') && !target.contains(['/', '\\']) && !target.contains(char::is_whitespace) {
        return Some((format!("http://{}", target), target.to_string()));
    }

    None
}
