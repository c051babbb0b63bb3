//! Item providers
//!
//! A provider owns one category of items. During a reindex it emits every
//! item it currently knows about into an [`IndexPass`]; at registration time
//! it may also install handlers into the [`ActionRegistry`].

use crate::actions::ActionRegistry;
use crate::error::Result;
use crate::index::IndexPass;
use std::sync::Arc;

pub mod folder;
pub mod shortcuts;
pub mod standard;

pub use folder::FolderProvider;
pub use shortcuts::ShortcutProvider;
pub use standard::StandardActionsProvider;

/// Provider trait - every item source implements this
pub trait ItemProvider: Send + Sync {
    /// Provider identifier stored on every item it owns
    fn provider_id(&self) -> &str;

    /// Emit all current items into the pass
    fn index(&self, pass: &mut IndexPass<'_>) -> Result<()>;

    /// Install action handlers
    fn register_actions(&self, _actions: &mut ActionRegistry) {}
}

/// Opens launchable targets on behalf of the launch action
pub trait Launcher: Send + Sync {
    /// Launch `path` with optional arguments; returns whether it was handled
    fn launch(&self, path: &str, args: Option<&str>) -> Result<bool>;
}

/// Registry for managing provider instances
#[derive(Default)]
pub struct ProviderRegistry {
    providers: Vec<Arc<dyn ItemProvider>>,
}

impl ProviderRegistry {
    /// Create new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider, replacing any provider with the same id
    pub fn register(&mut self, provider: Arc<dyn ItemProvider>) {
        match self
            .providers
            .iter()
            .position(|p| p.provider_id() == provider.provider_id())
        {
            Some(index) => self.providers[index] = provider,
            None => self.providers.push(provider),
        }
    }

    /// Get provider by id
    pub fn get(&self, provider_id: &str) -> Option<Arc<dyn ItemProvider>> {
        self.providers
            .iter()
            .find(|p| p.provider_id() == provider_id)
            .cloned()
    }

    /// Providers in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn ItemProvider>> {
        self.providers.iter()
    }

    /// Registered provider ids in registration order
    pub fn ids(&self) -> Vec<String> {
        self.providers
            .iter()
            .map(|p| p.provider_id().to_string())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Item;

    struct Fixed(&'static str, &'static str);

    impl ItemProvider for Fixed {
        fn provider_id(&self) -> &str {
            self.0
        }

        fn index(&self, pass: &mut IndexPass<'_>) -> Result<()> {
            pass.upsert(Item::new(self.0, "only", self.1))?;
            Ok(())
        }
    }

    #[test]
    fn test_register_replaces_same_id() {
        let mut registry = ProviderRegistry::new();
        registry.register(Arc::new(Fixed("a", "First")));
        registry.register(Arc::new(Fixed("b", "Other")));
        registry.register(Arc::new(Fixed("a", "Second")));

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.ids(), vec!["a", "b"]);
        assert!(registry.get("b").is_some());
        assert!(registry.get("c").is_none());
    }
}
