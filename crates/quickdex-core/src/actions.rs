//! Name-keyed action dispatch
//!
//! Providers register handlers under an action name. The search engine calls
//! through the registry to evaluate `on_query_applicable` predicates, and the
//! application calls through it to execute `on_enter`/`on_tab` actions.

use crate::db::Item;
use std::collections::HashMap;
use std::sync::Arc;

/// Action handler; receives the context item, returns whether it handled it
pub type ActionHandler = Arc<dyn Fn(Option<&Item>) -> bool + Send + Sync>;

/// Registry mapping action names to handlers
#[derive(Default, Clone)]
pub struct ActionRegistry {
    handlers: HashMap<String, Vec<ActionHandler>>,
}

impl ActionRegistry {
    /// Create new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler under `name`; several handlers may share a name
    pub fn register<F>(&mut self, name: impl Into<String>, handler: F)
    where
        F: Fn(Option<&Item>) -> bool + Send + Sync + 'static,
    {
        self.handlers
            .entry(name.into())
            .or_default()
            .push(Arc::new(handler));
    }

    /// Invoke every handler registered under `name`
    ///
    /// Returns true if any handler answered true. All handlers run, even
    /// after one has answered. Unknown names resolve to false.
    pub fn resolve(&self, name: &str, target: Option<&Item>) -> bool {
        let Some(handlers) = self.handlers.get(name) else {
            tracing::debug!("No handler registered for action '{}'", name);
            return false;
        };
        handlers
            .iter()
            .fold(false, |handled, handler| handler(target) || handled)
    }

    /// Registered action names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl std::fmt::Debug for ActionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionRegistry")
            .field("actions", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_unknown_action_is_false() {
        let registry = ActionRegistry::new();
        assert!(!registry.resolve("nope", None));
    }

    #[test]
    fn test_handlers_are_or_ed() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut registry = ActionRegistry::new();

        let c = calls.clone();
        registry.register("audio.mute", move |_| {
            c.fetch_add(1, Ordering::SeqCst);
            true
        });
        let c = calls.clone();
        registry.register("audio.mute", move |_| {
            c.fetch_add(1, Ordering::SeqCst);
            false
        });

        assert!(registry.resolve("audio.mute", None));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_handler_sees_target() {
        let mut registry = ActionRegistry::new();
        registry.register("has_path", |target| {
            target.and_then(|item| item.path.as_ref()).is_some()
        });

        let item = Item::new("filesystem", "/bin/ls", "ls").with_path("/bin/ls");
        assert!(registry.resolve("has_path", Some(&item)));
        assert!(!registry.resolve("has_path", None));
        assert_eq!(registry.names(), vec!["has_path"]);
    }
}
