//! Built-in launch action

use super::{ItemProvider, Launcher};
use crate::actions::ActionRegistry;
use crate::db::{IconInfo, IconSource, Item};
use crate::error::Result;
use crate::index::IndexPass;
use std::sync::Arc;

pub const STANDARD_PROVIDER_ID: &str = "standard_actions";

/// Launches the context item through the [`Launcher`]
pub const LAUNCH_ACTION: &str = "standard_actions.launch";

/// True when the context item has a launchable path
pub const QUERY_LAUNCHABLE_ACTION: &str = "standard_actions.query_launchable";

/// Provides the dynamic "Launch" item and its actions
pub struct StandardActionsProvider {
    launcher: Arc<dyn Launcher>,
}

impl StandardActionsProvider {
    pub fn new(launcher: Arc<dyn Launcher>) -> Self {
        Self { launcher }
    }
}

impl ItemProvider for StandardActionsProvider {
    fn provider_id(&self) -> &str {
        STANDARD_PROVIDER_ID
    }

    fn index(&self, pass: &mut IndexPass<'_>) -> Result<()> {
        pass.upsert(
            Item::new(STANDARD_PROVIDER_ID, "launch", "Launch")
                .with_description("Launch the selected item")
                .with_icon(IconInfo::new(IconSource::Theme, "standard_actions/launch"))
                .with_on_enter(LAUNCH_ACTION)
                .with_on_tab(LAUNCH_ACTION)
                .with_on_query_applicable(QUERY_LAUNCHABLE_ACTION),
        )?;
        Ok(())
    }

    fn register_actions(&self, actions: &mut ActionRegistry) {
        actions.register(QUERY_LAUNCHABLE_ACTION, |target| {
            target.and_then(|item| item.path.as_ref()).is_some()
        });

        let launcher = Arc::clone(&self.launcher);
        actions.register(LAUNCH_ACTION, move |target| {
            let Some(item) = target else {
                return false;
            };
            let Some(path) = item.path.as_deref() else {
                return false;
            };
            match launcher.launch(path, item.launch_args.as_deref()) {
                Ok(handled) => handled,
                Err(e) => {
                    tracing::warn!("Failed to launch {}: {}", path, e);
                    false
                }
            }
        });
    }
}
