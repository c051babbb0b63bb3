//! User-declared launch shortcuts

use super::ItemProvider;
use crate::config::ShortcutConfig;
use crate::db::{IconInfo, IconSource, Item};
use crate::error::Result;
use crate::index::IndexPass;

/// Provider id of shortcut items
pub const SHORTCUT_PROVIDER_ID: &str = "shortcuts";

/// Emits one item per configured shortcut
pub struct ShortcutProvider {
    shortcuts: Vec<ShortcutConfig>,
}

impl ShortcutProvider {
    pub fn new(shortcuts: Vec<ShortcutConfig>) -> Self {
        Self { shortcuts }
    }
}

impl ItemProvider for ShortcutProvider {
    fn provider_id(&self) -> &str {
        SHORTCUT_PROVIDER_ID
    }

    fn index(&self, pass: &mut IndexPass<'_>) -> Result<()> {
        for shortcut in &self.shortcuts {
            let mut item = Item::new(SHORTCUT_PROVIDER_ID, &shortcut.id, &shortcut.title)
                .with_description(&shortcut.description)
                .with_icon(IconInfo::new(IconSource::Shell, &shortcut.target))
                .with_path(&shortcut.target);
            if let Some(args) = &shortcut.args {
                item = item.with_launch_args(args);
            }
            pass.upsert(item)?;
        }
        Ok(())
    }
}
