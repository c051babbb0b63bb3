//! Filesystem provider
//!
//! Walks configured folders and emits one item per matching file.

use super::ItemProvider;
use crate::config::FolderConfig;
use crate::db::{IconInfo, IconSource, Item};
use crate::error::Result;
use crate::index::IndexPass;
use glob::Pattern;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

pub const FOLDER_PROVIDER_ID: &str = "filesystem";

/// Filesystem provider
pub struct FolderProvider {
    folders: Vec<FolderConfig>,
}

impl FolderProvider {
    pub fn new(folders: Vec<FolderConfig>) -> Self {
        Self { folders }
    }

    fn index_folder(&self, folder: &FolderConfig, pass: &mut IndexPass<'_>) -> Result<usize> {
        let pattern = Pattern::new(&folder.pattern)?;
        let root = expand_home(&folder.path);

        if !root.is_dir() {
            tracing::warn!("Skipping missing folder {}", root.display());
            return Ok(0);
        }

        let include_hidden = folder.include_hidden;
        let walker = WalkDir::new(&root)
            .follow_links(true)
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || include_hidden || !is_hidden(e));

        let mut count = 0;
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry under {}: {}", root.display(), e);
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let relative = path
                .strip_prefix(&root)
                .map(|p| p.to_string_lossy().to_string())
                .unwrap_or_else(|_| path.to_string_lossy().to_string());
            if !pattern.matches(&relative) {
                continue;
            }

            pass.upsert(file_item(path))?;
            count += 1;
        }

        Ok(count)
    }
}

impl ItemProvider for FolderProvider {
    fn provider_id(&self) -> &str {
        FOLDER_PROVIDER_ID
    }

    fn index(&self, pass: &mut IndexPass<'_>) -> Result<()> {
        for folder in &self.folders {
            let count = self.index_folder(folder, pass)?;
            tracing::debug!("Indexed {} files from {}", count, folder.path.display());
        }
        Ok(())
    }
}

fn file_item(path: &Path) -> Item {
    let full = path.to_string_lossy().to_string();
    let title = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| full.clone());

    Item::new(FOLDER_PROVIDER_ID, &full, title)
        .with_description(&full)
        .with_icon(IconInfo::new(IconSource::Shell, &full))
        .with_path(full)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| path.to_path_buf()),
        Err(_) => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use crate::error::QuickdexError;
    use std::fs;
    use tempfile::TempDir;

    fn folder(path: &Path, pattern: &str) -> FolderConfig {
        FolderConfig {
            path: path.to_path_buf(),
            pattern: pattern.to_string(),
            include_hidden: false,
        }
    }

    fn test_db() -> Database {
        let db = Database::open_in_memory().unwrap();
        db.initialize().unwrap();
        db
    }

    #[test]
    fn test_folder_provider_indexes_matching_files() {
        let temp = TempDir::new().unwrap();
        let base = temp.path();
        fs::create_dir_all(base.join("tools")).unwrap();
        fs::write(base.join("firefox.desktop"), "").unwrap();
        fs::write(base.join("tools/htop.desktop"), "").unwrap();
        fs::write(base.join("notes.txt"), "").unwrap();

        let db = test_db();
        let provider = FolderProvider::new(vec![folder(base, "**/*.desktop")]);
        let summary = db.run_provider_pass(&provider).unwrap();
        assert_eq!(summary.inserted, 2);

        let items = db.list_provider_items(FOLDER_PROVIDER_ID).unwrap();
        let titles: Vec<_> = items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["firefox", "htop"]);

        let full = base.join("firefox.desktop").to_string_lossy().to_string();
        assert_eq!(items[0].item_id, full);
        assert_eq!(items[0].description, full);
        assert_eq!(items[0].path.as_deref(), Some(full.as_str()));
        assert_eq!(items[0].icon.source, IconSource::Shell);
    }

    #[test]
    fn test_folder_provider_skips_hidden() {
        let temp = TempDir::new().unwrap();
        let base = temp.path();
        fs::create_dir_all(base.join(".config")).unwrap();
        fs::write(base.join(".config/secret.sh"), "").unwrap();
        fs::write(base.join(".hidden.sh"), "").unwrap();
        fs::write(base.join("visible.sh"), "").unwrap();

        let db = test_db();
        db.run_provider_pass(&FolderProvider::new(vec![folder(base, "**/*")]))
            .unwrap();
        assert_eq!(db.count_items().unwrap(), 1);

        let mut with_hidden = folder(base, "**/*");
        with_hidden.include_hidden = true;
        db.run_provider_pass(&FolderProvider::new(vec![with_hidden]))
            .unwrap();
        assert_eq!(db.count_items().unwrap(), 3);
    }

    #[test]
    fn test_missing_folder_is_skipped() {
        let db = test_db();
        let provider = FolderProvider::new(vec![folder(Path::new("/nonexistent/quickdex"), "*")]);
        let summary = db.run_provider_pass(&provider).unwrap();
        assert_eq!(summary.inserted, 0);
    }

    #[test]
    fn test_bad_pattern_fails_pass() {
        let temp = TempDir::new().unwrap();
        let db = test_db();
        let provider = FolderProvider::new(vec![folder(temp.path(), "[")]);

        let err = db.run_provider_pass(&provider).unwrap_err();
        assert!(matches!(err, QuickdexError::ProviderEnumerationFailed { .. }));
        assert_eq!(db.next_index_version(FOLDER_PROVIDER_ID).unwrap(), 1);
    }
}
