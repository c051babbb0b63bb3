//! Configuration management

use crate::error::{QuickdexError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "QUICKDEX_CONFIG";

/// Environment variable overriding the database location
pub const DB_ENV: &str = "QUICKDEX_DB";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Persist ad hoc user-entered targets across restarts
    #[serde(default)]
    pub store_custom_items: bool,

    /// Roots for the filesystem provider
    #[serde(default)]
    pub folders: Vec<FolderConfig>,

    /// Static launch targets
    #[serde(default)]
    pub shortcuts: Vec<ShortcutConfig>,

    /// Maximum results shown by the CLI (0 = unlimited)
    #[serde(default)]
    pub result_limit: usize,
}

/// Folder walked by the filesystem provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderConfig {
    /// Root path; a leading `~` expands to the home directory
    pub path: PathBuf,

    /// Glob pattern matched against paths relative to the root
    #[serde(default = "default_pattern")]
    pub pattern: String,

    #[serde(default)]
    pub include_hidden: bool,
}

fn default_pattern() -> String {
    "**/*".to_string()
}

/// User-declared shortcut
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortcutConfig {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Path or URL opened on launch
    pub target: String,
    #[serde(default)]
    pub args: Option<String>,
}

impl Config {
    /// Load config from `QUICKDEX_CONFIG` or the default path
    pub fn load() -> Result<Self> {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(Self::default_path);
        Self::load_from(path)
    }

    /// Load config from path; a missing file yields the defaults
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Config::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get default config path
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(crate::CONFIG_DIR_NAME)
            .join("config.yml")
    }

    /// Database path from `QUICKDEX_DB` or the default cache location
    pub fn database_path() -> PathBuf {
        std::env::var_os(DB_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(crate::Database::default_path)
    }

    /// Reject configurations providers cannot index
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for shortcut in &self.shortcuts {
            if shortcut.id.trim().is_empty() {
                return Err(QuickdexError::Config("shortcut with empty id".to_string()));
            }
            if !seen.insert(shortcut.id.as_str()) {
                return Err(QuickdexError::Config(format!(
                    "duplicate shortcut id '{}'",
                    shortcut.id
                )));
            }
        }
        for folder in &self.folders {
            glob::Pattern::new(&folder.pattern).map_err(|e| {
                QuickdexError::Config(format!(
                    "invalid pattern '{}' for {}: {}",
                    folder.pattern,
                    folder.path.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }
}
