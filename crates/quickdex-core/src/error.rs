//! Error types for quickdex

use thiserror::Error;

/// Result type alias using QuickdexError
pub type Result<T> = std::result::Result<T, QuickdexError>;

/// Error type alias for convenience
pub type Error = QuickdexError;

/// Exit codes for CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const NOT_FOUND: i32 = 2;
    pub const INVALID_INPUT: i32 = 3;
}

/// Main error type for quickdex
#[derive(Debug, Error)]
pub enum QuickdexError {
    #[error("Item not found for id {0}")]
    NotFound(i64),

    #[error("Duplicate item key: {provider_id}/{item_id}")]
    DuplicateKey {
        provider_id: String,
        item_id: String,
    },

    #[error("Provider '{provider_id}' failed to enumerate items: {reason}")]
    ProviderEnumerationFailed { provider_id: String, reason: String },

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(#[from] rusqlite::Error),

    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Walk directory error: {0}")]
    WalkDir(#[from] walkdir::Error),

    #[error("Glob pattern error: {0}")]
    GlobPattern(#[from] glob::PatternError),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl QuickdexError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NotFound(_) | Self::UnknownProvider(_) => exit_codes::NOT_FOUND,
            Self::InvalidInput(_) | Self::Config(_) | Self::DuplicateKey { .. } => {
                exit_codes::INVALID_INPUT
            }
            _ => exit_codes::GENERAL_ERROR,
        }
    }

    /// Whether a failed provider pass should be retried on the next reindex
    pub fn is_enumeration_failure(&self) -> bool {
        matches!(self, Self::ProviderEnumerationFailed { .. })
    }
}
