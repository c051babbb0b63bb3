//! Index reconciliation
//!
//! Each provider emits the items it currently knows about under a fresh
//! version number; whatever it did not re-emit is deleted when the pass
//! completes.

mod pass;

pub use pass::{IndexPass, PassSummary};

use serde::Serialize;

/// Provider whose pass was rolled back
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PassFailure {
    pub provider_id: String,
    pub reason: String,
}

/// Per-provider outcome of a full reindex
#[derive(Debug, Clone, Default, Serialize)]
pub struct IndexReport {
    pub passes: Vec<PassSummary>,
    pub failures: Vec<PassFailure>,
}

impl IndexReport {
    /// Whether every provider committed
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn total_inserted(&self) -> usize {
        self.passes.iter().map(|p| p.inserted).sum()
    }

    pub fn total_updated(&self) -> usize {
        self.passes.iter().map(|p| p.updated).sum()
    }

    pub fn total_removed(&self) -> usize {
        self.passes.iter().map(|p| p.removed).sum()
    }
}
