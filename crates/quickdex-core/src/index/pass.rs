//! One provider's indexing pass

use crate::db::{Database, Item, UpsertOutcome};
use crate::error::{QuickdexError, Result};
use crate::providers::ItemProvider;
use rusqlite::Transaction;
use serde::Serialize;

/// Outcome of a committed pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PassSummary {
    pub provider_id: String,
    /// Version stamped on every item emitted by the pass
    pub version: i64,
    pub inserted: usize,
    pub updated: usize,
    /// Stale items deleted at the end of the pass
    pub removed: usize,
}

/// Open reconciliation pass for one provider
///
/// Every write goes through a single transaction. [`IndexPass::finish`]
/// deletes what was not re-emitted, advances the provider's version counter
/// and commits. Dropping the pass without finishing rolls back all of it.
pub struct IndexPass<'a> {
    db: &'a Database,
    tx: Transaction<'a>,
    provider_id: String,
    version: i64,
    inserted: usize,
    updated: usize,
}

impl<'a> IndexPass<'a> {
    /// Provider this pass belongs to
    pub fn provider_id(&self) -> &str {
        &self.provider_id
    }

    /// Version stamped on upserted items
    pub fn version(&self) -> i64 {
        self.version
    }

    /// Upsert an item, stamping it with this pass's provider and version
    pub fn upsert(&mut self, mut item: Item) -> Result<UpsertOutcome> {
        item.provider_id.clone_from(&self.provider_id);
        item.index_version = Some(self.version);

        let outcome = self.db.upsert_item(&item)?;
        match outcome {
            UpsertOutcome::Inserted(_) => self.inserted += 1,
            UpsertOutcome::Updated(_) => self.updated += 1,
        }
        Ok(outcome)
    }

    /// Delete stale items, persist the next version and commit
    pub fn finish(self) -> Result<PassSummary> {
        let IndexPass {
            db,
            tx,
            provider_id,
            version,
            inserted,
            updated,
        } = self;

        let removed = db.delete_stale_items(&provider_id, version)?;
        db.set_next_index_version(&provider_id, version + 1)?;
        tx.commit()?;

        tracing::info!(
            "Indexed provider '{}' at version {}: {} inserted, {} updated, {} removed",
            provider_id,
            version,
            inserted,
            updated,
            removed
        );

        Ok(PassSummary {
            provider_id,
            version,
            inserted,
            updated,
            removed,
        })
    }
}

impl Database {
    /// Open a pass for `provider_id` at its next index version
    pub fn begin_pass(&self, provider_id: &str) -> Result<IndexPass<'_>> {
        let tx = self.conn.unchecked_transaction()?;
        let version = self.next_index_version(provider_id)?;
        tracing::debug!("Beginning pass for '{}' at version {}", provider_id, version);

        Ok(IndexPass {
            db: self,
            tx,
            provider_id: provider_id.to_string(),
            version,
            inserted: 0,
            updated: 0,
        })
    }

    /// Drive a full pass for one provider
    ///
    /// A provider error rolls the pass back: nothing is deleted and the
    /// version counter stays where it was.
    pub fn run_provider_pass(&self, provider: &dyn ItemProvider) -> Result<PassSummary> {
        let provider_id = provider.provider_id();
        let mut pass = self.begin_pass(provider_id)?;

        if let Err(e) = provider.index(&mut pass) {
            tracing::warn!("Indexing pass for '{}' failed: {}", provider_id, e);
            drop(pass);
            return Err(match e {
                e @ (QuickdexError::StorageUnavailable(_)
                | QuickdexError::ProviderEnumerationFailed { .. }) => e,
                other => QuickdexError::ProviderEnumerationFailed {
                    provider_id: provider_id.to_string(),
                    reason: other.to_string(),
                },
            });
        }

        pass.finish()
    }
}
