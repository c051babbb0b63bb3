//! Per-provider index version counters

use super::Database;
use crate::error::Result;
use chrono::Utc;
use rusqlite::params;

/// Version assigned to a provider's first pass
pub const INITIAL_INDEX_VERSION: i64 = 1;

impl Database {
    /// Version the provider's next pass will stamp on its items
    pub fn next_index_version(&self, provider_id: &str) -> Result<i64> {
        let result = self.conn.query_row(
            "SELECT next_index_version FROM provider_versions WHERE provider_id = ?1",
            params![provider_id],
            |row| row.get(0),
        );
        match result {
            Ok(version) => Ok(version),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(INITIAL_INDEX_VERSION),
            Err(e) => Err(e.into()),
        }
    }

    /// Persist the provider's next version
    pub fn set_next_index_version(&self, provider_id: &str, version: i64) -> Result<()> {
        self.conn.execute(
            "INSERT INTO provider_versions (provider_id, next_index_version, updated_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(provider_id) DO UPDATE SET
                next_index_version = excluded.next_index_version,
                updated_at = excluded.updated_at",
            params![provider_id, version, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }
}
