//! Database statistics

use super::Database;
use crate::error::Result;

/// Item count for one provider
#[derive(Debug, Clone, serde::Serialize)]
pub struct ProviderStats {
    pub provider_id: String,
    pub item_count: usize,
    pub next_index_version: i64,
}

/// Database stats
#[derive(Debug, Clone, serde::Serialize)]
pub struct DatabaseStats {
    pub item_count: usize,
    pub transient_count: usize,
    pub dynamic_count: usize,
    pub history_count: usize,
    pub providers: Vec<ProviderStats>,
}

impl Database {
    /// Get database statistics
    pub fn get_stats(&self) -> Result<DatabaseStats> {
        let item_count = self.count_items()?;

        let transient_count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM items WHERE is_transient <> 0",
            [],
            |row| row.get(0),
        )?;

        let dynamic_count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM items WHERE on_query_applicable IS NOT NULL",
            [],
            |row| row.get(0),
        )?;

        let mut stmt = self.conn.prepare(
            "SELECT i.provider_id, COUNT(*), COALESCE(v.next_index_version, 1)
             FROM items i
             LEFT JOIN provider_versions v ON v.provider_id = i.provider_id
             GROUP BY i.provider_id
             ORDER BY i.provider_id",
        )?;
        let providers = stmt
            .query_map([], |row| {
                Ok(ProviderStats {
                    provider_id: row.get(0)?,
                    item_count: row.get::<_, i64>(1)? as usize,
                    next_index_version: row.get(2)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(DatabaseStats {
            item_count,
            transient_count: transient_count as usize,
            dynamic_count: dynamic_count as usize,
            history_count: self.count_history()?,
            providers,
        })
    }

    /// Vacuum the database
    pub fn vacuum(&self) -> Result<()> {
        self.conn.execute("VACUUM", [])?;
        Ok(())
    }

    /// Remove history rows whose item no longer exists
    pub fn cleanup_orphaned_history(&self) -> Result<usize> {
        let rows = self.conn.execute(
            "DELETE FROM item_history WHERE item_id NOT IN (SELECT id FROM items)",
            [],
        )?;
        Ok(rows)
    }
}
