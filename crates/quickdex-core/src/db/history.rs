//! Invocation history

use super::Database;
use crate::error::{QuickdexError, Result};
use crate::matcher::normalize_term;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::params;
use serde::Serialize;

/// One (item, term) history row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    pub item_id: i64,
    /// Normalized term the item was activated with
    pub term: String,
    pub last_invocation: DateTime<Utc>,
    pub invocation_count: i64,
}

/// Timestamp encoding that sorts lexicographically in time order
pub(crate) fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

impl Database {
    /// Record that `item_id` was activated with `term`
    ///
    /// The term is stored normalized, so it keys history the same way
    /// search terms are matched.
    pub fn record_invocation(&self, item_id: i64, term: &str) -> Result<()> {
        self.record_invocation_at(item_id, term, Utc::now())
    }

    /// Record an invocation with an explicit timestamp
    pub fn record_invocation_at(&self, item_id: i64, term: &str, at: DateTime<Utc>) -> Result<()> {
        let exists: bool = self.conn.query_row(
            "SELECT COUNT(*) > 0 FROM items WHERE id = ?1",
            params![item_id],
            |row| row.get(0),
        )?;
        if !exists {
            return Err(QuickdexError::NotFound(item_id));
        }

        self.conn.execute(
            "INSERT INTO item_history (item_id, term, last_invocation, invocation_count)
             VALUES (?1, ?2, ?3, 1)
             ON CONFLICT(item_id, term) DO UPDATE SET
                last_invocation = excluded.last_invocation,
                invocation_count = invocation_count + 1",
            params![item_id, normalize_term(term), format_timestamp(at)],
        )?;
        Ok(())
    }

    /// All history rows of an item, most recent first
    pub fn history_for_item(&self, item_id: i64) -> Result<Vec<HistoryEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT item_id, term, last_invocation, invocation_count
             FROM item_history WHERE item_id = ?1
             ORDER BY last_invocation DESC, term",
        )?;
        let rows = stmt
            .query_map(params![item_id], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, i64>(3)?,
                ))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(rows
            .into_iter()
            .filter_map(|(item_id, term, at, count)| {
                parse_timestamp(&at).map(|last_invocation| HistoryEntry {
                    item_id,
                    term,
                    last_invocation,
                    invocation_count: count,
                })
            })
            .collect())
    }

    /// Count all history rows
    pub fn count_history(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM item_history", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}
