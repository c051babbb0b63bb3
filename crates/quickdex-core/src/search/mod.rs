//! Search engine module
//!
//! Combines the fuzzy matcher with invocation history to rank items for a
//! term, either across the whole index or among the children of one item.

mod ranking;

pub use ranking::{common_prefix_len, compare, history_score};

use crate::actions::ActionRegistry;
use crate::db::{parse_timestamp, Database, Item, ITEM_COLUMNS, ITEM_COLUMN_COUNT};
use crate::error::Result;
use crate::matcher::{fuzzy_match, normalize_term};
use chrono::{DateTime, Utc};
use rusqlite::params;
use serde::Serialize;

/// Where a search looks for candidates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchScope {
    /// Every static item, plus dynamic items applicable without context
    #[default]
    Root,
    /// Children of the item, plus dynamic items applicable to it
    Children(i64),
}

/// Ranked search result
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    pub item: Item,
    /// Matcher score of the title; 0 for an empty term
    pub match_score: f64,
    pub history_score: f64,
    /// Most recent invocation under any term
    pub last_invocation: Option<DateTime<Utc>>,
    /// Title with the matched characters marked
    pub marked_up_title: String,
}

struct Candidate {
    item: Item,
    history: Vec<(String, DateTime<Utc>)>,
}

impl Database {
    /// Rank items for `term` within `scope`
    ///
    /// Dynamic items are only kept when their `on_query_applicable` action
    /// resolves true; the predicate is evaluated on every call, after the
    /// text match.
    pub fn search_items(
        &self,
        term: &str,
        scope: SearchScope,
        actions: &ActionRegistry,
    ) -> Result<Vec<SearchResult>> {
        let term = normalize_term(term);
        let context = match scope {
            SearchScope::Root => None,
            SearchScope::Children(parent_id) => Some(self.get_item(parent_id)?),
        };

        let mut results = Vec::new();
        for candidate in self.load_candidates(scope)? {
            let Candidate { item, history } = candidate;

            let (match_score, marked_up_title) = if term.is_empty() {
                (0.0, item.title.clone())
            } else {
                let m = fuzzy_match(&term, &item.title);
                if !m.is_found() {
                    continue;
                }
                (m.score, m.marked_up)
            };

            let in_scope = match scope {
                SearchScope::Children(parent_id) if item.parent_id == Some(parent_id) => true,
                _ => match &item.on_query_applicable {
                    Some(action) => actions.resolve(action, context.as_ref()),
                    None => true,
                },
            };
            if !in_scope {
                continue;
            }

            results.push(SearchResult {
                history_score: history_score(&term, history.iter().map(|(t, _)| t.as_str())),
                last_invocation: history.iter().map(|(_, at)| *at).max(),
                match_score,
                marked_up_title,
                item,
            });
        }

        results.sort_by(compare);
        tracing::debug!(
            "Search '{}' in {:?} returned {} results",
            term,
            scope,
            results.len()
        );
        Ok(results)
    }

    fn load_candidates(&self, scope: SearchScope) -> Result<Vec<Candidate>> {
        let base = format!(
            "SELECT {}, item_history.term, item_history.last_invocation
             FROM items LEFT JOIN item_history ON item_history.item_id = items.id",
            ITEM_COLUMNS
        );

        let rows = match scope {
            SearchScope::Root => {
                let mut stmt = self.conn.prepare(&format!("{} ORDER BY items.id", base))?;
                let rows = stmt
                    .query_map([], candidate_row)?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                rows
            }
            SearchScope::Children(parent_id) => {
                let mut stmt = self.conn.prepare(&format!(
                    "{} WHERE items.parent_id = ?1 OR items.on_query_applicable IS NOT NULL
                     ORDER BY items.id",
                    base
                ))?;
                let rows = stmt
                    .query_map(params![parent_id], candidate_row)?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                rows
            }
        };

        // Rows arrive grouped by item id, one per history entry
        let mut candidates: Vec<Candidate> = Vec::new();
        for (item, entry) in rows {
            let history_entry = entry.and_then(|(term, at)| parse_timestamp(&at).map(|at| (term, at)));
            match candidates.last_mut() {
                Some(last) if last.item.id == item.id => last.history.extend(history_entry),
                _ => candidates.push(Candidate {
                    item,
                    history: history_entry.into_iter().collect(),
                }),
            }
        }
        Ok(candidates)
    }
}

type CandidateRow = (Item, Option<(String, String)>);

fn candidate_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<CandidateRow> {
    let item = Item::from_row(row)?;
    let term: Option<String> = row.get(ITEM_COLUMN_COUNT)?;
    let at: Option<String> = row.get(ITEM_COLUMN_COUNT + 1)?;
    Ok((item, term.zip(at)))
}
