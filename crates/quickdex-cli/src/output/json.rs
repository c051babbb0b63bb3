//! JSON output formatter

use anyhow::Result;
use quickdex_core::SearchResult;

pub fn format_results(results: &[SearchResult]) -> Result<String> {
    let output: Vec<serde_json::Value> = results
        .iter()
        .map(|r| {
            serde_json::json!({
                "id": r.item.id,
                "provider": r.item.provider_id,
                "title": r.item.title,
                "marked_up_title": r.marked_up_title,
                "description": r.item.description,
                "path": r.item.path,
                "match_score": r.match_score,
                "history_score": r.history_score,
                "last_invocation": r.last_invocation,
            })
        })
        .collect();

    Ok(serde_json::to_string_pretty(&output)? + "\n")
}
