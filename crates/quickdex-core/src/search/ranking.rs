//! Result ordering

use super::SearchResult;
use std::cmp::Ordering;

/// Number of leading characters two strings share
pub fn common_prefix_len(a: &str, b: &str) -> usize {
    a.chars()
        .zip(b.chars())
        .take_while(|(x, y)| x == y)
        .count()
}

/// Best prefix overlap between `term` and any previously used term
///
/// Both sides are normalized terms. Returns a fraction of `term`'s length,
/// or 0 when the term is empty or there is no history.
pub fn history_score<'a>(term: &str, history: impl IntoIterator<Item = &'a str>) -> f64 {
    let len = term.chars().count();
    if len == 0 {
        return 0.0;
    }
    history
        .into_iter()
        .map(|past| common_prefix_len(term, past) as f64 / len as f64)
        .fold(0.0, f64::max)
}

/// History score desc, last invocation desc, match score desc, title asc,
/// description asc
pub fn compare(a: &SearchResult, b: &SearchResult) -> Ordering {
    b.history_score
        .total_cmp(&a.history_score)
        .then_with(|| b.last_invocation.cmp(&a.last_invocation))
        .then_with(|| b.match_score.total_cmp(&a.match_score))
        .then_with(|| a.item.title.cmp(&b.item.title))
        .then_with(|| a.item.description.cmp(&b.item.description))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Item;
    use chrono::{TimeZone, Utc};

    fn result(title: &str, history_score: f64, match_score: f64) -> SearchResult {
        SearchResult {
            item: Item::new("test", title, title),
            match_score,
            history_score,
            last_invocation: None,
            marked_up_title: title.to_string(),
        }
    }

    #[test]
    fn test_common_prefix() {
        assert_eq!(common_prefix_len("FIRE", "FIREFOX"), 4);
        assert_eq!(common_prefix_len("FIX", "FIREFOX"), 2);
        assert_eq!(common_prefix_len("", "A"), 0);
    }

    #[test]
    fn test_history_score() {
        assert_eq!(history_score("FI", ["FIREFOX"]), 1.0);
        assert_eq!(history_score("FIX", ["F", "FIR"]), 2.0 / 3.0);
        assert_eq!(history_score("FI", std::iter::empty()), 0.0);
        assert_eq!(history_score("", ["FI"]), 0.0);
    }

    #[test]
    fn test_history_beats_match() {
        let firefox = result("Firefox", 1.0, -1.03);
        let finder = result("Finder", 0.0, -0.04);
        assert_eq!(compare(&firefox, &finder), Ordering::Less);
    }

    #[test]
    fn test_recent_invocation_first() {
        let mut old = result("B", 0.5, 0.0);
        old.last_invocation = Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        let mut recent = result("A", 0.5, -3.0);
        recent.last_invocation = Some(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap());
        let never = result("C", 0.5, 0.0);

        let mut results = vec![never, old, recent];
        results.sort_by(compare);
        let titles: Vec<_> = results.iter().map(|r| r.item.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_title_then_description() {
        let a = result("Same", 0.0, -1.0).with_description("b");
        let b = result("Same", 0.0, -1.0).with_description("a");
        assert_eq!(compare(&a, &b), Ordering::Greater);
    }

    impl SearchResult {
        fn with_description(mut self, description: &str) -> Self {
            self.item.description = description.to_string();
            self
        }
    }
}
