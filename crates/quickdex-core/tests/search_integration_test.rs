//! Integration tests for ranked search
//!
//! Tests:
//! 1. History outranks text match quality
//! 2. Dynamic items follow their predicate on every call
//! 3. Launch action appears when browsing into a launchable item
//! 4. Shortcut provider items are searchable end to end

use chrono::{TimeZone, Utc};
use quickdex_core::{
    normalize_term, ActionRegistry, Catalog, Config, Database, Item, Launcher, Result,
    SearchScope, ShortcutConfig,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

struct NoopLauncher;

impl Launcher for NoopLauncher {
    fn launch(&self, _path: &str, _args: Option<&str>) -> Result<bool> {
        Ok(true)
    }
}

fn test_db() -> Database {
    let db = Database::open_in_memory().unwrap();
    db.initialize().unwrap();
    db
}

fn titles(results: &[quickdex_core::SearchResult]) -> Vec<String> {
    results.iter().map(|r| r.item.title.clone()).collect()
}

#[test]
fn test_normalization() {
    assert_eq!(normalize_term(" aB c"), "ABC");
    assert_eq!(normalize_term(&normalize_term(" aB c")), "ABC");
}

#[test]
fn test_history_ordering_scenario() {
    let db = test_db();
    let firefox = db.insert_item(&Item::new("apps", "firefox", "Firefox")).unwrap();
    db.insert_item(&Item::new("apps", "finder", "Finder")).unwrap();
    db.record_invocation(firefox, "FI").unwrap();

    let results = db
        .search_items("fi", SearchScope::Root, &ActionRegistry::new())
        .unwrap();
    assert_eq!(titles(&results), vec!["Firefox", "Finder"]);
    assert_eq!(results[0].history_score, 1.0);
}

#[test]
fn test_recency_breaks_history_ties() {
    let db = test_db();
    let older = db.insert_item(&Item::new("apps", "a", "Alpha")).unwrap();
    let newer = db.insert_item(&Item::new("apps", "b", "Alpine")).unwrap();
    db.record_invocation_at(older, "AL", Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap())
        .unwrap();
    db.record_invocation_at(newer, "AL", Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap())
        .unwrap();

    let results = db
        .search_items("al", SearchScope::Root, &ActionRegistry::new())
        .unwrap();
    assert_eq!(titles(&results), vec!["Alpine", "Alpha"]);
}

#[test]
fn test_history_record_twice() {
    let db = test_db();
    let id = db.insert_item(&Item::new("apps", "x", "X")).unwrap();
    let early = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let late = Utc.with_ymd_and_hms(2024, 5, 2, 12, 0, 0).unwrap();

    db.record_invocation_at(id, "ABC", early).unwrap();
    db.record_invocation_at(id, "ABC", late).unwrap();

    let history = db.history_for_item(id).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].invocation_count, 2);
    assert_eq!(history[0].last_invocation, late);
}

#[test]
fn test_dynamic_predicate_reevaluated() {
    let db = test_db();
    db.insert_item(
        &Item::new("web", "search", "Search the web").with_on_query_applicable("web.available"),
    )
    .unwrap();

    let available = Arc::new(AtomicBool::new(false));
    let flag = available.clone();
    let mut actions = ActionRegistry::new();
    actions.register("web.available", move |_| flag.load(Ordering::SeqCst));

    assert!(db
        .search_items("search", SearchScope::Root, &actions)
        .unwrap()
        .is_empty());

    available.store(true, Ordering::SeqCst);
    let results = db.search_items("search", SearchScope::Root, &actions).unwrap();
    assert_eq!(titles(&results), vec!["Search the web"]);

    available.store(false, Ordering::SeqCst);
    assert!(db
        .search_items("search", SearchScope::Root, &actions)
        .unwrap()
        .is_empty());
}

#[test]
fn test_shortcuts_and_launch_action() {
    let config = Config {
        shortcuts: vec![
            ShortcutConfig {
                id: "firefox".to_string(),
                title: "Firefox".to_string(),
                description: "Web browser".to_string(),
                target: "/usr/bin/firefox".to_string(),
                args: None,
            },
            ShortcutConfig {
                id: "finder".to_string(),
                title: "Finder".to_string(),
                description: "Files".to_string(),
                target: "/usr/bin/nautilus".to_string(),
                args: None,
            },
        ],
        ..Config::default()
    };
    let db = test_db();
    let mut catalog = Catalog::new(db, config, Arc::new(NoopLauncher)).unwrap();
    let report = catalog.update_index().unwrap();
    assert!(report.is_success());

    // The launch action is hidden at root: there is no context item
    let results = catalog.search("", SearchScope::Root).unwrap();
    assert_eq!(titles(&results), vec!["Finder", "Firefox"]);

    let results = catalog.search("ff", SearchScope::Root).unwrap();
    assert_eq!(titles(&results), vec!["Firefox"]);
    assert_eq!(results[0].marked_up_title, "&Fire&fox");

    let firefox = results[0].item.id.unwrap();
    let children = catalog.search("", SearchScope::Children(firefox)).unwrap();
    assert_eq!(titles(&children), vec!["Launch"]);
}
