//! Integration tests for versioned reindexing
//!
//! Tests:
//! 1. Items not re-emitted are removed with their history
//! 2. A failing provider leaves the index and version counter untouched
//! 3. One failing provider does not stop the others
//! 4. Transient items are discarded when a catalog is reopened

use quickdex_core::{
    Catalog, Config, Database, IndexPass, Item, ItemProvider, Launcher, QuickdexError, Result,
};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Provider emitting whatever titles it currently holds
struct ListProvider {
    id: &'static str,
    titles: Mutex<Vec<&'static str>>,
    fail_after: Mutex<Option<usize>>,
}

impl ListProvider {
    fn new(id: &'static str, titles: &[&'static str]) -> Self {
        Self {
            id,
            titles: Mutex::new(titles.to_vec()),
            fail_after: Mutex::new(None),
        }
    }

    fn set_titles(&self, titles: &[&'static str]) {
        *self.titles.lock().unwrap() = titles.to_vec();
    }

    fn fail_after(&self, count: Option<usize>) {
        *self.fail_after.lock().unwrap() = count;
    }
}

impl ItemProvider for ListProvider {
    fn provider_id(&self) -> &str {
        self.id
    }

    fn index(&self, pass: &mut IndexPass<'_>) -> Result<()> {
        let fail_after = *self.fail_after.lock().unwrap();
        for (i, title) in self.titles.lock().unwrap().iter().enumerate() {
            if fail_after == Some(i) {
                return Err(QuickdexError::InvalidInput("source went away".to_string()));
            }
            pass.upsert(Item::new(self.id, *title, *title).with_description(*title))?;
        }
        Ok(())
    }
}

struct NoopLauncher;

impl Launcher for NoopLauncher {
    fn launch(&self, _path: &str, _args: Option<&str>) -> Result<bool> {
        Ok(false)
    }
}

fn test_db() -> Database {
    let db = Database::open_in_memory().unwrap();
    db.initialize().unwrap();
    db
}

#[test]
fn test_reconciliation_round_trip() {
    let db = test_db();
    let provider = ListProvider::new("apps", &["A", "B"]);

    let first = db.run_provider_pass(&provider).unwrap();
    assert_eq!(first.version, 1);
    assert_eq!(first.inserted, 2);

    let b = db.find_item("apps", "B").unwrap().unwrap();
    db.record_invocation(b.id.unwrap(), "B").unwrap();
    assert_eq!(db.count_history().unwrap(), 1);

    provider.set_titles(&["A"]);
    let second = db.run_provider_pass(&provider).unwrap();
    assert_eq!(second.version, 2);
    assert_eq!(second.updated, 1);
    assert_eq!(second.removed, 1);

    assert!(db.find_item("apps", "B").unwrap().is_none());
    assert!(db.history_for_item(b.id.unwrap()).unwrap().is_empty());
    assert_eq!(db.count_history().unwrap(), 0);

    let a = db.find_item("apps", "A").unwrap().unwrap();
    assert_eq!(a.index_version, Some(2));
    assert_eq!(db.next_index_version("apps").unwrap(), 3);
}

#[test]
fn test_upsert_keeps_surrogate_id() {
    let db = test_db();
    let provider = ListProvider::new("apps", &["A"]);

    db.run_provider_pass(&provider).unwrap();
    let before = db.find_item("apps", "A").unwrap().unwrap();
    db.run_provider_pass(&provider).unwrap();
    let after = db.find_item("apps", "A").unwrap().unwrap();

    assert_eq!(before.id, after.id);
    assert_eq!(db.count_items().unwrap(), 1);
}

#[test]
fn test_failed_pass_preserves_items_and_version() {
    let db = test_db();
    let provider = ListProvider::new("apps", &["A", "B", "C"]);
    db.run_provider_pass(&provider).unwrap();

    provider.set_titles(&["A", "D", "E"]);
    provider.fail_after(Some(2));
    let err = db.run_provider_pass(&provider).unwrap_err();
    assert!(matches!(
        err,
        QuickdexError::ProviderEnumerationFailed { ref provider_id, .. } if provider_id == "apps"
    ));

    // Nothing from the partial pass is visible and nothing was deleted
    assert_eq!(db.count_items().unwrap(), 3);
    assert!(db.find_item("apps", "D").unwrap().is_none());
    assert_eq!(
        db.find_item("apps", "A").unwrap().unwrap().index_version,
        Some(1)
    );
    assert_eq!(db.next_index_version("apps").unwrap(), 2);

    // The retry picks up where the counter was left
    provider.fail_after(None);
    let summary = db.run_provider_pass(&provider).unwrap();
    assert_eq!(summary.version, 2);
    assert_eq!(summary.removed, 2);
}

#[test]
fn test_failure_does_not_stop_other_providers() {
    let db = test_db();
    let mut catalog = Catalog::new(db, Config::default(), Arc::new(NoopLauncher)).unwrap();

    let broken = Arc::new(ListProvider::new("broken", &["X"]));
    broken.fail_after(Some(0));
    catalog.register_provider(broken);
    catalog.register_provider(Arc::new(ListProvider::new("apps", &["A"])));

    let report = catalog.update_index().unwrap();
    assert!(!report.is_success());
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].provider_id, "broken");
    assert!(report.passes.iter().any(|p| p.provider_id == "apps"));
    assert!(catalog.database().find_item("apps", "A").unwrap().is_some());
}

#[test]
fn test_transient_items_discarded_on_reopen() {
    let temp = TempDir::new().unwrap();
    let db_path = temp.path().join("index.sqlite");

    let config = Config {
        store_custom_items: false,
        ..Config::default()
    };
    {
        let catalog = Catalog::open(&db_path, config, Arc::new(NoopLauncher)).unwrap();
        catalog.add_custom_item("example.com").unwrap().unwrap();
        catalog
            .database()
            .insert_item(&Item::new("apps", "kept", "Kept"))
            .unwrap();
        assert_eq!(catalog.database().count_items().unwrap(), 2);
    }

    let catalog = Catalog::open(&db_path, Config::default(), Arc::new(NoopLauncher)).unwrap();
    let stats = catalog.stats().unwrap();
    assert_eq!(stats.item_count, 1);
    assert!(catalog.database().find_item("apps", "kept").unwrap().is_some());
}

#[test]
fn test_unowned_cleanup_is_explicit() {
    let db = test_db();
    db.insert_item(&Item::new("apps", "manual", "Manual"))
        .unwrap();
    let provider = ListProvider::new("apps", &["A"]);

    // Passes never touch user-created rows
    db.run_provider_pass(&provider).unwrap();
    db.run_provider_pass(&provider).unwrap();
    assert!(db.find_item("apps", "manual").unwrap().is_some());

    assert_eq!(db.delete_unowned_items("apps").unwrap(), 1);
    assert!(db.find_item("apps", "manual").unwrap().is_none());
    assert!(db.find_item("apps", "A").unwrap().is_some());
}
