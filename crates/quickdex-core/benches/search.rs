//! Search performance benchmarks
//!
//! Measures performance of:
//! - Fuzzy matching on short and long candidates
//! - Ranked root search over an indexed catalog
//! - Children scope search with dynamic items

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use quickdex_core::{fuzzy_match, ActionRegistry, Database, Item, SearchScope};
use tempfile::TempDir;

const SAMPLE_TITLES: &[&str] = &[
    "Firefox",
    "Finder",
    "File Manager",
    "Calculator",
    "Calendar",
    "System Monitor",
    "Terminal",
    "Text Editor",
    "Volume Control",
    "Image Viewer",
    "Disk Usage Analyzer",
    "Font Viewer",
];

fn setup_test_db(copies: usize) -> (Database, TempDir) {
    let temp = TempDir::new().unwrap();
    let db = Database::open(temp.path().join("search_bench.db")).unwrap();
    db.initialize().unwrap();

    let mut pass = db.begin_pass("filesystem").unwrap();
    for copy in 0..copies {
        for title in SAMPLE_TITLES {
            let path = format!("/apps/{}/{}", copy, title);
            pass.upsert(
                Item::new("filesystem", &path, format!("{} {}", title, copy))
                    .with_description(&path)
                    .with_path(&path),
            )
            .unwrap();
        }
    }
    pass.finish().unwrap();

    (db, temp)
}

fn bench_matcher(c: &mut Criterion) {
    let mut group = c.benchmark_group("fuzzy_match");

    let cases = vec![
        ("short", "FF", "Firefox"),
        ("words", "SM", "System Monitor"),
        ("miss", "XYZ", "Disk Usage Analyzer"),
        (
            "long",
            "AEIOU",
            "a quick brown fox jumps over the lazy dog and keeps running all the way home",
        ),
    ];

    for (name, term, candidate) in cases {
        group.bench_with_input(BenchmarkId::from_parameter(name), &(term, candidate), |b, (t, s)| {
            b.iter(|| fuzzy_match(black_box(t), black_box(s)))
        });
    }

    group.finish();
}

fn bench_root_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("root_search");
    let actions = ActionRegistry::new();

    for copies in [1, 10, 50] {
        let (db, _temp) = setup_test_db(copies);
        group.bench_with_input(BenchmarkId::from_parameter(copies), &copies, |b, _| {
            b.iter(|| {
                db.search_items(black_box("fi"), SearchScope::Root, &actions)
                    .unwrap()
            })
        });
    }

    group.finish();
}

fn bench_children_search(c: &mut Criterion) {
    let (db, _temp) = setup_test_db(10);
    db.insert_item(&Item::new("standard_actions", "launch", "Launch").with_on_query_applicable("launchable"))
        .unwrap();
    let parent = db
        .find_item("filesystem", "/apps/0/Firefox")
        .unwrap()
        .and_then(|item| item.id)
        .unwrap();

    let mut actions = ActionRegistry::new();
    actions.register("launchable", |target| {
        target.and_then(|item| item.path.as_ref()).is_some()
    });

    c.bench_function("children_search", |b| {
        b.iter(|| {
            db.search_items(black_box(""), SearchScope::Children(parent), &actions)
                .unwrap()
        })
    });
}

criterion_group!(benches, bench_matcher, bench_root_search, bench_children_search);
criterion_main!(benches);
