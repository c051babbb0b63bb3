// Basic search example using quickdex as a library

use quickdex_core::{
    Activation, Catalog, Config, Launcher, SearchScope, ShortcutConfig, MATCH_MARKER,
};
use std::sync::Arc;

struct PrintLauncher;

impl Launcher for PrintLauncher {
    fn launch(&self, path: &str, args: Option<&str>) -> quickdex_core::Result<bool> {
        println!("  -> would launch {} {}", path, args.unwrap_or(""));
        Ok(true)
    }
}

fn shortcut(id: &str, title: &str, target: &str) -> ShortcutConfig {
    ShortcutConfig {
        id: id.to_string(),
        title: title.to_string(),
        description: target.to_string(),
        target: target.to_string(),
        args: None,
    }
}

fn main() -> quickdex_core::Result<()> {
    println!("Quickdex Basic Search Example\n");

    let db_path = std::env::temp_dir().join("quickdex_example.sqlite");
    println!("Opening database at: {}", db_path.display());

    let config = Config {
        shortcuts: vec![
            shortcut("firefox", "Firefox", "/usr/bin/firefox"),
            shortcut("finder", "Finder", "/usr/bin/nautilus"),
            shortcut("calc", "Calculator", "/usr/bin/gnome-calculator"),
        ],
        ..Config::default()
    };
    let mut catalog = Catalog::open(&db_path, config, Arc::new(PrintLauncher))?;

    let report = catalog.update_index()?;
    println!(
        "Indexed {} providers: {} inserted, {} updated, {} removed\n",
        report.passes.len(),
        report.total_inserted(),
        report.total_updated(),
        report.total_removed()
    );

    for term in ["fi", "calc", "fx"] {
        println!("Results for '{}':", term);
        let results = catalog.search(term, SearchScope::Root)?;
        for result in &results {
            let title: String = result
                .marked_up_title
                .chars()
                .filter(|c| *c != MATCH_MARKER)
                .collect();
            println!(
                "  {:<12} match={:.2} history={:.2}",
                title, result.match_score, result.history_score
            );
        }
        println!();
    }

    // Activating a result feeds the history ranking for the next search
    if let Some(first) = catalog.search("fi", SearchScope::Root)?.into_iter().nth(1) {
        if let Some(id) = first.item.id {
            println!("Activating '{}':", first.item.title);
            if let Activation::Action { name, handled, .. } =
                catalog.activate(id, "fi", SearchScope::Root)?
            {
                println!("  action {} handled={}", name, handled);
            }
        }
    }

    println!("\nResults for 'fi' after activation:");
    for result in catalog.search("fi", SearchScope::Root)? {
        println!("  {} (history={:.2})", result.item.title, result.history_score);
    }

    Ok(())
}
