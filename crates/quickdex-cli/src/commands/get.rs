//! Get item command

use crate::app::{GetArgs, OutputFormat};
use anyhow::Result;
use quickdex_core::Catalog;

pub fn run(args: GetArgs, catalog: &Catalog, format: OutputFormat) -> Result<()> {
    let item = catalog.get_item(args.id)?;
    let history = catalog.database().history_for_item(args.id)?;
    let children = catalog.database().list_children(args.id)?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "item": item,
                "history": history,
                "children": children,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Cli => {
            println!("Id:          {}", args.id);
            println!("Provider:    {}", item.provider_id);
            println!("Item id:     {}", item.item_id);
            println!("Title:       {}", item.title);
            println!("Description: {}", item.description);
            if let Some(version) = item.index_version {
                println!("Version:     {}", version);
            }
            if let Some(path) = &item.path {
                println!("Path:        {}", path);
            }
            if let Some(parent) = item.parent_id {
                println!("Parent:      #{}", parent);
            }
            for (label, action) in [
                ("On enter:   ", &item.on_enter),
                ("On tab:     ", &item.on_tab),
                ("Applicable: ", &item.on_query_applicable),
            ] {
                if let Some(action) = action {
                    println!("{} {}", label, action);
                }
            }
            if !children.is_empty() {
                println!();
                println!("Children:");
                for child in &children {
                    let id = child.id.map(|id| format!("#{}", id)).unwrap_or_default();
                    println!("  {:<8} {}", id, child.title);
                }
            }
            if !history.is_empty() {
                println!();
                println!("History:");
                for entry in &history {
                    println!(
                        "  {:<16} {:>4}x  {}",
                        entry.term,
                        entry.invocation_count,
                        entry.last_invocation.to_rfc3339()
                    );
                }
            }
        }
    }
    Ok(())
}
