//! Status command

use crate::app::OutputFormat;
use anyhow::Result;
use quickdex_core::Catalog;

pub fn run(catalog: &Catalog, format: OutputFormat) -> Result<()> {
    let stats = catalog.stats()?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        OutputFormat::Cli => {
            println!("Items:           {}", stats.item_count);
            println!("  Transient:     {}", stats.transient_count);
            println!("  Dynamic:       {}", stats.dynamic_count);
            println!("History entries: {}", stats.history_count);
            if !stats.providers.is_empty() {
                println!();
                println!("Providers:");
                for provider in &stats.providers {
                    println!(
                        "  {:<20} {:>6} items  next v{}",
                        provider.provider_id, provider.item_count, provider.next_index_version
                    );
                }
            }
        }
    }
    Ok(())
}
