//! Index command

use crate::app::{IndexArgs, OutputFormat};
use anyhow::Result;
use quickdex_core::{Catalog, IndexReport};

pub fn run(args: IndexArgs, catalog: &mut Catalog, format: OutputFormat) -> Result<()> {
    let report = match args.provider {
        Some(provider) => IndexReport {
            passes: vec![catalog.update_provider(&provider)?],
            failures: Vec::new(),
        },
        None => catalog.update_index()?,
    };

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Cli => {
            for pass in &report.passes {
                println!(
                    "{:<20} v{:<4} {} new, {} updated, {} removed",
                    pass.provider_id, pass.version, pass.inserted, pass.updated, pass.removed
                );
            }
            for failure in &report.failures {
                eprintln!("{:<20} failed: {}", failure.provider_id, failure.reason);
            }
        }
    }
    Ok(())
}
