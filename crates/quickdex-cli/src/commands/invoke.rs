//! Invoke command

use crate::app::{join_term, InvokeArgs, OutputFormat};
use anyhow::Result;
use quickdex_core::{normalize_term, Catalog};

pub fn run(args: InvokeArgs, catalog: &Catalog, format: OutputFormat) -> Result<()> {
    let term = join_term(&args.term);
    catalog.record_invocation(args.id, &term)?;

    match format {
        OutputFormat::Json => {
            let history = catalog.database().history_for_item(args.id)?;
            println!("{}", serde_json::to_string_pretty(&history)?);
        }
        OutputFormat::Cli => {
            println!("Recorded #{} for '{}'", args.id, normalize_term(&term));
        }
    }
    Ok(())
}
