//! Add command

use crate::app::{AddArgs, OutputFormat};
use anyhow::Result;
use quickdex_core::{Catalog, QuickdexError};

pub fn run(args: AddArgs, catalog: &Catalog, format: OutputFormat) -> Result<()> {
    let item = catalog.add_custom_item(&args.target)?.ok_or_else(|| {
        QuickdexError::InvalidInput(format!(
            "'{}' is neither a URL nor an existing path",
            args.target
        ))
    })?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&item)?);
        }
        OutputFormat::Cli => {
            let persistence = if item.is_transient {
                "transient"
            } else {
                "stored"
            };
            println!(
                "#{} {} ({})",
                item.id.unwrap_or_default(),
                item.title,
                persistence
            );
        }
    }
    Ok(())
}
