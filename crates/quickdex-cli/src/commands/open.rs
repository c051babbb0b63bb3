//! Open command

use crate::app::{join_term, OpenArgs, OutputFormat};
use anyhow::Result;
use quickdex_core::{Activation, Catalog, SearchScope};

pub fn run(args: OpenArgs, catalog: &Catalog, format: OutputFormat) -> Result<()> {
    let term = join_term(&args.term);
    let scope = match args.parent {
        Some(parent) => SearchScope::Children(parent),
        None => SearchScope::Root,
    };

    let activation = if args.tab {
        catalog.complete(args.id, &term, scope)?
    } else {
        catalog.activate(args.id, &term, scope)?
    };

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&activation)?);
        }
        OutputFormat::Cli => match &activation {
            Activation::Action {
                name,
                target_id,
                handled,
            } => {
                let target = target_id.map(|id| format!("#{}", id)).unwrap_or_default();
                let status = if *handled { "handled" } else { "not handled" };
                println!("{} {}: {}", name, target, status);
            }
            Activation::Browse { id } => {
                println!("Browse children with: quickdex search --parent {}", id);
            }
            Activation::Unhandled => println!("Nothing to run for #{}", args.id),
        },
    }
    Ok(())
}
