//! Search command

use crate::app::{join_term, OutputFormat, SearchArgs};
use crate::output::print_search_results;
use anyhow::Result;
use quickdex_core::{Catalog, SearchScope};

pub fn run(args: SearchArgs, catalog: &Catalog, format: OutputFormat) -> Result<()> {
    let term = join_term(&args.term);
    let scope = match args.parent {
        Some(parent) => SearchScope::Children(parent),
        None => SearchScope::Root,
    };

    let mut results = catalog.search(&term, scope)?;

    let limit = if args.limit > 0 {
        args.limit
    } else {
        catalog.config().result_limit
    };
    if limit > 0 {
        results.truncate(limit);
    }

    if results.is_empty() && format == OutputFormat::Cli {
        eprintln!("No results for '{}'", term);
        return Ok(());
    }
    print_search_results(&results, format)
}
