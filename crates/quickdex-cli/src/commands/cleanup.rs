//! Cleanup command

use crate::app::CleanupArgs;
use anyhow::Result;
use quickdex_core::Catalog;

pub fn run(args: CleanupArgs, catalog: &Catalog) -> Result<()> {
    let removed = catalog.clear_unowned(&args.provider)?;
    println!("Removed {} unowned items from '{}'", removed, args.provider);

    let orphaned = catalog.database().cleanup_orphaned_history()?;
    println!("Removed {} orphaned history entries", orphaned);

    catalog.database().vacuum()?;
    println!("Database vacuumed");

    Ok(())
}
