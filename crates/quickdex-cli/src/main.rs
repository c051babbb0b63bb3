//! Quickdex CLI
//!
//! Fuzzy launcher index with usage-history ranking.

use anyhow::Result;
use clap::Parser;
use quickdex_core::error::exit_codes;
use quickdex_core::{Catalog, Config, QuickdexError};
use std::sync::Arc;

mod app;
mod commands;
mod launcher;
mod output;

use app::{Cli, Commands};
use launcher::{DryRunLauncher, SystemLauncher};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing
    let level = if cli.verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        let code = e
            .downcast_ref::<QuickdexError>()
            .map(QuickdexError::exit_code)
            .unwrap_or(exit_codes::GENERAL_ERROR);
        std::process::exit(code);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    // Open database (QUICKDEX_DB overrides the default location)
    let db_path = Config::database_path();
    let launcher: Arc<dyn quickdex_core::Launcher> = if cli.dry_run {
        Arc::new(DryRunLauncher)
    } else {
        Arc::new(SystemLauncher)
    };
    let mut catalog = Catalog::open(&db_path, config, launcher)?;

    match cli.command {
        Commands::Index(args) => commands::index::run(args, &mut catalog, cli.format),
        Commands::Search(args) => commands::search::run(args, &catalog, cli.format),
        Commands::Invoke(args) => commands::invoke::run(args, &catalog, cli.format),
        Commands::Open(args) => commands::open::run(args, &catalog, cli.format),
        Commands::Add(args) => commands::add::run(args, &catalog, cli.format),
        Commands::Get(args) => commands::get::run(args, &catalog, cli.format),
        Commands::Status => commands::status::run(&catalog, cli.format),
        Commands::Cleanup(args) => commands::cleanup::run(args, &catalog),
    }
}
