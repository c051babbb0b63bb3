//! CLI argument definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "quickdex")]
#[command(
    author,
    version,
    about = "Fuzzy launcher index with usage-history ranking"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "cli")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file (defaults to QUICKDEX_CONFIG or the user config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print launch targets instead of opening them
    #[arg(long, global = true)]
    pub dry_run: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run an indexing pass for every provider
    Index(IndexArgs),

    /// Search the index
    Search(SearchArgs),

    /// Record that an item was used with a term
    Invoke(InvokeArgs),

    /// Activate an item (enter, or tab with --tab)
    Open(OpenArgs),

    /// Add a URL or path as a custom item
    Add(AddArgs),

    /// Show an item and its history
    Get(GetArgs),

    /// Show index status
    Status,

    /// Delete a provider's user-created items
    Cleanup(CleanupArgs),
}

#[derive(Args)]
pub struct IndexArgs {
    /// Only reindex this provider
    #[arg(long)]
    pub provider: Option<String>,
}

#[derive(Args)]
pub struct SearchArgs {
    /// Search term
    pub term: Vec<String>,

    /// Search among the children of this item
    #[arg(long)]
    pub parent: Option<i64>,

    /// Number of results (0 = config default)
    #[arg(short = 'n', default_value = "0")]
    pub limit: usize,
}

#[derive(Args)]
pub struct InvokeArgs {
    /// Item id
    pub id: i64,

    /// Term the item was found with
    pub term: Vec<String>,
}

#[derive(Args)]
pub struct OpenArgs {
    /// Item id
    pub id: i64,

    /// Term the item was found with
    pub term: Vec<String>,

    /// Item whose children were being browsed
    #[arg(long)]
    pub parent: Option<i64>,

    /// Complete (tab) instead of enter
    #[arg(long)]
    pub tab: bool,
}

#[derive(Args)]
pub struct AddArgs {
    /// URL or existing path
    pub target: String,
}

#[derive(Args)]
pub struct GetArgs {
    /// Item id
    pub id: i64,
}

#[derive(Args)]
pub struct CleanupArgs {
    /// Provider whose unowned items are removed
    pub provider: String,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Cli,
    Json,
}

/// Join positional words into one term
pub fn join_term(words: &[String]) -> String {
    words.join(" ")
}
