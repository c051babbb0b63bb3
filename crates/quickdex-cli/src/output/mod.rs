//! Output formatters

pub mod json;
pub mod terminal;

use crate::app::OutputFormat;
use anyhow::Result;
use quickdex_core::SearchResult;
use termcolor::{BufferWriter, ColorChoice};

/// Print search results to stdout
pub fn print_search_results(results: &[SearchResult], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print!("{}", json::format_results(results)?),
        OutputFormat::Cli => {
            let writer = BufferWriter::stdout(ColorChoice::Auto);
            let mut buffer = writer.buffer();
            terminal::write_results(results, &mut buffer)?;
            writer.print(&buffer)?;
        }
    }
    Ok(())
}
