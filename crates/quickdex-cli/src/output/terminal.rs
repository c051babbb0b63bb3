//! Terminal output formatter

use quickdex_core::{SearchResult, MATCH_MARKER};
use std::io::{self, Write};
use termcolor::{Color, ColorSpec, WriteColor};

pub fn write_results(results: &[SearchResult], out: &mut impl WriteColor) -> io::Result<()> {
    for result in results {
        let id = result.item.id.unwrap_or_default();
        write!(out, "{:>5}  ", id)?;
        write_marked(&result.marked_up_title, out)?;

        if !result.item.description.is_empty() && result.item.description != result.item.title {
            out.set_color(ColorSpec::new().set_dimmed(true))?;
            write!(out, "  {}", result.item.description)?;
            out.reset()?;
        }
        if result.history_score > 0.0 {
            out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)))?;
            write!(out, "  [{:.0}%]", result.history_score * 100.0)?;
            out.reset()?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Write a marked-up title, emphasizing each character that follows a marker
pub fn write_marked(marked_up: &str, out: &mut impl WriteColor) -> io::Result<()> {
    let mut highlight = ColorSpec::new();
    highlight.set_bold(true).set_fg(Some(Color::Yellow));

    let mut chars = marked_up.chars();
    while let Some(c) = chars.next() {
        if c != MATCH_MARKER {
            write!(out, "{}", c)?;
            continue;
        }
        if let Some(matched) = chars.next() {
            out.set_color(&highlight)?;
            write!(out, "{}", matched)?;
            out.reset()?;
        }
    }
    Ok(())
}
