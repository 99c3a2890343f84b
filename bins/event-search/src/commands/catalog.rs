//! Catalog listing

use crate::context::Context;
use anyhow::Result;
use eventsite_cli::output::{format_count, Status};
use eventsite_core::error::exit_codes;
use eventsite_search::{CatalogEntry, EntryKind};
use owo_colors::OwoColorize;

/// List the active catalog, optionally one kind only
///
/// Loading already validated the catalog, so reaching this point means it
/// is usable.
pub fn run(ctx: &Context, kind: Option<EntryKind>) -> Result<i32> {
    let entries: Vec<&CatalogEntry> = match kind {
        Some(kind) => ctx.catalog.entries_of(kind).collect(),
        None => ctx.catalog.iter().collect(),
    };

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(exit_codes::SUCCESS);
    }

    let source = ctx
        .catalog_source
        .as_ref()
        .map_or_else(|| "built-in".to_string(), |path| path.display().to_string());
    Status::header(&format!("Catalog ({source})"));

    for entry in &entries {
        println!(
            "  {:<20} {:<7} {}  {}",
            entry.id,
            entry.kind.to_string().dimmed(),
            entry.title,
            format!("★{}", entry.popularity).magenta()
        );
    }

    println!();
    Status::success(&format!(
        "{} valid",
        format_count(entries.len(), "entry", "entries")
    ));
    Ok(exit_codes::SUCCESS)
}
