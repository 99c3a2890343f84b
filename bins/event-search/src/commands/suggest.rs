//! One-shot suggestion commands

use crate::context::Context;
use anyhow::Result;
use eventsite_cli::output::{format_count, format_duration, suggestion_line, Status};
use eventsite_core::error::exit_codes;
use eventsite_search::{rank, ScoredEntry};
use eventsite_telemetry::{metrics, Timer};

/// Rank suggestions for `query`
pub fn run(ctx: &Context, query: &str, limit: Option<usize>, scores: bool) -> Result<i32> {
    let limit = ctx.limit(limit);

    let timer = Timer::start("search.suggest_ms");
    let results = rank(query, ctx.catalog.entries(), limit, &ctx.weights());
    let elapsed = timer.stop();
    metrics().increment("search.queries");

    tracing::debug!(
        query,
        limit,
        results = results.len(),
        elapsed_us = elapsed.as_micros(),
        "Suggestions ranked"
    );

    if ctx.json {
        print_json(&results, scores)?;
        return Ok(exit_codes::SUCCESS);
    }

    if results.is_empty() {
        Status::warning(&format!("No suggestions for \"{query}\""));
        return Ok(exit_codes::SUCCESS);
    }

    Status::header(&format!("Suggestions for \"{query}\""));
    print_lines(&results, scores);
    println!();
    Status::info(&format!(
        "{} in {}",
        format_count(results.len(), "suggestion", "suggestions"),
        format_duration(elapsed)
    ));
    Ok(exit_codes::SUCCESS)
}

/// Show what an empty search box shows
pub fn run_popular(ctx: &Context, limit: Option<usize>) -> Result<i32> {
    let results = rank("", ctx.catalog.entries(), ctx.limit(limit), &ctx.weights());

    if ctx.json {
        print_json(&results, false)?;
        return Ok(exit_codes::SUCCESS);
    }

    Status::header("Popular suggestions");
    print_lines(&results, false);
    Ok(exit_codes::SUCCESS)
}

fn print_lines(results: &[ScoredEntry<'_>], scores: bool) {
    for (index, scored) in results.iter().enumerate() {
        println!("{}", suggestion_line(index + 1, scored, false, scores));
    }
}

fn print_json(results: &[ScoredEntry<'_>], scores: bool) -> Result<()> {
    let output = if scores {
        serde_json::to_string_pretty(results)?
    } else {
        let entries: Vec<_> = results.iter().map(|scored| scored.entry).collect();
        serde_json::to_string_pretty(&entries)?
    };
    println!("{output}");
    Ok(())
}
