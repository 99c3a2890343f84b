//! Search-as-you-type session

use crate::context::Context;
use anyhow::Result;
use console::Term;
use eventsite_cli::interactive::{run_lines, run_terminal};
use eventsite_cli::output::Status;
use eventsite_core::error::exit_codes;
use eventsite_search::{SearchEvent, SearchSession};
use eventsite_telemetry::metrics;
use std::io::IsTerminal;
use std::time::Duration;

/// Run one search session and print the chosen entry
///
/// Reads keys from a terminal, or one event per line when stdin is piped.
/// Exits with `NO_SELECTION` when the session is dismissed.
pub fn run(ctx: &Context, limit: Option<usize>, scores: bool, stats: bool) -> Result<i32> {
    let mut session = SearchSession::new(ctx.catalog.entries())
        .with_limit(ctx.limit(limit))
        .with_weights(ctx.weights());

    let observe = |event: &SearchEvent, elapsed: Duration| {
        let registry = metrics();
        registry.increment("search.events");
        if matches!(event, SearchEvent::Input(_) | SearchEvent::Char(_) | SearchEvent::Backspace) {
            registry.increment("search.queries");
            registry.histogram("search.suggest_ms", elapsed.as_secs_f64() * 1000.0);
        }
    };

    let term = Term::stdout();
    let chosen = if term.is_term() && std::io::stdin().is_terminal() {
        run_terminal(&term, &mut session, scores, observe)?
    } else {
        let stdin = std::io::stdin();
        if ctx.json {
            run_lines(stdin.lock(), &mut std::io::sink(), &mut session, scores, observe)?
        } else {
            let mut stdout = std::io::stdout().lock();
            run_lines(stdin.lock(), &mut stdout, &mut session, scores, observe)?
        }
    };

    if stats {
        eprintln!("{}", serde_json::to_string_pretty(&metrics().export_json())?);
    }

    let Some(entry) = chosen else {
        tracing::debug!("Session ended without a selection");
        if ctx.json {
            println!("null");
        } else {
            Status::info("No selection");
        }
        return Ok(exit_codes::NO_SELECTION);
    };

    metrics().increment("search.selections");
    if ctx.json {
        println!("{}", serde_json::to_string_pretty(entry)?);
    } else {
        Status::success(&format!("Selected {} ({})", entry.title, entry.id));
    }
    Ok(exit_codes::SUCCESS)
}
