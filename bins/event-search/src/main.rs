//! event-search - Suggestions from the Eventsite catalog
//!
//! Ranks catalog entries the same way the website's search box does.

use clap::{Parser, Subcommand};
use eventsite_cli::output::Status;
use eventsite_core::error::exit_codes;
use eventsite_search::EntryKind;
use std::path::PathBuf;

mod commands;
mod context;

use context::Context;

/// Search the Eventsite catalog
#[derive(Parser)]
#[command(name = "event-search")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file (defaults to .event-search.toml if present)
    #[arg(short, long, global = true, env = "EVENT_SEARCH_CONFIG")]
    config: Option<PathBuf>,

    /// Catalog file (.json or .toml) to search instead of the built-in catalog
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Print machine-readable JSON
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank suggestions for a query
    Suggest {
        /// Search text
        query: String,

        /// Maximum suggestions to show
        #[arg(short, long)]
        limit: Option<usize>,

        /// Show match scores
        #[arg(long)]
        scores: bool,
    },

    /// Show the most popular entries (what an empty search box shows)
    Popular {
        /// Maximum entries to show
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// List and validate the active catalog
    Catalog {
        /// Only list entries of this kind (event, city, theme, venue)
        #[arg(short, long)]
        kind: Option<EntryKind>,
    },

    /// Search as you type; arrows move, Enter selects, Escape cancels
    Interactive {
        /// Maximum suggestions to show
        #[arg(short, long)]
        limit: Option<usize>,

        /// Show match scores
        #[arg(long)]
        scores: bool,

        /// Print session metrics to stderr when done
        #[arg(long)]
        stats: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    let json = cli.json;

    let code = match run(cli) {
        Ok(code) => code,
        Err(err) => {
            report_error(&err, json);
            exit_code_for(&err)
        }
    };

    std::process::exit(code);
}

fn run(cli: Cli) -> anyhow::Result<i32> {
    let ctx = Context::load(cli.config.as_deref(), cli.catalog.as_deref(), cli.verbose, cli.json)?;

    match cli.command {
        Commands::Suggest { query, limit, scores } => commands::suggest::run(&ctx, &query, limit, scores),
        Commands::Popular { limit } => commands::suggest::run_popular(&ctx, limit),
        Commands::Catalog { kind } => commands::catalog::run(&ctx, kind),
        Commands::Interactive { limit, scores, stats } => {
            commands::interactive::run(&ctx, limit, scores, stats)
        }
    }
}

fn report_error(err: &anyhow::Error, json: bool) {
    match err.downcast_ref::<eventsite_core::Error>() {
        Some(core) if json => match serde_json::to_string_pretty(&core.to_report()) {
            Ok(report) => eprintln!("{report}"),
            Err(_) => Status::error(&core.to_string()),
        },
        Some(core) => Status::error(&core.to_string()),
        None => Status::error(&format!("{err:#}")),
    }
}

fn exit_code_for(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<eventsite_core::Error>()
        .map_or(exit_codes::FAILURE, |core| core.code.exit_code())
}
