//! Terminal output utilities
//!
//! Provides consistent formatting for CLI output.

use eventsite_search::ScoredEntry;
use owo_colors::OwoColorize;

/// Status message helpers
pub struct Status;

impl Status {
    /// Print a success message
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Print an error message
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Print a warning message
    pub fn warning(message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print an info message
    pub fn info(message: &str) {
        println!("{} {}", "ℹ".blue(), message);
    }

    /// Print a header
    pub fn header(message: &str) {
        println!();
        println!("{}", message.bold());
        println!("{}", "─".repeat(message.chars().count()));
    }
}

/// Format one suggestion row.
///
/// `position` is 1-based. Highlighted rows get a marker and bold title; the
/// score column only appears when `show_score` is set.
pub fn suggestion_line(position: usize, scored: &ScoredEntry<'_>, highlighted: bool, show_score: bool) -> String {
    let entry = scored.entry;
    let marker = if highlighted { "›" } else { " " };
    let title = if highlighted {
        entry.title.bold().to_string()
    } else {
        entry.title.clone()
    };

    let mut line = format!(
        "{} {:>2}. {}  {}",
        marker.cyan(),
        position,
        title,
        format!("[{}]", entry.kind).dimmed()
    );
    if !entry.subtitle.is_empty() {
        line.push_str(&format!("  {}", entry.subtitle.dimmed()));
    }
    if show_score {
        line.push_str(&format!("  {}", format!("score {:.1}", scored.score).yellow()));
    }
    line.push_str(&format!("  {}", format!("★{}", entry.popularity).magenta()));
    line
}

/// Format a duration for display
pub fn format_duration(duration: std::time::Duration) -> String {
    let secs = duration.as_secs_f32();
    if secs < 0.001 {
        format!("{}µs", duration.as_micros())
    } else if secs < 1.0 {
        format!("{:.0}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        let mins = (secs / 60.0).floor();
        let remaining_secs = secs % 60.0;
        format!("{}m {:.0}s", mins, remaining_secs)
    }
}

/// Format a count with singular/plural
pub fn format_count(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}
