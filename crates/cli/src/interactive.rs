//! Driving a search session from the terminal.
//!
//! On a real terminal keys are read one at a time; otherwise each input line
//! is one event, which keeps the session scriptable from pipes and tests.

use crate::output::suggestion_line;
use console::{Key, Term};
use eventsite_search::{CatalogEntry, SearchEvent, SearchSession, SessionOutcome};
use owo_colors::OwoColorize;
use std::io::{self, BufRead, Write};
use std::time::{Duration, Instant};

/// Map a terminal key to a session event.
pub fn event_for_key(key: &Key) -> Option<SearchEvent> {
    match key {
        Key::ArrowUp => Some(SearchEvent::ArrowUp),
        Key::ArrowDown => Some(SearchEvent::ArrowDown),
        Key::Enter => Some(SearchEvent::Enter),
        Key::Escape => Some(SearchEvent::Escape),
        Key::Backspace => Some(SearchEvent::Backspace),
        Key::Char(ch) if !ch.is_control() => Some(SearchEvent::Char(*ch)),
        _ => None,
    }
}

/// Map a scripted input line to a session event.
///
/// `:up`, `:down`, `:enter`, `:esc` and `:click-outside` are commands; any
/// other line replaces the query text.
pub fn event_for_line(line: &str) -> SearchEvent {
    match line.trim_end_matches(['\r', '\n']) {
        ":up" => SearchEvent::ArrowUp,
        ":down" => SearchEvent::ArrowDown,
        ":enter" => SearchEvent::Enter,
        ":esc" => SearchEvent::Escape,
        ":click-outside" => SearchEvent::ClickOutside,
        text => SearchEvent::Input(text.to_string()),
    }
}

/// Run a session on a real terminal until a selection or dismissal.
///
/// `observe` is called after every handled event with the time it took.
pub fn run_terminal<'a>(
    term: &Term,
    session: &mut SearchSession<'a>,
    show_scores: bool,
    mut observe: impl FnMut(&SearchEvent, Duration),
) -> io::Result<Option<&'a CatalogEntry>> {
    if !session.is_open() {
        session.open();
    }

    let _cursor = HiddenCursor::new(term)?;
    let mut drawn = draw(term, session, show_scores)?;

    let result = loop {
        let key = term.read_key()?;
        let Some(event) = event_for_key(&key) else {
            continue;
        };

        let (outcome, elapsed) = timed(session, event.clone());
        observe(&event, elapsed);
        term.clear_last_lines(drawn)?;

        match outcome {
            SessionOutcome::Selected(entry) => break Some(entry),
            SessionOutcome::Dismissed | SessionOutcome::Inactive => break None,
            SessionOutcome::Pending => drawn = draw(term, session, show_scores)?,
        }
    };

    Ok(result)
}

/// Terminals whose cursor can be hidden.
trait CursorVisibility {
    fn hide_cursor(&self) -> io::Result<()>;
    fn show_cursor(&self) -> io::Result<()>;
}

impl CursorVisibility for Term {
    fn hide_cursor(&self) -> io::Result<()> {
        Term::hide_cursor(self)
    }

    fn show_cursor(&self) -> io::Result<()> {
        Term::show_cursor(self)
    }
}

/// Hides the cursor until dropped, so every exit path restores it.
struct HiddenCursor<'t, T: CursorVisibility>(&'t T);

impl<'t, T: CursorVisibility> HiddenCursor<'t, T> {
    fn new(term: &'t T) -> io::Result<Self> {
        term.hide_cursor()?;
        Ok(Self(term))
    }
}

impl<T: CursorVisibility> Drop for HiddenCursor<'_, T> {
    fn drop(&mut self) {
        let _ = self.0.show_cursor();
    }
}

fn timed<'a>(session: &mut SearchSession<'a>, event: SearchEvent) -> (SessionOutcome<'a>, Duration) {
    let start = Instant::now();
    let outcome = session.handle(event);
    (outcome, start.elapsed())
}

fn draw(term: &Term, session: &SearchSession<'_>, show_scores: bool) -> io::Result<usize> {
    let lines = frame(session, show_scores);
    for line in &lines {
        term.write_line(line)?;
    }
    Ok(lines.len())
}

/// Prompt line followed by one line per suggestion.
fn frame(session: &SearchSession<'_>, show_scores: bool) -> Vec<String> {
    let mut lines = vec![format!("{} {}", "Search:".bold(), session.query())];

    if session.suggestions().is_empty() {
        lines.push(format!("  {}", "no matches".dimmed()));
    }
    for (index, scored) in session.suggestions().iter().enumerate() {
        let highlighted = session.selected_index() == Some(index);
        lines.push(suggestion_line(index + 1, scored, highlighted, show_scores));
    }
    lines
}
