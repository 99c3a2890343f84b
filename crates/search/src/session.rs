//! Search-as-you-type session: query text, keyboard selection and open state.
//!
//! The session owns the suggestion list and recomputes it synchronously on
//! every query change. All state changes go through the transition methods
//! or [`SearchSession::handle`].

use crate::catalog::CatalogEntry;
use crate::fuzzy::ScoreWeights;
use crate::ranking::{rank, ScoredEntry, DEFAULT_LIMIT};

/// Keyboard and pointer events a search box reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent {
    /// The input's text was replaced
    Input(String),
    /// A character was typed at the end of the query
    Char(char),
    /// The last character was deleted
    Backspace,
    /// Move the highlight up
    ArrowUp,
    /// Move the highlight down
    ArrowDown,
    /// Choose the highlighted suggestion
    Enter,
    /// Close without choosing
    Escape,
    /// Pointer pressed outside the search box
    ClickOutside,
}

/// What an event did to the session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionOutcome<'a> {
    /// Still open, nothing chosen yet
    Pending,
    /// A suggestion was chosen and the session closed
    Selected(&'a CatalogEntry),
    /// Closed without a selection
    Dismissed,
    /// The session is closed; the event was ignored
    Inactive,
}

/// State of one search box.
#[derive(Debug, Clone)]
pub struct SearchSession<'a> {
    entries: &'a [CatalogEntry],
    weights: ScoreWeights,
    limit: usize,
    query: String,
    selected: Option<usize>,
    open: bool,
    suggestions: Vec<ScoredEntry<'a>>,
}

impl<'a> SearchSession<'a> {
    /// Creates a closed session over `entries`.
    #[must_use]
    pub fn new(entries: &'a [CatalogEntry]) -> Self {
        Self {
            entries,
            weights: ScoreWeights::DEFAULT,
            limit: DEFAULT_LIMIT,
            query: String::new(),
            selected: None,
            open: false,
            suggestions: Vec::new(),
        }
    }

    /// Sets the maximum number of suggestions.
    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        if self.open {
            self.refresh();
        }
        self
    }

    /// Sets the scoring weights.
    #[must_use]
    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        if self.open {
            self.refresh();
        }
        self
    }

    /// Opens the session with an empty query, showing popular suggestions.
    pub fn open(&mut self) {
        self.open = true;
        self.query.clear();
        self.selected = None;
        self.refresh();
        tracing::debug!(suggestions = self.suggestions.len(), "Search opened");
    }

    /// True while the search box is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Current query text.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Highlighted suggestion index, `None` when nothing is highlighted.
    #[must_use]
    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Highlighted suggestion.
    #[must_use]
    pub fn selected(&self) -> Option<&'a CatalogEntry> {
        self.selected
            .and_then(|index| self.suggestions.get(index))
            .map(|scored| scored.entry)
    }

    /// Current suggestions, best first.
    #[must_use]
    pub fn suggestions(&self) -> &[ScoredEntry<'a>] {
        &self.suggestions
    }

    /// Replaces the query, recomputes suggestions and clears the highlight.
    pub fn set_query(&mut self, text: impl Into<String>) {
        if !self.open {
            return;
        }
        self.query = text.into();
        self.query_changed();
    }

    /// Appends a character to the query.
    pub fn push_char(&mut self, ch: char) {
        if !self.open {
            return;
        }
        self.query.push(ch);
        self.query_changed();
    }

    /// Removes the last character of the query, if any.
    pub fn backspace(&mut self) {
        if !self.open || self.query.pop().is_none() {
            return;
        }
        self.query_changed();
    }

    /// Moves the highlight down, stopping at the last suggestion.
    pub fn select_next(&mut self) {
        if !self.open || self.suggestions.is_empty() {
            return;
        }
        let last = self.suggestions.len() - 1;
        self.selected = Some(self.selected.map_or(0, |index| (index + 1).min(last)));
        tracing::trace!(selected = ?self.selected, "Highlight moved down");
    }

    /// Moves the highlight up; from the first suggestion back to none.
    pub fn select_previous(&mut self) {
        if !self.open {
            return;
        }
        self.selected = self.selected.and_then(|index| index.checked_sub(1));
        tracing::trace!(selected = ?self.selected, "Highlight moved up");
    }

    /// Chooses the highlighted suggestion and closes the session.
    ///
    /// Returns `None`, leaving the session open, when nothing is highlighted.
    pub fn confirm(&mut self) -> Option<&'a CatalogEntry> {
        if !self.open {
            return None;
        }
        let entry = self.selected()?;
        tracing::debug!(id = %entry.id, query = %self.query, "Suggestion selected");
        self.close();
        Some(entry)
    }

    /// Closes the session without a selection.
    pub fn dismiss(&mut self) {
        if !self.open {
            return;
        }
        tracing::debug!(query = %self.query, "Search dismissed");
        self.close();
    }

    /// Applies one event.
    pub fn handle(&mut self, event: SearchEvent) -> SessionOutcome<'a> {
        if !self.open {
            return SessionOutcome::Inactive;
        }
        match event {
            SearchEvent::Input(text) => self.set_query(text),
            SearchEvent::Char(ch) => self.push_char(ch),
            SearchEvent::Backspace => self.backspace(),
            SearchEvent::ArrowUp => self.select_previous(),
            SearchEvent::ArrowDown => self.select_next(),
            SearchEvent::Enter => {
                if let Some(entry) = self.confirm() {
                    return SessionOutcome::Selected(entry);
                }
            }
            SearchEvent::Escape | SearchEvent::ClickOutside => {
                self.dismiss();
                return SessionOutcome::Dismissed;
            }
        }
        SessionOutcome::Pending
    }

    fn query_changed(&mut self) {
        self.selected = None;
        self.refresh();
        tracing::trace!(query = %self.query, suggestions = self.suggestions.len(), "Query changed");
    }

    fn refresh(&mut self) {
        self.suggestions = rank(&self.query, self.entries, self.limit, &self.weights);
    }

    fn close(&mut self) {
        self.open = false;
        self.query.clear();
        self.selected = None;
        self.suggestions.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn open_session() -> SearchSession<'static> {
        let mut session = SearchSession::new(Catalog::builtin().entries());
        session.open();
        session
    }

    #[test]
    fn test_new_session_is_closed() {
        let session = SearchSession::new(Catalog::builtin().entries());
        assert!(!session.is_open());
        assert!(session.suggestions().is_empty());
    }

    #[test]
    fn test_open_shows_popular() {
        let session = open_session();
        assert!(session.is_open());
        assert_eq!(session.suggestions().len(), DEFAULT_LIMIT);
        assert_eq!(session.suggestions()[0].entry.popularity, 95);
        assert_eq!(session.selected_index(), None);
    }

    #[test]
    fn test_typing_resets_selection() {
        let mut session = open_session();
        session.select_next();
        session.select_next();
        assert_eq!(session.selected_index(), Some(1));

        session.push_char('g');
        assert_eq!(session.selected_index(), None);
        assert_eq!(session.query(), "g");
    }

    #[test]
    fn test_arrow_down_clamps_without_wraparound() {
        let mut session = open_session();
        session.set_query("gun");
        let count = session.suggestions().len();
        assert!(count > 1);

        for _ in 0..count + 3 {
            session.select_next();
        }
        assert_eq!(session.selected_index(), Some(count - 1));
    }

    #[test]
    fn test_arrow_up_returns_to_none() {
        let mut session = open_session();
        session.select_previous();
        assert_eq!(session.selected_index(), None);

        session.select_next();
        session.select_next();
        session.select_previous();
        assert_eq!(session.selected_index(), Some(0));
        session.select_previous();
        assert_eq!(session.selected_index(), None);
        session.select_previous();
        assert_eq!(session.selected_index(), None);
    }

    #[test]
    fn test_arrow_down_on_empty_suggestions() {
        let mut session = open_session();
        session.set_query("xyz123");
        session.select_next();
        assert_eq!(session.selected_index(), None);
    }

    #[test]
    fn test_enter_without_selection_stays_open() {
        let mut session = open_session();
        session.set_query("gun");
        assert_eq!(session.handle(SearchEvent::Enter), SessionOutcome::Pending);
        assert!(session.is_open());
    }

    #[test]
    fn test_enter_selects_and_closes() {
        let mut session = open_session();
        for ch in "gun".chars() {
            session.handle(SearchEvent::Char(ch));
        }
        session.handle(SearchEvent::ArrowDown);

        match session.handle(SearchEvent::Enter) {
            SessionOutcome::Selected(entry) => assert_eq!(entry.id, "guntur"),
            other => panic!("expected a selection, got {other:?}"),
        }
        assert!(!session.is_open());
        assert_eq!(session.query(), "");
    }

    #[test]
    fn test_escape_and_click_outside_dismiss() {
        for event in [SearchEvent::Escape, SearchEvent::ClickOutside] {
            let mut session = open_session();
            session.set_query("wed");
            session.select_next();
            assert_eq!(session.handle(event), SessionOutcome::Dismissed);
            assert!(!session.is_open());
            assert_eq!(session.selected(), None);
        }
    }

    #[test]
    fn test_closed_session_ignores_events() {
        let mut session = SearchSession::new(Catalog::builtin().entries());
        assert_eq!(session.handle(SearchEvent::Char('w')), SessionOutcome::Inactive);
        assert_eq!(session.handle(SearchEvent::Enter), SessionOutcome::Inactive);
        assert_eq!(session.query(), "");
        assert_eq!(session.confirm(), None);
    }

    #[test]
    fn test_reopen_starts_fresh() {
        let mut session = open_session();
        session.set_query("wedding");
        session.dismiss();
        session.open();
        assert_eq!(session.query(), "");
        assert_eq!(session.suggestions().len(), DEFAULT_LIMIT);
    }

    #[test]
    fn test_backspace_recomputes() {
        let mut session = open_session();
        session.handle(SearchEvent::Input("xyz".to_string()));
        assert!(session.suggestions().is_empty());

        for _ in 0..3 {
            session.handle(SearchEvent::Backspace);
        }
        assert_eq!(session.query(), "");
        assert_eq!(session.suggestions().len(), DEFAULT_LIMIT);

        // backspace on an empty query keeps the highlight
        session.select_next();
        session.backspace();
        assert_eq!(session.selected_index(), Some(0));
    }

    #[test]
    fn test_with_limit() {
        let mut session = SearchSession::new(Catalog::builtin().entries()).with_limit(2);
        session.open();
        assert_eq!(session.suggestions().len(), 2);
    }
}
