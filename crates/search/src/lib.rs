//! Ranked fuzzy suggestions for the Eventsite search box.
//!
//! This crate provides:
//! - A validated catalog of events, cities, themes and venues
//! - Subsequence-scan scoring with tunable weights
//! - Bounded, stable ranking with popular defaults for empty queries
//! - A framework-independent search session (query, highlight, open state)
//! - WASM bindings for browser usage
//!
//! # Example
//!
//! ```
//! use eventsite_search::{Catalog, SearchEvent, SearchSession, SessionOutcome};
//!
//! let mut session = SearchSession::new(Catalog::builtin().entries());
//! session.open();
//! session.handle(SearchEvent::Input("gun".into()));
//! session.handle(SearchEvent::ArrowDown);
//!
//! match session.handle(SearchEvent::Enter) {
//!     SessionOutcome::Selected(entry) => assert_eq!(entry.title, "Events in Guntur"),
//!     other => panic!("unexpected outcome: {other:?}"),
//! }
//! ```

mod catalog;
mod error;
mod fuzzy;
mod ranking;
mod session;

#[cfg(feature = "wasm")]
mod wasm;

pub use catalog::{Catalog, CatalogEntry, EntryKind, MAX_POPULARITY};
pub use error::{Result, SearchError};
pub use fuzzy::{is_subsequence, score, ScoreWeights};
pub use ranking::{popular, rank, suggest, ScoredEntry, DEFAULT_LIMIT};
pub use session::{SearchEvent, SearchSession, SessionOutcome};
