//! Ranking catalog entries into a bounded suggestion list.

use crate::catalog::CatalogEntry;
use crate::fuzzy::{score, ScoreWeights};
use serde::Serialize;

/// Default number of suggestions shown in the dropdown.
pub const DEFAULT_LIMIT: usize = 6;

/// An entry with the score it was ranked by.
///
/// Popular defaults (empty query) carry a score of 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoredEntry<'a> {
    /// The matched entry
    pub entry: &'a CatalogEntry,
    /// Match score (higher is better)
    pub score: f64,
}

/// Best suggestions for `query` with the default weights.
///
/// An empty or whitespace-only query yields the most popular entries.
///
/// # Example
/// ```
/// use eventsite_search::{suggest, Catalog};
///
/// let results = suggest("wedding", Catalog::builtin().entries(), 6);
/// assert_eq!(results[0].title, "Plan a Wedding in Hyderabad");
/// ```
#[must_use]
pub fn suggest<'a>(query: &str, entries: &'a [CatalogEntry], limit: usize) -> Vec<&'a CatalogEntry> {
    rank(query, entries, limit, &ScoreWeights::DEFAULT)
        .into_iter()
        .map(|scored| scored.entry)
        .collect()
}

/// Ranks `entries` against `query`, returning at most `limit` results.
///
/// With a non-empty query, entries scoring 0 are dropped and the rest are
/// ordered by score, then popularity, then catalog order.
#[must_use]
pub fn rank<'a>(
    query: &str,
    entries: &'a [CatalogEntry],
    limit: usize,
    weights: &ScoreWeights,
) -> Vec<ScoredEntry<'a>> {
    if limit == 0 {
        return Vec::new();
    }
    if query.trim().is_empty() {
        return popular(entries, limit);
    }

    let mut scored: Vec<ScoredEntry<'a>> = score_all(query, entries, weights)
        .into_iter()
        .filter(|scored| scored.score > 0.0)
        .collect();

    // stable: equal score and popularity keep catalog order
    scored.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| b.entry.popularity.cmp(&a.entry.popularity))
    });
    scored.truncate(limit);
    scored
}

/// The `limit` most popular entries, ties in catalog order.
#[must_use]
pub fn popular(entries: &[CatalogEntry], limit: usize) -> Vec<ScoredEntry<'_>> {
    let mut ordered: Vec<&CatalogEntry> = entries.iter().collect();
    ordered.sort_by(|a, b| b.popularity.cmp(&a.popularity));
    ordered
        .into_iter()
        .take(limit)
        .map(|entry| ScoredEntry { entry, score: 0.0 })
        .collect()
}

/// Scores every entry, preserving catalog order.
fn score_all<'a>(
    query: &str,
    entries: &'a [CatalogEntry],
    weights: &ScoreWeights,
) -> Vec<ScoredEntry<'a>> {
    let score_one = |entry: &'a CatalogEntry| ScoredEntry {
        entry,
        score: score(query, &entry.search_text(), weights),
    };

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        entries.par_iter().map(score_one).collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        entries.iter().map(score_one).collect()
    }
}
