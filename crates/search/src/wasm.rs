//! WASM bindings for the search box.

use crate::{rank, Catalog, ScoreWeights};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Score `text` against `query` with the default weights.
#[wasm_bindgen]
pub fn match_score(query: &str, text: &str) -> f64 {
    crate::score(query, text, &ScoreWeights::DEFAULT)
}

/// Suggestions from the built-in catalog as a JSON array of entries.
///
/// # Arguments
/// * `query` - Search box text (empty for popular suggestions)
/// * `limit` - Maximum results to return
#[wasm_bindgen]
pub fn suggest_builtin(query: &str, limit: usize) -> String {
    let entries = crate::suggest(query, Catalog::builtin().entries(), limit);
    serde_json::to_string(&entries).unwrap_or_else(|_| "[]".to_string())
}

/// Rank a caller-supplied catalog and return results as JSON.
///
/// # Arguments
/// * `query` - Search box text
/// * `catalog_json` - JSON array of entries (`id`, `type`, `title`, `subtitle`, `popularity`)
/// * `limit` - Maximum results to return
///
/// # Returns
/// JSON array of `{id, score}` objects, best first. An invalid catalog
/// yields `[]`.
#[wasm_bindgen]
pub fn suggest_json(query: &str, catalog_json: &str, limit: usize) -> String {
    #[derive(Serialize)]
    struct Suggestion<'a> {
        id: &'a str,
        score: f64,
    }

    let Ok(catalog) = Catalog::from_json_str(catalog_json) else {
        return "[]".to_string();
    };

    let results: Vec<Suggestion<'_>> = rank(query, catalog.entries(), limit, &ScoreWeights::DEFAULT)
        .into_iter()
        .map(|scored| Suggestion {
            id: &scored.entry.id,
            score: scored.score,
        })
        .collect();

    serde_json::to_string(&results).unwrap_or_else(|_| "[]".to_string())
}
