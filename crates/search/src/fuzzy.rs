//! Subsequence-scan scoring.

use serde::{Deserialize, Serialize};

/// Points awarded by [`score`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    /// Target character equal to the next pending query character
    pub in_order: f64,
    /// Target character skipped while the pending query character occurs
    /// somewhere in the target
    pub contained: f64,
    /// The whole query was consumed as an in-order subsequence
    pub completion: f64,
}

impl ScoreWeights {
    /// Default weights: 2 per in-order match, 0.5 per skip, 10 on completion.
    pub const DEFAULT: ScoreWeights = ScoreWeights {
        in_order: 2.0,
        contained: 0.5,
        completion: 10.0,
    };
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Score `target` against `query`, case-insensitively.
///
/// Walks the target left to right with a cursor into the query. A target
/// character equal to the cursor character earns `in_order` and advances the
/// cursor; any other character earns `contained` if the cursor character
/// occurs anywhere in the target. Consuming the whole query adds
/// `completion`, after which nothing more is awarded.
///
/// Surrounding whitespace in the query is ignored. An empty query scores 0.
///
/// # Example
/// ```
/// use eventsite_search::{score, ScoreWeights};
///
/// let in_order = score("brthdy", "Birthday Party Themes", &ScoreWeights::DEFAULT);
/// let shuffled = score("ydhtrb", "Birthday Party Themes", &ScoreWeights::DEFAULT);
/// assert!(in_order > shuffled);
/// ```
#[must_use]
pub fn score(query: &str, target: &str, weights: &ScoreWeights) -> f64 {
    let query: Vec<char> = query.trim().to_lowercase().chars().collect();
    if query.is_empty() {
        return 0.0;
    }
    let target: Vec<char> = target.to_lowercase().chars().collect();

    let mut total = 0.0;
    let mut cursor = 0;

    for &ch in &target {
        let Some(&pending) = query.get(cursor) else {
            break;
        };
        if ch == pending {
            total += weights.in_order;
            cursor += 1;
        } else if target.contains(&pending) {
            total += weights.contained;
        }
    }

    if cursor == query.len() {
        total += weights.completion;
    }

    total
}

/// Check if text contains all characters of query in order, ignoring case.
///
/// This is the condition under which [`score`] awards the completion bonus.
#[must_use]
pub fn is_subsequence(text: &str, query: &str) -> bool {
    let mut text_chars = text.chars().flat_map(char::to_lowercase);

    query
        .trim()
        .chars()
        .flat_map(char::to_lowercase)
        .all(|query_char| text_chars.any(|c| c == query_char))
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: ScoreWeights = ScoreWeights::DEFAULT;

    #[test]
    fn test_exact_prefix_scores_matches_and_bonus() {
        // "gun" consumed by the first three characters: 3 * 2 + 10
        assert_eq!(score("gun", "Guntur", &W), 16.0);
    }

    #[test]
    fn test_skipped_characters_earn_half_points() {
        // "events in " (10 chars) skipped while 'g' is pending, then g-u-n
        assert_eq!(score("gun", "Events in Guntur", &W), 21.0);
    }

    #[test]
    fn test_missing_character_earns_nothing() {
        assert_eq!(score("xyz123", "Events in Guntur", &W), 0.0);
    }

    #[test]
    fn test_stalled_cursor_without_completion() {
        // b-r-t-h-d-a-y: 'i' skipped (0.5), 'a' skipped (0.5), six matches
        assert_eq!(score("brthdy", "Birthday", &W), 6.0 * 2.0 + 1.0 + 10.0);
        // 'z' never occurs so the cursor stalls on it without points
        assert_eq!(score("bz", "Birthday", &W), 2.0);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(score("WED", "Plan a Wedding", &W), score("wed", "plan a wedding", &W));
    }

    #[test]
    fn test_empty_query_scores_zero() {
        assert_eq!(score("", "anything", &W), 0.0);
        assert_eq!(score("   ", "anything", &W), 0.0);
    }

    #[test]
    fn test_custom_weights() {
        let weights = ScoreWeights {
            in_order: 1.0,
            contained: 0.0,
            completion: 0.0,
        };
        assert_eq!(score("gun", "Events in Guntur", &weights), 3.0);
    }

    #[test]
    fn test_is_subsequence_true() {
        assert!(is_subsequence("Birthday Party Themes", "brthdy"));
    }

    #[test]
    fn test_is_subsequence_false() {
        assert!(!is_subsequence("Birthday Party Themes", "ydhtrb"));
    }

    #[test]
    fn test_is_subsequence_exact() {
        assert!(is_subsequence("guntur", "GUNTUR"));
    }
}
