// Heuristic complexity scoring
//
// Additive point system over the raw query text. Pure and total: any
// string produces a score, the empty string produces 0. The nominal
// 0-25 range is cosmetic for dashboards; the total is never clamped.

use serde::{Deserialize, Serialize};

/// Points added per configured keyword found in the query.
const KEYWORD_POINTS: u32 = 5;

/// Points added per configured technical pattern found in the query.
const PATTERN_POINTS: u32 = 3;

/// Per-term subtotals of a complexity score.
///
/// Only `total` feeds the routing decision; the components ride along
/// in the API payload so callers can audit the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub total: u32,
    pub length: u32,
    pub keywords: u32,
    pub punctuation: u32,
    pub patterns: u32,
}

/// Scores query complexity from length, keywords, punctuation and
/// technical patterns.
///
/// Keyword and pattern sets are configurable; matching is
/// case-insensitive substring containment, each entry checked once.
#[derive(Debug, Clone)]
pub struct ComplexityScorer {
    keywords: Vec<String>,
    patterns: Vec<String>,
}

impl ComplexityScorer {
    /// Create a scorer with the given keyword and pattern sets.
    ///
    /// Entries are lower-cased once here so every `score` call folds
    /// only the query text.
    pub fn new(keywords: &[String], patterns: &[String]) -> Self {
        Self {
            keywords: keywords.iter().map(|k| k.to_ascii_lowercase()).collect(),
            patterns: patterns.iter().map(|p| p.to_ascii_lowercase()).collect(),
        }
    }

    /// Compute the complexity score for a query.
    ///
    /// - 1 point per whitespace-delimited word
    /// - 5 points per complexity keyword present
    /// - 1 point per `.` and per `?` character
    /// - 3 points per technical pattern present
    pub fn score(&self, query: &str) -> ScoreBreakdown {
        let lower = query.to_ascii_lowercase();

        let length = query.split_whitespace().count() as u32;

        let keywords = self
            .keywords
            .iter()
            .filter(|k| lower.contains(k.as_str()))
            .count() as u32
            * KEYWORD_POINTS;

        let punctuation = query.chars().filter(|c| *c == '.' || *c == '?').count() as u32;

        let patterns = self
            .patterns
            .iter()
            .filter(|p| lower.contains(p.as_str()))
            .count() as u32
            * PATTERN_POINTS;

        ScoreBreakdown {
            total: length + keywords + punctuation + patterns,
            length,
            keywords,
            punctuation,
            patterns,
        }
    }
}
