use strsim::normalized_levenshtein;

/// Strategy for calculating similarity between two standardized titles
///
/// This trait lets the matcher swap the edit-similarity measure without
/// touching the scoring logic.
pub trait SimilarityStrategy: Send + Sync {
    /// Calculate similarity between two strings
    ///
    /// Returns a value between 0.0 (completely different) and 1.0 (identical)
    fn calculate(&self, a: &str, b: &str) -> f64;

    /// Get the name of this strategy for logging/debugging
    fn name(&self) -> &'static str;
}

/// Normalized Levenshtein similarity strategy
///
/// Character-level edit distance scaled by the longer string's length.
#[derive(Debug, Clone, Default)]
pub struct LevenshteinStrategy;

impl SimilarityStrategy for LevenshteinStrategy {
    fn calculate(&self, a: &str, b: &str) -> f64 {
        normalized_levenshtein(a, b)
    }

    fn name(&self) -> &'static str {
        "Levenshtein"
    }
}
