use std::collections::HashSet;
use std::sync::LazyLock;

use super::config::{ExclusionLists, TRADEMARK_MARKERS};
use super::title::{title_text, AsTitle};

/// Characters deleted outright by standardization
const STANDARDIZE_DELETED_CHARS: &str = ".,:-〔〕'’*/!&?+ ";

static DEFAULT_MATCHING: LazyLock<TitleNormalizer> =
    LazyLock::new(|| TitleNormalizer::matching_pipeline(&ExclusionLists::default()));

static STANDARDIZE: LazyLock<TitleNormalizer> =
    LazyLock::new(TitleNormalizer::standardize_pipeline);

/// Transformation that can be applied to a title
///
/// Each transformation is composable and testable in isolation.
pub trait TitleTransformation: Send + Sync {
    fn transform(&self, title: &str) -> String;
    fn name(&self) -> &'static str;
}

/// Converts title to lowercase
#[derive(Debug, Clone)]
pub struct LowercaseTransform;

impl TitleTransformation for LowercaseTransform {
    fn transform(&self, title: &str) -> String {
        title.to_lowercase()
    }

    fn name(&self) -> &'static str {
        "Lowercase"
    }
}

/// Trims leading and trailing whitespace
#[derive(Debug, Clone)]
pub struct TrimTransform;

impl TitleTransformation for TrimTransform {
    fn transform(&self, title: &str) -> String {
        title.trim().to_string()
    }

    fn name(&self) -> &'static str {
        "Trim"
    }
}

/// Replaces literal substrings, one pair after another
///
/// Replacements run in the given order over the output of the previous
/// one, so later pairs see the result of earlier ones.
#[derive(Debug, Clone)]
pub struct ReplacePatternsTransform {
    replacements: Vec<(String, String)>,
}

impl ReplacePatternsTransform {
    pub fn new(replacements: Vec<(String, String)>) -> Self {
        Self { replacements }
    }

    /// Deletes every occurrence of each pattern
    pub fn removing<S: AsRef<str>>(patterns: &[S]) -> Self {
        Self::new(
            patterns
                .iter()
                .map(|p| (p.as_ref().to_string(), String::new()))
                .collect(),
        )
    }

    fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self::new(
            pairs
                .iter()
                .map(|(from, to)| (from.to_string(), to.to_string()))
                .collect(),
        )
    }
}

impl TitleTransformation for ReplacePatternsTransform {
    fn transform(&self, title: &str) -> String {
        let mut result = title.to_string();
        for (from, to) in &self.replacements {
            if !from.is_empty() {
                result = result.replace(from.as_str(), to);
            }
        }
        result
    }

    fn name(&self) -> &'static str {
        "ReplacePatterns"
    }
}

/// Keeps only the text before the first occurrence of a delimiter
#[derive(Debug, Clone)]
pub struct TruncateAtTransform {
    delimiter: char,
}

impl TruncateAtTransform {
    pub fn new(delimiter: char) -> Self {
        Self { delimiter }
    }
}

impl TitleTransformation for TruncateAtTransform {
    fn transform(&self, title: &str) -> String {
        match title.split_once(self.delimiter) {
            Some((prefix, _)) => prefix.to_string(),
            None => title.to_string(),
        }
    }

    fn name(&self) -> &'static str {
        "TruncateAt"
    }
}

/// Deletes every character from a fixed set
#[derive(Debug, Clone)]
pub struct DeleteCharsTransform {
    chars: HashSet<char>,
}

impl DeleteCharsTransform {
    pub fn new(chars: &str) -> Self {
        Self {
            chars: chars.chars().collect(),
        }
    }
}

impl TitleTransformation for DeleteCharsTransform {
    fn transform(&self, title: &str) -> String {
        title.chars().filter(|c| !self.chars.contains(c)).collect()
    }

    fn name(&self) -> &'static str {
        "DeleteChars"
    }
}

/// Removes a "<series> Series" qualifier
///
/// Series names are tried in list order; only the first name whose
/// qualifier appears is removed, and only its first occurrence.
#[derive(Debug, Clone)]
pub struct StripSeriesTransform {
    qualifiers: Vec<String>,
}

impl StripSeriesTransform {
    pub fn new<S: AsRef<str>>(series: &[S]) -> Self {
        Self {
            qualifiers: series
                .iter()
                .map(|s| s.as_ref())
                .filter(|s| !s.is_empty())
                .map(|s| format!("{} Series", s))
                .collect(),
        }
    }
}

impl TitleTransformation for StripSeriesTransform {
    fn transform(&self, title: &str) -> String {
        match self.qualifiers.iter().find(|q| title.contains(q.as_str())) {
            Some(qualifier) => title.replacen(qualifier.as_str(), "", 1),
            None => title.to_string(),
        }
    }

    fn name(&self) -> &'static str {
        "StripSeries"
    }
}

/// Title normalizer that applies a pipeline of transformations
///
/// Uses the builder pattern for composability and testability.
pub struct TitleNormalizer {
    transformations: Vec<Box<dyn TitleTransformation>>,
}

impl TitleNormalizer {
    /// Create a new empty normalizer
    pub fn new() -> Self {
        Self {
            transformations: Vec::new(),
        }
    }

    /// First-stage cleanup applied before rules run.
    ///
    /// Strips trademarks, folds the "Ⅱ" glyph, drops parenthetical
    /// qualifiers and tortoise-shell brackets, and removes a known series
    /// qualifier. Numerals and word boundaries survive so rules can see them.
    pub fn matching_pipeline(exclusions: &ExclusionLists) -> Self {
        Self::new()
            .with_remove_patterns(&exclusions.trademarks)
            .with_trim()
            .with_replace_patterns(vec![("Ⅱ".to_string(), "II".to_string())])
            .with_truncate_at('(')
            .with_remove_patterns(&["〔", "〕"])
            .with_strip_series(&exclusions.series)
            .with_trim()
    }

    /// Aggressive fold applied right before the edit-similarity computation.
    ///
    /// Never use this ahead of rule evaluation: it erases the spaces and
    /// connective words the rules depend on.
    pub fn standardize_pipeline() -> Self {
        Self::new()
            .with(ReplacePatternsTransform::from_pairs(&[
                ("The", " "),
                ("・", " "),
                ("THE", " "),
                ("the", " "),
            ]))
            .with_delete_chars(STANDARDIZE_DELETED_CHARS)
            .with(ReplacePatternsTransform::from_pairs(&[
                ("ō", "o"),
                ("Ō", "O"),
                ("ū", "u"),
                ("Ū", "U"),
            ]))
            .with(ReplacePatternsTransform::from_pairs(&[
                ("ou", "o"),
                ("Ou", "O"),
                ("uu", "u"),
                ("Uu", "U"),
                ("nb", "mb"),
            ]))
            .with_lowercase()
    }

    /// Add an arbitrary transformation
    pub fn with<T: TitleTransformation + 'static>(mut self, transformation: T) -> Self {
        self.transformations.push(Box::new(transformation));
        self
    }

    /// Add lowercase transformation
    pub fn with_lowercase(self) -> Self {
        self.with(LowercaseTransform)
    }

    /// Add trim transformation
    pub fn with_trim(self) -> Self {
        self.with(TrimTransform)
    }

    /// Add pattern removal transformation
    pub fn with_remove_patterns<S: AsRef<str>>(self, patterns: &[S]) -> Self {
        self.with(ReplacePatternsTransform::removing(patterns))
    }

    /// Add pattern replacement transformation
    pub fn with_replace_patterns(self, replacements: Vec<(String, String)>) -> Self {
        self.with(ReplacePatternsTransform::new(replacements))
    }

    /// Add truncation at the first `delimiter`
    pub fn with_truncate_at(self, delimiter: char) -> Self {
        self.with(TruncateAtTransform::new(delimiter))
    }

    /// Add character deletion transformation
    pub fn with_delete_chars(self, chars: &str) -> Self {
        self.with(DeleteCharsTransform::new(chars))
    }

    /// Add series qualifier removal
    pub fn with_strip_series<S: AsRef<str>>(self, series: &[S]) -> Self {
        self.with(StripSeriesTransform::new(series))
    }

    /// Apply all transformations to the title
    pub fn normalize(&self, title: &str) -> String {
        if title.is_empty() {
            return String::new();
        }

        let mut result = title.to_string();

        for transformation in &self.transformations {
            result = transformation.transform(&result);
            log::trace!("After {}: '{}'", transformation.name(), result);
        }

        result
    }

    /// Get the number of transformations in the pipeline
    pub fn transformation_count(&self) -> usize {
        self.transformations.len()
    }
}

impl Default for TitleNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// First-stage cleanup with the built-in exclusion lists
pub fn normalize_for_matching(raw: impl AsTitle) -> String {
    DEFAULT_MATCHING.normalize(title_text(&raw))
}

/// Aggressive fold used only for the final similarity computation
pub fn standardize(a: impl AsTitle) -> String {
    STANDARDIZE.normalize(title_text(&a))
}

/// Removes trademark markers and trims
pub fn remove_trademarks(a: impl AsTitle) -> String {
    let mut result = title_text(&a).to_string();
    for marker in TRADEMARK_MARKERS {
        result = result.replace(marker, "");
    }
    result.trim().to_string()
}

/// Word immediately before and after the first `sep` in `a`.
///
/// Both are empty when `sep` does not occur. The "after" word is taken
/// from the text between the first and second occurrence of `sep`.
pub fn word_before_after(a: &str, sep: &str) -> (String, String) {
    if sep.is_empty() || !a.contains(sep) {
        return (String::new(), String::new());
    }

    let mut parts = a.split(sep);
    let before = parts.next().unwrap_or("").trim();
    let after = parts.next().unwrap_or("").trim();

    let word_before = before.rsplit(' ').next().unwrap_or("");
    let word_after = after.split(' ').next().unwrap_or("");

    (word_before.to_string(), word_after.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture_lists(series: &[&str]) -> ExclusionLists {
        ExclusionLists::default().with_series(series.iter().map(|s| s.to_string()).collect())
    }

    // Individual transformation tests

    #[test]
    fn test_replace_patterns_is_sequential() {
        let transform = ReplacePatternsTransform::from_pairs(&[("ab", "b"), ("bb", "c")]);
        assert_eq!(transform.transform("abb"), "c");
    }

    #[test]
    fn test_replace_patterns_ignores_empty_pattern() {
        let transform = ReplacePatternsTransform::removing(&[""]);
        assert_eq!(transform.transform("Ys"), "Ys");
    }

    #[test]
    fn test_truncate_at_transform() {
        let transform = TruncateAtTransform::new('(');
        assert_eq!(transform.transform("Zelda (Rev 1) (USA)"), "Zelda ");
        assert_eq!(transform.transform("(Japan)"), "");
        assert_eq!(transform.transform("Zelda"), "Zelda");
    }

    #[test]
    fn test_delete_chars_transform() {
        let transform = DeleteCharsTransform::new(STANDARDIZE_DELETED_CHARS);
        assert_eq!(transform.transform("Re: Zero - 1/2!"), "ReZero12");
    }

    #[test]
    fn test_strip_series_first_hit_only() {
        let transform = StripSeriesTransform::new(&["SIMPLE", "Value"]);
        assert_eq!(
            transform.transform("SIMPLE Series Value Series Vol. 1"),
            " Value Series Vol. 1"
        );
    }

    #[test]
    fn test_strip_series_requires_series_word() {
        let transform = StripSeriesTransform::new(&["SIMPLE"]);
        assert_eq!(transform.transform("SIMPLE 2000 Vol. 3"), "SIMPLE 2000 Vol. 3");
    }

    #[test]
    fn test_strip_series_skips_names_without_qualifier() {
        // "SIMPLE" appears but without "Series"; the next list entry still applies
        let transform = StripSeriesTransform::new(&["SIMPLE", "Major Wave"]);
        assert_eq!(
            transform.transform("SIMPLE Major Wave Series Mahjong"),
            "SIMPLE  Mahjong"
        );
    }

    // Matching pipeline

    #[test]
    fn test_matching_pipeline_strips_trademarks() {
        let normalizer = TitleNormalizer::matching_pipeline(&fixture_lists(&[]));
        assert_eq!(normalizer.normalize("Tetris™"), "Tetris");
        assert_eq!(normalizer.normalize("Sonic(TM) Adventure®"), "Sonic Adventure");
        assert_eq!(normalizer.normalize("(R)"), "");
    }

    #[test]
    fn test_matching_pipeline_folds_roman_glyph() {
        let normalizer = TitleNormalizer::matching_pipeline(&fixture_lists(&[]));
        assert_eq!(normalizer.normalize("Dragon Quest Ⅱ"), "Dragon Quest II");
    }

    #[test]
    fn test_matching_pipeline_drops_parenthetical() {
        let normalizer = TitleNormalizer::matching_pipeline(&fixture_lists(&[]));
        assert_eq!(
            normalizer.normalize("Final Fantasy VII (International) (Disc 1)"),
            "Final Fantasy VII"
        );
    }

    #[test]
    fn test_matching_pipeline_strips_brackets_without_truncating() {
        let normalizer = TitleNormalizer::matching_pipeline(&fixture_lists(&[]));
        assert_eq!(normalizer.normalize("〔Tokimeki〕 Memorial"), "Tokimeki Memorial");
    }

    #[test]
    fn test_matching_pipeline_strips_series_from_fixture() {
        let normalizer = TitleNormalizer::matching_pipeline(&fixture_lists(&["SIMPLE 1500"]));
        assert_eq!(
            normalizer.normalize("SIMPLE 1500 Series Vol. 1: The Mahjong"),
            "Vol. 1: The Mahjong"
        );
    }

    #[test]
    fn test_matching_pipeline_trademark_before_truncation() {
        // "(TM)" must be stripped before the parenthesis cut, or the title is lost
        let normalizer = TitleNormalizer::matching_pipeline(&fixture_lists(&[]));
        assert_eq!(normalizer.normalize("Spyro(TM) Reignited"), "Spyro Reignited");
    }

    #[test]
    fn test_normalize_for_matching_absent_and_empty() {
        assert_eq!(normalize_for_matching(""), "");
        assert_eq!(normalize_for_matching(None::<&str>), "");
        assert_eq!(normalize_for_matching("   "), "");
    }

    #[test]
    fn test_normalize_for_matching_default_series() {
        assert_eq!(
            normalize_for_matching("SIMPLE Series Vol. 5 The Block Kuzushi"),
            "Vol. 5 The Block Kuzushi"
        );
    }

    // Standardization

    #[test]
    fn test_standardize_removes_connectives_and_punctuation() {
        assert_eq!(standardize("The Witcher: Wild Hunt"), "witcherwildhunt");
        assert_eq!(standardize("THE KING OF FIGHTERS '98"), "kingoffighters98");
        assert_eq!(standardize("Ratchet & Clank"), "ratchetclank");
    }

    #[test]
    fn test_standardize_middle_dot() {
        assert_eq!(standardize("ドラゴン・クエスト"), "ドラゴンクエスト");
    }

    #[test]
    fn test_standardize_folds_macrons_and_digraphs() {
        assert_eq!(standardize("Ōkami"), "okami");
        assert_eq!(standardize("Ryū ga Gotoku"), "ryugagotoku");
        assert_eq!(standardize("Tokyo Xtreme"), standardize("Tōkyō Xtreme"));
        assert_eq!(standardize("Genbu"), "gembu");
        assert_eq!(standardize("Kyuukyoku"), "kyukyoku");
    }

    #[test]
    fn test_standardize_absent_and_empty() {
        assert_eq!(standardize(""), "");
        assert_eq!(standardize(None::<String>), "");
    }

    #[test]
    fn test_standardize_pipeline_transformation_count() {
        assert_eq!(TitleNormalizer::standardize_pipeline().transformation_count(), 5);
        assert_eq!(TitleNormalizer::new().transformation_count(), 0);
    }

    // Helpers

    #[test]
    fn test_remove_trademarks() {
        assert_eq!(remove_trademarks(""), "");
        assert_eq!(remove_trademarks("Title(TM)"), "Title");
        assert_eq!(remove_trademarks("(R)"), "");
        assert_eq!(remove_trademarks(None::<&str>), "");
    }

    #[test]
    fn test_word_before_after() {
        let title = "Final Fantasy Adventure";
        assert_eq!(
            word_before_after(title, "Fantasy"),
            ("Final".to_string(), "Adventure".to_string())
        );
        assert_eq!(
            word_before_after(title, "Final"),
            (String::new(), "Fantasy".to_string())
        );
        assert_eq!(
            word_before_after(title, "Adventure"),
            ("Fantasy".to_string(), String::new())
        );
        assert_eq!(word_before_after(title, "X"), (String::new(), String::new()));
        assert_eq!(
            word_before_after("Final Fantasy 5: The Finalising", "5"),
            ("Fantasy".to_string(), ":".to_string())
        );
    }

    #[test]
    fn test_word_before_after_empty_separator() {
        assert_eq!(word_before_after("Ys", ""), (String::new(), String::new()));
    }
}
