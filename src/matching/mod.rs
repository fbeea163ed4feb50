//! Title matching engine: normalization, numeral extraction, penalty rules
//! and best-pair scoring of alias lists.
//!
//! # Architecture
//!
//! - **Builder Pattern**: `TitleNormalizer` composes `TitleTransformation`s
//!   into the light first-stage cleanup and the aggressive standardization fold
//! - **Strategy Pattern**: `SimilarityStrategy` for the edit-similarity measure,
//!   `PenaltyRule` for independent, summed penalties
//! - **Configuration Pattern**: `MatcherConfig` carries the rule weights and
//!   exclusion lists
//!
//! # Usage
//!
//! ```rust
//! use game_title_match::{MatcherConfig, TitleMatcher};
//!
//! let matcher = TitleMatcher::new(MatcherConfig::default()).unwrap();
//! let score = matcher.match_titles(
//!     &["Resident Evil 2", "Biohazard 2"],
//!     &["Resident Evil II"],
//! );
//! assert_eq!(score, 1.0);
//! ```
pub mod config;
pub mod numerals;
pub mod rules;
pub mod similarity_strategy;
pub mod title;
pub mod title_matcher;
pub mod title_normalizer;

// Re-export main types
pub use config::{
    ExclusionLists, MatcherConfig, MatcherConfigBuilder, FIRST_LETTER_WEIGHT, NUMBERING_WEIGHT,
    TRADEMARK_MARKERS,
};
pub use numerals::{extract_numerals, remove_all_numerals, Numeral, NumeralKind, NumeralPosition};
pub use rules::{
    first_letter_rule, numbering_rule, FirstLetterRule, NumberingRule, PenaltyRule, RulePenalty,
    RuleSet,
};
pub use similarity_strategy::{LevenshteinStrategy, SimilarityStrategy};
pub use title::AsTitle;
pub use title_matcher::{match_titles, MatchExplanation, TitleMatcher};
pub use title_normalizer::{
    normalize_for_matching, remove_trademarks, standardize, word_before_after,
    DeleteCharsTransform, LowercaseTransform, ReplacePatternsTransform, StripSeriesTransform,
    TitleNormalizer, TitleTransformation, TrimTransform, TruncateAtTransform,
};
