pub mod matching;
pub mod shared;

pub use matching::{
    extract_numerals, first_letter_rule, match_titles, normalize_for_matching, numbering_rule,
    remove_all_numerals, remove_trademarks, standardize, word_before_after, AsTitle,
    ExclusionLists, MatchExplanation, MatcherConfig, MatcherConfigBuilder, Numeral, NumeralKind,
    NumeralPosition, PenaltyRule, RuleSet, TitleMatcher, FIRST_LETTER_WEIGHT, NUMBERING_WEIGHT,
};
pub use shared::utils::{init_logger, init_test_logger};
pub use shared::{MatchError, MatchResult};
