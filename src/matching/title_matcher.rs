use serde::Serialize;
use std::sync::LazyLock;

use super::config::MatcherConfig;
use super::numerals::remove_all_numerals;
use super::rules::{RulePenalty, RuleSet};
use super::similarity_strategy::{LevenshteinStrategy, SimilarityStrategy};
use super::title::{title_text, AsTitle};
use super::title_normalizer::TitleNormalizer;
use crate::shared::errors::MatchResult;
use crate::shared::utils::LogContext;

static DEFAULT_MATCHER: LazyLock<TitleMatcher> = LazyLock::new(TitleMatcher::default);

/// Why a pair of alias lists scored what it did
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchExplanation {
    /// Raw aliases of the winning pair
    pub title_a: String,
    pub title_b: String,
    /// After first-stage normalization; what the rules saw
    pub normalized_a: String,
    pub normalized_b: String,
    /// After numeral removal and standardization; what the similarity saw
    pub standardized_a: String,
    pub standardized_b: String,
    pub similarity: f64,
    pub penalties: Vec<RulePenalty>,
    /// `similarity` minus the summed penalties
    pub score: f64,
}

impl MatchExplanation {
    pub fn total_penalty(&self) -> f64 {
        self.penalties.iter().map(|p| p.penalty).sum()
    }
}

/// Scores alias lists against each other
///
/// Every pair from the cross product is normalized, penalized by the rule
/// set and compared on its standardized, numeral-free text. The best pair
/// decides the score, which never drops below 0.
pub struct TitleMatcher {
    normalizer: TitleNormalizer,
    standardizer: TitleNormalizer,
    rules: RuleSet,
    strategy: Box<dyn SimilarityStrategy>,
}

impl TitleMatcher {
    /// Build a matcher from a validated configuration
    pub fn new(config: MatcherConfig) -> MatchResult<Self> {
        config.validate()?;
        Ok(Self::from_config(&config))
    }

    /// Assemble a matcher from explicit parts
    pub fn from_parts(
        normalizer: TitleNormalizer,
        rules: RuleSet,
        strategy: Box<dyn SimilarityStrategy>,
    ) -> Self {
        Self {
            normalizer,
            standardizer: TitleNormalizer::standardize_pipeline(),
            rules,
            strategy,
        }
    }

    fn from_config(config: &MatcherConfig) -> Self {
        Self::from_parts(
            TitleNormalizer::matching_pipeline(&config.exclusions),
            RuleSet::from_config(config),
            Box::new(LevenshteinStrategy),
        )
    }

    /// Replace the rule set
    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Best score over every alias pair, floored at 0
    pub fn match_titles<A: AsTitle, B: AsTitle>(&self, titles_a: &[A], titles_b: &[B]) -> f64 {
        self.explain_match(titles_a, titles_b)
            .map_or(0.0, |explanation| explanation.score)
    }

    /// The winning alias pair and its score breakdown.
    ///
    /// Returns `None` when no pair scores above 0. On ties the first pair
    /// in iteration order wins.
    pub fn explain_match<A: AsTitle, B: AsTitle>(
        &self,
        titles_a: &[A],
        titles_b: &[B],
    ) -> Option<MatchExplanation> {
        let mut best: Option<MatchExplanation> = None;
        let mut pairs = 0;

        for a in titles_a {
            for b in titles_b {
                pairs += 1;
                let Some(candidate) = self.score_pair(title_text(a), title_text(b)) else {
                    continue;
                };

                let best_score = best.as_ref().map_or(0.0, |e| e.score);
                if candidate.score > best_score {
                    best = Some(candidate);
                }
            }
        }

        LogContext::match_finished(pairs, best.as_ref().map_or(0.0, |e| e.score));
        best
    }

    /// Score for a single alias pair, `None` if either side normalizes away
    pub fn score_pair(&self, a: &str, b: &str) -> Option<MatchExplanation> {
        let normalized_a = self.normalizer.normalize(a);
        let normalized_b = self.normalizer.normalize(b);

        if normalized_a.is_empty() || normalized_b.is_empty() {
            LogContext::pair_skipped(a, b);
            return None;
        }

        let penalties = self.rules.evaluate(&normalized_a, &normalized_b);
        let penalty: f64 = penalties.iter().map(|p| p.penalty).sum();

        let standardized_a = self.standardizer.normalize(&remove_all_numerals(&normalized_a));
        let standardized_b = self.standardizer.normalize(&remove_all_numerals(&normalized_b));
        let similarity = self.strategy.calculate(&standardized_a, &standardized_b);

        LogContext::pair_scored(&normalized_a, &normalized_b, similarity, penalty);

        Some(MatchExplanation {
            title_a: a.to_string(),
            title_b: b.to_string(),
            normalized_a,
            normalized_b,
            standardized_a,
            standardized_b,
            similarity,
            penalties,
            score: similarity - penalty,
        })
    }
}

impl Default for TitleMatcher {
    fn default() -> Self {
        Self::from_config(&MatcherConfig::default())
    }
}

/// Similarity of two alias lists using the default configuration
pub fn match_titles<A: AsTitle, B: AsTitle>(titles_a: &[A], titles_b: &[B]) -> f64 {
    DEFAULT_MATCHER.match_titles(titles_a, titles_b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::config::{MatcherConfigBuilder, NUMBERING_WEIGHT};
    use crate::matching::rules::MockPenaltyRule;

    struct ConstantStrategy(f64);

    impl SimilarityStrategy for ConstantStrategy {
        fn calculate(&self, _a: &str, _b: &str) -> f64 {
            self.0
        }

        fn name(&self) -> &'static str {
            "Constant"
        }
    }

    fn plain_matcher(rules: RuleSet, similarity: f64) -> TitleMatcher {
        TitleMatcher::from_parts(
            TitleNormalizer::matching_pipeline(&Default::default()),
            rules,
            Box::new(ConstantStrategy(similarity)),
        )
    }

    #[test]
    fn test_identical_titles_score_one() {
        let matcher = TitleMatcher::default();
        assert_eq!(matcher.match_titles(&["Okami"], &["Okami"]), 1.0);
    }

    #[test]
    fn test_empty_lists_score_zero() {
        let matcher = TitleMatcher::default();
        let empty: [&str; 0] = [];
        assert_eq!(matcher.match_titles(&empty, &empty), 0.0);
        assert_eq!(matcher.match_titles(&["Okami"], &empty), 0.0);
        assert!(matcher.explain_match(&empty, &empty).is_none());
    }

    #[test]
    fn test_absent_and_empty_titles_score_zero() {
        let matcher = TitleMatcher::default();
        assert_eq!(matcher.match_titles(&[Some("")], &[None::<&str>]), 0.0);
        assert_eq!(matcher.match_titles(&["(Japan)"], &["Okami"]), 0.0);
    }

    #[test]
    fn test_penalties_are_subtracted_from_similarity() {
        let mut rule = MockPenaltyRule::new();
        rule.expect_name().return_const("fixed");
        rule.expect_penalty().times(1).returning(|_, _| 0.25);

        let matcher = plain_matcher(RuleSet::empty().with_rule(rule), 0.75);
        assert_eq!(matcher.match_titles(&["a"], &["b"]), 0.5);
    }

    #[test]
    fn test_rules_see_normalized_text_with_numerals() {
        let mut rule = MockPenaltyRule::new();
        rule.expect_name().return_const("spy");
        rule.expect_penalty()
            .withf(|a, b| a.to_string() == "Resident Evil 2" && b.to_string() == "Biohazard II")
            .times(1)
            .returning(|_, _| 0.0);

        let matcher = plain_matcher(RuleSet::empty().with_rule(rule), 0.5);
        matcher.match_titles(&["Resident Evil 2™ (Dual Shock)"], &["〔Biohazard II〕"]);
    }

    #[test]
    fn test_score_floors_at_zero() {
        let mut rule = MockPenaltyRule::new();
        rule.expect_name().return_const("heavy");
        rule.expect_penalty().returning(|_, _| 2.0);

        let matcher = plain_matcher(RuleSet::empty().with_rule(rule), 1.0);
        assert_eq!(matcher.match_titles(&["a", "b"], &["c", "d"]), 0.0);
        assert!(matcher.explain_match(&["a"], &["c"]).is_none());
    }

    #[test]
    fn test_score_pair_can_go_negative() {
        let mut rule = MockPenaltyRule::new();
        rule.expect_name().return_const("heavy");
        rule.expect_penalty().returning(|_, _| 2.0);

        let matcher = plain_matcher(RuleSet::empty().with_rule(rule), 1.0);
        let pair = matcher.score_pair("a", "c").unwrap();
        assert_eq!(pair.score, -1.0);
    }

    #[test]
    fn test_every_pair_is_evaluated() {
        let mut rule = MockPenaltyRule::new();
        rule.expect_name().return_const("count");
        rule.expect_penalty().times(6).returning(|_, _| 0.0);

        let matcher = plain_matcher(RuleSet::empty().with_rule(rule), 0.5);
        matcher.match_titles(&["a", "b", "c"], &["d", "e"]);
    }

    #[test]
    fn test_explain_match_reports_winning_pair() {
        let matcher = TitleMatcher::default();
        let explanation = matcher
            .explain_match(
                &["Resident Evil 2", "Biohazard 2"],
                &["Resident Evil", "RE"],
            )
            .unwrap();

        assert_eq!(explanation.title_a, "Resident Evil 2");
        assert_eq!(explanation.title_b, "Resident Evil");
        assert_eq!(explanation.standardized_a, "residentevil");
        assert_eq!(explanation.standardized_b, "residentevil");
        assert_eq!(explanation.similarity, 1.0);
        assert_eq!(explanation.total_penalty(), NUMBERING_WEIGHT);
        assert_eq!(explanation.score, 1.0 - NUMBERING_WEIGHT);
    }

    #[test]
    fn test_ties_keep_first_pair() {
        let matcher = plain_matcher(RuleSet::empty(), 0.9);
        let explanation = matcher.explain_match(&["a", "b"], &["c", "d"]).unwrap();
        assert_eq!(explanation.title_a, "a");
        assert_eq!(explanation.title_b, "c");
    }

    #[test]
    fn test_with_rules_replaces_rule_set() {
        let matcher = TitleMatcher::default().with_rules(RuleSet::empty());
        assert!(matcher.rules().is_empty());
        assert_eq!(
            matcher.match_titles(&["Resident Evil 2"], &["Resident Evil"]),
            1.0
        );
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = MatcherConfig {
            numbering_weight: -1.0,
            ..MatcherConfig::default()
        };
        assert!(TitleMatcher::new(config).is_err());
    }

    #[test]
    fn test_custom_weights_flow_into_rules() {
        let config = MatcherConfigBuilder::new()
            .numbering_weight(0.5)
            .build()
            .unwrap();
        let matcher = TitleMatcher::new(config).unwrap();

        assert_eq!(
            matcher.match_titles(&["Resident Evil 2"], &["Resident Evil"]),
            0.5
        );
    }

    #[test]
    fn test_fixture_series_list_is_stripped() {
        let config = MatcherConfigBuilder::new()
            .series(vec!["Fixture Hits".to_string()])
            .build()
            .unwrap();
        let matcher = TitleMatcher::new(config).unwrap();

        assert_eq!(
            matcher.match_titles(&["Fixture Hits Series Mahjong"], &["Mahjong"]),
            1.0
        );
    }

    #[test]
    fn test_explanation_serializes_to_json() {
        let matcher = TitleMatcher::default();
        let explanation = matcher
            .explain_match(&["FIFA 2015"], &["Fifa '16"])
            .unwrap();

        let json = serde_json::to_value(&explanation).unwrap();
        assert_eq!(json["penalties"][1]["rule"], "numbering");
        assert_eq!(json["standardized_a"], "fifa");
    }
}
