use serde::Serialize;

use super::config::{MatcherConfig, FIRST_LETTER_WEIGHT, NUMBERING_WEIGHT};
use super::numerals::{extract_numerals, Numeral, NumeralPosition};
use super::title::{title_text, AsTitle};
use super::title_normalizer::standardize;

/// A penalty applied to a pair of lightly normalized titles
///
/// Rules are pure and independent; a rule set sums them rather than
/// chaining them. Penalties are never negative.
#[cfg_attr(test, mockall::automock)]
pub trait PenaltyRule: Send + Sync {
    fn name(&self) -> &'static str;
    fn penalty(&self, a: &str, b: &str) -> f64;
}

/// Fires when two single-word titles start with different letters
#[derive(Debug, Clone)]
pub struct FirstLetterRule {
    weight: f64,
}

impl FirstLetterRule {
    pub fn new(weight: f64) -> Self {
        Self { weight }
    }
}

impl PenaltyRule for FirstLetterRule {
    fn name(&self) -> &'static str {
        "first_letter"
    }

    fn penalty(&self, a: &str, b: &str) -> f64 {
        if a.is_empty() || b.is_empty() {
            return 0.0;
        }
        if a.split_whitespace().count() != 1 || b.split_whitespace().count() != 1 {
            return 0.0;
        }

        let first_a = a.trim_start().chars().next().into_iter().flat_map(char::to_lowercase);
        let first_b = b.trim_start().chars().next().into_iter().flat_map(char::to_lowercase);

        if first_a.eq(first_b) {
            0.0
        } else {
            self.weight
        }
    }
}

/// Compares the rightmost numeral of each title
///
/// A numeral sitting in the middle of one title, with none in the other,
/// is ignored when dropping it makes both titles standardize identically.
#[derive(Debug, Clone)]
pub struct NumberingRule {
    weight: f64,
}

impl NumberingRule {
    pub fn new(weight: f64) -> Self {
        Self { weight }
    }

    /// Whether `numeral` is a non-distinguishing mid-title qualifier of
    /// `with` relative to `without`, e.g. "Tokyo 2 Xtreme Racer" against
    /// "Tokyo Xtreme Racer". Every copy of the numeral text is removed
    /// before comparing.
    pub fn is_embedded_qualifier(with: &str, numeral: &Numeral, without: &str) -> bool {
        numeral.position == NumeralPosition::Middle
            && standardize(with.replace(numeral.raw.as_str(), "")) == standardize(without)
    }
}

impl PenaltyRule for NumberingRule {
    fn name(&self) -> &'static str {
        "numbering"
    }

    fn penalty(&self, a: &str, b: &str) -> f64 {
        let rightmost_a = extract_numerals(a).into_iter().next();
        let rightmost_b = extract_numerals(b).into_iter().next();

        match (&rightmost_a, &rightmost_b) {
            (Some(x), None) if Self::is_embedded_qualifier(a, x, b) => 0.0,
            (None, Some(y)) if Self::is_embedded_qualifier(b, y, a) => 0.0,
            (None, None) => 0.0,
            (Some(x), Some(y)) if x.value == y.value => 0.0,
            _ => self.weight,
        }
    }
}

/// Penalty contributed by one rule
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RulePenalty {
    pub rule: &'static str,
    pub penalty: f64,
}

/// Ordered collection of penalty rules
pub struct RuleSet {
    rules: Vec<Box<dyn PenaltyRule>>,
}

impl RuleSet {
    /// A rule set that never penalizes
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// The standard rules, weighted from `config`
    pub fn from_config(config: &MatcherConfig) -> Self {
        Self::empty()
            .with_rule(FirstLetterRule::new(config.first_letter_weight))
            .with_rule(NumberingRule::new(config.numbering_weight))
    }

    /// Append a rule. Rules are evaluated in insertion order.
    pub fn with_rule<R: PenaltyRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Per-rule penalties for a pair, in rule order
    pub fn evaluate(&self, a: &str, b: &str) -> Vec<RulePenalty> {
        self.rules
            .iter()
            .map(|rule| {
                let penalty = rule.penalty(a, b);
                // NaN fails this check too
                if !(penalty >= 0.0) {
                    log::warn!(
                        "Rule {} returned invalid penalty {} for '{}' vs '{}', using 0",
                        rule.name(),
                        penalty,
                        a,
                        b
                    );
                }
                RulePenalty {
                    rule: rule.name(),
                    penalty: penalty.max(0.0),
                }
            })
            .collect()
    }

    /// Sum of all rule penalties for a pair
    pub fn total_penalty(&self, a: &str, b: &str) -> f64 {
        self.evaluate(a, b).iter().map(|p| p.penalty).sum()
    }

    /// Rule names in evaluation order
    pub fn names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }

    /// Number of rules in the set
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::from_config(&MatcherConfig::default())
    }
}

/// First-letter rule with the default weight
pub fn first_letter_rule(a: impl AsTitle, b: impl AsTitle) -> f64 {
    FirstLetterRule::new(FIRST_LETTER_WEIGHT).penalty(title_text(&a), title_text(&b))
}

/// Numbering rule with the default weight
pub fn numbering_rule(a: impl AsTitle, b: impl AsTitle) -> f64 {
    NumberingRule::new(NUMBERING_WEIGHT).penalty(title_text(&a), title_text(&b))
}
