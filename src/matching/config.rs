use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::shared::errors::{MatchError, MatchResult};

/// Penalty subtracted when the rightmost numerals of two titles disagree
pub const NUMBERING_WEIGHT: f64 = 0.2;

/// Penalty subtracted when two single-word titles start with different letters
pub const FIRST_LETTER_WEIGHT: f64 = 0.2;

/// Trademark markers stripped before any comparison
pub const TRADEMARK_MARKERS: [&str; 4] = ["™", "®", "(TM)", "(R)"];

const DEFAULT_SERIES: &str = include_str!("../../resources/series.txt");

/// Exclusion lists consulted by the first normalization stage
///
/// Loaded once and never mutated afterwards. Entries are matched as exact
/// substrings, in list order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExclusionLists {
    /// Series names stripped when followed by the word "Series"
    pub series: Vec<String>,

    /// Literal trademark tokens removed from titles
    pub trademarks: Vec<String>,
}

impl ExclusionLists {
    /// Lists with nothing to strip
    pub fn empty() -> Self {
        Self {
            series: Vec::new(),
            trademarks: Vec::new(),
        }
    }

    /// Parse a newline-delimited resource list.
    ///
    /// Entries are trimmed and blank lines are ignored.
    pub fn parse_list(text: &str) -> Vec<String> {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Load both lists from UTF-8 resource files
    pub fn from_files(
        series_path: impl AsRef<Path>,
        trademark_path: impl AsRef<Path>,
    ) -> MatchResult<Self> {
        Ok(Self {
            series: read_list(series_path.as_ref())?,
            trademarks: read_list(trademark_path.as_ref())?,
        })
    }

    /// Replace the series list
    pub fn with_series(mut self, series: Vec<String>) -> Self {
        self.series = series;
        self
    }

    /// Replace the trademark list
    pub fn with_trademarks(mut self, trademarks: Vec<String>) -> Self {
        self.trademarks = trademarks;
        self
    }
}

impl Default for ExclusionLists {
    fn default() -> Self {
        Self {
            series: Self::parse_list(DEFAULT_SERIES),
            trademarks: TRADEMARK_MARKERS.iter().map(|t| t.to_string()).collect(),
        }
    }
}

fn read_list(path: &Path) -> MatchResult<Vec<String>> {
    let text = fs::read_to_string(path).map_err(|e| MatchError::resource(path, e))?;
    let entries = ExclusionLists::parse_list(&text);
    log::debug!("Loaded {} entries from {}", entries.len(), path.display());
    Ok(entries)
}

/// Configuration for the title matcher
///
/// Keeps the rule weights out of the rule bodies so the rule set can be
/// recalibrated without touching rule code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatcherConfig {
    /// Penalty for disagreeing sequel/edition numerals
    pub numbering_weight: f64,

    /// Penalty for single-word titles with different first letters
    pub first_letter_weight: f64,

    /// Series and trademark lists for first-stage normalization
    pub exclusions: ExclusionLists,
}

impl MatcherConfig {
    /// Creates a new configuration with production defaults
    pub fn new() -> Self {
        Self {
            numbering_weight: NUMBERING_WEIGHT,
            first_letter_weight: FIRST_LETTER_WEIGHT,
            exclusions: ExclusionLists::default(),
        }
    }

    /// Validates the configuration
    ///
    /// Negative weights would let a rule raise a score, which breaks the
    /// floor-at-zero guarantee of the matcher.
    pub fn validate(&self) -> MatchResult<()> {
        for (name, weight) in [
            ("numbering_weight", self.numbering_weight),
            ("first_letter_weight", self.first_letter_weight),
        ] {
            if !weight.is_finite() {
                return Err(MatchError::InvalidConfig(format!(
                    "{} must be a finite number, got {}",
                    name, weight
                )));
            }
            if weight < 0.0 {
                return Err(MatchError::InvalidConfig(format!(
                    "{} must be non-negative, got {}",
                    name, weight
                )));
            }
        }

        if self.exclusions.trademarks.iter().any(|t| t.is_empty())
            || self.exclusions.series.iter().any(|s| s.is_empty())
        {
            return Err(MatchError::InvalidConfig(
                "exclusion lists must not contain empty entries".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for MatcherConfig to make test setup easier
#[derive(Default)]
pub struct MatcherConfigBuilder {
    config: MatcherConfig,
}

impl MatcherConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: MatcherConfig::new(),
        }
    }

    pub fn numbering_weight(mut self, weight: f64) -> Self {
        self.config.numbering_weight = weight;
        self
    }

    pub fn first_letter_weight(mut self, weight: f64) -> Self {
        self.config.first_letter_weight = weight;
        self
    }

    pub fn series(mut self, series: Vec<String>) -> Self {
        self.config.exclusions.series = series;
        self
    }

    pub fn trademarks(mut self, trademarks: Vec<String>) -> Self {
        self.config.exclusions.trademarks = trademarks;
        self
    }

    pub fn exclusions(mut self, exclusions: ExclusionLists) -> Self {
        self.config.exclusions = exclusions;
        self
    }

    pub fn build(self) -> MatchResult<MatcherConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
