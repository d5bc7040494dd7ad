//! Team Matching
//!
//! Resolves each NET team to at most one KenPom team through a tier cascade:
//! curated alias, exact name, normalized name, conference-scoped fuzzy, and
//! global fuzzy. Claims are greedy in NET (rank) order and never reuse a
//! KenPom record.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{RankingsError, Result};

pub mod assignment;
pub mod normalize;
pub mod similarity;
pub mod team;

pub use assignment::{Assignment, Claim};
pub use normalize::normalize_name;
pub use similarity::{JaroWinkler, ScorerKind, SequenceRatio, SimilarityScorer};
pub use team::TeamMatcher;

/// Minimum score for a fuzzy match inside the mapped conference.
pub const DEFAULT_CONFERENCE_THRESHOLD: f64 = 0.60;
/// Minimum score for a fuzzy match against every remaining team.
pub const DEFAULT_GLOBAL_THRESHOLD: f64 = 0.70;

/// How a pair was matched
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchMethod {
    /// Curated alias resolved to an exact KenPom name
    Alias,
    /// Raw names identical
    Exact,
    /// Names equal after normalization
    Normalized,
    /// Best fuzzy candidate within the mapped conference
    Fuzzy { score: f64 },
    /// Best fuzzy candidate across all unclaimed teams
    GlobalFuzzy { score: f64 },
}

impl MatchMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchMethod::Alias => "alias",
            MatchMethod::Exact => "exact",
            MatchMethod::Normalized => "normalized",
            MatchMethod::Fuzzy { .. } => "fuzzy",
            MatchMethod::GlobalFuzzy { .. } => "global_fuzzy",
        }
    }

    /// Similarity score; deterministic tiers report 1.0.
    pub fn score(&self) -> f64 {
        match self {
            MatchMethod::Fuzzy { score } | MatchMethod::GlobalFuzzy { score } => *score,
            _ => 1.0,
        }
    }

    pub fn is_fuzzy(&self) -> bool {
        matches!(self, MatchMethod::Fuzzy { .. } | MatchMethod::GlobalFuzzy { .. })
    }
}

impl fmt::Display for MatchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_fuzzy() {
            write!(f, "{}({:.2})", self.as_str(), self.score())
        } else {
            f.write_str(self.as_str())
        }
    }
}

/// One NET record joined with one KenPom record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedPair<L, R> {
    pub left: L,
    pub right: R,
    pub method: MatchMethod,
}

/// Everything a matcher run produces.
///
/// `matched` follows left input order; residues keep their input order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchOutcome<L, R> {
    pub matched: Vec<MatchedPair<L, R>>,
    pub unmatched_left: Vec<L>,
    pub unmatched_right: Vec<R>,
}

impl<L, R> MatchOutcome<L, R> {
    pub fn is_complete(&self) -> bool {
        self.unmatched_left.is_empty() && self.unmatched_right.is_empty()
    }
}

/// Matcher tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatcherConfig {
    /// Conference-scoped fuzzy matches must score strictly above this
    pub conference_threshold: f64,
    /// Global fuzzy matches must score strictly above this
    pub global_threshold: f64,
    pub scorer: ScorerKind,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            conference_threshold: DEFAULT_CONFERENCE_THRESHOLD,
            global_threshold: DEFAULT_GLOBAL_THRESHOLD,
            scorer: ScorerKind::default(),
        }
    }
}

impl MatcherConfig {
    pub fn with_thresholds(mut self, conference: f64, global: f64) -> Self {
        self.conference_threshold = conference;
        self.global_threshold = global;
        self
    }

    pub fn with_scorer(mut self, scorer: ScorerKind) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn validate(&self) -> Result<()> {
        check_threshold("conference", self.conference_threshold)?;
        check_threshold("global", self.global_threshold)
    }
}

fn check_threshold(name: &'static str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(RankingsError::InvalidThreshold { name, value })
    }
}
