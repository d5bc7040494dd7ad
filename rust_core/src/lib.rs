//! Rankings Core - NET and KenPom team reconciliation.
//!
//! This module provides:
//! - Team record types for both ranking sources
//! - Curated alias and conference tables loaded from JSON
//! - Name normalization and similarity scoring
//! - Tiered team matching with a greedy one-to-one assignment
//! - Combined table projection and run summaries

pub mod alias_table;
pub mod error;
pub mod matching;
pub mod records;
pub mod report;
mod types;

pub use alias_table::{AliasEntry, AliasFile, AliasTable, DEFAULT_ALIAS_PATH};
pub use error::{RankingsError, Result};
pub use matching::{
    normalize_name, Assignment, MatchMethod, MatchOutcome, MatchedPair, MatcherConfig,
    ScorerKind, SimilarityScorer, TeamMatcher,
};
pub use records::{load_records, load_records_from_path, SourceRecord};
pub use report::{combine, unmatched_lines, CombinedRow, MatchSummary};
pub use types::*;
