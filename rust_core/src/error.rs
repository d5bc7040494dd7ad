//! Error types for the rankings core.

use thiserror::Error;

/// Errors raised while loading inputs or running the matcher.
///
/// Unmatched teams are never an error; they land in the residue lists of
/// [`crate::matching::MatchOutcome`].
#[derive(Debug, Error)]
pub enum RankingsError {
    /// A record is missing a required field or carries an unusable value.
    #[error("malformed {source_name} record #{index} (name: {name:?}, rank: {rank:?}): {reason}")]
    MalformedRecord {
        /// Which ranking source the record came from ("net", "kenpom")
        source_name: String,
        /// Zero-based position in the input list
        index: usize,
        /// Team name, when one could be read
        name: Option<String>,
        /// Rank, when one could be read
        rank: Option<i64>,
        reason: String,
    },

    /// The alias resource could not be decoded.
    #[error("alias table parse error: {0}")]
    AliasParse(String),

    /// The alias resource decoded but is internally inconsistent.
    #[error("alias table invalid ({table}): {reason}")]
    AliasValidation { table: &'static str, reason: String },

    /// A fuzzy threshold outside [0, 1].
    #[error("invalid {name} threshold {value}: must be within [0, 1]")]
    InvalidThreshold { name: &'static str, value: f64 },

    /// A claim that would break the one-to-one assignment.
    #[error("cannot assign record #{b_index} to #{a_index}: {reason}")]
    InvalidClaim {
        a_index: usize,
        b_index: usize,
        reason: String,
    },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RankingsError>;
