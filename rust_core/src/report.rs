//! Combined table and run diagnostics.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::matching::MatchOutcome;
use crate::types::{KenPomTeam, NetTeam, RankedTeam};

/// One row of the joined NET + KenPom table.
///
/// Team and conference use the KenPom spelling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedRow {
    #[serde(rename = "KenPom_Rank")]
    pub kenpom_rank: u32,
    #[serde(rename = "NET_Rank")]
    pub net_rank: u32,
    #[serde(rename = "Team")]
    pub team: String,
    #[serde(rename = "Conference")]
    pub conference: String,
    #[serde(rename = "Record")]
    pub record: String,
    #[serde(rename = "Net_Rating")]
    pub net_rating: String,
    #[serde(rename = "Off_Rating")]
    pub off_rating: String,
    #[serde(rename = "Def_Rating")]
    pub def_rating: String,
    #[serde(rename = "Adj_Tempo")]
    pub adj_tempo: String,
    #[serde(rename = "SOS")]
    pub sos: String,
    #[serde(rename = "Q1")]
    pub q1: String,
    #[serde(rename = "Q2")]
    pub q2: String,
    #[serde(rename = "Q3")]
    pub q3: String,
    #[serde(rename = "Q4")]
    pub q4: String,
    /// How the two rows were joined, e.g. "alias" or "fuzzy(0.79)"
    #[serde(rename = "Match_Method")]
    pub match_method: String,
}

impl CombinedRow {
    fn from_pair(net: &NetTeam, kenpom: &KenPomTeam, method: String) -> Self {
        Self {
            kenpom_rank: kenpom.rank,
            net_rank: net.rank,
            team: kenpom.team.clone(),
            conference: kenpom.conference.clone(),
            record: kenpom.record.clone(),
            net_rating: kenpom.net_rating.clone(),
            off_rating: kenpom.off_rating.clone(),
            def_rating: kenpom.def_rating.clone(),
            adj_tempo: kenpom.adj_tempo.clone(),
            sos: kenpom.sos.clone(),
            q1: net.q1.clone(),
            q2: net.q2.clone(),
            q3: net.q3.clone(),
            q4: net.q4.clone(),
            match_method: method,
        }
    }
}

/// Project matched pairs into combined rows ordered by KenPom rank.
pub fn combine(outcome: &MatchOutcome<NetTeam, KenPomTeam>) -> Vec<CombinedRow> {
    let mut rows: Vec<CombinedRow> = outcome
        .matched
        .iter()
        .map(|pair| CombinedRow::from_pair(&pair.left, &pair.right, pair.method.to_string()))
        .collect();
    rows.sort_by_key(|row| row.kenpom_rank);
    rows
}

/// Counts for one matcher run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub matched: usize,
    pub unmatched_left: usize,
    pub unmatched_right: usize,
    /// Method label ("alias", "fuzzy", ..) -> pair count
    pub by_method: BTreeMap<String, usize>,
}

impl MatchSummary {
    pub fn from_outcome<L, R>(outcome: &MatchOutcome<L, R>) -> Self {
        let mut by_method: BTreeMap<String, usize> = BTreeMap::new();
        for pair in &outcome.matched {
            *by_method.entry(pair.method.as_str().to_string()).or_default() += 1;
        }

        Self {
            matched: outcome.matched.len(),
            unmatched_left: outcome.unmatched_left.len(),
            unmatched_right: outcome.unmatched_right.len(),
            by_method,
        }
    }
}

/// Console lines for a residue list, e.g. `"   12. Team (Conf)"`.
pub fn unmatched_lines<T: RankedTeam>(teams: &[T]) -> Vec<String> {
    teams
        .iter()
        .map(|t| format!("  {:3}. {} ({})", t.rank(), t.name(), t.conference()))
        .collect()
}
