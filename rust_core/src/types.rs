//! Team records as published by each ranking source.

use serde::{Deserialize, Serialize};

use crate::error::{RankingsError, Result};

/// Identity fields the matcher needs from any source's record.
pub trait RankedTeam {
    /// Short source label used in logs and errors ("net", "kenpom")
    const SOURCE: &'static str;

    /// Team name exactly as the source publishes it
    fn name(&self) -> &str;
    /// Position in the source's ranking (1-based)
    fn rank(&self) -> u32;
    /// Conference label in the source's own scheme
    fn conference(&self) -> &str;

    /// Check the required fields; `index` is the record's input position.
    fn validate(&self, index: usize) -> Result<()> {
        let malformed = |reason: &str| RankingsError::MalformedRecord {
            source_name: Self::SOURCE.to_string(),
            index,
            name: Some(self.name().to_string()),
            rank: Some(i64::from(self.rank())),
            reason: reason.to_string(),
        };

        if self.name().trim().is_empty() {
            return Err(malformed("team name is empty"));
        }
        if self.conference().trim().is_empty() {
            return Err(malformed("conference is empty"));
        }
        if self.rank() == 0 {
            return Err(malformed("rank must be >= 1"));
        }
        Ok(())
    }
}

/// One row of the NCAA NET rankings (source A).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetTeam {
    #[serde(rename = "net_rank")]
    pub rank: u32,
    #[serde(rename = "net_team")]
    pub team: String,
    #[serde(rename = "net_conf")]
    pub conference: String,
    /// Overall W-L record
    #[serde(rename = "net_record", default)]
    pub record: String,
    #[serde(rename = "net_road", default)]
    pub road: String,
    #[serde(rename = "net_neutral", default)]
    pub neutral: String,
    #[serde(rename = "net_home", default)]
    pub home: String,
    /// Quadrant 1-4 records, e.g. "3-1"
    #[serde(rename = "net_q1", default)]
    pub q1: String,
    #[serde(rename = "net_q2", default)]
    pub q2: String,
    #[serde(rename = "net_q3", default)]
    pub q3: String,
    #[serde(rename = "net_q4", default)]
    pub q4: String,
}

impl NetTeam {
    /// Identity-only record; metric fields left blank.
    pub fn new(rank: u32, team: &str, conference: &str) -> Self {
        Self {
            rank,
            team: team.to_string(),
            conference: conference.to_string(),
            record: String::new(),
            road: String::new(),
            neutral: String::new(),
            home: String::new(),
            q1: String::new(),
            q2: String::new(),
            q3: String::new(),
            q4: String::new(),
        }
    }
}

impl RankedTeam for NetTeam {
    const SOURCE: &'static str = "net";

    fn name(&self) -> &str {
        &self.team
    }

    fn rank(&self) -> u32 {
        self.rank
    }

    fn conference(&self) -> &str {
        &self.conference
    }
}

/// One row of the KenPom ratings table (source B).
///
/// Ratings stay as published strings; KenPom leaves some cells blank early
/// in the season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KenPomTeam {
    #[serde(rename = "kp_rank")]
    pub rank: u32,
    #[serde(rename = "kp_team")]
    pub team: String,
    #[serde(rename = "kp_conf")]
    pub conference: String,
    #[serde(rename = "kp_record", default)]
    pub record: String,
    #[serde(rename = "kp_net_rtg", default)]
    pub net_rating: String,
    #[serde(rename = "kp_ortg", default)]
    pub off_rating: String,
    #[serde(rename = "kp_drtg", default)]
    pub def_rating: String,
    #[serde(rename = "kp_adj_tempo", default)]
    pub adj_tempo: String,
    /// Strength of schedule (net rating)
    #[serde(rename = "kp_sos", default)]
    pub sos: String,
}

impl KenPomTeam {
    /// Identity-only record; metric fields left blank.
    pub fn new(rank: u32, team: &str, conference: &str) -> Self {
        Self {
            rank,
            team: team.to_string(),
            conference: conference.to_string(),
            record: String::new(),
            net_rating: String::new(),
            off_rating: String::new(),
            def_rating: String::new(),
            adj_tempo: String::new(),
            sos: String::new(),
        }
    }
}

impl RankedTeam for KenPomTeam {
    const SOURCE: &'static str = "kenpom";

    fn name(&self) -> &str {
        &self.team
    }

    fn rank(&self) -> u32 {
        self.rank
    }

    fn conference(&self) -> &str {
        &self.conference
    }
}
