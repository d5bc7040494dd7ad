//! Loading team snapshots from JSON.
//!
//! Each source snapshot is a JSON array of row objects as scraped from the
//! source's table. Rows are decoded one at a time so a bad row is reported
//! with its position, name and rank instead of a bare parse offset.

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::{RankingsError, Result};
use crate::types::{KenPomTeam, NetTeam, RankedTeam};

/// A record type that can be decoded from a source snapshot.
pub trait SourceRecord: RankedTeam + DeserializeOwned {
    /// JSON key holding the team name
    const NAME_KEY: &'static str;
    /// JSON key holding the rank
    const RANK_KEY: &'static str;
}

impl SourceRecord for NetTeam {
    const NAME_KEY: &'static str = "net_team";
    const RANK_KEY: &'static str = "net_rank";
}

impl SourceRecord for KenPomTeam {
    const NAME_KEY: &'static str = "kp_team";
    const RANK_KEY: &'static str = "kp_rank";
}

/// Decode and validate a JSON array of records.
pub fn load_records<T: SourceRecord>(content: &str) -> Result<Vec<T>> {
    let rows: Vec<Value> = serde_json::from_str(content)?;
    let mut records = Vec::with_capacity(rows.len());

    for (index, row) in rows.into_iter().enumerate() {
        let name = row
            .get(T::NAME_KEY)
            .and_then(Value::as_str)
            .map(str::to_string);
        let rank = row.get(T::RANK_KEY).and_then(Value::as_i64);

        let record: T = serde_json::from_value(row).map_err(|e| RankingsError::MalformedRecord {
            source_name: T::SOURCE.to_string(),
            index,
            name,
            rank,
            reason: e.to_string(),
        })?;
        record.validate(index)?;
        records.push(record);
    }

    Ok(records)
}

/// Read a snapshot file and decode it.
pub fn load_records_from_path<T: SourceRecord, P: AsRef<Path>>(path: P) -> Result<Vec<T>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| RankingsError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let records = load_records::<T>(&content)?;
    info!(
        "Loaded {} {} teams from {}",
        records.len(),
        T::SOURCE,
        path.display()
    );
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_net_rows() {
        let json = r#"[
            {"net_rank": 1, "net_team": "Houston", "net_conf": "Big 12", "net_record": "20-2",
             "net_q1": "9-2", "net_q2": "5-0", "net_q3": "3-0", "net_q4": "3-0"},
            {"net_rank": 2, "net_team": "UConn", "net_conf": "Big East"}
        ]"#;
        let teams: Vec<NetTeam> = load_records(json).unwrap();
        assert_eq!(teams.len(), 2);
        assert_eq!(teams[0].q1, "9-2");
        assert_eq!(teams[1].team, "UConn");
    }

    #[test]
    fn test_missing_conference_reports_row() {
        let json = r#"[
            {"kp_rank": 1, "kp_team": "Houston", "kp_conf": "B12"},
            {"kp_rank": 2, "kp_team": "Auburn"}
        ]"#;
        let err = load_records::<KenPomTeam>(json).unwrap_err();
        match err {
            RankingsError::MalformedRecord {
                source_name,
                index,
                name,
                rank,
                reason,
            } => {
                assert_eq!(source_name, "kenpom");
                assert_eq!(index, 1);
                assert_eq!(name.as_deref(), Some("Auburn"));
                assert_eq!(rank, Some(2));
                assert!(reason.contains("kp_conf"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_name_reports_rank() {
        let json = r#"[{"net_rank": 7, "net_conf": "SEC"}]"#;
        let err = load_records::<NetTeam>(json).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("net record #0"));
        assert!(msg.contains("rank: Some(7)"));
    }

    #[test]
    fn test_blank_name_fails_validation() {
        let json = r#"[{"net_rank": 7, "net_team": "", "net_conf": "SEC"}]"#;
        assert!(matches!(
            load_records::<NetTeam>(json),
            Err(RankingsError::MalformedRecord { index: 0, .. })
        ));
    }

    #[test]
    fn test_not_an_array() {
        assert!(matches!(
            load_records::<NetTeam>("{}"),
            Err(RankingsError::Json(_))
        ));
    }

    #[test]
    fn test_load_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"kp_rank": 3, "kp_team": "Duke", "kp_conf": "ACC"}}]"#).unwrap();

        let teams: Vec<KenPomTeam> = load_records_from_path(file.path()).unwrap();
        assert_eq!(teams, vec![KenPomTeam::new(3, "Duke", "ACC")]);

        assert!(matches!(
            load_records_from_path::<KenPomTeam, _>("/nonexistent/kenpom.json"),
            Err(RankingsError::Io { .. })
        ));
    }
}
