//! Curated NET -> KenPom alias table.
//!
//! This module provides:
//! - Team name aliases (NET spelling -> KenPom spelling)
//! - Conference label aliases (NET scheme -> KenPom scheme)
//! - JSON loading with consistency checks
//!
//! JSON format:
//! `{ "version": "..", "names": [{"from": "UConn", "to": "Connecticut"}, ..], "conferences": [..] }`

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::{RankingsError, Result};

/// Default location of the alias resource, relative to the working directory.
pub const DEFAULT_ALIAS_PATH: &str = "data/aliases.json";

/// One curated equivalence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasEntry {
    pub from: String,
    pub to: String,
}

impl AliasEntry {
    pub fn new(from: &str, to: &str) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
        }
    }
}

/// On-disk shape of the alias resource.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AliasFile {
    pub version: String,
    #[serde(default)]
    pub names: Vec<AliasEntry>,
    #[serde(default)]
    pub conferences: Vec<AliasEntry>,
}

impl AliasFile {
    /// Check both lists for empty strings, identity entries, duplicate keys
    /// and cycles.
    pub fn validate(&self) -> Result<()> {
        build_map("names", &self.names)?;
        build_map("conferences", &self.conferences)?;
        Ok(())
    }
}

/// Read-only lookup over the validated alias resource.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    version: String,
    /// NET team name -> KenPom team name
    names: FxHashMap<String, String>,
    /// NET conference -> KenPom conference
    conferences: FxHashMap<String, String>,
}

impl AliasTable {
    /// Empty table; every lookup misses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from entries, validating them.
    pub fn from_entries(
        version: &str,
        names: Vec<AliasEntry>,
        conferences: Vec<AliasEntry>,
    ) -> Result<Self> {
        Self::try_from(AliasFile {
            version: version.to_string(),
            names,
            conferences,
        })
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let file: AliasFile =
            serde_json::from_str(content).map_err(|e| RankingsError::AliasParse(e.to_string()))?;
        Self::try_from(file)
    }

    /// Load and validate a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| RankingsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let table = Self::from_json_str(&content)?;
        debug!(
            "Loaded alias table {} from {}: {} names, {} conferences",
            table.version,
            path.display(),
            table.len(),
            table.conference_count()
        );
        Ok(table)
    }

    /// KenPom spelling for a NET team name, if curated.
    pub fn lookup_name(&self, name: &str) -> Option<&str> {
        self.names.get(name).map(|s| s.as_str())
    }

    /// KenPom label for a NET conference; unknown labels pass through.
    pub fn lookup_conference<'a>(&'a self, conference: &'a str) -> &'a str {
        self.conferences
            .get(conference)
            .map(|s| s.as_str())
            .unwrap_or(conference)
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Number of name aliases.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn conference_count(&self) -> usize {
        self.conferences.len()
    }
}

impl TryFrom<AliasFile> for AliasTable {
    type Error = RankingsError;

    fn try_from(file: AliasFile) -> Result<Self> {
        let names = build_map("names", &file.names)?;
        let conferences = build_map("conferences", &file.conferences)?;
        Ok(Self {
            version: file.version,
            names,
            conferences,
        })
    }
}

fn build_map(table: &'static str, entries: &[AliasEntry]) -> Result<FxHashMap<String, String>> {
    let invalid = |reason: String| RankingsError::AliasValidation { table, reason };

    let mut map: FxHashMap<String, String> = FxHashMap::default();
    for (idx, entry) in entries.iter().enumerate() {
        if entry.from.trim().is_empty() || entry.to.trim().is_empty() {
            return Err(invalid(format!("entry #{} has an empty side", idx)));
        }
        if entry.from == entry.to {
            return Err(invalid(format!(
                "entry #{} maps {:?} to itself",
                idx, entry.from
            )));
        }
        if let Some(existing) = map.get(&entry.from) {
            return Err(invalid(format!(
                "duplicate key {:?} (entry #{} -> {:?}, already -> {:?})",
                entry.from, idx, entry.to, existing
            )));
        }
        map.insert(entry.from.clone(), entry.to.clone());
    }

    // File order keeps the reported cycle deterministic
    for entry in entries {
        if let Some(cycle) = find_cycle(&map, &entry.from) {
            return Err(invalid(format!("alias cycle {}", cycle.join(" -> "))));
        }
    }

    Ok(map)
}

/// Follow `start -> map[start] -> ...`; return the path if it revisits a key.
fn find_cycle(map: &FxHashMap<String, String>, start: &str) -> Option<Vec<String>> {
    let mut path = vec![start.to_string()];
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    seen.insert(start);

    let mut current = start;
    while let Some(next) = map.get(current) {
        path.push(next.clone());
        if !seen.insert(next.as_str()) {
            return Some(path);
        }
        current = next.as_str();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn shipped_alias_path() -> std::path::PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join(DEFAULT_ALIAS_PATH)
    }

    #[test]
    fn test_lookup_name_hit_and_miss() {
        let table = AliasTable::from_entries(
            "test",
            vec![AliasEntry::new("UConn", "Connecticut")],
            vec![],
        )
        .unwrap();

        assert_eq!(table.lookup_name("UConn"), Some("Connecticut"));
        assert_eq!(table.lookup_name("uconn"), None);
        assert_eq!(table.lookup_name("Duke"), None);
    }

    #[test]
    fn test_lookup_conference_passthrough() {
        let table = AliasTable::from_entries(
            "test",
            vec![],
            vec![AliasEntry::new("Big East", "BE")],
        )
        .unwrap();

        assert_eq!(table.lookup_conference("Big East"), "BE");
        assert_eq!(table.lookup_conference("SEC"), "SEC");
        assert_eq!(AliasTable::new().lookup_conference("XYZ"), "XYZ");
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let err = AliasTable::from_entries(
            "test",
            vec![
                AliasEntry::new("Pitt", "Pittsburgh"),
                AliasEntry::new("Pitt", "Pitt Panthers"),
            ],
            vec![],
        )
        .unwrap_err();
        assert!(err.to_string().contains("duplicate key \"Pitt\""));
    }

    #[test]
    fn test_identity_entry_rejected() {
        let err = AliasTable::from_entries("test", vec![], vec![AliasEntry::new("SEC", "SEC")])
            .unwrap_err();
        assert!(matches!(
            err,
            RankingsError::AliasValidation {
                table: "conferences",
                ..
            }
        ));
    }

    #[test]
    fn test_cycle_rejected() {
        let err = AliasTable::from_entries(
            "test",
            vec![
                AliasEntry::new("USC", "Southern California"),
                AliasEntry::new("Southern California", "USC"),
            ],
            vec![],
        )
        .unwrap_err();
        assert!(err
            .to_string()
            .contains("USC -> Southern California -> USC"));
    }

    #[test]
    fn test_chain_without_cycle_allowed() {
        let table = AliasTable::from_entries(
            "test",
            vec![
                AliasEntry::new("Alcorn", "Alcorn St."),
                AliasEntry::new("Alcorn St.", "Alcorn State"),
            ],
            vec![],
        )
        .unwrap();
        // lookup is single-step
        assert_eq!(table.lookup_name("Alcorn"), Some("Alcorn St."));
    }

    #[test]
    fn test_empty_side_rejected() {
        assert!(AliasTable::from_entries("test", vec![AliasEntry::new(" ", "X")], vec![]).is_err());
    }

    #[test]
    fn test_parse_error() {
        let err = AliasTable::from_json_str("{\"names\": 3}").unwrap_err();
        assert!(matches!(err, RankingsError::AliasParse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"version": "v1", "names": [{{"from": "Ole Miss", "to": "Mississippi"}}],
                "conferences": [{{"from": "Sun Belt", "to": "SB"}}]}}"#
        )
        .unwrap();

        let table = AliasTable::load(file.path()).unwrap();
        assert_eq!(table.version(), "v1");
        assert_eq!(table.len(), 1);
        assert_eq!(table.conference_count(), 1);
        assert_eq!(table.lookup_name("Ole Miss"), Some("Mississippi"));
        assert_eq!(table.lookup_conference("Sun Belt"), "SB");
    }

    #[test]
    fn test_load_missing_file() {
        let err = AliasTable::load("/nonexistent/aliases.json").unwrap_err();
        assert!(matches!(err, RankingsError::Io { .. }));
    }

    #[test]
    fn test_shipped_aliases_are_consistent() {
        let content = fs::read_to_string(shipped_alias_path()).unwrap();
        let file: AliasFile = serde_json::from_str(&content).unwrap();
        file.validate().unwrap();

        let table = AliasTable::try_from(file).unwrap();
        assert!(!table.version().is_empty());
        assert_eq!(table.lookup_name("UConn"), Some("Connecticut"));
        assert_eq!(table.lookup_name("Fla. Atlantic"), Some("Florida Atlantic"));
        assert_eq!(table.lookup_conference("Big East"), "BE");
        assert_eq!(table.lookup_conference("American"), "Amer");
        assert_eq!(table.conference_count(), 18);
    }
}
