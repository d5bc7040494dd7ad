use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rankings_rust_core::{CombinedRow, MatchSummary};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Document written at the end of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombinedReport {
    pub generated_at: DateTime<Utc>,
    pub alias_version: String,
    pub summary: MatchSummary,
    pub rows: Vec<CombinedRow>,
}

impl CombinedReport {
    pub fn new(alias_version: &str, summary: MatchSummary, rows: Vec<CombinedRow>) -> Self {
        Self {
            generated_at: Utc::now(),
            alias_version: alias_version.to_string(),
            summary,
            rows,
        }
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("combined.json");

        let report = CombinedReport::new("2025-26", MatchSummary::default(), Vec::new());
        report.write_to(&path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["alias_version"], "2025-26");
        assert_eq!(value["summary"]["matched"], 0);
        assert!(value["rows"].as_array().unwrap().is_empty());
        assert!(value["generated_at"].is_string());
    }
}
