use anyhow::{anyhow, Context, Result};
use rankings_rust_core::matching::{DEFAULT_CONFERENCE_THRESHOLD, DEFAULT_GLOBAL_THRESHOLD};
use rankings_rust_core::{MatcherConfig, ScorerKind, DEFAULT_ALIAS_PATH};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Clone, Debug)]
pub struct Config {
    pub net_path: PathBuf,
    pub kenpom_path: PathBuf,
    pub alias_path: PathBuf,
    pub output_path: PathBuf,
    pub conference_threshold: f64,
    pub global_threshold: f64,
    pub scorer: ScorerKind,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = |key: &str, default: &str| {
            PathBuf::from(lookup(key).unwrap_or_else(|| default.to_string()))
        };

        let config = Self {
            net_path: path("RANKINGS_NET_PATH", "net_rankings.json"),
            kenpom_path: path("RANKINGS_KENPOM_PATH", "kenpom_ratings.json"),
            alias_path: path("RANKINGS_ALIAS_PATH", DEFAULT_ALIAS_PATH),
            output_path: path("RANKINGS_OUTPUT_PATH", "ncaa_combined_rankings.json"),
            conference_threshold: parse_or(
                &lookup,
                "RANKINGS_CONFERENCE_THRESHOLD",
                DEFAULT_CONFERENCE_THRESHOLD,
            )?,
            global_threshold: parse_or(
                &lookup,
                "RANKINGS_GLOBAL_THRESHOLD",
                DEFAULT_GLOBAL_THRESHOLD,
            )?,
            scorer: parse_or(&lookup, "RANKINGS_SCORER", ScorerKind::default())?,
        };

        config
            .matcher_config()
            .validate()
            .context("Invalid matcher thresholds")?;
        Ok(config)
    }

    pub fn matcher_config(&self) -> MatcherConfig {
        MatcherConfig::default()
            .with_thresholds(self.conference_threshold, self.global_threshold)
            .with_scorer(self.scorer)
    }
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow!("{} has an invalid value {:?}: {}", key, raw, e)),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.net_path, PathBuf::from("net_rankings.json"));
        assert_eq!(config.alias_path, PathBuf::from("data/aliases.json"));
        assert_eq!(config.matcher_config(), MatcherConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("RANKINGS_OUTPUT_PATH", "/tmp/out.json"),
            ("RANKINGS_CONFERENCE_THRESHOLD", "0.55"),
            ("RANKINGS_SCORER", "jaro_winkler"),
        ])
        .unwrap();
        assert_eq!(config.output_path, PathBuf::from("/tmp/out.json"));
        assert_eq!(config.conference_threshold, 0.55);
        assert_eq!(config.global_threshold, 0.70);
        assert_eq!(config.scorer, ScorerKind::JaroWinkler);
    }

    #[test]
    fn test_bad_values_are_errors() {
        let err = config_from(&[("RANKINGS_GLOBAL_THRESHOLD", "high")]).unwrap_err();
        assert!(err.to_string().contains("RANKINGS_GLOBAL_THRESHOLD"));

        assert!(config_from(&[("RANKINGS_GLOBAL_THRESHOLD", "1.5")]).is_err());
        assert!(config_from(&[("RANKINGS_SCORER", "levenshtein")]).is_err());
    }
}
