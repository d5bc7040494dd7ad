mod config;
mod output;

use crate::config::Config;
use crate::output::CombinedReport;
use anyhow::{Context, Result};
use dotenv::dotenv;
use rankings_rust_core::{
    combine, load_records_from_path, unmatched_lines, AliasTable, KenPomTeam, MatchSummary,
    NetTeam, TeamMatcher,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    info!("Starting Rankings Combiner...");

    let config = Config::from_env()?;

    let aliases = AliasTable::load(&config.alias_path)
        .with_context(|| format!("Failed to load aliases from {}", config.alias_path.display()))?;
    info!(
        "Alias table {} ({} names, {} conferences)",
        aliases.version(),
        aliases.len(),
        aliases.conference_count()
    );

    let net: Vec<NetTeam> =
        load_records_from_path(&config.net_path).context("Failed to load NET rankings")?;
    let kenpom: Vec<KenPomTeam> =
        load_records_from_path(&config.kenpom_path).context("Failed to load KenPom ratings")?;

    let matcher = TeamMatcher::new(&aliases, config.matcher_config())?;
    let outcome = matcher.match_teams(net, kenpom)?;
    let summary = MatchSummary::from_outcome(&outcome);

    for (method, count) in &summary.by_method {
        info!("  {}: {}", method, count);
    }
    if !outcome.unmatched_left.is_empty() {
        warn!("Unmatched NET teams ({}):", outcome.unmatched_left.len());
        for line in unmatched_lines(&outcome.unmatched_left) {
            warn!("{}", line);
        }
    }
    if !outcome.unmatched_right.is_empty() {
        warn!("Unmatched KenPom teams ({}):", outcome.unmatched_right.len());
        for line in unmatched_lines(&outcome.unmatched_right) {
            warn!("{}", line);
        }
    }

    let rows = combine(&outcome);
    let report = CombinedReport::new(aliases.version(), summary, rows);
    report.write_to(&config.output_path)?;

    info!(
        "Wrote {} combined rows to {}",
        report.rows.len(),
        config.output_path.display()
    );
    Ok(())
}
