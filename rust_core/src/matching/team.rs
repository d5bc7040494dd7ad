//! Team Matcher
//!
//! Tier cascade per left (NET) team, first non-conflicting candidate wins:
//! 1. curated alias equals a right name
//! 2. raw name equals a right name
//! 3. normalized names equal
//! 4. best fuzzy candidate in the mapped conference, score > conference threshold
//! 5. best fuzzy candidate overall, score > global threshold
//!
//! Deterministic tiers skip claimed right records and fall through when every
//! candidate is taken.

use rustc_hash::FxHashMap;
use tracing::{debug, info, warn};

use super::assignment::Assignment;
use super::normalize::normalize_name;
use super::similarity::SimilarityScorer;
use super::{MatchMethod, MatchOutcome, MatchedPair, MatcherConfig};
use crate::alias_table::AliasTable;
use crate::error::{RankingsError, Result};
use crate::types::RankedTeam;

/// Lookups over the right-hand list. Every bucket holds indices in input order.
struct CandidateIndex<'r> {
    by_name: FxHashMap<&'r str, Vec<usize>>,
    by_normalized: FxHashMap<String, Vec<usize>>,
    by_conference: FxHashMap<&'r str, Vec<usize>>,
}

impl<'r> CandidateIndex<'r> {
    fn build<R: RankedTeam>(right: &'r [R]) -> Self {
        let mut by_name: FxHashMap<&'r str, Vec<usize>> = FxHashMap::default();
        let mut by_normalized: FxHashMap<String, Vec<usize>> = FxHashMap::default();
        let mut by_conference: FxHashMap<&'r str, Vec<usize>> = FxHashMap::default();

        for (idx, team) in right.iter().enumerate() {
            by_name.entry(team.name()).or_default().push(idx);
            by_normalized
                .entry(normalize_name(team.name()))
                .or_default()
                .push(idx);
            by_conference.entry(team.conference()).or_default().push(idx);
        }

        Self {
            by_name,
            by_normalized,
            by_conference,
        }
    }
}

/// Matches NET teams to KenPom teams.
pub struct TeamMatcher<'t> {
    aliases: &'t AliasTable,
    config: MatcherConfig,
    scorer: Box<dyn SimilarityScorer>,
}

impl<'t> TeamMatcher<'t> {
    /// Matcher using the scorer named in `config`.
    pub fn new(aliases: &'t AliasTable, config: MatcherConfig) -> Result<Self> {
        Self::with_scorer(aliases, config, config.scorer.scorer())
    }

    /// Matcher with a caller-supplied scorer; `config.scorer` is ignored.
    pub fn with_scorer(
        aliases: &'t AliasTable,
        config: MatcherConfig,
        scorer: Box<dyn SimilarityScorer>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            aliases,
            config,
            scorer,
        })
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Match every left record, consuming both lists.
    pub fn match_teams<L, R>(&self, left: Vec<L>, right: Vec<R>) -> Result<MatchOutcome<L, R>>
    where
        L: RankedTeam,
        R: RankedTeam,
    {
        let assignment = self.assign(&left, &right)?;

        let mut claimed_by_left: Vec<Option<(usize, MatchMethod)>> = vec![None; left.len()];
        for claim in assignment.claims() {
            claimed_by_left[claim.a_index] = Some((claim.b_index, claim.method));
        }

        let mut right_slots: Vec<Option<R>> = right.into_iter().map(Some).collect();
        let mut matched = Vec::with_capacity(assignment.len());
        let mut unmatched_left = Vec::new();

        for (a_index, team) in left.into_iter().enumerate() {
            match claimed_by_left[a_index] {
                Some((b_index, method)) => {
                    let partner = right_slots
                        .get_mut(b_index)
                        .and_then(Option::take)
                        .ok_or_else(|| RankingsError::InvalidClaim {
                            a_index,
                            b_index,
                            reason: "right record already consumed".to_string(),
                        })?;
                    matched.push(MatchedPair {
                        left: team,
                        right: partner,
                        method,
                    });
                }
                None => unmatched_left.push(team),
            }
        }

        let unmatched_right: Vec<R> = right_slots.into_iter().flatten().collect();

        info!(
            "Matched {} teams ({} unmatched {}, {} unmatched {})",
            matched.len(),
            unmatched_left.len(),
            L::SOURCE,
            unmatched_right.len(),
            R::SOURCE
        );

        Ok(MatchOutcome {
            matched,
            unmatched_left,
            unmatched_right,
        })
    }

    /// Build the index-level assignment without moving any records.
    ///
    /// Fails fast on the first malformed record in either list.
    pub fn assign<L, R>(&self, left: &[L], right: &[R]) -> Result<Assignment>
    where
        L: RankedTeam,
        R: RankedTeam,
    {
        for (idx, team) in left.iter().enumerate() {
            team.validate(idx)?;
        }
        for (idx, team) in right.iter().enumerate() {
            team.validate(idx)?;
        }

        debug!(
            "Matching {} {} teams against {} {} teams (scorer: {})",
            left.len(),
            L::SOURCE,
            right.len(),
            R::SOURCE,
            self.scorer.scorer_name()
        );

        let index = CandidateIndex::build(right);
        let mut assignment = Assignment::new(right.len());

        for (a_index, team) in left.iter().enumerate() {
            match self.resolve(team, right, &index, &assignment) {
                Some((b_index, method)) => {
                    debug!(
                        "{} -> {} via {}",
                        team.name(),
                        right[b_index].name(),
                        method
                    );
                    assignment.claim(a_index, b_index, method)?;
                }
                None => warn!(
                    "No match for {} #{} {} ({})",
                    L::SOURCE,
                    team.rank(),
                    team.name(),
                    team.conference()
                ),
            }
        }

        Ok(assignment)
    }

    /// Run the cascade for one left team against the current assignment.
    fn resolve<L, R>(
        &self,
        team: &L,
        right: &[R],
        index: &CandidateIndex<'_>,
        assignment: &Assignment,
    ) -> Option<(usize, MatchMethod)>
    where
        L: RankedTeam,
        R: RankedTeam,
    {
        self.alias_tier(team.name(), index, assignment)
            .map(|b| (b, MatchMethod::Alias))
            .or_else(|| exact_tier(team.name(), index, assignment).map(|b| (b, MatchMethod::Exact)))
            .or_else(|| {
                normalized_tier(team.name(), index, assignment)
                    .map(|b| (b, MatchMethod::Normalized))
            })
            .or_else(|| {
                self.conference_tier(team, right, index, assignment)
                    .map(|(b, score)| (b, MatchMethod::Fuzzy { score }))
            })
            .or_else(|| {
                self.global_tier(team.name(), right, assignment)
                    .map(|(b, score)| (b, MatchMethod::GlobalFuzzy { score }))
            })
    }

    fn alias_tier(
        &self,
        name: &str,
        index: &CandidateIndex<'_>,
        assignment: &Assignment,
    ) -> Option<usize> {
        let aliased = self.aliases.lookup_name(name)?;
        let candidates = index.by_name.get(aliased)?;
        assignment.first_unclaimed(candidates)
    }

    fn conference_tier<L, R>(
        &self,
        team: &L,
        right: &[R],
        index: &CandidateIndex<'_>,
        assignment: &Assignment,
    ) -> Option<(usize, f64)>
    where
        L: RankedTeam,
        R: RankedTeam,
    {
        let conference = self.aliases.lookup_conference(team.conference());
        let candidates = index.by_conference.get(conference)?;
        self.best_candidate(
            team.name(),
            candidates.iter().copied(),
            right,
            assignment,
            self.config.conference_threshold,
        )
    }

    fn global_tier<R: RankedTeam>(
        &self,
        name: &str,
        right: &[R],
        assignment: &Assignment,
    ) -> Option<(usize, f64)> {
        self.best_candidate(
            name,
            0..right.len(),
            right,
            assignment,
            self.config.global_threshold,
        )
    }

    /// Highest-scoring unclaimed candidate strictly above `threshold`.
    /// Ties keep the earliest candidate.
    fn best_candidate<R, I>(
        &self,
        name: &str,
        candidates: I,
        right: &[R],
        assignment: &Assignment,
        threshold: f64,
    ) -> Option<(usize, f64)>
    where
        R: RankedTeam,
        I: IntoIterator<Item = usize>,
    {
        let mut best: Option<(usize, f64)> = None;

        for b_index in candidates {
            if assignment.is_claimed(b_index) {
                continue;
            }
            let score = self.scorer.score(name, right[b_index].name());
            let best_score = best.map(|(_, s)| s).unwrap_or(0.0);
            if score > threshold && score > best_score {
                best = Some((b_index, score));
            }
        }

        best
    }
}

fn exact_tier(name: &str, index: &CandidateIndex<'_>, assignment: &Assignment) -> Option<usize> {
    let candidates = index.by_name.get(name)?;
    assignment.first_unclaimed(candidates)
}

fn normalized_tier(
    name: &str,
    index: &CandidateIndex<'_>,
    assignment: &Assignment,
) -> Option<usize> {
    let candidates = index.by_normalized.get(&normalize_name(name))?;
    assignment.first_unclaimed(candidates)
}
