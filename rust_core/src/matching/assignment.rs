//! Greedy partial injective assignment from A-records to B-records.
//!
//! Each tier of the cascade reads the assignment to skip claimed B-records;
//! only the matcher loop writes to it. Claim order is A-list order.

use crate::error::{RankingsError, Result};

use super::MatchMethod;

/// One accepted pairing.
#[derive(Debug, Clone, PartialEq)]
pub struct Claim {
    pub a_index: usize,
    pub b_index: usize,
    pub method: MatchMethod,
}

/// Claims made so far in one matcher run.
#[derive(Debug, Clone)]
pub struct Assignment {
    /// b_index -> a_index of the claimant
    owners: Vec<Option<usize>>,
    claims: Vec<Claim>,
}

impl Assignment {
    /// Empty assignment over `b_len` B-records.
    pub fn new(b_len: usize) -> Self {
        Self {
            owners: vec![None; b_len],
            claims: Vec::new(),
        }
    }

    pub fn is_claimed(&self, b_index: usize) -> bool {
        self.owners.get(b_index).is_some_and(|o| o.is_some())
    }

    /// A-record that claimed `b_index`, if any.
    pub fn owner_of(&self, b_index: usize) -> Option<usize> {
        self.owners.get(b_index).copied().flatten()
    }

    /// Record `a_index -> b_index`. Fails if `b_index` is already taken.
    pub fn claim(&mut self, a_index: usize, b_index: usize, method: MatchMethod) -> Result<()> {
        let b_len = self.owners.len();
        let slot = self
            .owners
            .get_mut(b_index)
            .ok_or_else(|| RankingsError::InvalidClaim {
                a_index,
                b_index,
                reason: format!("out of range for {} records", b_len),
            })?;

        if let Some(owner) = *slot {
            return Err(RankingsError::InvalidClaim {
                a_index,
                b_index,
                reason: format!("already claimed by #{}", owner),
            });
        }

        *slot = Some(a_index);
        self.claims.push(Claim {
            a_index,
            b_index,
            method,
        });
        Ok(())
    }

    /// First unclaimed index in `candidates`, preserving their order.
    pub fn first_unclaimed(&self, candidates: &[usize]) -> Option<usize> {
        candidates.iter().copied().find(|&b| !self.is_claimed(b))
    }

    /// Unclaimed B indices in ascending order.
    pub fn unclaimed(&self) -> impl Iterator<Item = usize> + '_ {
        self.owners
            .iter()
            .enumerate()
            .filter(|(_, owner)| owner.is_none())
            .map(|(b, _)| b)
    }

    /// Claims in the order they were made.
    pub fn claims(&self) -> &[Claim] {
        &self.claims
    }

    pub fn len(&self) -> usize {
        self.claims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }
}
