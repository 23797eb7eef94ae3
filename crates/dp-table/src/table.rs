//! The fork table: one owner slot per fork.
//!
//! # Ownership model
//!
//! Each fork is either free or held by exactly one agent, stored as a single
//! `Option<AgentId>`.  There is no separate "available" flag to keep in sync —
//! availability *is* `owner.is_none()`, so the two can never disagree and
//! double ownership is unrepresentable.
//!
//! All mutation happens inside the scheduler's sequential per-agent pass
//! (single logical writer), so `try_acquire`'s check-then-set is atomic with
//! respect to the tick model without any locking.

use dp_core::{AgentId, ForkId};

use crate::error::{TableError, TableResult};

/// Owner slots for every fork at the table, indexed by `ForkId`.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ForkTable {
    owners: Vec<Option<AgentId>>,
}

impl ForkTable {
    /// A table of `fork_count` forks, all initially free.
    pub fn new(fork_count: usize) -> Self {
        Self { owners: vec![None; fork_count] }
    }

    /// Number of forks.
    #[inline]
    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }

    // ── Reads ─────────────────────────────────────────────────────────────

    /// `true` if nobody currently holds `fork`.
    #[inline]
    pub fn is_available(&self, fork: ForkId) -> bool {
        self.owners[fork.index()].is_none()
    }

    /// The current holder of `fork`, if any.
    #[inline]
    pub fn owner(&self, fork: ForkId) -> Option<AgentId> {
        self.owners[fork.index()]
    }

    /// `true` if `agent` currently holds `fork`.
    #[inline]
    pub fn owns(&self, fork: ForkId, agent: AgentId) -> bool {
        self.owners[fork.index()] == Some(agent)
    }

    /// Iterate `(fork, owner)` in ascending fork order — snapshot support.
    pub fn iter(&self) -> impl Iterator<Item = (ForkId, Option<AgentId>)> + '_ {
        self.owners
            .iter()
            .enumerate()
            .map(|(i, &owner)| (ForkId(i as u32), owner))
    }

    // ── Writes ────────────────────────────────────────────────────────────

    /// Take `fork` for `agent` if it is free.
    ///
    /// Returns `true` and records ownership only when the fork was available;
    /// otherwise returns `false` and changes nothing.  A `false` here is the
    /// expected contention outcome, not an error.
    pub fn try_acquire(&mut self, fork: ForkId, agent: AgentId) -> bool {
        let slot = &mut self.owners[fork.index()];
        if slot.is_some() {
            return false;
        }
        *slot = Some(agent);
        true
    }

    /// Put `fork` down on behalf of `agent`.
    ///
    /// Releasing a fork the agent does not hold breaks the mutual-exclusion
    /// contract and signals a defect in the caller — it is reported loudly
    /// rather than ignored.
    pub fn release(&mut self, fork: ForkId, agent: AgentId) -> TableResult<()> {
        let slot = &mut self.owners[fork.index()];
        if *slot != Some(agent) {
            return Err(TableError::ReleaseByNonOwner {
                fork,
                agent,
                owner: *slot,
            });
        }
        *slot = None;
        Ok(())
    }

    /// Free every fork.  Used only when the whole table is torn down and
    /// rebuilt on a simulation reset.
    pub fn release_all(&mut self) {
        self.owners.fill(None);
    }
}
