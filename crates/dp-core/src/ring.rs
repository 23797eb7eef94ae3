//! Ring seating arithmetic.
//!
//! # Topology
//!
//! `N` philosophers sit around a table with `N` forks between them:
//!
//! ```text
//!   fork i   →  left fork of philosopher i
//!   fork i+1 →  right fork of philosopher i   (mod N)
//! ```
//!
//! The mapping is fixed for the lifetime of a simulation — forks are never
//! reassigned at runtime.  `Ring` is a plain value (one `u32`), so it can be
//! copied freely into any component that needs seat arithmetic.
//!
//! With `N = 2` both agents share *both* forks (fork 0 and fork 1), which is
//! the degenerate-but-legal minimum table size.

use crate::{AgentId, ForkId};

/// Seat arithmetic for a table of `len` philosophers and `len` forks.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ring {
    len: u32,
}

impl Ring {
    /// A ring of `len` seats.  `len` must be at least 2 (validated upstream
    /// by `SimConfig::validate`; debug-asserted here).
    pub fn new(len: usize) -> Self {
        debug_assert!(len >= 2, "a ring needs at least 2 seats");
        Self { len: len as u32 }
    }

    /// Number of seats (= number of forks).
    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// All agent IDs in ascending order — the scheduler's evaluation order.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + use<> {
        (0..self.len).map(AgentId)
    }

    /// All fork IDs in ascending order.
    pub fn fork_ids(&self) -> impl Iterator<Item = ForkId> + use<> {
        (0..self.len).map(ForkId)
    }

    // ── Fork assignment ───────────────────────────────────────────────────

    /// The fork to the agent's left: fork `i`.
    #[inline]
    pub fn left_fork(&self, agent: AgentId) -> ForkId {
        ForkId(agent.0)
    }

    /// The fork to the agent's right: fork `(i + 1) mod N`.
    #[inline]
    pub fn right_fork(&self, agent: AgentId) -> ForkId {
        ForkId((agent.0 + 1) % self.len)
    }

    /// Both forks as `(left, right)`.
    #[inline]
    pub fn forks_of(&self, agent: AgentId) -> (ForkId, ForkId) {
        (self.left_fork(agent), self.right_fork(agent))
    }

    // ── Neighbors ─────────────────────────────────────────────────────────

    /// The agent seated to the left: `(i + N - 1) mod N`.
    #[inline]
    pub fn left_neighbor(&self, agent: AgentId) -> AgentId {
        AgentId((agent.0 + self.len - 1) % self.len)
    }

    /// The agent seated to the right: `(i + 1) mod N`.
    #[inline]
    pub fn right_neighbor(&self, agent: AgentId) -> AgentId {
        AgentId((agent.0 + 1) % self.len)
    }

    /// `true` if `a` and `b` share a fork (distinct seats next to each other).
    /// An agent is not adjacent to itself.
    pub fn are_adjacent(&self, a: AgentId, b: AgentId) -> bool {
        a != b && (self.left_neighbor(a) == b || self.right_neighbor(a) == b)
    }
}
