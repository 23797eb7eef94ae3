//! Fork-acquisition policy: asymmetric ordering plus same-call back-off.
//!
//! # Why not "left first, then right" for everyone?
//!
//! Under the naive uniform order, simultaneous hunger deadlocks: every agent
//! grabs its left fork, then waits forever for its right, which its neighbor
//! holds.  Two changes break the cycle:
//!
//! 1. **Parity order** — even agents reach for their left fork first, odd
//!    agents for their right.  Any adjacent even/odd pair then contends for
//!    the shared fork *first*, so one of the two loses immediately instead of
//!    both succeeding on their first pick and wedging on their second.
//! 2. **Back-off** — an agent that wins its first fork but loses its second
//!    puts the first straight back and stays hungry.  No agent ever holds
//!    exactly one fork across ticks.
//!
//! Every ring of N ≥ 2 contains at least one even/odd adjacent pair, so
//! simultaneous hunger can never stall the whole table.

use dp_core::{AgentId, ForkId, Ring};
use dp_table::{ForkTable, TableResult};

use crate::state::PhilosopherState;

/// The order in which `agent` reaches for its forks: `(first, second)`.
///
/// Even IDs: left then right.  Odd IDs: right then left.
#[inline]
pub fn pickup_order(agent: AgentId, ring: Ring) -> (ForkId, ForkId) {
    let (left, right) = ring.forks_of(agent);
    if agent.is_even() { (left, right) } else { (right, left) }
}

/// Attempt to take both of `agent`'s forks.
///
/// `Ok(true)`: both forks are now owned by `agent`.
/// `Ok(false)`: neither fork is owned by `agent` — a partial win was rolled
/// back within this call, and the agent retries on a later tick.
///
/// The only error path is the rollback release failing, which cannot happen
/// unless the table itself is corrupted; it is propagated rather than hidden
/// because it would mean the mutual-exclusion invariant is already broken.
pub fn try_pickup(agent: AgentId, ring: Ring, table: &mut ForkTable) -> TableResult<bool> {
    let (first, second) = pickup_order(agent, ring);

    if !table.try_acquire(first, agent) {
        return Ok(false);
    }
    if table.try_acquire(second, agent) {
        return Ok(true);
    }

    // Back off: put the first fork down rather than hold it across ticks.
    table.release(first, agent)?;
    Ok(false)
}

/// `true` if either of `agent`'s ring neighbors is currently eating.
///
/// Used as an optional pre-check before [`try_pickup`]: a neighbor that is
/// eating holds the shared fork anyway, so attempting (and half-acquiring,
/// then backing off) is pure churn.  Fork exclusivity alone already keeps
/// adjacent agents from eating together — skipping this check affects
/// liveness smoothness, never safety.
pub fn neighbor_eating(agent: AgentId, ring: Ring, states: &[PhilosopherState]) -> bool {
    states[ring.left_neighbor(agent).index()].is_eating()
        || states[ring.right_neighbor(agent).index()].is_eating()
}
