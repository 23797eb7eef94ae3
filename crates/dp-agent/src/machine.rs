//! The per-philosopher state machine.
//!
//! One call to [`step`] evaluates one agent's transition for the current
//! tick.  The scheduler has already advanced all state timers for the pass
//! (see [`PhilosopherStore::advance_timers`]), so `step` only compares timers
//! against durations and performs fork operations.

use dp_core::{AgentId, AgentRng, Ring, SimConfig};
use dp_table::{ForkTable, TableResult};

use crate::policy;
use crate::state::PhilosopherState;
use crate::store::PhilosopherStore;

/// A state change performed by [`step`], reported for observers and tests.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Transition {
    /// `Thinking → Hungry`.
    BecameHungry,
    /// `Hungry → Eating` — both forks acquired.
    StartedEating,
    /// `Eating → Thinking` — both forks released.
    FinishedEating,
}

/// Evaluate one agent's transition for this tick.
///
/// Returns the transition taken, or `None` when the agent stays put (timer
/// not yet expired, or a hungry agent that failed to win both forks).
/// Errors are invariant violations from the fork table and abort the tick.
pub fn step(
    agent:  AgentId,
    ring:   Ring,
    store:  &mut PhilosopherStore,
    rng:    &mut AgentRng,
    table:  &mut ForkTable,
    config: &SimConfig,
) -> TableResult<Option<Transition>> {
    let i = agent.index();

    match store.state[i] {
        PhilosopherState::Thinking => {
            if store.state_timer_ms[i] < store.think_ms[i] {
                return Ok(None);
            }
            store.state[i] = PhilosopherState::Hungry;
            store.state_timer_ms[i] = 0;
            Ok(Some(Transition::BecameHungry))
        }

        PhilosopherState::Hungry => {
            if config.neighbor_guard && policy::neighbor_eating(agent, ring, &store.state) {
                return Ok(None);
            }
            if !policy::try_pickup(agent, ring, table)? {
                // Stays hungry; the timer keeps accumulating wait time.
                return Ok(None);
            }
            store.state[i] = PhilosopherState::Eating;
            store.state_timer_ms[i] = 0;
            store.eat_ms[i] = config.eat_ms.sample(rng);
            Ok(Some(Transition::StartedEating))
        }

        PhilosopherState::Eating => {
            if store.state_timer_ms[i] < store.eat_ms[i] {
                return Ok(None);
            }
            let (left, right) = ring.forks_of(agent);
            table.release(left, agent)?;
            table.release(right, agent)?;
            store.state[i] = PhilosopherState::Thinking;
            store.state_timer_ms[i] = 0;
            store.think_ms[i] = config.think_ms.sample(rng);
            Ok(Some(Transition::FinishedEating))
        }
    }
}
