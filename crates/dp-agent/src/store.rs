//! Philosopher storage: `PhilosopherStore` (SoA data) and `PhilosopherRngs`
//! (per-agent RNG).
//!
//! # Why two structs?
//!
//! Transition evaluation needs `&mut` access to an agent's RNG (duration
//! draws) at the same time as `&mut` access to the SoA arrays and the fork
//! table.  Keeping the RNGs in their own struct lets the scheduler take the
//! three borrows independently instead of fighting the borrow checker over
//! one mega-struct.

use dp_core::{AgentId, AgentRng, DurationRange, SimConfig};

use crate::state::PhilosopherState;

// ── PhilosopherRngs ───────────────────────────────────────────────────────────

/// Per-agent deterministic RNG state, separated from [`PhilosopherStore`] so
/// the scheduler can borrow both mutably at once.
pub struct PhilosopherRngs {
    inner: Vec<AgentRng>,
}

impl PhilosopherRngs {
    /// Allocate and seed `count` per-agent RNGs from `generation_seed`.
    pub(crate) fn new(count: usize, generation_seed: u64) -> Self {
        let inner = (0..count as u32)
            .map(|i| AgentRng::new(generation_seed, AgentId(i)))
            .collect();
        Self { inner }
    }

    /// Mutable reference to one agent's RNG.
    #[inline]
    pub fn get_mut(&mut self, agent: AgentId) -> &mut AgentRng {
        &mut self.inner[agent.index()]
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

// ── PhilosopherStore ──────────────────────────────────────────────────────────

/// Structure-of-Arrays storage for all philosopher state.
///
/// Every `Vec` field has exactly `count` elements; the `AgentId` value is the
/// index into all of them:
///
/// ```ignore
/// let state = store.state[agent.index()];  // O(1), cache-friendly
/// ```
pub struct PhilosopherStore {
    /// Number of philosophers.  Equals the length of every SoA `Vec`.
    pub count: usize,

    /// Current state of each philosopher.
    pub state: Vec<PhilosopherState>,

    /// Simulated milliseconds spent in the current state.  Not reset by
    /// failed pickup attempts — while hungry it measures total wait time.
    pub state_timer_ms: Vec<u32>,

    /// Current-cycle thinking duration.  Re-drawn each time the agent
    /// re-enters `Thinking`.
    pub think_ms: Vec<u32>,

    /// Current-cycle eating duration.  Re-drawn each time the agent enters
    /// `Eating`; zero until the agent has eaten for the first time.
    pub eat_ms: Vec<u32>,
}

impl PhilosopherStore {
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Iterator over all `AgentId`s in ascending index order.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + use<> {
        (0..self.count as u32).map(AgentId)
    }

    /// Add `elapsed_ms` to every philosopher's state timer.
    ///
    /// The scheduler calls this once per tick, before any transition is
    /// evaluated, so all agents observe the same advanced time within a pass.
    pub fn advance_timers(&mut self, elapsed_ms: u32) {
        for t in &mut self.state_timer_ms {
            *t = t.saturating_add(elapsed_ms);
        }
    }

    /// Number of philosophers currently in `state`.
    pub fn count_in(&self, state: PhilosopherState) -> usize {
        self.state.iter().filter(|&&s| s == state).count()
    }
}

// ── PhilosopherStoreBuilder ───────────────────────────────────────────────────

/// Builder for [`PhilosopherStore`] + [`PhilosopherRngs`].
///
/// Draws each agent's initial thinking duration from the configured range so
/// the table starts out desynchronized, exactly as a fresh simulation should.
///
/// ```ignore
/// let (store, rngs) = PhilosopherStoreBuilder::new(&config).build();
/// ```
pub struct PhilosopherStoreBuilder {
    count:           usize,
    think_range:     DurationRange,
    generation_seed: u64,
    start_hungry:    bool,
}

impl PhilosopherStoreBuilder {
    /// A builder for `config.agent_count` philosophers seeded from
    /// `config.seed`.
    pub fn new(config: &SimConfig) -> Self {
        Self {
            count:           config.agent_count,
            think_range:     config.think_ms,
            generation_seed: config.seed,
            start_hungry:    false,
        }
    }

    /// Override the RNG seed.  The scheduler uses this on `reset()` to give
    /// each generation fresh durations while staying reproducible.
    pub fn generation_seed(mut self, seed: u64) -> Self {
        self.generation_seed = seed;
        self
    }

    /// Start every philosopher in `Hungry` with a zeroed timer instead of
    /// `Thinking`.  This is the worst-case contention setup (simultaneous
    /// hunger across the whole ring) used by the progress tests.
    pub fn start_hungry(mut self, yes: bool) -> Self {
        self.start_hungry = yes;
        self
    }

    /// Construct the store and the per-agent RNGs.
    pub fn build(self) -> (PhilosopherStore, PhilosopherRngs) {
        let mut rngs = PhilosopherRngs::new(self.count, self.generation_seed);

        let initial = if self.start_hungry {
            PhilosopherState::Hungry
        } else {
            PhilosopherState::Thinking
        };

        let think_ms = (0..self.count as u32)
            .map(|i| self.think_range.sample(rngs.get_mut(AgentId(i))))
            .collect();

        let store = PhilosopherStore {
            count:          self.count,
            state:          vec![initial; self.count],
            state_timer_ms: vec![0; self.count],
            think_ms,
            eat_ms:         vec![0; self.count],
        };

        (store, rngs)
    }
}
