//! The `Sim` struct and its tick loop.

use dp_agent::{machine, PhilosopherRngs, PhilosopherState, PhilosopherStore, PhilosopherStoreBuilder};
use dp_core::{Ring, SimClock, SimConfig, SimRng};
use dp_table::ForkTable;

use crate::snapshot::{self, ForkSnapshot, PhilosopherSnapshot, Snapshot};
use crate::{SimObserver, SimResult};

/// The simulation context: owns the philosophers, the fork table, the clock,
/// and the run flag.  Create via [`SimBuilder`][crate::SimBuilder].
///
/// # Scheduling model
///
/// One call to [`tick`][Sim::tick] is one complete, indivisible pass:
///
/// 1. every philosopher's state timer advances by the elapsed interval;
/// 2. each philosopher's transition is evaluated exactly once, in ascending
///    identity order.
///
/// The ascending order is part of the observable contract — it decides which
/// of two contending agents wins a contested fork on a given tick, so
/// identical seeds replay identical runs.  `&mut self` enforces the
/// single-logical-writer model: nothing mutates the fork table except the
/// transition evaluation inside a pass.
///
/// A new `Sim` starts paused; call [`start`][Sim::start] before ticking.
pub struct Sim {
    /// Global configuration (agent count, durations, seed, …).
    pub config: SimConfig,

    /// Tracks the current tick and elapsed simulated time.
    pub clock: SimClock,

    /// Seat arithmetic shared by every per-agent operation.
    pub ring: Ring,

    /// SoA state of every philosopher.
    pub philosophers: PhilosopherStore,

    /// Per-agent deterministic RNGs, separated for the split-borrow pattern.
    pub rngs: PhilosopherRngs,

    /// The exclusive fork table.
    pub forks: ForkTable,

    /// Seed stream for reset generations.
    pub(crate) reset_rng: SimRng,

    /// Number of `reset()` calls so far — mixed into each generation's seed.
    pub(crate) generation: u64,

    pub(crate) running: bool,
}

impl Sim {
    // ── Lifecycle commands ────────────────────────────────────────────────

    /// Begin (or resume) ticking.  Idempotent.
    pub fn start(&mut self) {
        self.running = true;
    }

    /// Stop ticking at the current tick boundary.  All entity state —
    /// states, timers, fork ownership — is preserved exactly; `start`
    /// resumes from it.
    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Tear down and reconstruct the whole table: every philosopher back to
    /// `Thinking` with freshly drawn durations, every fork free, clock at
    /// tick 0, loop paused.
    ///
    /// Each reset generation draws its durations from a new seed derived
    /// deterministically from `config.seed`, so a run remains reproducible
    /// across resets without replaying the previous generation's draws.
    pub fn reset(&mut self) {
        self.generation += 1;
        let seed = self.reset_rng.child_seed(self.generation);
        let (philosophers, rngs) = PhilosopherStoreBuilder::new(&self.config)
            .generation_seed(seed)
            .build();
        self.philosophers = philosophers;
        self.rngs = rngs;
        self.forks = ForkTable::new(self.config.agent_count);
        self.clock.rewind();
        self.running = false;
    }

    // ── Ticking ───────────────────────────────────────────────────────────

    /// Advance one tick of `config.tick_interval_ms` simulated milliseconds.
    ///
    /// Returns `Ok(true)` if a pass ran, `Ok(false)` if the loop is paused.
    /// An `Err` is an engine invariant violation; the tick is aborted.
    pub fn tick(&mut self) -> SimResult<bool> {
        self.tick_by(self.config.tick_interval_ms)
    }

    /// Advance one tick with an explicit elapsed interval (callers driven by
    /// a wall clock pass their real frame delta here).
    pub fn tick_by(&mut self, elapsed_ms: u32) -> SimResult<bool> {
        if !self.running {
            return Ok(false);
        }
        self.process_pass(elapsed_ms)?;
        Ok(true)
    }

    /// Drive up to `n` ticks with observer callbacks, stopping early if the
    /// loop is paused.  Convenience for demos and tests.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            if !self.running {
                break;
            }
            observer.on_tick_start(self.clock.current_tick);
            let transitions = self.process_pass(self.config.tick_interval_ms)?;
            observer.on_tick_end(self.clock.current_tick, transitions);
        }
        observer.on_run_end(self.clock.current_tick);
        Ok(())
    }

    /// One complete pass: advance all timers, then evaluate every agent in
    /// ascending identity order.  Returns the number of state transitions.
    fn process_pass(&mut self, elapsed_ms: u32) -> SimResult<usize> {
        self.philosophers.advance_timers(elapsed_ms);

        let mut transitions = 0;
        for agent in self.ring.agent_ids() {
            let rng = self.rngs.get_mut(agent);
            let taken = machine::step(
                agent,
                self.ring,
                &mut self.philosophers,
                rng,
                &mut self.forks,
                &self.config,
            )?;
            if taken.is_some() {
                transitions += 1;
            }
        }

        self.clock.advance();
        Ok(transitions)
    }

    // ── Observation ───────────────────────────────────────────────────────

    /// An owned, read-only copy of the full simulation state.  Callable at
    /// any tick boundary; never mutates anything.
    pub fn snapshot(&self) -> Snapshot {
        let philosophers = self
            .ring
            .agent_ids()
            .map(|id| {
                let i = id.index();
                let state = self.philosophers.state[i];
                let timer = self.philosophers.state_timer_ms[i];
                let phase_progress = match state {
                    PhilosopherState::Thinking => {
                        Some(snapshot::progress(timer, self.philosophers.think_ms[i]))
                    }
                    PhilosopherState::Eating => {
                        Some(snapshot::progress(timer, self.philosophers.eat_ms[i]))
                    }
                    PhilosopherState::Hungry => None,
                };
                PhilosopherSnapshot {
                    id,
                    state,
                    state_timer_ms: timer,
                    think_ms: self.philosophers.think_ms[i],
                    eat_ms: self.philosophers.eat_ms[i],
                    phase_progress,
                }
            })
            .collect();

        let forks = self
            .forks
            .iter()
            .map(|(id, owner)| ForkSnapshot {
                id,
                available: owner.is_none(),
                owner,
            })
            .collect();

        Snapshot {
            tick: self.clock.current_tick,
            philosophers,
            forks,
        }
    }
}
