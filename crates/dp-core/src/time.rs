//! Simulation time model and configuration.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter.  One tick represents
//! `tick_interval_ms` milliseconds of simulated time; each tick the scheduler
//! adds that interval to every philosopher's state timer and evaluates
//! transitions once.  Using an integer tick as the canonical unit keeps all
//! timer arithmetic exact and comparisons O(1).
//!
//! The default interval is 1,000 ms, the cadence the classic table runs at;
//! phase durations are drawn in milliseconds from the configured
//! [`DurationRange`]s, so any interval works.

use std::fmt;

use crate::error::{CoreError, CoreResult};
use crate::rng::AgentRng;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Ticks elapsed from `earlier` to `self`.
    ///
    /// # Panics
    /// Panics in debug mode if `earlier > self`.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0 - earlier.0
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Tracks the current tick and maps it to elapsed simulated milliseconds.
///
/// Cheap to copy; holds no heap data.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// How many simulated milliseconds one tick represents.  Default: 1000.
    pub tick_interval_ms: u32,
    /// The current tick — advanced by `SimClock::advance()` each pass.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(tick_interval_ms: u32) -> Self {
        Self { tick_interval_ms, current_tick: Tick::ZERO }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Rewind to tick 0 (full simulation reset).
    #[inline]
    pub fn rewind(&mut self) {
        self.current_tick = Tick::ZERO;
    }

    /// Elapsed simulated milliseconds since tick 0.
    #[inline]
    pub fn elapsed_ms(&self) -> u64 {
        self.current_tick.0 * self.tick_interval_ms as u64
    }

    /// How many ticks span `ms` milliseconds? (rounds up — a phase never ends
    /// early)
    #[inline]
    pub fn ticks_for_ms(&self, ms: u64) -> u64 {
        ms.div_ceil(self.tick_interval_ms as u64)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.1} s)", self.current_tick, self.elapsed_ms() as f64 / 1_000.0)
    }
}

// ── DurationRange ─────────────────────────────────────────────────────────────

/// An inclusive range of phase durations in milliseconds.
///
/// Each time a philosopher enters a thinking or eating phase, a fresh duration
/// is drawn uniformly from the corresponding range.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DurationRange {
    pub min_ms: u32,
    pub max_ms: u32,
}

impl DurationRange {
    pub const fn new(min_ms: u32, max_ms: u32) -> Self {
        Self { min_ms, max_ms }
    }

    /// A degenerate range that always yields `ms`.
    pub const fn fixed(ms: u32) -> Self {
        Self { min_ms: ms, max_ms: ms }
    }

    /// `true` if the range is not inverted.  Zero is a legal duration: the
    /// phase then lasts until the agent's next evaluation.
    pub fn is_valid(&self) -> bool {
        self.min_ms <= self.max_ms
    }

    /// Draw a duration uniformly from the range.
    #[inline]
    pub fn sample(&self, rng: &mut AgentRng) -> u32 {
        rng.gen_range(self.min_ms..=self.max_ms)
    }
}

impl fmt::Display for DurationRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}–{} ms", self.min_ms, self.max_ms)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration, supplied at construction.
///
/// The defaults reproduce the classic table: five philosophers, one-second
/// scheduling interval, thinking 2–5 s, eating 1–3 s.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Number of philosophers (= number of forks).  Must be ≥ 2.
    pub agent_count: usize,

    /// Simulated milliseconds per scheduler tick.  Must be > 0.
    pub tick_interval_ms: u32,

    /// Range the per-cycle thinking duration is drawn from.
    pub think_ms: DurationRange,

    /// Range the per-cycle eating duration is drawn from.
    pub eat_ms: DurationRange,

    /// Master RNG seed.  The same seed always produces identical runs.
    pub seed: u64,

    /// Skip a hungry agent's pickup attempt while either neighbor is eating.
    ///
    /// Purely a churn-reduction heuristic: fork exclusivity alone already
    /// forbids adjacent agents eating together.  On by default.
    pub neighbor_guard: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            agent_count:      5,
            tick_interval_ms: 1_000,
            think_ms:         DurationRange::new(2_000, 5_000),
            eat_ms:           DurationRange::new(1_000, 3_000),
            seed:             0,
            neighbor_guard:   true,
        }
    }
}

impl SimConfig {
    /// Reject malformed configurations before any ticking begins.
    pub fn validate(&self) -> CoreResult<()> {
        if self.agent_count < 2 {
            return Err(CoreError::Config(format!(
                "agent_count must be at least 2, got {}",
                self.agent_count
            )));
        }
        if self.tick_interval_ms == 0 {
            return Err(CoreError::Config("tick_interval_ms must be > 0".into()));
        }
        if !self.think_ms.is_valid() {
            return Err(CoreError::Config(format!(
                "thinking range {} is invalid",
                self.think_ms
            )));
        }
        if !self.eat_ms.is_valid() {
            return Err(CoreError::Config(format!(
                "eating range {} is invalid",
                self.eat_ms
            )));
        }
        Ok(())
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.tick_interval_ms)
    }
}
