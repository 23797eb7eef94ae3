//! Read-only state snapshots for presentation layers.
//!
//! A [`Snapshot`] is an owned copy of everything a renderer needs: it can be
//! taken between any two ticks, held across ticks, and serialized (with the
//! `serde` feature) without ever touching live simulation state.

use dp_core::{AgentId, ForkId, Tick};
use dp_agent::PhilosopherState;

/// One philosopher's externally visible state.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhilosopherSnapshot {
    pub id: AgentId,
    pub state: PhilosopherState,
    /// Simulated milliseconds in the current state.  For `Hungry` this is the
    /// total wait so far.
    pub state_timer_ms: u32,
    /// Current-cycle thinking duration.
    pub think_ms: u32,
    /// Current-cycle eating duration (zero until the first meal).
    pub eat_ms: u32,
    /// Fraction of the current timed phase that has elapsed, clamped to
    /// `[0, 1]`.  `None` while `Hungry`, which has no target duration —
    /// renderers interpolate with this however they like.
    pub phase_progress: Option<f32>,
}

/// One fork's externally visible state.  `available` is derived from `owner`;
/// the two can never disagree.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ForkSnapshot {
    pub id: ForkId,
    pub available: bool,
    pub owner: Option<AgentId>,
}

/// The full table at one instant, ordered by ID on both axes.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    pub tick: Tick,
    pub philosophers: Vec<PhilosopherSnapshot>,
    pub forks: Vec<ForkSnapshot>,
}

impl Snapshot {
    /// Number of philosophers currently eating.
    pub fn eating_count(&self) -> usize {
        self.philosophers
            .iter()
            .filter(|p| p.state.is_eating())
            .count()
    }
}

/// `timer / duration` clamped to `[0, 1]`; a zero-length phase counts as
/// complete.
pub(crate) fn progress(timer_ms: u32, duration_ms: u32) -> f32 {
    if duration_ms == 0 {
        return 1.0;
    }
    (timer_ms as f32 / duration_ms as f32).min(1.0)
}
