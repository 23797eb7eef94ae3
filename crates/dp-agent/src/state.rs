//! The per-philosopher state enum.

use std::fmt;

/// What a philosopher is doing right now.
///
/// The cycle is `Thinking → Hungry → Eating → Thinking → …` with no terminal
/// state.  `Hungry` is the only state an agent can stay in past its timer —
/// it lasts until both forks are won.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PhilosopherState {
    /// The idle phase: no forks held, waiting out the thinking duration.
    Thinking,
    /// Wants to eat; retries fork acquisition every tick.  Holds no forks.
    Hungry,
    /// Holds both assigned forks, waiting out the eating duration.
    Eating,
}

impl PhilosopherState {
    /// `true` iff the agent should be holding both of its forks.
    #[inline]
    pub fn is_eating(self) -> bool {
        matches!(self, PhilosopherState::Eating)
    }

    #[inline]
    pub fn is_hungry(self) -> bool {
        matches!(self, PhilosopherState::Hungry)
    }
}

impl fmt::Display for PhilosopherState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PhilosopherState::Thinking => "thinking",
            PhilosopherState::Hungry   => "hungry",
            PhilosopherState::Eating   => "eating",
        };
        f.write_str(s)
    }
}
