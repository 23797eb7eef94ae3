//! Builder for constructing a [`Sim`].

use dp_agent::PhilosopherStoreBuilder;
use dp_core::{Ring, SimConfig, SimRng};
use dp_table::ForkTable;

use crate::{Sim, SimResult};

/// Validates a [`SimConfig`] and assembles a ready-to-run [`Sim`].
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(SimConfig::default()).build()?;
/// sim.start();
/// sim.run_ticks(60, &mut NoopObserver)?;
/// ```
pub struct SimBuilder {
    config:       SimConfig,
    start_hungry: bool,
}

impl SimBuilder {
    pub fn new(config: SimConfig) -> Self {
        Self { config, start_hungry: false }
    }

    /// Start every philosopher `Hungry` with a zeroed timer instead of
    /// `Thinking` — the worst-case simultaneous-contention setup used by the
    /// progress tests.
    pub fn start_hungry(mut self, yes: bool) -> Self {
        self.start_hungry = yes;
        self
    }

    /// Validate the configuration and build the simulation context.
    ///
    /// Rejects malformed configurations (`agent_count < 2`, zero tick
    /// interval, inverted duration ranges) before any ticking begins.
    /// The returned `Sim` is paused.
    pub fn build(self) -> SimResult<Sim> {
        self.config.validate()?;

        let ring = Ring::new(self.config.agent_count);
        let (philosophers, rngs) = PhilosopherStoreBuilder::new(&self.config)
            .start_hungry(self.start_hungry)
            .build();
        let forks = ForkTable::new(self.config.agent_count);

        Ok(Sim {
            clock:      self.config.make_clock(),
            reset_rng:  SimRng::new(self.config.seed),
            generation: 0,
            running:    false,
            config:     self.config,
            ring,
            philosophers,
            rngs,
            forks,
        })
    }
}
