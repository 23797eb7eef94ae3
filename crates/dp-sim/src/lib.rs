//! `dp-sim` — tick loop orchestrator for the rust_dp engine.
//!
//! # The tick pass
//!
//! ```text
//! tick():
//!   ① Timers   — add the elapsed interval to every philosopher's state timer.
//!   ② Evaluate — for each agent in ascending identity order:
//!                  Thinking, timer ≥ think_ms → Hungry
//!                  Hungry, wins both forks    → Eating (fresh eat_ms)
//!                  Hungry, otherwise          → retry next tick
//!                  Eating, timer ≥ eat_ms     → Thinking (fresh think_ms,
//!                                               both forks released)
//! ```
//!
//! A pass is indivisible and strictly sequential, so the fork table sees one
//! writer at a time and identical seeds replay identical runs.  Lifecycle is
//! controlled with `start` / `pause` / `reset`; `snapshot()` hands a
//! presentation layer an owned copy of everything at any tick boundary.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use dp_core::SimConfig;
//! use dp_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(SimConfig::default()).build()?;
//! sim.start();
//! sim.run_ticks(60, &mut NoopObserver)?;
//! println!("{} eating", sim.snapshot().eating_count());
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;
pub mod snapshot;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::Sim;
pub use snapshot::{ForkSnapshot, PhilosopherSnapshot, Snapshot};
