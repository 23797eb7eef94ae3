//! Simulation observer trait for progress reporting and data collection.

use dp_core::Tick;

/// Callbacks invoked by [`Sim::run_ticks`][crate::Sim::run_ticks] at key
/// points in the tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.  Observers receive counters, not state —
/// state is pulled via [`Sim::snapshot`][crate::Sim::snapshot] between ticks.
///
/// # Example — transition printer
///
/// ```rust,ignore
/// struct TransitionPrinter;
///
/// impl SimObserver for TransitionPrinter {
///     fn on_tick_end(&mut self, tick: Tick, transitions: usize) {
///         if transitions > 0 {
///             println!("{tick}: {transitions} state change(s)");
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before timers advance.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at the end of each tick.
    ///
    /// `transitions` is the number of agents that changed state this tick.
    fn on_tick_end(&mut self, _tick: Tick, _transitions: usize) {}

    /// Called once when `run_ticks` returns, with the tick it stopped at.
    fn on_run_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call
/// `run_ticks` but don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
