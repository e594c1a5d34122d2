//! Simulation observer trait for progress reporting and data collection.

use nd_agent::DwarfStore;
use nd_behavior::BehaviorTree;
use nd_core::Tick;

use crate::TickStats;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, tick: Tick, stats: &TickStats) {
///         if tick.0 % self.interval == 0 {
///             println!("{tick}: {} dwarves stepped", stats.behavior.stepped);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at the end of each tick with what happened during it.
    fn on_tick_end(&mut self, _tick: Tick, _stats: &TickStats) {}

    /// Called every `config.output_interval_ticks` ticks with read-only
    /// access to the dwarves and their interpreter state.
    fn on_snapshot(&mut self, _tick: Tick, _dwarves: &DwarfStore, _behavior: &BehaviorTree) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
