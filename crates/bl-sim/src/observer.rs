//! Simulation observer trait for progress reporting and data collection.

use bl_agent::Agent;
use bl_core::Tick;

use crate::{Snapshot, TickSummary, TraceRecord};

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, summary: &TickSummary) {
///         if summary.tick.0 % self.interval == 0 {
///             println!("{}: {} active", summary.tick, summary.active);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called right after a new agent enters the room.
    fn on_agent_spawned(&mut self, _agent: &Agent) {}

    /// Called when an agent completes its last goal and is retired.
    fn on_agent_finished(&mut self, _record: &TraceRecord) {}

    /// Called at the end of each tick, after the clock has advanced.
    fn on_tick_end(&mut self, _summary: &TickSummary) {}

    /// Called at snapshot intervals (every `config.snapshot_interval_ticks`
    /// ticks), after `on_tick_end`.
    fn on_snapshot(&mut self, _snapshot: &Snapshot) {}

    /// Called once after the final tick of [`Sim::run`][crate::Sim::run]
    /// with the complete trace.
    fn on_sim_end(&mut self, _final_tick: Tick, _trace: &[TraceRecord]) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
