//! `bl-sim` — tick loop scheduler for the buffet_line simulation.
//!
//! # Tick loop
//!
//! ```text
//! every tick:
//!   ① Arrival  — with probability arrival_rate / g, spawn one agent at the
//!                leftmost-topmost free cell with a freshly sampled goal set.
//!   ② Advance  — for each active agent, in current list order:
//!                  serve one unit if inside the current goal's capture zone,
//!                  build the occupancy grid of every *other* agent,
//!                  plan from the goal back to the agent, take one step.
//!   ③ Retire   — agents with no goals left get `finished_at` stamped.
//!   ④ Shuffle  — randomise the order of the remaining agents.
//!   ⑤ Advance the clock by 1 / g.
//! ```
//!
//! Agents move sequentially within ②: each sees the already-moved positions
//! of agents earlier in the list and the not-yet-moved positions of later
//! ones.  The shuffle in ④ keeps that ordering from biasing any one agent.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use bl_core::BuffetConfig;
//! use bl_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(BuffetConfig::default()).build()?;
//! sim.run(&mut NoopObserver);
//! let trace = sim.trace();
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
pub use snapshot::{AgentView, Snapshot, TickSummary, TraceRecord};
