//! `bl-core` — foundational types for the `buffet_line` queueing simulation.
//!
//! This crate is a dependency of every other `bl-*` crate.  It intentionally
//! has no `bl-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `GoalId`, `ItemId`                         |
//! | [`geo`]         | `Point`, `GridCell`, `GridGeometry`                   |
//! | [`time`]        | `Tick`, `SimClock`                                    |
//! | [`rng`]         | `SimRng`, `derive_seed`                               |
//! | [`discipline`]  | `QueueDiscipline` (navigation policy)                 |
//! | [`config`]      | `BuffetConfig`                                        |
//! | [`error`]       | `BlError`, `BlResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod discipline;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::BuffetConfig;
pub use discipline::{Direction, QueueDiscipline};
pub use error::{BlError, BlResult};
pub use geo::{GridCell, GridGeometry, Point};
pub use ids::{AgentId, GoalId, ItemId};
pub use rng::{SimRng, derive_seed};
pub use time::{SimClock, Tick};
