//! `bl-agent` — per-agent state for the `buffet_line` simulation.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`agent`]   | `Agent`, `GoalQueue`, `Service`                           |
//! | [`sampler`] | `GoalSampler` (bounded goal-set sampling for arrivals)    |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `serde`    | Derives `Serialize`/`Deserialize` on all public types. |

pub mod agent;
pub mod sampler;


pub use agent::{Agent, GoalQueue, Service};
pub use sampler::{GoalSampler, MAX_SAMPLE_ATTEMPTS};
