//! `bl-spatial` — occupancy grids, the goal table, and navigation.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`occupancy`] | `OccupancyGrid` (per-query cost grid), blockage constants  |
//! | [`goals`]     | `Goal`, `GoalKind`, `GoalTable`                            |
//! | [`navigator`] | `Navigator` trait, `NavRequest`, `NavPlan`, `DijkstraNavigator` |
//! | [`error`]     | `SpatialError`, `SpatialResult<T>`                         |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod error;
pub mod goals;
pub mod navigator;
pub mod occupancy;


pub use error::{SpatialError, SpatialResult};
pub use goals::{Goal, GoalKind, GoalTable};
pub use navigator::{DijkstraNavigator, NavOutcome, NavPlan, NavRequest, Navigator};
pub use occupancy::{BLOCKAGE_FACTOR, BLOCKAGE_THRESHOLD, OccupancyGrid};
