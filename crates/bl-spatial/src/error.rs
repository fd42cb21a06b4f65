//! Spatial-subsystem error type.

use thiserror::Error;

/// Errors produced by `bl-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("expected {expected} station items, got {got}")]
    ItemCount { expected: usize, got: usize },

    #[error("goal table needs at least one station")]
    NoStations,
}

pub type SpatialResult<T> = Result<T, SpatialError>;
