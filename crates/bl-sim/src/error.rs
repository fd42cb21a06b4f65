use bl_core::{BlError, Point};
use bl_spatial::SpatialError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] BlError),

    #[error("goal table: {0}")]
    Goals(#[from] SpatialError),

    #[error("cannot place agent at {position}: {reason}")]
    Placement {
        position: Point,
        reason:   &'static str,
    },
}

pub type SimResult<T> = Result<T, SimError>;
