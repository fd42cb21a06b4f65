//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `BlError` as one variant
//! via `From`, so configuration failures propagate with `?`.

use thiserror::Error;

/// The top-level error type for `bl-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum BlError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("unknown queue discipline {0:?}")]
    UnknownDiscipline(String),
}

/// Shorthand result type for all `bl-*` crates.
pub type BlResult<T> = Result<T, BlError>;
