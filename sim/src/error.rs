//! Error types for the simulation core.

use thiserror::Error;

/// Errors raised by grid, engine and store operations.
///
/// None of these are fatal: the engine keeps its prior state whenever one is
/// returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LifeError {
    /// A grid was requested with a zero width or height.
    #[error("invalid grid dimension {width}x{height}: both sides must be positive")]
    InvalidDimension { width: usize, height: usize },
    /// A coordinate fell outside the current grid.
    #[error("cell ({column}, {row}) is outside the grid")]
    OutOfRange { column: usize, row: usize },
    /// A configuration value was rejected by `LifeConfig::validate`.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
    /// The persistence backend failed to write or remove a key.
    #[error("store error: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, LifeError>;
