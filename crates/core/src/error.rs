//! Error types for simulation construction and topology operations

use crate::celestial::BodyId;
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, SimError>;

/// Errors raised by simulation construction and topology operations.
///
/// Numerical stepping itself is infallible once a simulation is built;
/// every variant here stems from invalid inputs or broken invariants
/// detected at mutation time.
#[derive(Debug, Error)]
pub enum SimError {
    /// Component mass must be strictly positive or temperature is undefined
    #[error("invalid mass {0} kg: must be strictly positive")]
    InvalidMass(f64),

    /// Component volume must be strictly positive
    #[error("invalid volume {0} m³: must be strictly positive")]
    InvalidVolume(f64),

    /// Grid position outside the declared shape
    #[error("position ({x}, {y}, {z}) out of bounds for grid {nx}x{ny}x{nz}")]
    IndexOutOfBounds {
        x: usize,
        y: usize,
        z: usize,
        nx: usize,
        ny: usize,
        nz: usize,
    },

    /// A component cannot neighbor itself
    #[error("component {0} cannot be its own neighbor")]
    SelfNeighbor(usize),

    /// Each unordered neighbor pair may be linked at most once
    #[error("components {0} and {1} are already neighbors")]
    DuplicateNeighbor(usize, usize),

    /// No body registered under this id
    #[error("unknown body id {0:?}")]
    UnknownBody(BodyId),

    /// A body cannot discover itself
    #[error("body {0:?} cannot discover itself")]
    SelfDiscovery(BodyId),

    /// A pair appears in both the in-sight and out-of-sight caches
    #[error("bodies {0:?} and {1:?} are cached as both visible and not visible")]
    InconsistentVisibility(BodyId, BodyId),

    /// Empty grids are not constructible
    #[error("grid shape {nx}x{ny}x{nz} has no cells")]
    EmptyGrid { nx: usize, ny: usize, nz: usize },
}
