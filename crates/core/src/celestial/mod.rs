//! Celestial layer: bodies, sightline discovery, and radiation routing

pub mod body;
pub mod universe;

pub use body::{BodyId, BodyKind, BodyState, CelestialBody, PlanetSurface, Sun, DEFAULT_SUN_OUTPUT};
pub use universe::{RadiationPolicy, Universe, VisibilityTable};
