//! Planetary Climate Simulation Core Library
//!
//! A toy planetary climate model: a planet surface made of cubic volume
//! elements exchanging heat and CO₂ by conservative diffusion, plus a
//! celestial layer where stars radiate energy across line-of-sight
//! links weighted by solid angle.
//!
//! ## Model outline
//!
//! - Energy is the canonical thermal state; temperature is derived
//! - Grid ticks are two-phase Jacobi updates with per-edge antisymmetric
//!   fluxes, so total energy is conserved by construction
//! - Visibility between bodies is a rule over body kinds, discovered
//!   lazily and cached symmetrically
//! - A fixed-step clock drives the whole system deterministically

// Core types and utilities
pub mod core_types;

// Planet surface grid
pub mod grid;

// Celestial bodies and radiation routing
pub mod celestial;

// Supporting modules
pub mod clock;
pub mod config;
pub mod error;
pub mod material;
pub mod simulation;

// Re-export core types
pub use core_types::{
    Celsius, CubicMeters, Joules, JoulesPerKgKelvin, Kelvin, KelvinDelta, Kilograms, Meters, Ppmv,
    Seconds, SquareMeters, Watts, WattsPerSquareMeterKelvin,
};

// Re-export simulation building blocks
pub use celestial::{
    BodyId, BodyKind, BodyState, CelestialBody, PlanetSurface, RadiationPolicy, Sun, Universe,
    VisibilityTable, DEFAULT_SUN_OUTPUT,
};
pub use clock::{SimulationClock, DEFAULT_TIME_DELTA};
pub use config::SimulationConfig;
pub use error::{Result, SimError};
pub use grid::{CellInit, ComponentAggregation, GridComponent, GridShape, SampledInit};
pub use material::Material;
pub use simulation::{ClimateSimulation, SimulationStats};
