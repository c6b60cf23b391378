//! Simulation configuration

use crate::celestial::RadiationPolicy;
use crate::clock::DEFAULT_TIME_DELTA;
use crate::core_types::{Joules, Meters, Seconds, Watts};
use crate::grid::{GridShape, SampledInit};
use serde::{Deserialize, Serialize};

/// Everything needed to build a [`crate::ClimateSimulation`].
///
/// The defaults reproduce a 1 AU sun-earth setup: 1.3e17 W output,
/// earth radius 6.371e6 m at 1.496e11 m, water surface cells sampled
/// around 300 K and 300 ppmv.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Fixed integration step
    pub time_delta: Seconds,
    /// Surface grid dimensions
    pub grid_shape: GridShape,
    /// Per-cell sampling parameters
    pub cell_init: SampledInit,
    /// Stellar power output
    pub sun_output: Watts,
    /// Stellar radius
    pub sun_radius: Meters,
    /// Finite stellar energy reserve; `None` never depletes
    pub sun_reserve: Option<Joules>,
    /// Planet radius
    pub earth_radius: Meters,
    /// Sun-earth distance
    pub earth_distance: Meters,
    /// How emitted energy divides among receivers
    pub radiation_policy: RadiationPolicy,
    /// Fraction of surface water evaporating per second. Reserved for a
    /// hydrology step; nothing in the current tick consumes it.
    pub evaporation_rate: f64,
    /// RNG seed for per-cell sampling; always explicit for
    /// reproducibility
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            time_delta: DEFAULT_TIME_DELTA,
            grid_shape: GridShape::new(4, 4, 1),
            cell_init: SampledInit::default(),
            sun_output: Watts::new(1.3e17),
            sun_radius: Meters::new(6.957e8),
            sun_reserve: None,
            earth_radius: Meters::new(6.371e6),
            earth_distance: Meters::new(1.496e11),
            radiation_policy: RadiationPolicy::default(),
            evaporation_rate: 1.0e-4,
            seed: 42,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn defaults_reproduce_the_reference_constants() {
        let config = SimulationConfig::default();
        assert_relative_eq!(*config.time_delta, 0.01);
        assert_relative_eq!(*config.sun_output, 1.3e17);
        assert_relative_eq!(*config.earth_radius, 6.371e6);
        assert_relative_eq!(*config.earth_distance, 1.496e11);
        assert_relative_eq!(config.evaporation_rate, 1.0e-4);
        assert!(config.sun_reserve.is_none());
    }
}
