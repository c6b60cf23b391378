//! Celestial bodies: stars, planet surfaces, and their cached sightlines

use crate::core_types::{Joules, Meters, Seconds, Watts};
use crate::grid::ComponentAggregation;
use nalgebra::Vector3;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Handle to a body registered in a universe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BodyId(pub usize);

/// Coarse classification used by the visibility rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BodyKind {
    Star,
    Planet,
}

/// Default stellar power output, W
pub const DEFAULT_SUN_OUTPUT: Watts = Watts::new(1.3e17);

/// A radiating star.
///
/// Emission per tick is `output * dt * beam_fraction`. A finite reserve
/// clamps emission to what remains and the sun goes dark once drained;
/// the store never goes negative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sun {
    /// Remaining energy; `None` models an effectively infinite star
    reserve: Option<Joules>,
    output: Watts,
    /// Fraction of output actually beamed into the simulated volume
    beam_fraction: f64,
    depletion_logged: bool,
}

impl Sun {
    #[must_use]
    pub fn new(output: Watts, reserve: Option<Joules>) -> Self {
        Self {
            reserve,
            output,
            beam_fraction: 1.0,
            depletion_logged: false,
        }
    }

    /// Power output
    #[must_use]
    pub fn output(&self) -> Watts {
        self.output
    }

    pub fn set_output(&mut self, output: Watts) {
        self.output = output;
    }

    /// Fraction of output beamed outward, in `[0, 1]`
    #[must_use]
    pub fn beam_fraction(&self) -> f64 {
        self.beam_fraction
    }

    pub fn set_beam_fraction(&mut self, fraction: f64) {
        self.beam_fraction = fraction.clamp(0.0, 1.0);
    }

    /// Remaining reserve, if finite
    #[must_use]
    pub fn reserve(&self) -> Option<Joules> {
        self.reserve
    }

    /// Emit one tick's worth of energy, drawing down a finite reserve.
    pub fn radiate(&mut self, dt: Seconds) -> Joules {
        let desired = self.output * dt * self.beam_fraction;
        match &mut self.reserve {
            None => desired,
            Some(remaining) => {
                let emitted = desired.min(*remaining);
                *remaining -= emitted;
                if **remaining == 0.0 && !self.depletion_logged {
                    warn!("sun reserve exhausted, no further radiation");
                    self.depletion_logged = true;
                }
                emitted
            }
        }
    }
}

impl Default for Sun {
    fn default() -> Self {
        Self::new(DEFAULT_SUN_OUTPUT, None)
    }
}

/// Planet-specific state: the surface grid absorbing radiation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanetSurface {
    grid: ComponentAggregation,
}

impl PlanetSurface {
    #[must_use]
    pub fn new(grid: ComponentAggregation) -> Self {
        Self { grid }
    }

    #[must_use]
    pub fn grid(&self) -> &ComponentAggregation {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut ComponentAggregation {
        &mut self.grid
    }

    /// Spread incoming radiation uniformly over the surface cells
    pub fn receive_radiation(&mut self, amount: Joules) {
        self.grid.inject_energy(amount);
    }
}

/// Kind-specific body state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum BodyState {
    Star(Sun),
    Planet(PlanetSurface),
}

/// A body registered in a universe, with cached sightline results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CelestialBody {
    pub id: BodyId,
    pub name: String,
    pub radius: Meters,
    pub position: Vector3<f64>,
    pub state: BodyState,
    /// Bodies this one has a confirmed line of sight to
    pub(crate) in_sight: FxHashSet<BodyId>,
    /// Bodies confirmed out of sight
    pub(crate) out_of_sight: FxHashSet<BodyId>,
}

impl CelestialBody {
    #[must_use]
    pub fn new(
        id: BodyId,
        name: String,
        radius: Meters,
        position: Vector3<f64>,
        state: BodyState,
    ) -> Self {
        Self {
            id,
            name,
            radius,
            position,
            state,
            in_sight: FxHashSet::default(),
            out_of_sight: FxHashSet::default(),
        }
    }

    /// Kind derived from the state variant
    #[must_use]
    pub fn kind(&self) -> BodyKind {
        match self.state {
            BodyState::Star(_) => BodyKind::Star,
            BodyState::Planet(_) => BodyKind::Planet,
        }
    }

    /// Bodies with a confirmed line of sight from this one
    #[must_use]
    pub fn bodies_in_sight(&self) -> &FxHashSet<BodyId> {
        &self.in_sight
    }

    /// Deliver radiated energy to this body. Stars absorb nothing.
    pub fn receive_radiation(&mut self, amount: Joules) {
        match &mut self.state {
            BodyState::Planet(surface) => surface.receive_radiation(amount),
            BodyState::Star(_) => {
                debug!(body = %self.name, %amount, "star ignores incoming radiation");
            }
        }
    }
}
