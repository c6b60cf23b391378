//! A single volume element of the planet surface grid
//!
//! Energy is the canonical thermal state; temperature is always derived
//! as `E / (c * m)`. Storing energy instead of temperature makes the
//! conservation argument for the diffusion step trivial: fluxes move
//! joules between stores and the total is untouched by rounding in the
//! derived temperature.

use crate::core_types::{CubicMeters, Joules, Kelvin, Kilograms, Ppmv, SquareMeters};
use crate::error::{Result, SimError};
use crate::material::Material;
use serde::{Deserialize, Serialize};

/// One cubic volume element in the surface grid.
///
/// Components live in an arena owned by the aggregation; `neighbors`
/// holds arena indices, never references.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridComponent {
    /// Arena index of this component
    pub index: usize,
    /// Bulk material (heat capacity and transport coefficients)
    pub material: Material,
    mass: Kilograms,
    volume: CubicMeters,
    /// Contact area per neighbor, derived from volume at construction
    surface: SquareMeters,
    /// Thermal energy store, the canonical state
    energy: Joules,
    co2_ppmv: Ppmv,
    neighbors: Vec<usize>,
}

impl GridComponent {
    /// Create a component at the given arena index.
    ///
    /// # Errors
    /// `InvalidMass` / `InvalidVolume` when either is not strictly
    /// positive; temperature would be undefined.
    pub fn new(
        index: usize,
        material: Material,
        mass: Kilograms,
        volume: CubicMeters,
        temperature: Kelvin,
        co2_ppmv: Ppmv,
    ) -> Result<Self> {
        if *mass <= 0.0 {
            return Err(SimError::InvalidMass(*mass));
        }
        if *volume <= 0.0 {
            return Err(SimError::InvalidVolume(*volume));
        }
        let mut component = Self {
            index,
            surface: volume.cube_face_area(),
            material,
            mass,
            volume,
            energy: Joules::default(),
            co2_ppmv,
            neighbors: Vec::new(),
        };
        component.set_temperature(temperature);
        Ok(component)
    }

    /// Current temperature, derived from the energy store
    #[must_use]
    pub fn temperature(&self) -> Kelvin {
        let t = *self.energy / (*self.material.specific_heat_capacity * *self.mass);
        // Energy, shc and mass are all non-negative, so t is too
        unsafe { Kelvin::new_unchecked(t) }
    }

    /// Assign a temperature by re-deriving the energy store
    pub fn set_temperature(&mut self, temperature: Kelvin) {
        self.energy =
            Joules::new(*self.material.specific_heat_capacity * *self.mass * *temperature);
    }

    /// Mass of the element
    #[must_use]
    pub fn mass(&self) -> Kilograms {
        self.mass
    }

    /// Change mass while keeping the energy store. The derived
    /// temperature shifts inversely with the mass change.
    ///
    /// # Errors
    /// `InvalidMass` when the new mass is not strictly positive.
    pub fn set_mass(&mut self, mass: Kilograms) -> Result<()> {
        if *mass <= 0.0 {
            return Err(SimError::InvalidMass(*mass));
        }
        self.mass = mass;
        Ok(())
    }

    /// Change mass while keeping the current temperature, scaling the
    /// energy store to match.
    ///
    /// # Errors
    /// `InvalidMass` when the new mass is not strictly positive.
    pub fn set_mass_preserving_temperature(&mut self, mass: Kilograms) -> Result<()> {
        if *mass <= 0.0 {
            return Err(SimError::InvalidMass(*mass));
        }
        let temperature = self.temperature();
        self.mass = mass;
        self.set_temperature(temperature);
        Ok(())
    }

    /// Volume of the element
    #[must_use]
    pub fn volume(&self) -> CubicMeters {
        self.volume
    }

    /// Contact area toward each neighbor
    #[must_use]
    pub fn surface(&self) -> SquareMeters {
        self.surface
    }

    /// Thermal energy store
    #[must_use]
    pub fn energy(&self) -> Joules {
        self.energy
    }

    /// CO₂ concentration
    #[must_use]
    pub fn co2_ppmv(&self) -> Ppmv {
        self.co2_ppmv
    }

    /// Overwrite the CO₂ concentration
    pub fn set_co2_ppmv(&mut self, co2_ppmv: Ppmv) {
        self.co2_ppmv = co2_ppmv;
    }

    /// Arena indices of touching components
    #[must_use]
    pub fn neighbors(&self) -> &[usize] {
        &self.neighbors
    }

    /// Record a touching component.
    ///
    /// # Errors
    /// `SelfNeighbor` for `idx == self.index`; `DuplicateNeighbor` when
    /// the link already exists. The aggregation links each unordered
    /// pair exactly once in each direction.
    pub fn add_neighbor(&mut self, idx: usize) -> Result<()> {
        if idx == self.index {
            return Err(SimError::SelfNeighbor(idx));
        }
        if self.neighbors.contains(&idx) {
            return Err(SimError::DuplicateNeighbor(self.index, idx));
        }
        self.neighbors.push(idx);
        Ok(())
    }

    /// Drop all neighbor links (used when a component is swapped out)
    pub(crate) fn clear_neighbors(&mut self) {
        self.neighbors.clear();
    }

    /// Absorb externally radiated energy
    pub fn receive_energy(&mut self, amount: Joules) {
        self.energy += amount;
    }

    /// Draw up to `requested` from the energy store and return what was
    /// actually granted. The store never goes below zero; the caller
    /// deposits exactly the granted amount on the receiving side, so
    /// a transfer moves the same joules out of one cell and into the
    /// other even when the request overdraws the store.
    pub(crate) fn withdraw_energy(&mut self, requested: Joules) -> Joules {
        let granted = requested.min(self.energy);
        self.energy -= granted;
        granted
    }

    /// Absorb diffused CO₂
    pub(crate) fn receive_co2(&mut self, amount: Ppmv) {
        self.co2_ppmv = self.co2_ppmv + amount;
    }

    /// Draw up to `requested` CO₂ and return what was granted, floored
    /// at an empty store like [`withdraw_energy`](Self::withdraw_energy)
    pub(crate) fn withdraw_co2(&mut self, requested: Ppmv) -> Ppmv {
        let granted = requested.min(self.co2_ppmv);
        self.co2_ppmv = self.co2_ppmv - granted;
        granted
    }
}
