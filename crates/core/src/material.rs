//! Material properties for volume elements
//!
//! A `Material` bundles the transport coefficients the diffusion model
//! needs. Preset constructors carry literature-plausible constants; they
//! are configuration data, not physical ground truth.

use crate::core_types::{JoulesPerKgKelvin, WattsPerSquareMeterKelvin};
use serde::{Deserialize, Serialize};

/// Bulk material of a grid component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Human-readable material name
    pub name: String,
    /// Specific heat capacity, J/(kg·K)
    pub specific_heat_capacity: JoulesPerKgKelvin,
    /// Heat transfer coefficient toward a touching neighbor, W/(m²·K)
    pub heat_transfer_coefficient: WattsPerSquareMeterKelvin,
    /// CO₂ exchange rate toward a touching neighbor, 1/(m²·s) scale factor
    pub co2_diffusivity: f64,
}

impl Material {
    /// Liquid water at roughly surface-ocean conditions
    #[must_use]
    pub fn water() -> Self {
        Self {
            name: "water".to_string(),
            specific_heat_capacity: JoulesPerKgKelvin::new(4184.0),
            heat_transfer_coefficient: WattsPerSquareMeterKelvin::new(50.0),
            co2_diffusivity: 0.02,
        }
    }

    /// Moist topsoil
    #[must_use]
    pub fn soil() -> Self {
        Self {
            name: "soil".to_string(),
            specific_heat_capacity: JoulesPerKgKelvin::new(1480.0),
            heat_transfer_coefficient: WattsPerSquareMeterKelvin::new(15.0),
            co2_diffusivity: 0.005,
        }
    }

    /// Near-surface air
    #[must_use]
    pub fn air() -> Self {
        Self {
            name: "air".to_string(),
            specific_heat_capacity: JoulesPerKgKelvin::new(1005.0),
            heat_transfer_coefficient: WattsPerSquareMeterKelvin::new(10.0),
            co2_diffusivity: 0.15,
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::water()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_have_positive_coefficients() {
        for m in [Material::water(), Material::soil(), Material::air()] {
            assert!(*m.specific_heat_capacity > 0.0, "{}", m.name);
            assert!(*m.heat_transfer_coefficient > 0.0, "{}", m.name);
            assert!(m.co2_diffusivity > 0.0, "{}", m.name);
        }
    }

    #[test]
    fn air_diffuses_co2_faster_than_water() {
        assert!(Material::air().co2_diffusivity > Material::water().co2_diffusivity);
    }
}
