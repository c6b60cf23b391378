//! End-to-end sun-to-surface radiation through the full facade

use approx::assert_relative_eq;
use climate_sim_core::{ClimateSimulation, Joules, SimulationConfig, Watts};
use std::f64::consts::PI;

fn default_sim() -> ClimateSimulation {
    ClimateSimulation::from_config(&SimulationConfig::default()).expect("simulation construction")
}

#[test]
fn earth_receives_exact_solid_angle_fraction_per_tick() {
    let config = SimulationConfig::default();
    let mut sim = ClimateSimulation::from_config(&config).unwrap();

    let before = *sim.stats().unwrap().grid_energy;
    sim.step().unwrap();
    let after = *sim.stats().unwrap().grid_energy;

    // Per tick: output * dt * (π r² / d²) / 4π; diffusion inside the
    // grid does not move the total
    let r = *config.earth_radius;
    let d = *config.earth_distance;
    let fraction = (PI * r * r / (d * d)) / (4.0 * PI);
    let expected = *config.sun_output * *config.time_delta * fraction;
    assert_relative_eq!(after - before, expected, max_relative = 1e-9);
}

#[test]
fn received_energy_accumulates_linearly_over_ticks() {
    let mut sim = default_sim();
    let start = *sim.stats().unwrap().grid_energy;
    sim.step().unwrap();
    let per_tick = *sim.stats().unwrap().grid_energy - start;
    sim.run_for(99).unwrap();
    let total = *sim.stats().unwrap().grid_energy - start;
    assert_relative_eq!(total, per_tick * 100.0, max_relative = 1e-9);
}

#[test]
fn visibility_is_total_and_symmetric_after_construction() {
    let mut sim = default_sim();
    let (sun, earth) = (sim.sun_id(), sim.earth_id());
    // Both directions answer from cache and agree
    assert!(sim.universe_mut().sees(sun, earth).unwrap());
    assert!(sim.universe_mut().sees(earth, sun).unwrap());
    let universe = sim.universe();
    assert!(universe.body(sun).unwrap().bodies_in_sight().contains(&earth));
    assert!(universe.body(earth).unwrap().bodies_in_sight().contains(&sun));
}

#[test]
fn finite_sun_depletes_and_goes_dark() {
    let config = SimulationConfig {
        sun_output: Watts::new(1.0e10),
        // Reserve covers exactly three full ticks at dt = 0.01
        sun_reserve: Some(Joules::new(3.0e8)),
        ..SimulationConfig::default()
    };
    let mut sim = ClimateSimulation::from_config(&config).unwrap();

    sim.run_for(3).unwrap();
    let reserve = sim.stats().unwrap().sun_reserve.unwrap();
    assert_relative_eq!(*reserve, 0.0);

    let energy_after_depletion = *sim.stats().unwrap().grid_energy;
    sim.run_for(10).unwrap();
    assert_relative_eq!(
        *sim.stats().unwrap().grid_energy,
        energy_after_depletion,
        max_relative = 1e-9
    );
}

#[test]
fn mean_surface_temperature_rises_under_sunlight() {
    let mut sim = default_sim();
    let before = *sim.stats().unwrap().mean_surface_temperature;
    sim.run_for(1_000).unwrap();
    assert!(*sim.stats().unwrap().mean_surface_temperature > before);
}
