//! Long-run conservation and equilibrium behavior of the surface grid

use approx::assert_relative_eq;
use climate_sim_core::{
    CellInit, ComponentAggregation, GridShape, Kelvin, Ppmv, SampledInit, Seconds,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

const DT: Seconds = Seconds::new(0.01);

#[test]
fn closed_grid_conserves_energy_over_many_ticks() {
    let init = SampledInit::default();
    let mut rng = StdRng::seed_from_u64(7);
    let mut grid = ComponentAggregation::sampled(GridShape::new(6, 6, 3), &init, &mut rng)
        .expect("grid construction");

    let energy_before = *grid.total_energy();
    let co2_before = *grid.mean_co2();
    for _ in 0..10_000 {
        grid.tick(DT);
    }
    assert_relative_eq!(*grid.total_energy(), energy_before, max_relative = 1e-9);
    assert_relative_eq!(*grid.mean_co2(), co2_before, max_relative = 1e-9);
}

#[test]
fn hot_and_cold_cells_converge_monotonically() {
    let mut grid =
        ComponentAggregation::uniform(GridShape::new(2, 1, 1), &CellInit::default()).unwrap();
    grid.component_at_mut(0, 0, 0)
        .unwrap()
        .set_temperature(Kelvin::new(310.0));
    grid.component_at_mut(1, 0, 0)
        .unwrap()
        .set_temperature(Kelvin::new(290.0));

    let mut gap = *grid.temperature_at(0, 0, 0).unwrap() - *grid.temperature_at(1, 0, 0).unwrap();
    for _ in 0..5_000 {
        grid.tick(DT);
        let new_gap =
            *grid.temperature_at(0, 0, 0).unwrap() - *grid.temperature_at(1, 0, 0).unwrap();
        assert!(new_gap >= 0.0, "hot cell overshot the cold cell");
        assert!(new_gap <= gap, "temperature gap widened");
        gap = new_gap;
    }
    // Both cells end near the 300 K midpoint
    let mean = f64::midpoint(
        *grid.temperature_at(0, 0, 0).unwrap(),
        *grid.temperature_at(1, 0, 0).unwrap(),
    );
    assert_relative_eq!(mean, 300.0, max_relative = 1e-9);
}

#[test]
fn diffusion_smooths_a_sampled_grid_toward_uniformity() {
    let init = SampledInit::default();
    let mut rng = StdRng::seed_from_u64(99);
    let mut grid =
        ComponentAggregation::sampled(GridShape::new(4, 4, 1), &init, &mut rng).unwrap();

    let spread = |g: &ComponentAggregation| {
        let mean = *g.mean_temperature();
        g.iter()
            .map(|c| (*c.temperature() - mean).powi(2))
            .sum::<f64>()
    };
    let before = spread(&grid);
    for _ in 0..20_000 {
        grid.tick(DT);
    }
    assert!(
        spread(&grid) < before,
        "temperature variance must shrink under diffusion"
    );
}

#[test]
fn neighborless_component_is_untouched_by_ticks() {
    let mut grid =
        ComponentAggregation::uniform(GridShape::new(1, 1, 1), &CellInit::default()).unwrap();
    grid.component_at_mut(0, 0, 0)
        .unwrap()
        .set_co2_ppmv(Ppmv::new(123.0));
    let energy = *grid.total_energy();
    for _ in 0..100 {
        grid.tick(DT);
    }
    assert_relative_eq!(*grid.total_energy(), energy);
    assert_relative_eq!(*grid.co2_at(0, 0, 0).unwrap(), 123.0);
}

#[test]
fn neighbor_links_are_symmetric_and_unique() {
    let grid =
        ComponentAggregation::uniform(GridShape::new(4, 3, 2), &CellInit::default()).unwrap();
    let components: Vec<_> = grid.iter().collect();
    for c in &components {
        let mut sorted = c.neighbors().to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), c.neighbors().len(), "duplicate link");
        for &n in c.neighbors() {
            assert_ne!(n, c.index, "self loop");
            assert!(
                components[n].neighbors().contains(&c.index),
                "asymmetric link {} -> {n}",
                c.index
            );
        }
    }
}
