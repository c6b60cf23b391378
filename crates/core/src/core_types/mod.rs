//! Core value types shared across the simulation

pub mod units;

pub use units::{
    Celsius, CubicMeters, Joules, JoulesPerKgKelvin, Kelvin, KelvinDelta, Kilograms, Meters, Ppmv,
    Seconds, SquareMeters, Watts, WattsPerSquareMeterKelvin,
};
