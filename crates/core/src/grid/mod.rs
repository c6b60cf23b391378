//! Planet surface grid: volume elements and conservative diffusion

pub mod aggregation;
pub mod component;

pub use aggregation::{CellInit, ComponentAggregation, GridShape, SampledInit};
pub use component::GridComponent;
