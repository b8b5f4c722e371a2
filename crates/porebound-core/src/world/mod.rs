//! World generation - grids, derived fields, and the level pipeline

pub mod boundary;
pub mod connectivity;
mod distance_field;
pub mod environment;
mod flow_field;
pub mod generation;
mod grid;
mod rng;
#[allow(clippy::module_inception)]
mod world;

pub use distance_field::{DistanceField, DISTANCE_UNREACHABLE};
pub use environment::{Environment, EnvironmentDefinition, EnvironmentRegistry};
pub use flow_field::FlowField;
pub use generation::WorldGenerator;
pub use grid::TileGrid;
pub use rng::GenRng;
pub use world::{World, WorldStats};
