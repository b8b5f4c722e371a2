pub mod levels;
pub mod world;

// Re-export the tile data types so consumers need only this crate
pub use porebound_simulation::{Direction, TileKind};
