//! Tile data types for Porebound
//!
//! This crate provides the foundational data types shared by the world
//! generation core and its consumers:
//! - Cell classification (TileKind)
//! - Cardinal flow directions (Direction)

mod tiles;

pub use tiles::{Direction, TileKind};
