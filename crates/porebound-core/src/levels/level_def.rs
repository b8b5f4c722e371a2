//! Level definition record and parameter validation

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Smallest playable grid edge; below this the generators run out of room
/// (interior margins for vein starts, highway bands, and chamber centers)
pub const MIN_DIMENSION: usize = 12;

/// Input record describing one level, supplied by the level table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelDefinition {
    pub width: usize,
    pub height: usize,

    /// Desired open-space fraction in (0, 1); generators only approximate it
    pub target_porosity: f32,

    /// Grain radius range (min, max) in cells, inclusive
    pub grain_size: (u32, u32),

    /// Selects generator and palette; wraps over the environment count
    pub environment_index: u32,

    /// Colony cells required to clear the level (entity layer's win condition)
    pub colony_goal: u32,

    /// Substrate spawn weight per open cell (entity layer input)
    pub substrate_density: f32,

    /// Advection strength fed to the flow solver
    pub base_flow_speed: f32,
}

/// Rejected level parameters
#[derive(Debug, Error, PartialEq)]
pub enum LevelError {
    #[error("grid dimensions {0}x{1} are below the minimum playable size")]
    GridTooSmall(usize, usize),

    #[error("target porosity {0} is outside (0, 1)")]
    PorosityOutOfRange(f32),

    #[error("grain size range {0}..={1} is invalid (need 1 <= min <= max)")]
    InvalidGrainRange(u32, u32),

    #[error("base flow speed {0} must be positive")]
    NonPositiveFlowSpeed(f32),

    #[error("substrate density {0} is outside [0, 1]")]
    SubstrateDensityOutOfRange(f32),
}

impl LevelDefinition {
    /// Check the record before generation; generation itself never fails
    pub fn validate(&self) -> Result<(), LevelError> {
        if self.width < MIN_DIMENSION || self.height < MIN_DIMENSION {
            return Err(LevelError::GridTooSmall(self.width, self.height));
        }
        if !(self.target_porosity > 0.0 && self.target_porosity < 1.0) {
            return Err(LevelError::PorosityOutOfRange(self.target_porosity));
        }
        let (grain_min, grain_max) = self.grain_size;
        if grain_min == 0 || grain_min > grain_max {
            return Err(LevelError::InvalidGrainRange(grain_min, grain_max));
        }
        if !(self.base_flow_speed > 0.0) {
            return Err(LevelError::NonPositiveFlowSpeed(self.base_flow_speed));
        }
        if !(0.0..=1.0).contains(&self.substrate_density) {
            return Err(LevelError::SubstrateDensityOutOfRange(self.substrate_density));
        }
        Ok(())
    }
}
