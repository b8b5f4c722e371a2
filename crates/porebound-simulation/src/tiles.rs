//! Tile classification and flow direction types
//!
//! Every cell of a level grid is exactly one `TileKind`; per-cell flow
//! cues are expressed as a cardinal `Direction` plus a speed scalar held
//! by the core's flow field.

use serde::{Deserialize, Serialize};

/// Classification of a single grid cell
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    /// Unclassified cell; never present once generation completes
    #[default]
    Void,
    /// Impermeable grain or wall
    Solid,
    /// Open pore space
    Pore,
    /// Pore occupied by a colony (written by the entity layer after generation)
    Biofilm,
    /// Contaminated pore; blocks movement
    Toxic,
    /// Main-channel pore with boosted advection
    FastFlow,
    /// Entry cell on the upstream face
    Inlet,
    /// Exit cell on the downstream face
    Outlet,
}

impl TileKind {
    /// Whether a game entity may occupy this cell
    #[inline]
    pub fn is_walkable(self) -> bool {
        matches!(
            self,
            TileKind::Pore
                | TileKind::FastFlow
                | TileKind::Inlet
                | TileKind::Outlet
                | TileKind::Biofilm
        )
    }

    /// Whether this cell blocks both movement and flow
    #[inline]
    pub fn is_solid(self) -> bool {
        matches!(self, TileKind::Solid | TileKind::Void)
    }
}

/// Cardinal flow direction; `None` means no advection cue
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    None,
    Right,
    Down,
    Left,
    Up,
}

impl Direction {
    /// Unit cell offset, with y growing downward; `(0, 0)` for `None`
    #[inline]
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::None => (0, 0),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Up => (0, -1),
        }
    }
}
