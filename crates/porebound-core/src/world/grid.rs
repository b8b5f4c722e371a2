//! TileGrid - the width x height matrix of cell classifications

use glam::IVec2;
use porebound_simulation::TileKind;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Cardinal neighbor offsets in priority order (right, down, left, up)
pub(crate) const CARDINALS: [(i32, i32); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];

/// The 2-D cell matrix one level plays on
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileGrid {
    width: usize,
    height: usize,
    /// Row-major, index = y * width + x
    tiles: Vec<TileKind>,
}

impl TileGrid {
    /// Allocate a grid with every cell set to `kind`
    pub fn new_filled(width: usize, height: usize, kind: TileKind) -> Self {
        Self {
            width,
            height,
            tiles: vec![kind; width * height],
        }
    }

    /// Allocate a fully solid grid (the pipeline's starting state)
    pub fn new_solid(width: usize, height: usize) -> Self {
        Self::new_filled(width, height, TileKind::Solid)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Get the cell at (x, y); out of bounds reads as `Solid` so callers
    /// never special-case the rim
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> TileKind {
        if self.in_bounds(x, y) {
            self.tiles[y as usize * self.width + x as usize]
        } else {
            TileKind::Solid
        }
    }

    /// Set the cell at (x, y); bounds-checked no-op out of range
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, kind: TileKind) {
        if self.in_bounds(x, y) {
            self.tiles[y as usize * self.width + x as usize] = kind;
        }
    }

    #[inline]
    pub fn is_walkable_at(&self, x: i32, y: i32) -> bool {
        self.get(x, y).is_walkable()
    }

    /// Overwrite every cell
    pub fn fill(&mut self, kind: TileKind) {
        self.tiles.fill(kind);
    }

    /// Stamp a filled disk of `kind` centered at (cx, cy)
    pub fn fill_disk(&mut self, cx: i32, cy: i32, radius: i32, kind: TileKind) {
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy <= radius * radius {
                    self.set(cx + dx, cy + dy, kind);
                }
            }
        }
    }

    /// Number of cells with the given classification
    pub fn count(&self, kind: TileKind) -> usize {
        self.tiles.iter().filter(|&&t| t == kind).count()
    }

    /// Fraction of non-solid cells; generators only approximate the level's target
    pub fn porosity(&self) -> f32 {
        let open = self.tiles.iter().filter(|t| !t.is_solid()).count();
        open as f32 / self.tiles.len() as f32
    }

    /// Cardinal neighbors that are open pore space (`Pore`, `FastFlow`, `Inlet`)
    pub fn adjacent_pores(&self, x: i32, y: i32) -> SmallVec<[IVec2; 4]> {
        let mut pores = SmallVec::new();
        for (dx, dy) in CARDINALS {
            let (nx, ny) = (x + dx, y + dy);
            if matches!(
                self.get(nx, ny),
                TileKind::Pore | TileKind::FastFlow | TileKind::Inlet
            ) {
                pores.push(IVec2::new(nx, ny));
            }
        }
        pores
    }

    /// Raw cell slice for minimap/rendering collaborators
    pub fn tiles(&self) -> &[TileKind] {
        &self.tiles
    }
}
