//! Distance-to-solid transform
//!
//! Multi-source BFS seeded from every solid cell, expanding over all cells
//! (walkable or not) under 4-connectivity. Gameplay uses it to bias colony
//! placement toward the most open cells.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::grid::{TileGrid, CARDINALS};

/// Sentinel for cells no solid cell can reach; with a solid border it
/// never survives a finished generation, but the transform itself does
/// not assume that
pub const DISTANCE_UNREACHABLE: u32 = u32::MAX;

/// Per-cell 4-connected graph distance to the nearest solid cell
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistanceField {
    width: usize,
    height: usize,
    distances: Vec<u32>,
}

impl DistanceField {
    /// Run the multi-source BFS over `grid`
    pub fn compute(grid: &TileGrid) -> Self {
        let w = grid.width();
        let h = grid.height();
        let wi = w as i32;
        let hi = h as i32;

        let mut distances = vec![DISTANCE_UNREACHABLE; w * h];
        let mut queue = VecDeque::new();

        for y in 0..hi {
            for x in 0..wi {
                if grid.get(x, y).is_solid() {
                    distances[y as usize * w + x as usize] = 0;
                    queue.push_back((x, y));
                }
            }
        }

        while let Some((x, y)) = queue.pop_front() {
            let next = distances[y as usize * w + x as usize] + 1;
            for (dx, dy) in CARDINALS {
                let (nx, ny) = (x + dx, y + dy);
                if nx < 0 || ny < 0 || nx >= wi || ny >= hi {
                    continue;
                }
                let i = ny as usize * w + nx as usize;
                if next < distances[i] {
                    distances[i] = next;
                    queue.push_back((nx, ny));
                }
            }
        }

        Self {
            width: w,
            height: h,
            distances,
        }
    }

    /// Distance at (x, y); out of bounds reads as 0, consistent with
    /// out-of-bounds tiles reading solid
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> u32 {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            self.distances[y as usize * self.width + x as usize]
        } else {
            0
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }
}
