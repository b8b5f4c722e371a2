//! Flow field solver
//!
//! A crude pressure-driven advection cue, not real fluid dynamics: a
//! fixed-count Jacobi relaxation between a high-pressure upstream face and
//! a low-pressure downstream face, followed by a per-cell steepest-drop
//! direction pick. Good enough to bias movement and rendering; nothing
//! here solves incompressible flow.

use porebound_simulation::{Direction, TileKind};
use serde::{Deserialize, Serialize};

use super::grid::TileGrid;

/// Fixed relaxation sweep count; enough for a usable gradient on level-
/// sized grids, cheap enough to run on every level load
const JACOBI_ITERATIONS: usize = 50;

/// Pressures held fixed on the upstream/downstream face columns
const UPSTREAM_PRESSURE: f32 = 1.0;
const DOWNSTREAM_PRESSURE: f32 = 0.0;

/// Interior cells start halfway between the two face pressures
const INITIAL_PRESSURE: f32 = 0.5;

/// Speed = pressure drop x base speed x this scale
const SPEED_SCALE: f32 = 40.0;

/// Main-channel cells carry stronger advection
const FAST_FLOW_MULTIPLIER: f32 = 2.5;

/// Speed never exceeds this multiple of the level's base speed
const SPEED_CAP_FACTOR: f32 = 3.0;

/// Per-cell advection cue: a cardinal direction plus a speed
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowField {
    width: usize,
    height: usize,
    directions: Vec<Direction>,
    speeds: Vec<f32>,
}

impl FlowField {
    /// Relax the pressure proxy over `grid` and derive per-cell cues
    pub fn solve(grid: &TileGrid, base_speed: f32) -> Self {
        let pressure = relax_pressure(grid);
        derive_cues(grid, &pressure, base_speed)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Advection cue at (x, y); out of bounds reads as no flow
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> (Direction, f32) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            let i = y as usize * self.width + x as usize;
            (self.directions[i], self.speeds[i])
        } else {
            (Direction::None, 0.0)
        }
    }

    #[inline]
    pub fn direction(&self, x: i32, y: i32) -> Direction {
        self.get(x, y).0
    }

    #[inline]
    pub fn speed(&self, x: i32, y: i32) -> f32 {
        self.get(x, y).1
    }
}

/// Fixed-count Jacobi relaxation. The face columns x = 0 and x = width-1
/// hold their pressures and participate in neighbor averages even when
/// solid; every other solid neighbor is excluded from the average rather
/// than treated as zero.
fn relax_pressure(grid: &TileGrid) -> Vec<f32> {
    let w = grid.width();
    let h = grid.height();
    let wi = w as i32;
    let hi = h as i32;

    let mut pressure = vec![INITIAL_PRESSURE; w * h];
    for y in 0..h {
        pressure[y * w] = UPSTREAM_PRESSURE;
        pressure[y * w + w - 1] = DOWNSTREAM_PRESSURE;
    }
    let mut next = pressure.clone();

    for _ in 0..JACOBI_ITERATIONS {
        for y in 0..hi {
            for x in 1..wi - 1 {
                if grid.get(x, y).is_solid() {
                    continue;
                }
                let mut sum = 0.0;
                let mut count = 0u32;
                for (nx, ny) in [(x + 1, y), (x - 1, y), (x, y + 1), (x, y - 1)] {
                    if nx < 0 || ny < 0 || nx >= wi || ny >= hi {
                        continue;
                    }
                    if grid.get(nx, ny).is_solid() && nx != 0 && nx != wi - 1 {
                        continue;
                    }
                    sum += pressure[ny as usize * w + nx as usize];
                    count += 1;
                }
                if count > 0 {
                    next[y as usize * w + x as usize] = sum / count as f32;
                }
            }
        }
        std::mem::swap(&mut pressure, &mut next);
    }

    pressure
}

/// Pick each open cell's steepest positive pressure drop and scale it into
/// a speed. The priority order right, left, down, up on ties is incidental
/// but kept stable for regression comparisons.
fn derive_cues(grid: &TileGrid, pressure: &[f32], base_speed: f32) -> FlowField {
    const PRIORITY: [(Direction, (i32, i32)); 4] = [
        (Direction::Right, (1, 0)),
        (Direction::Left, (-1, 0)),
        (Direction::Down, (0, 1)),
        (Direction::Up, (0, -1)),
    ];

    let w = grid.width();
    let h = grid.height();
    let mut directions = vec![Direction::None; w * h];
    let mut speeds = vec![0.0f32; w * h];

    for y in 0..h as i32 {
        for x in 0..w as i32 {
            if grid.get(x, y).is_solid() {
                continue;
            }
            let i = y as usize * w + x as usize;
            let own = pressure[i];

            let mut best = Direction::None;
            let mut best_drop = 0.0f32;
            for (dir, (dx, dy)) in PRIORITY {
                let (nx, ny) = (x + dx, y + dy);
                if !grid.in_bounds(nx, ny) || grid.get(nx, ny).is_solid() {
                    continue;
                }
                let drop = own - pressure[ny as usize * w + nx as usize];
                if drop > best_drop {
                    best_drop = drop;
                    best = dir;
                }
            }

            if best != Direction::None {
                let mut speed = best_drop * base_speed * SPEED_SCALE;
                if grid.get(x, y) == TileKind::FastFlow {
                    speed *= FAST_FLOW_MULTIPLIER;
                }
                directions[i] = best;
                speeds[i] = speed.min(SPEED_CAP_FACTOR * base_speed);
            }
        }
    }

    FlowField {
        width: w,
        height: h,
        directions,
        speeds,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Border-solid grid with an all-pore interior
    fn corridor(width: usize, height: usize) -> TileGrid {
        let mut grid = TileGrid::new_solid(width, height);
        for y in 1..height as i32 - 1 {
            for x in 1..width as i32 - 1 {
                grid.set(x, y, TileKind::Pore);
            }
        }
        grid
    }

    #[test]
    fn test_straight_corridor_flows_right() {
        let grid = corridor(10, 3);
        let field = FlowField::solve(&grid, 1.0);

        // Every interior cell except the rightmost column is pushed right
        // at the capped, uniform speed
        for x in 1..=7 {
            assert_eq!(field.direction(x, 1), Direction::Right, "cell ({}, 1)", x);
            assert!(
                (field.speed(x, 1) - SPEED_CAP_FACTOR).abs() < 1e-4,
                "cell ({}, 1) speed {}",
                x,
                field.speed(x, 1)
            );
        }
        // Near-zero gradient at the outlet boundary
        assert_eq!(field.direction(8, 1), Direction::None);
        assert_eq!(field.speed(8, 1), 0.0);
    }

    #[test]
    fn test_solid_cells_carry_no_flow() {
        let grid = corridor(12, 8);
        let field = FlowField::solve(&grid, 1.0);

        assert_eq!(field.get(0, 0), (Direction::None, 0.0));
        assert_eq!(field.get(5, 0), (Direction::None, 0.0));
        assert_eq!(field.get(11, 4), (Direction::None, 0.0));
    }

    #[test]
    fn test_out_of_bounds_reads_no_flow() {
        let grid = corridor(10, 6);
        let field = FlowField::solve(&grid, 1.0);

        assert_eq!(field.get(-1, 2), (Direction::None, 0.0));
        assert_eq!(field.get(10, 2), (Direction::None, 0.0));
        assert_eq!(field.get(3, 99), (Direction::None, 0.0));
    }

    #[test]
    fn test_speeds_bounded_and_nonnegative() {
        let base_speed = 1.4;
        let grid = corridor(20, 12);
        let field = FlowField::solve(&grid, base_speed);

        for y in 0..12 {
            for x in 0..20 {
                let (dir, speed) = field.get(x, y);
                assert!(speed >= 0.0);
                assert!(speed <= SPEED_CAP_FACTOR * base_speed + 1e-5);
                if dir == Direction::None {
                    assert_eq!(speed, 0.0, "cell ({}, {}) moves without direction", x, y);
                }
            }
        }
    }

    #[test]
    fn test_fast_flow_multiplier_on_known_ramp() {
        let mut grid = TileGrid::new_filled(5, 3, TileKind::Pore);
        grid.set(2, 1, TileKind::FastFlow);

        // Hand-built ramp: 0.01 pressure drop per column, flat per row
        let mut pressure = vec![0.0f32; 5 * 3];
        for y in 0..3 {
            for x in 0..5 {
                pressure[y * 5 + x] = 1.0 - 0.01 * x as f32;
            }
        }

        let field = derive_cues(&grid, &pressure, 1.0);
        assert_eq!(field.direction(1, 1), Direction::Right);
        assert!((field.speed(1, 1) - 0.4).abs() < 1e-4);
        // Same drop, 2.5x multiplier on the main channel
        assert_eq!(field.direction(2, 1), Direction::Right);
        assert!((field.speed(2, 1) - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_speed_cap_on_steep_ramp() {
        let grid = TileGrid::new_filled(5, 3, TileKind::Pore);

        // 0.2 drop per column: raw speed would be 8x base
        let mut pressure = vec![0.0f32; 5 * 3];
        for y in 0..3 {
            for x in 0..5 {
                pressure[y * 5 + x] = 1.0 - 0.2 * x as f32;
            }
        }

        let field = derive_cues(&grid, &pressure, 1.0);
        assert!((field.speed(2, 1) - SPEED_CAP_FACTOR).abs() < 1e-5);
    }
}
