//! Terrain generators
//!
//! Four stamp/carve algorithms fill a fresh grid with `Solid`/`Pore` (and
//! `FastFlow`) terrain before the downstream pipeline stages run. Every
//! loop is bounded by grid area. None of the generators guarantees
//! connectivity - that is the repair pass's job.

use porebound_simulation::TileKind;

use super::environment::{Environment, EnvironmentDefinition};
use super::grid::{TileGrid, CARDINALS};
use super::rng::GenRng;
use crate::levels::LevelDefinition;

/// Disk stamping: stamp count = area x (1 - target porosity) / this.
/// Calibrated for grain radii of 1-2 cells; porosity is approximate by design.
const DISK_CALIBRATION_DIVISOR: f32 = 6.0;

/// Fraction of maze passages widened by one cell
const MAZE_WIDEN_CHANCE: f32 = 0.30;

/// Toxic vein walk parameters
const VEIN_COUNT_MIN: i32 = 3;
const VEIN_COUNT_MAX: i32 = 6;
const VEIN_LENGTH_MIN: i32 = 8;
const VEIN_LENGTH_MAX: i32 = 20;
const VEIN_WOBBLE_CHANCE: f32 = 0.30;

/// Highway carving parameters
const HIGHWAY_COUNT_MIN: i32 = 3;
const HIGHWAY_COUNT_MAX: i32 = 5;
const HIGHWAY_WIDTH_MIN: i32 = 2;
const HIGHWAY_WIDTH_MAX: i32 = 4;
const CHAMBER_COUNT_MIN: i32 = 2;
const CHAMBER_COUNT_MAX: i32 = 4;

/// Fast-flow reclassification: a pore is main channel when at least this
/// many of the other cells in its 5-cell vertical window are open
const FAST_FLOW_MIN_OPEN: usize = 4;

/// Fills a grid with terrain for one level's environment
pub struct WorldGenerator<'a> {
    level: &'a LevelDefinition,
    definition: &'a EnvironmentDefinition,
}

impl<'a> WorldGenerator<'a> {
    pub fn new(level: &'a LevelDefinition, definition: &'a EnvironmentDefinition) -> Self {
        Self { level, definition }
    }

    /// Fill `grid` with the environment's terrain
    pub fn run(&self, grid: &mut TileGrid, rng: &mut GenRng) {
        match self.definition.environment {
            // The toxic seep uses the sandy base and overlays veins below
            Environment::SandyAquifer | Environment::ToxicSeep => {
                self.generate_disk_packing(grid, rng)
            }
            Environment::ClayLabyrinth => self.generate_maze(grid, rng),
            Environment::VentChannel => self.generate_flow_highways(grid, rng),
        }

        if self.definition.has_toxic_veins {
            self.paint_toxic_veins(grid, rng);
        }
    }

    /// Sandy/open terrain: stamp random solid grains into open pore space
    fn generate_disk_packing(&self, grid: &mut TileGrid, rng: &mut GenRng) {
        grid.fill(TileKind::Pore);

        let (w, h) = (grid.width() as i32, grid.height() as i32);
        let area = (grid.width() * grid.height()) as f32;
        let stamps =
            (area * (1.0 - self.level.target_porosity) / DISK_CALIBRATION_DIVISOR) as usize;
        let (grain_min, grain_max) = self.level.grain_size;

        for _ in 0..stamps {
            let radius = rng.next_range(grain_min as i32, grain_max as i32);
            let cx = rng.next_range(0, w - 1);
            let cy = rng.next_range(0, h - 1);
            grid.fill_disk(cx, cy, radius, TileKind::Solid);
        }
    }

    /// Tight labyrinth: randomized depth-first backtracker on a coarse
    /// half-resolution grid, mapped back up at 2x scale
    fn generate_maze(&self, grid: &mut TileGrid, rng: &mut GenRng) {
        grid.fill(TileKind::Solid);

        let cw = grid.width() / 2;
        let ch = grid.height() / 2;
        let idx = |x: usize, y: usize| y * cw + x;

        // Nodes sit on odd coarse coordinates; the wall cell between two
        // nodes is carved when the backtracker crosses it.
        let mut carved = vec![false; cw * ch];
        let mut stack = vec![(1usize, 1usize)];
        carved[idx(1, 1)] = true;

        while let Some(&(cx, cy)) = stack.last() {
            let mut candidates: Vec<(usize, usize, usize, usize)> = Vec::with_capacity(4);
            for (dx, dy) in [(2i32, 0i32), (0, 2), (-2, 0), (0, -2)] {
                let nx = cx as i32 + dx;
                let ny = cy as i32 + dy;
                if nx >= 1
                    && ny >= 1
                    && (nx as usize) < cw
                    && (ny as usize) < ch
                    && !carved[idx(nx as usize, ny as usize)]
                {
                    let wx = (cx as i32 + dx / 2) as usize;
                    let wy = (cy as i32 + dy / 2) as usize;
                    candidates.push((nx as usize, ny as usize, wx, wy));
                }
            }

            match candidates.len() {
                0 => {
                    stack.pop();
                }
                n => {
                    let (nx, ny, wx, wy) = candidates[rng.next_range(0, n as i32 - 1) as usize];
                    carved[idx(wx, wy)] = true;
                    carved[idx(nx, ny)] = true;
                    stack.push((nx, ny));
                }
            }
        }

        // Map carved coarse cells to 2x2 pore blocks at full resolution
        for cy in 0..ch {
            for cx in 0..cw {
                if carved[idx(cx, cy)] {
                    carve_block(grid, cx, cy);
                }
            }
        }

        // Secondary pass: widen a share of the passages by one cell in a
        // random cardinal direction to avoid single-tile corridors
        for cy in 0..ch {
            for cx in 0..cw {
                if carved[idx(cx, cy)] && rng.chance(MAZE_WIDEN_CHANCE) {
                    let dir = CARDINALS[rng.next_range(0, 3) as usize];
                    widen_block(grid, cx, cy, dir);
                }
            }
        }
    }

    /// Toxic overlay: walk wobbling polylines that contaminate pore cells
    fn paint_toxic_veins(&self, grid: &mut TileGrid, rng: &mut GenRng) {
        let (w, h) = (grid.width() as i32, grid.height() as i32);
        let veins = rng.next_range(VEIN_COUNT_MIN, VEIN_COUNT_MAX);

        for _ in 0..veins {
            let mut x = rng.next_range(2, w - 3);
            let mut y = rng.next_range(2, h - 3);
            let (dir_x, dir_y) = CARDINALS[rng.next_range(0, 3) as usize];
            let length = rng.next_range(VEIN_LENGTH_MIN, VEIN_LENGTH_MAX);
            let thickness = rng.next_range(1, 2);

            for _ in 0..length {
                for t in 0..thickness {
                    // Thickness extends perpendicular to the walk direction
                    let (px, py) = (x + dir_y * t, y + dir_x * t);
                    if grid.get(px, py) == TileKind::Pore {
                        grid.set(px, py, TileKind::Toxic);
                    }
                }

                if rng.chance(VEIN_WOBBLE_CHANCE) {
                    let side = if rng.chance(0.5) { 1 } else { -1 };
                    x += dir_y * side;
                    y += dir_x * side;
                } else {
                    x += dir_x;
                    y += dir_y;
                }
                x = x.clamp(1, w - 2);
                y = y.clamp(1, h - 2);
            }
        }
    }

    /// Fast-channel terrain: horizontal wobbling highways joined by vertical
    /// connectors and round chambers, then main-channel reclassification
    fn generate_flow_highways(&self, grid: &mut TileGrid, rng: &mut GenRng) {
        grid.fill(TileKind::Solid);
        let (w, h) = (grid.width() as i32, grid.height() as i32);

        let bands = rng.next_range(HIGHWAY_COUNT_MIN, HIGHWAY_COUNT_MAX);
        let mut band_ys = Vec::with_capacity(bands as usize);
        for _ in 0..bands {
            let base_y = rng.next_range(3, h - 4);
            let band_width = rng.next_range(HIGHWAY_WIDTH_MIN, HIGHWAY_WIDTH_MAX);
            let amplitude = rng.next_range(1, 3) as f32;
            let wavelength = rng.next_range(12, 24) as f32;
            let phase = rng.next_f32() * std::f32::consts::TAU;
            band_ys.push(base_y);

            for x in 1..w - 1 {
                let wobble =
                    (x as f32 / wavelength * std::f32::consts::TAU + phase).sin() * amplitude;
                let yc = base_y + wobble.round() as i32;
                for dy in 0..band_width {
                    grid.set(x, yc + dy - band_width / 2, TileKind::Pore);
                }
            }
        }

        // Vertical connectors between band baselines
        let connectors = rng.next_range(bands, bands * 2);
        for _ in 0..connectors {
            let x = rng.next_range(2, w - 3);
            let a = band_ys[rng.next_range(0, band_ys.len() as i32 - 1) as usize];
            let b = band_ys[rng.next_range(0, band_ys.len() as i32 - 1) as usize];
            for y in a.min(b)..=a.max(b) {
                grid.set(x, y, TileKind::Pore);
            }
        }

        // Round chambers off the main lines
        let chambers = rng.next_range(CHAMBER_COUNT_MIN, CHAMBER_COUNT_MAX);
        for _ in 0..chambers {
            let cx = rng.next_range(4, w - 5);
            let cy = rng.next_range(4, h - 5);
            let radius = rng.next_range(2, 4);
            grid.fill_disk(cx, cy, radius, TileKind::Pore);
        }

        self.reclassify_fast_flow(grid);
    }

    /// Density heuristic separating main channel from side pocket: a pore
    /// whose 5-cell vertical window is otherwise open carries the current
    fn reclassify_fast_flow(&self, grid: &mut TileGrid) {
        let snapshot = grid.clone();
        for y in 0..grid.height() as i32 {
            for x in 0..grid.width() as i32 {
                if snapshot.get(x, y) != TileKind::Pore {
                    continue;
                }
                let open = [-2i32, -1, 1, 2]
                    .iter()
                    .filter(|&&dy| snapshot.get(x, y + dy) == TileKind::Pore)
                    .count();
                if open >= FAST_FLOW_MIN_OPEN {
                    grid.set(x, y, TileKind::FastFlow);
                }
            }
        }
    }
}

/// Open the 2x2 full-resolution block behind a carved coarse cell
fn carve_block(grid: &mut TileGrid, cx: usize, cy: usize) {
    let fx = (cx * 2) as i32;
    let fy = (cy * 2) as i32;
    for (dx, dy) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
        grid.set(fx + dx, fy + dy, TileKind::Pore);
    }
}

/// Open the one-cell strip adjacent to a carved block in the given direction
fn widen_block(grid: &mut TileGrid, cx: usize, cy: usize, dir: (i32, i32)) {
    let fx = (cx * 2) as i32;
    let fy = (cy * 2) as i32;
    let cells = match dir {
        (1, 0) => [(fx + 2, fy), (fx + 2, fy + 1)],
        (-1, 0) => [(fx - 1, fy), (fx - 1, fy + 1)],
        (0, 1) => [(fx, fy + 2), (fx + 1, fy + 2)],
        _ => [(fx, fy - 1), (fx + 1, fy - 1)],
    };
    for (x, y) in cells {
        grid.set(x, y, TileKind::Pore);
    }
}
