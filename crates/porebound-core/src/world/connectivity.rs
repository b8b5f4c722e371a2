//! Connectivity repair - guarantees one walkable component
//!
//! The most safety-critical pass in the pipeline: a miss here ships an
//! unplayable level. The repairer operates on the interior sub-grid and
//! treats border cells as solid regardless of content, so the border
//! enforcement that runs after it can never disconnect a repaired region.

use glam::IVec2;
use porebound_simulation::TileKind;
use std::collections::VecDeque;

use super::grid::{TileGrid, CARDINALS};

/// Outcome of a repair pass
#[derive(Debug, Clone, Copy)]
pub struct RepairReport {
    /// Cells opened to pore while bridging
    pub carved: usize,
    /// The cell every walkable cell is now connected to
    pub start: IVec2,
}

/// Make every interior walkable cell reachable from a single start cell
pub fn repair(grid: &mut TileGrid) -> RepairReport {
    let w = grid.width() as i32;
    let h = grid.height() as i32;
    let mut carved = 0usize;

    let start = find_or_carve_start(grid, &mut carved);
    let mut reachable = vec![false; grid.width() * grid.height()];
    flood_walkable(grid, start, &mut reachable);

    // Bridge every orphan walkable cell back toward the start, then flood
    // its whole component so each component is bridged exactly once
    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let orphan = IVec2::new(x, y);
            if reachable[(y * w + x) as usize] || !grid.get(x, y).is_walkable() {
                continue;
            }
            carved += bridge_toward_start(grid, orphan, start, &mut reachable);
            flood_walkable(grid, orphan, &mut reachable);
        }
    }

    ensure_right_edge(grid, start, &mut reachable, &mut carved);

    #[cfg(debug_assertions)]
    for y in 1..h - 1 {
        for x in 1..w - 1 {
            debug_assert!(
                !grid.get(x, y).is_walkable() || reachable[(y * w + x) as usize],
                "repair left walkable cell ({}, {}) unreachable",
                x,
                y
            );
        }
    }

    RepairReport { carved, start }
}

/// True when all walkable cells of the grid form one 4-connected component
pub fn is_fully_connected(grid: &TileGrid) -> bool {
    let w = grid.width() as i32;
    let h = grid.height() as i32;

    let mut first = None;
    let mut total_walkable = 0usize;
    for y in 0..h {
        for x in 0..w {
            if grid.get(x, y).is_walkable() {
                total_walkable += 1;
                if first.is_none() {
                    first = Some(IVec2::new(x, y));
                }
            }
        }
    }
    let Some(first) = first else {
        return true;
    };

    let mut visited = vec![false; grid.width() * grid.height()];
    let mut queue = VecDeque::new();
    visited[(first.y * w + first.x) as usize] = true;
    queue.push_back(first);
    let mut reached = 1usize;

    while let Some(p) = queue.pop_front() {
        for (dx, dy) in CARDINALS {
            let (nx, ny) = (p.x + dx, p.y + dy);
            if nx < 0 || ny < 0 || nx >= w || ny >= h {
                continue;
            }
            let i = (ny * w + nx) as usize;
            if !visited[i] && grid.get(nx, ny).is_walkable() {
                visited[i] = true;
                reached += 1;
                queue.push_back(IVec2::new(nx, ny));
            }
        }
    }

    reached == total_walkable
}

/// First walkable cell scanning row-major within the left third of the
/// interior, or a freshly carved pore at (2, height/2) if none exists
fn find_or_carve_start(grid: &mut TileGrid, carved: &mut usize) -> IVec2 {
    let w = grid.width() as i32;
    let h = grid.height() as i32;
    let left_third = (w / 3).max(2);

    for y in 1..h - 1 {
        for x in 1..left_third {
            if grid.get(x, y).is_walkable() {
                return IVec2::new(x, y);
            }
        }
    }

    let fallback = IVec2::new(2, h / 2);
    grid.set(fallback.x, fallback.y, TileKind::Pore);
    *carved += 1;
    fallback
}

/// BFS over interior walkable cells, marking everything reachable from `from`
fn flood_walkable(grid: &TileGrid, from: IVec2, reachable: &mut [bool]) {
    let w = grid.width() as i32;
    let h = grid.height() as i32;

    let mut queue = VecDeque::new();
    reachable[(from.y * w + from.x) as usize] = true;
    queue.push_back(from);

    while let Some(p) = queue.pop_front() {
        for (dx, dy) in CARDINALS {
            let (nx, ny) = (p.x + dx, p.y + dy);
            if nx < 1 || ny < 1 || nx >= w - 1 || ny >= h - 1 {
                continue;
            }
            let i = (ny * w + nx) as usize;
            if !reachable[i] && grid.get(nx, ny).is_walkable() {
                reachable[i] = true;
                queue.push_back(IVec2::new(nx, ny));
            }
        }
    }
}

/// Step from an orphan toward the start cell, opening every blocked cell on
/// the way. Each step moves along the axis with the greater remaining
/// offset (ties go to x), so the walk is bounded by width + height steps.
fn bridge_toward_start(
    grid: &mut TileGrid,
    from: IVec2,
    start: IVec2,
    reachable: &mut [bool],
) -> usize {
    let w = grid.width() as i32;
    let max_steps = grid.width() + grid.height();
    let mut carved = 0usize;
    let mut p = from;
    reachable[(p.y * w + p.x) as usize] = true;

    for _ in 0..max_steps {
        if p == start {
            break;
        }
        let dx = start.x - p.x;
        let dy = start.y - p.y;
        p += if dx.abs() >= dy.abs() {
            IVec2::new(dx.signum(), 0)
        } else {
            IVec2::new(0, dy.signum())
        };

        if reachable[(p.y * w + p.x) as usize] {
            break; // landed on the main component
        }
        if !grid.get(p.x, p.y).is_walkable() {
            grid.set(p.x, p.y, TileKind::Pore);
            carved += 1;
        }
        reachable[(p.y * w + p.x) as usize] = true;
    }

    carved
}

/// Guarantee a reachable walkable cell in the rightmost interior column so
/// an outlet can always be placed; force-carves along the vertical midline
/// when the column is dead
fn ensure_right_edge(
    grid: &mut TileGrid,
    start: IVec2,
    reachable: &mut [bool],
    carved: &mut usize,
) {
    let w = grid.width() as i32;
    let h = grid.height() as i32;
    let edge_x = w - 2;

    if (1..h - 1).any(|y| reachable[(y * w + edge_x) as usize]) {
        return;
    }

    let y = h / 2;
    let mut x = edge_x;
    let mut connected = false;
    while x >= 1 {
        if reachable[(y * w + x) as usize] {
            connected = true;
            break;
        }
        if !grid.get(x, y).is_walkable() {
            grid.set(x, y, TileKind::Pore);
            *carved += 1;
        }
        reachable[(y * w + x) as usize] = true;
        x -= 1;
    }

    if !connected {
        // The midline never crossed the start component; bridge it home
        *carved += bridge_from_marked(grid, IVec2::new(1, y), start, reachable);
    }
}

/// Bridge variant for a cell that is already marked reachable
fn bridge_from_marked(
    grid: &mut TileGrid,
    from: IVec2,
    start: IVec2,
    reachable: &mut [bool],
) -> usize {
    let w = grid.width() as i32;
    let max_steps = grid.width() + grid.height();
    let mut carved = 0usize;
    let mut p = from;

    for _ in 0..max_steps {
        if p == start {
            break;
        }
        let dx = start.x - p.x;
        let dy = start.y - p.y;
        p += if dx.abs() >= dy.abs() {
            IVec2::new(dx.signum(), 0)
        } else {
            IVec2::new(0, dy.signum())
        };

        let i = (p.y * w + p.x) as usize;
        if reachable[i] && grid.get(p.x, p.y).is_walkable() {
            break;
        }
        if !grid.get(p.x, p.y).is_walkable() {
            grid.set(p.x, p.y, TileKind::Pore);
            carved += 1;
        }
        reachable[i] = true;
    }

    carved
}
