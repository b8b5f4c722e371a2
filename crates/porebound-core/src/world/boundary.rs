//! Border enforcement and inlet/outlet placement

use glam::IVec2;
use porebound_simulation::TileKind;

use super::grid::TileGrid;

/// Force the outermost ring of rows and columns to solid (idempotent;
/// some generators already satisfy this)
pub fn enforce_border(grid: &mut TileGrid) {
    let w = grid.width() as i32;
    let h = grid.height() as i32;

    for x in 0..w {
        grid.set(x, 0, TileKind::Solid);
        grid.set(x, h - 1, TileKind::Solid);
    }
    for y in 0..h {
        grid.set(0, y, TileKind::Solid);
        grid.set(w - 1, y, TileKind::Solid);
    }
}

/// Mark the upstream-most walkable cell as `Inlet` and the downstream-most
/// as `Outlet`. Must run after connectivity repair so both are reachable.
pub fn place_inlet_outlet(grid: &mut TileGrid) -> (IVec2, IVec2) {
    let w = grid.width() as i32;
    let h = grid.height() as i32;

    let inlet = first_walkable_scanning(grid, 1..w - 1, None).unwrap_or_else(|| {
        // Cannot happen once repair has run; fall back to the repair start
        debug_assert!(false, "inlet scan found no walkable cell");
        IVec2::new(2, h / 2)
    });

    let outlet = first_walkable_scanning(grid, (1..w - 1).rev(), Some(inlet)).unwrap_or_else(|| {
        debug_assert!(false, "outlet scan found no walkable cell");
        IVec2::new(w - 3, h / 2)
    });

    grid.set(inlet.x, inlet.y, TileKind::Inlet);
    grid.set(outlet.x, outlet.y, TileKind::Outlet);
    (inlet, outlet)
}

/// First walkable interior cell scanning whole columns in the given x order
fn first_walkable_scanning(
    grid: &TileGrid,
    columns: impl Iterator<Item = i32>,
    skip: Option<IVec2>,
) -> Option<IVec2> {
    let h = grid.height() as i32;
    for x in columns {
        for y in 1..h - 1 {
            let p = IVec2::new(x, y);
            if skip == Some(p) {
                continue;
            }
            if grid.get(x, y).is_walkable() {
                return Some(p);
            }
        }
    }
    None
}
