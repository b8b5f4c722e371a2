//! World - the immutable-after-construction snapshot one level plays in
//!
//! `generate` runs the fixed pipeline: one environment generator, the
//! connectivity repairer, border and inlet/outlet placement, the flow
//! solver, and the distance transform. Consumers only read the result;
//! the single sanctioned external write is colony placement via
//! `set_tile`.

use glam::IVec2;
use porebound_simulation::{Direction, TileKind};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::boundary;
use super::connectivity;
use super::distance_field::DistanceField;
use super::environment::{Environment, EnvironmentRegistry};
use super::flow_field::FlowField;
use super::generation::WorldGenerator;
use super::grid::TileGrid;
use super::rng::GenRng;
use crate::levels::{LevelDefinition, LevelError};

/// Aggregate counts for HUD/minimap collaborators
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldStats {
    /// Achieved open-space fraction (the target is only approximate)
    pub porosity: f32,
    pub walkable_cells: usize,
    pub toxic_cells: usize,
    pub fast_flow_cells: usize,
    /// Cells the repair pass had to open
    pub repair_carves: usize,
}

/// One generated level: tile grid plus derived fields and metadata
pub struct World {
    environment: Environment,
    grid: TileGrid,
    flow: FlowField,
    distance: DistanceField,
    inlet: IVec2,
    outlet: IVec2,
    stats: WorldStats,
}

impl World {
    /// Run the full generation pipeline for one level definition.
    /// Deterministic: the seed derives from the level parameters, so the
    /// same definition always yields an identical world.
    pub fn generate(level: &LevelDefinition) -> Result<Self, LevelError> {
        level.validate()?;

        let environment = Environment::from_index(level.environment_index);
        let registry = EnvironmentRegistry::new();
        let definition = registry.get(environment);

        let seed = GenRng::seed_for_level(
            level.environment_index,
            level.colony_goal,
            level.width,
            level.height,
        );
        let mut rng = GenRng::from_seed(seed);

        let mut grid = TileGrid::new_solid(level.width, level.height);
        WorldGenerator::new(level, definition).run(&mut grid, &mut rng);
        log::debug!("terrain pass done, raw porosity {:.2}", grid.porosity());

        let report = connectivity::repair(&mut grid);
        log::debug!(
            "connectivity repair opened {} cells from start {:?}",
            report.carved,
            report.start
        );

        boundary::enforce_border(&mut grid);
        let (inlet, outlet) = boundary::place_inlet_outlet(&mut grid);

        let flow = FlowField::solve(&grid, level.base_flow_speed);
        let distance = DistanceField::compute(&grid);

        debug_assert!(
            connectivity::is_fully_connected(&grid),
            "generated world has a disconnected walkable region"
        );

        let stats = WorldStats {
            porosity: grid.porosity(),
            walkable_cells: grid
                .tiles()
                .iter()
                .filter(|t| t.is_walkable())
                .count(),
            toxic_cells: grid.count(TileKind::Toxic),
            fast_flow_cells: grid.count(TileKind::FastFlow),
            repair_carves: report.carved,
        };

        log::info!(
            "Generated {}x{} {} world: porosity {:.1}%, {} repair carves, inlet ({}, {}), outlet ({}, {})",
            level.width,
            level.height,
            definition.name,
            stats.porosity * 100.0,
            stats.repair_carves,
            inlet.x,
            inlet.y,
            outlet.x,
            outlet.y
        );

        Ok(Self {
            environment,
            grid,
            flow,
            distance,
            inlet,
            outlet,
            stats,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.grid.width()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn stats(&self) -> &WorldStats {
        &self.stats
    }

    /// Achieved open-space fraction
    pub fn porosity(&self) -> f32 {
        self.stats.porosity
    }

    /// Tile at (x, y); out of bounds reads as `Solid`
    #[inline]
    pub fn get_tile(&self, x: i32, y: i32) -> TileKind {
        self.grid.get(x, y)
    }

    /// The entity layer's colony-placement write: converts one walkable
    /// cell to `Biofilm`. Bounds-checked no-op out of range; any other
    /// use is a caller bug.
    pub fn set_tile(&mut self, x: i32, y: i32, kind: TileKind) {
        if !self.grid.in_bounds(x, y) {
            return;
        }
        let current = self.grid.get(x, y);
        if kind != TileKind::Biofilm || !current.is_walkable() {
            debug_assert!(
                false,
                "set_tile may only convert a walkable cell to Biofilm, got {:?} -> {:?} at ({}, {})",
                current, kind, x, y
            );
            log::warn!(
                "rejected set_tile({}, {}, {:?}) on {:?} cell",
                x,
                y,
                kind,
                current
            );
            return;
        }
        self.grid.set(x, y, kind);
    }

    /// Advection cue at (x, y); out of bounds reads as no flow
    #[inline]
    pub fn get_flow(&self, x: i32, y: i32) -> (Direction, f32) {
        self.flow.get(x, y)
    }

    /// Distance to the nearest solid cell; out of bounds reads as 0
    #[inline]
    pub fn get_distance(&self, x: i32, y: i32) -> u32 {
        self.distance.get(x, y)
    }

    /// Where entities enter the level
    pub fn find_start_position(&self) -> IVec2 {
        self.inlet
    }

    /// Where the level is cleared
    pub fn find_exit_position(&self) -> IVec2 {
        self.outlet
    }

    /// Cardinal neighbors that are open pore space (`Pore`, `FastFlow`,
    /// `Inlet`)
    pub fn get_adjacent_pores(&self, x: i32, y: i32) -> SmallVec<[IVec2; 4]> {
        self.grid.adjacent_pores(x, y)
    }

    /// The walkable cell farthest from any solid wall; colony placement
    /// biases toward it. First best in row-major order, so deterministic.
    pub fn most_open_walkable(&self) -> IVec2 {
        let mut best = self.inlet;
        let mut best_distance = self.distance.get(best.x, best.y);

        for y in 0..self.grid.height() as i32 {
            for x in 0..self.grid.width() as i32 {
                if self.grid.get(x, y).is_walkable() {
                    let d = self.distance.get(x, y);
                    if d > best_distance {
                        best_distance = d;
                        best = IVec2::new(x, y);
                    }
                }
            }
        }
        best
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn flow(&self) -> &FlowField {
        &self.flow
    }

    pub fn distance_field(&self) -> &DistanceField {
        &self.distance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(environment_index: u32) -> LevelDefinition {
        LevelDefinition {
            width: 48,
            height: 32,
            target_porosity: 0.6,
            grain_size: (1, 2),
            environment_index,
            colony_goal: 20,
            substrate_density: 0.3,
            base_flow_speed: 1.0,
        }
    }

    #[test]
    fn test_generate_rejects_invalid_levels() {
        let mut bad = level(0);
        bad.width = 3;
        assert!(World::generate(&bad).is_err());
    }

    #[test]
    fn test_generated_world_basic_invariants() {
        for env in 0..Environment::COUNT {
            let world = World::generate(&level(env)).unwrap();

            assert!(connectivity::is_fully_connected(world.grid()));
            assert_eq!(world.grid().count(TileKind::Inlet), 1);
            assert_eq!(world.grid().count(TileKind::Outlet), 1);
            assert!(world.stats().walkable_cells > 0);
        }
    }

    #[test]
    fn test_out_of_bounds_reads() {
        let world = World::generate(&level(0)).unwrap();

        assert_eq!(world.get_tile(-1, 5), TileKind::Solid);
        assert_eq!(world.get_tile(5, 200), TileKind::Solid);
        assert_eq!(world.get_flow(-3, 0), (Direction::None, 0.0));
        assert_eq!(world.get_distance(99, -1), 0);
    }

    #[test]
    fn test_start_and_exit_are_walkable_and_distinct() {
        let world = World::generate(&level(1)).unwrap();

        let start = world.find_start_position();
        let exit = world.find_exit_position();
        assert_ne!(start, exit);
        assert_eq!(world.get_tile(start.x, start.y), TileKind::Inlet);
        assert_eq!(world.get_tile(exit.x, exit.y), TileKind::Outlet);
    }

    #[test]
    fn test_biofilm_placement_preserves_connectivity() {
        let mut world = World::generate(&level(0)).unwrap();

        // Pick some walkable pore cell
        let mut target = None;
        'scan: for y in 1..world.height() as i32 - 1 {
            for x in 1..world.width() as i32 - 1 {
                if world.get_tile(x, y) == TileKind::Pore {
                    target = Some(IVec2::new(x, y));
                    break 'scan;
                }
            }
        }
        let target = target.expect("generated world has a pore cell");

        world.set_tile(target.x, target.y, TileKind::Biofilm);
        assert_eq!(world.get_tile(target.x, target.y), TileKind::Biofilm);
        assert!(connectivity::is_fully_connected(world.grid()));
    }

    #[test]
    fn test_set_tile_out_of_bounds_is_noop() {
        let mut world = World::generate(&level(0)).unwrap();
        let before = world.grid().clone();

        world.set_tile(-1, 4, TileKind::Biofilm);
        world.set_tile(4, 9999, TileKind::Biofilm);
        assert!(*world.grid() == before);
    }

    #[test]
    fn test_most_open_walkable_maximizes_wall_distance() {
        let world = World::generate(&level(0)).unwrap();
        let open = world.most_open_walkable();

        assert!(world.get_tile(open.x, open.y).is_walkable());
        let best = world.get_distance(open.x, open.y);
        for y in 0..world.height() as i32 {
            for x in 0..world.width() as i32 {
                if world.get_tile(x, y).is_walkable() {
                    assert!(world.get_distance(x, y) <= best);
                }
            }
        }
    }

    #[test]
    fn test_adjacent_pores_around_inlet() {
        let world = World::generate(&level(0)).unwrap();
        let start = world.find_start_position();

        let pores = world.get_adjacent_pores(start.x, start.y);
        assert!(pores.len() <= 4);
        for p in &pores {
            assert!(matches!(
                world.get_tile(p.x, p.y),
                TileKind::Pore | TileKind::FastFlow | TileKind::Inlet
            ));
        }
    }
}
