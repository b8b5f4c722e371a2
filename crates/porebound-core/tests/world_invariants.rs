//! End-to-end invariants of the generation pipeline

use glam::IVec2;
use porebound_core::levels::LevelDefinition;
use porebound_core::world::{connectivity, Environment, FlowField, TileGrid, World};
use porebound_core::{Direction, TileKind};
use proptest::prelude::*;

fn level(width: usize, height: usize, environment_index: u32) -> LevelDefinition {
    LevelDefinition {
        width,
        height,
        target_porosity: 0.55,
        grain_size: (1, 2),
        environment_index,
        colony_goal: 25,
        substrate_density: 0.3,
        base_flow_speed: 1.0,
    }
}

#[test]
fn border_ring_is_solid_for_every_environment() {
    for env in 0..Environment::COUNT {
        let world = World::generate(&level(40, 28, env)).unwrap();
        let (w, h) = (world.width() as i32, world.height() as i32);

        for x in 0..w {
            assert_eq!(world.get_tile(x, 0), TileKind::Solid);
            assert_eq!(world.get_tile(x, h - 1), TileKind::Solid);
        }
        for y in 0..h {
            assert_eq!(world.get_tile(0, y), TileKind::Solid);
            assert_eq!(world.get_tile(w - 1, y), TileKind::Solid);
        }
    }
}

#[test]
fn walkable_cells_form_one_component() {
    for env in 0..Environment::COUNT {
        let world = World::generate(&level(48, 32, env)).unwrap();
        assert!(
            connectivity::is_fully_connected(world.grid()),
            "environment {} world is disconnected",
            env
        );
    }
}

#[test]
fn exactly_one_inlet_and_one_outlet() {
    for env in 0..Environment::COUNT {
        let world = World::generate(&level(48, 32, env)).unwrap();

        assert_eq!(world.grid().count(TileKind::Inlet), 1);
        assert_eq!(world.grid().count(TileKind::Outlet), 1);

        let start = world.find_start_position();
        let exit = world.find_exit_position();
        assert_eq!(world.get_tile(start.x, start.y), TileKind::Inlet);
        assert_eq!(world.get_tile(exit.x, exit.y), TileKind::Outlet);
        // Both walkable and in one component, so mutually reachable
        assert!(world.get_tile(start.x, start.y).is_walkable());
        assert!(world.get_tile(exit.x, exit.y).is_walkable());
    }
}

#[test]
fn identical_levels_regenerate_identical_worlds() {
    for env in 0..Environment::COUNT {
        let def = level(44, 30, env);
        let a = World::generate(&def).unwrap();
        let b = World::generate(&def).unwrap();

        assert!(a.grid() == b.grid(), "tile grids differ (env {})", env);
        assert!(a.flow() == b.flow(), "flow fields differ (env {})", env);
        assert!(
            a.distance_field() == b.distance_field(),
            "distance fields differ (env {})",
            env
        );
    }
}

#[test]
fn distance_is_zero_exactly_on_solid() {
    for env in 0..Environment::COUNT {
        let world = World::generate(&level(40, 28, env)).unwrap();

        for y in 0..world.height() as i32 {
            for x in 0..world.width() as i32 {
                let solid = world.get_tile(x, y).is_solid();
                assert_eq!(
                    world.get_distance(x, y) == 0,
                    solid,
                    "cell ({}, {}) in environment {}",
                    x,
                    y,
                    env
                );
            }
        }
    }
}

/// Straight-corridor scenario: a 10x3 border-solid grid with an all-pore
/// interior must flow uniformly right, except possibly the rightmost
/// interior column
#[test]
fn straight_corridor_flows_right() {
    let mut grid = TileGrid::new_solid(10, 3);
    for x in 1..9 {
        grid.set(x, 1, TileKind::Pore);
    }

    let field = FlowField::solve(&grid, 1.0);
    let reference_speed = field.speed(1, 1);
    assert!(reference_speed > 0.0);

    for x in 1..=7 {
        assert_eq!(field.direction(x, 1), Direction::Right, "cell ({}, 1)", x);
        assert!(
            (field.speed(x, 1) - reference_speed).abs() < 1e-4,
            "speed not uniform at ({}, 1)",
            x
        );
    }
}

/// Forced-repair scenario: a pore sealed off from the main region must be
/// reachable from the start cell after the repairer runs
#[test]
fn forced_repair_reconnects_sealed_pore() {
    let mut grid = TileGrid::new_solid(20, 14);
    for y in 2..12 {
        for x in 2..8 {
            grid.set(x, y, TileKind::Pore);
        }
    }
    let sealed = IVec2::new(16, 10);
    grid.set(sealed.x, sealed.y, TileKind::Pore);
    assert!(!connectivity::is_fully_connected(&grid));

    let report = connectivity::repair(&mut grid);
    assert!(grid.get(report.start.x, report.start.y).is_walkable());
    assert!(grid.get(sealed.x, sealed.y).is_walkable());
    assert!(connectivity::is_fully_connected(&grid));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn generated_worlds_hold_every_invariant(
        width in 12usize..=48,
        height in 12usize..=36,
        target_porosity in 0.3f32..0.8,
        environment_index in 0u32..8,
        colony_goal in 1u32..120,
        base_flow_speed in 0.2f32..2.0,
    ) {
        let def = LevelDefinition {
            width,
            height,
            target_porosity,
            grain_size: (1, 2),
            environment_index,
            colony_goal,
            substrate_density: 0.3,
            base_flow_speed,
        };
        let world = World::generate(&def).unwrap();

        // One walkable component
        prop_assert!(connectivity::is_fully_connected(world.grid()));

        // Solid border ring
        let (w, h) = (width as i32, height as i32);
        for x in 0..w {
            prop_assert_eq!(world.get_tile(x, 0), TileKind::Solid);
            prop_assert_eq!(world.get_tile(x, h - 1), TileKind::Solid);
        }
        for y in 0..h {
            prop_assert_eq!(world.get_tile(0, y), TileKind::Solid);
            prop_assert_eq!(world.get_tile(w - 1, y), TileKind::Solid);
        }

        // Exactly one inlet and one outlet
        prop_assert_eq!(world.grid().count(TileKind::Inlet), 1);
        prop_assert_eq!(world.grid().count(TileKind::Outlet), 1);

        // Flow bounds: speeds within [0, cap]; no speed without a direction
        for y in 0..h {
            for x in 0..w {
                let (dir, speed) = world.get_flow(x, y);
                prop_assert!(speed >= 0.0);
                prop_assert!(speed <= 3.0 * base_flow_speed + 1e-4);
                if dir == Direction::None {
                    prop_assert_eq!(speed, 0.0);
                }

                // Distance transform: zero exactly on solid
                let solid = world.get_tile(x, y).is_solid();
                prop_assert_eq!(world.get_distance(x, y) == 0, solid);
            }
        }
    }
}
