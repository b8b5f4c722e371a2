//! Built-in campaign levels and level selection

use crate::levels::{LevelDefinition, LevelError};
use crate::world::{Environment, EnvironmentRegistry, World};

/// A named entry in the campaign progression
pub struct CampaignLevel {
    pub id: usize,
    pub name: &'static str,
    pub description: &'static str,
    pub def: LevelDefinition,
}

/// Manages level selection and switching
pub struct LevelManager {
    levels: Vec<CampaignLevel>,
    current_level: usize,
}

impl LevelManager {
    /// Create a new level manager with the built-in campaign
    pub fn new() -> Self {
        let environments = EnvironmentRegistry::new();
        let sandy = environments.get(Environment::SandyAquifer).default_base_speed;
        let clay = environments.get(Environment::ClayLabyrinth).default_base_speed;
        let seep = environments.get(Environment::ToxicSeep).default_base_speed;
        let vent = environments.get(Environment::VentChannel).default_base_speed;

        let levels = vec![
            CampaignLevel {
                id: 0,
                name: "Sandy Shallows",
                description: "Open grain packing with gentle seepage",
                def: LevelDefinition {
                    width: 48,
                    height: 32,
                    target_porosity: 0.65,
                    grain_size: (1, 2),
                    environment_index: 0,
                    colony_goal: 15,
                    substrate_density: 0.40,
                    base_flow_speed: sandy,
                },
            },
            CampaignLevel {
                id: 1,
                name: "Packed Beds",
                description: "Coarser grains, tighter throats",
                def: LevelDefinition {
                    width: 64,
                    height: 40,
                    target_porosity: 0.55,
                    grain_size: (1, 3),
                    environment_index: 0,
                    colony_goal: 25,
                    substrate_density: 0.35,
                    base_flow_speed: sandy,
                },
            },
            CampaignLevel {
                id: 2,
                name: "Clay Maze",
                description: "Labyrinthine passages through dense sediment",
                def: LevelDefinition {
                    width: 64,
                    height: 48,
                    target_porosity: 0.40,
                    grain_size: (1, 2),
                    environment_index: 1,
                    colony_goal: 30,
                    substrate_density: 0.30,
                    base_flow_speed: clay,
                },
            },
            CampaignLevel {
                id: 3,
                name: "Deep Sediment",
                description: "A larger labyrinth with scarcer substrate",
                def: LevelDefinition {
                    width: 80,
                    height: 56,
                    target_porosity: 0.38,
                    grain_size: (1, 2),
                    environment_index: 1,
                    colony_goal: 40,
                    substrate_density: 0.22,
                    base_flow_speed: clay,
                },
            },
            CampaignLevel {
                id: 4,
                name: "Methane Seep",
                description: "Sandy ground cut by contaminated veins",
                def: LevelDefinition {
                    width: 72,
                    height: 48,
                    target_porosity: 0.58,
                    grain_size: (1, 2),
                    environment_index: 2,
                    colony_goal: 35,
                    substrate_density: 0.30,
                    base_flow_speed: seep,
                },
            },
            CampaignLevel {
                id: 5,
                name: "Seep Margins",
                description: "Denser veins, richer substrate at the fringes",
                def: LevelDefinition {
                    width: 80,
                    height: 56,
                    target_porosity: 0.52,
                    grain_size: (1, 3),
                    environment_index: 2,
                    colony_goal: 45,
                    substrate_density: 0.35,
                    base_flow_speed: seep,
                },
            },
            CampaignLevel {
                id: 6,
                name: "Vent Garden",
                description: "Fast channels between warm chambers",
                def: LevelDefinition {
                    width: 80,
                    height: 48,
                    target_porosity: 0.45,
                    grain_size: (1, 2),
                    environment_index: 3,
                    colony_goal: 50,
                    substrate_density: 0.28,
                    base_flow_speed: vent,
                },
            },
            CampaignLevel {
                id: 7,
                name: "The Outflow",
                description: "The strongest currents in the campaign",
                def: LevelDefinition {
                    width: 96,
                    height: 56,
                    target_porosity: 0.42,
                    grain_size: (1, 2),
                    environment_index: 3,
                    colony_goal: 60,
                    substrate_density: 0.25,
                    base_flow_speed: vent * 1.15,
                },
            },
        ];

        Self {
            levels,
            current_level: 0,
        }
    }

    /// Get current level name
    pub fn current_level_name(&self) -> &str {
        self.levels[self.current_level].name
    }

    /// Get current level index
    pub fn current_level(&self) -> usize {
        self.current_level
    }

    /// Get all level definitions
    pub fn levels(&self) -> &[CampaignLevel] {
        &self.levels
    }

    /// Select a specific level by ID
    pub fn select_level(&mut self, level_id: usize) {
        if level_id < self.levels.len() {
            self.current_level = level_id;
            log::info!("Selected level {}: {}", level_id, self.current_level_name());
        } else {
            log::warn!("Invalid level ID: {}", level_id);
        }
    }

    /// Switch to the next level
    pub fn next_level(&mut self) {
        self.current_level = (self.current_level + 1) % self.levels.len();
        log::info!(
            "Switched to level {}: {}",
            self.current_level,
            self.current_level_name()
        );
    }

    /// Switch to the previous level
    pub fn prev_level(&mut self) {
        if self.current_level == 0 {
            self.current_level = self.levels.len() - 1;
        } else {
            self.current_level -= 1;
        }
        log::info!(
            "Switched to level {}: {}",
            self.current_level,
            self.current_level_name()
        );
    }

    /// Generate a fresh world for the current level
    pub fn generate_current(&self) -> Result<World, LevelError> {
        World::generate(&self.levels[self.current_level].def)
    }
}

impl Default for LevelManager {
    fn default() -> Self {
        Self::new()
    }
}
