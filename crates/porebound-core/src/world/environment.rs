//! Environment system for level-specific terrain character

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Types of pore-scale environments a level can take place in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Environment {
    /// Open sandy aquifer, disk-packed grains
    SandyAquifer,
    /// Tight clay labyrinth, carved maze passages
    ClayLabyrinth,
    /// Contaminated seep, sandy base threaded with toxic veins
    ToxicSeep,
    /// Hydrothermal vent field, fast horizontal channels
    VentChannel,
}

impl Environment {
    /// Number of distinct environments
    pub const COUNT: u32 = 4;

    /// Map a level's environment index onto an environment (wraps)
    pub fn from_index(index: u32) -> Self {
        match index % Self::COUNT {
            0 => Environment::SandyAquifer,
            1 => Environment::ClayLabyrinth,
            2 => Environment::ToxicSeep,
            _ => Environment::VentChannel,
        }
    }

    /// Canonical index of this environment
    pub fn index(self) -> u32 {
        match self {
            Environment::SandyAquifer => 0,
            Environment::ClayLabyrinth => 1,
            Environment::ToxicSeep => 2,
            Environment::VentChannel => 3,
        }
    }
}

/// Defines the terrain character of an environment
#[derive(Debug, Clone)]
pub struct EnvironmentDefinition {
    pub name: &'static str,
    pub environment: Environment,

    /// Advection strength used when the level table does not override it
    pub default_base_speed: f32,

    /// Whether the generator threads toxic veins through the pore space
    pub has_toxic_veins: bool,
}

impl EnvironmentDefinition {
    fn sandy_aquifer() -> Self {
        Self {
            name: "Sandy Aquifer",
            environment: Environment::SandyAquifer,
            default_base_speed: 1.0,
            has_toxic_veins: false,
        }
    }

    fn clay_labyrinth() -> Self {
        Self {
            name: "Clay Labyrinth",
            environment: Environment::ClayLabyrinth,
            default_base_speed: 0.6, // Tight passages, sluggish seepage
            has_toxic_veins: false,
        }
    }

    fn toxic_seep() -> Self {
        Self {
            name: "Toxic Seep",
            environment: Environment::ToxicSeep,
            default_base_speed: 0.8,
            has_toxic_veins: true,
        }
    }

    fn vent_channel() -> Self {
        Self {
            name: "Vent Channel",
            environment: Environment::VentChannel,
            default_base_speed: 1.6, // Main channels run hot and fast
            has_toxic_veins: false,
        }
    }
}

/// Registry of all environment definitions
pub struct EnvironmentRegistry {
    definitions: HashMap<Environment, EnvironmentDefinition>,
}

impl EnvironmentRegistry {
    pub fn new() -> Self {
        let mut definitions = HashMap::new();
        definitions.insert(
            Environment::SandyAquifer,
            EnvironmentDefinition::sandy_aquifer(),
        );
        definitions.insert(
            Environment::ClayLabyrinth,
            EnvironmentDefinition::clay_labyrinth(),
        );
        definitions.insert(Environment::ToxicSeep, EnvironmentDefinition::toxic_seep());
        definitions.insert(
            Environment::VentChannel,
            EnvironmentDefinition::vent_channel(),
        );
        Self { definitions }
    }

    pub fn get(&self, environment: Environment) -> &EnvironmentDefinition {
        &self.definitions[&environment]
    }
}

impl Default for EnvironmentRegistry {
    fn default() -> Self {
        Self::new()
    }
}
