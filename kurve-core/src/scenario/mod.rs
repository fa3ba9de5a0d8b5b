pub mod compiler;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, LayoutError};
use crate::layout::{LayoutOverrides, MemoryLayout};
use crate::player::PlayerId;

pub use compiler::{
    compile, dump_program, raw_from_conventional, scanmem_program, sequence, Direction, Placement,
};

/// One player of a scenario file.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerEntry {
    pub player: PlayerId,
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub direction: Direction,
}

impl PlayerEntry {
    pub fn placement(&self) -> Placement {
        Placement {
            x: self.x,
            y: self.y,
            direction: self.direction,
        }
    }
}

/// A test scenario, usually read from a toml file:
///
/// ```toml
/// [layout]
/// base_address = 0x7fffd8010ff6
///
/// [[players]]
/// player = "Red"
/// x = 50
/// y = 50
/// direction = { conventional = 0 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Layered over the configured layout; fields left out keep their configured value.
    #[serde(default)]
    pub layout: LayoutOverrides,
    #[serde(default)]
    pub players: Vec<PlayerEntry>,
}

impl Default for Scenario {
    /// Three players lined up on the left edge, all heading the same way.
    fn default() -> Self {
        let entry = |player, y| PlayerEntry {
            player,
            x: 50.0,
            y,
            direction: Direction::Conventional(0.0),
        };

        Self {
            layout: LayoutOverrides::default(),
            players: vec![
                entry(PlayerId::Red, 50.0),
                entry(PlayerId::Yellow, 100.0),
                entry(PlayerId::Green, 150.0),
            ],
        }
    }
}

impl Scenario {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let scenario: Scenario = toml::from_str(content)?;
        log::info!("loaded scenario with {} players", scenario.players.len());
        Ok(scenario)
    }

    /// `configured` with the layout fields of the scenario applied.
    pub fn layout_over(&self, configured: MemoryLayout) -> Result<MemoryLayout, LayoutError> {
        self.layout.apply(configured)
    }

    pub fn placements(&self) -> Vec<(PlayerId, Placement)> {
        self.players
            .iter()
            .map(|entry| (entry.player, entry.placement()))
            .collect()
    }

    pub fn compile(&self, layout: &MemoryLayout) -> String {
        compile(layout, &self.placements())
    }
}
