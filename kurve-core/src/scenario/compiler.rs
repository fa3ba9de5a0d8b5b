//! Builders for scanmem programs that put players where a scenario wants them.
//!
//! Every instruction is a plain string in scanmem syntax. A program is the
//! instructions joined with `;`, wrapped in [`SETUP_COMMANDS`] and [`TEARDOWN_COMMANDS`].

use std::f32::consts::FRAC_PI_2;

use serde::{Deserialize, Serialize};

use crate::layout::{Field, MemoryLayout};
use crate::player::{PlayerId, PlayerState};

/// The game stores floats little-endian.
pub const SETUP_COMMANDS: &[&str] = &["option endianness 1"];

pub const TEARDOWN_COMMANDS: &[&str] = &["exit"];

/// Converts a screen-relative angle into the angle the game keeps in memory.
///
/// The game measures directions a quarter turn away from the convention scenarios are written in.
pub fn raw_from_conventional(conventional_direction: f32) -> f32 {
    conventional_direction + FRAC_PI_2
}

/// A facing angle in radians, in one of the two conventions.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// As stored in memory.
    Raw(f32),
    /// Screen-relative, see [`raw_from_conventional`].
    Conventional(f32),
}

impl Direction {
    pub fn raw(self) -> f32 {
        match self {
            Direction::Raw(raw) => raw,
            Direction::Conventional(conventional) => raw_from_conventional(conventional),
        }
    }
}

impl Default for Direction {
    fn default() -> Self {
        Direction::Conventional(0.0)
    }
}

/// Where a scenario puts a player.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Placement {
    pub x: f32,
    pub y: f32,
    pub direction: Direction,
}

impl Placement {
    pub fn conventional(x: f32, y: f32, direction: f32) -> Self {
        Self {
            x,
            y,
            direction: Direction::Conventional(direction),
        }
    }

    pub fn to_state(self) -> PlayerState {
        PlayerState::new(self.x, self.y, self.direction.raw())
    }
}

impl From<PlayerState> for Placement {
    fn from(state: PlayerState) -> Self {
        Self {
            x: state.x,
            y: state.y,
            direction: Direction::Raw(state.direction),
        }
    }
}

pub fn write_float32(address: u64, value: f32) -> String {
    format!("write float32 {:#x} {}", address, value)
}

pub fn set_x(layout: &MemoryLayout, player: PlayerId, x: f32) -> String {
    write_float32(layout.address(Field::X, player), x)
}

pub fn set_y(layout: &MemoryLayout, player: PlayerId, y: f32) -> String {
    write_float32(layout.address(Field::Y, player), y)
}

pub fn set_position(layout: &MemoryLayout, player: PlayerId, x: f32, y: f32) -> String {
    sequence([set_x(layout, player, x), set_y(layout, player, y)])
}

pub fn set_direction_raw(layout: &MemoryLayout, player: PlayerId, direction: f32) -> String {
    write_float32(layout.address(Field::Direction, player), direction)
}

pub fn set_direction_conventional(
    layout: &MemoryLayout,
    player: PlayerId,
    conventional_direction: f32,
) -> String {
    set_direction_raw(layout, player, raw_from_conventional(conventional_direction))
}

pub fn set_placement(layout: &MemoryLayout, player: PlayerId, placement: Placement) -> String {
    sequence([
        set_position(layout, player, placement.x, placement.y),
        set_direction_raw(layout, player, placement.direction.raw()),
    ])
}

pub fn sequence<I, S>(commands: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut program = String::new();
    for command in commands {
        if !program.is_empty() {
            program.push(';');
        }
        program.push_str(command.as_ref());
    }
    program
}

/// Wraps scenario commands into a complete program for `scanmem --command`.
pub fn scanmem_program<I, S>(scenario_commands: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let scenario = sequence(scenario_commands);

    let mut commands: Vec<&str> = SETUP_COMMANDS.to_vec();
    if !scenario.is_empty() {
        commands.push(&scenario);
    }
    commands.extend_from_slice(TEARDOWN_COMMANDS);
    sequence(commands)
}

/// Compiles player placements, in the given order, into a scanmem program.
///
/// Values are not validated; any float is written as given.
pub fn compile<P>(layout: &MemoryLayout, players: &[(PlayerId, P)]) -> String
where
    P: Into<Placement> + Copy,
{
    let program = scanmem_program(
        players
            .iter()
            .map(|(player, placement)| set_placement(layout, *player, (*placement).into())),
    );
    log::debug!(
        "compiled {} players into {} bytes of scanmem program",
        players.len(),
        program.len()
    );
    program
}

/// A program that prints the player arrays, for the strict dump parser.
pub fn dump_program(layout: &MemoryLayout) -> String {
    scanmem_program([format!(
        "dump {:#x} {}",
        layout.base_address(),
        layout.region_len()
    )])
}
