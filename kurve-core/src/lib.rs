//! This crate implements the core functionality of the kurve tools
//!
//! This mostly includes the memory layout of the player arrays in the running game,
//! the scenario compiler producing scanmem programs, and the decoder for scanmem dumps.

#![allow(clippy::uninlined_format_args)]

pub mod config;
pub mod dump;
pub mod error;
pub mod layout;
pub mod player;
pub mod scanmem;
pub mod scenario;

pub use error::{ConfigError, DumpError, LayoutError, ScanmemError};
pub use layout::{ArrayOrder, Field, LayoutOverrides, MemoryLayout};
pub use player::{PlayerId, PlayerState, NUMBER_OF_PLAYERS};
