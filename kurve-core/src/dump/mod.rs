//! Decoding scanmem dumps of the player arrays.

pub mod arrow;
pub mod decoder;
pub mod parser;
pub mod render;

use crate::error::Result;
use crate::layout::MemoryLayout;
use crate::player::{PlayerId, PlayerState};

pub use arrow::{arrow_for_direction, arrow_sector, ARROWS};
pub use decoder::{decode, encode, read_values, VALUES_PER_DUMP};
pub use parser::{parse, parse_lenient, parse_strict, ParseMode, DUMP_MARKER};
pub use render::{render, render_to, TableStyle};

/// Parses captured scanmem output and decodes the player arrays in it.
pub fn decode_text(
    text: &str,
    mode: ParseMode,
    layout: &MemoryLayout,
) -> Result<Vec<(PlayerId, PlayerState)>> {
    let raw = parse(text, mode)?;
    decode(&raw, layout)
}
