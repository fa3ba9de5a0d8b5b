use itertools::izip;

use crate::error::{DumpError, Result};
use crate::layout::{Field, MemoryLayout, NUMBER_OF_FIELDS, SIZEOF_FLOAT};
use crate::player::{PlayerId, PlayerState, NUMBER_OF_PLAYERS};

/// Number of values in a dump of all three player arrays.
pub const VALUES_PER_DUMP: usize = NUMBER_OF_FIELDS * NUMBER_OF_PLAYERS;

/// Reads one little-endian `f32` from the start of every complete slot.
///
/// A trailing partial slot is dropped. A slot that cannot be read becomes NaN;
/// with a valid layout every slot holds at least four bytes, so this does not happen in practice.
pub fn read_values(raw: &[u8], layout: &MemoryLayout) -> Vec<f32> {
    let chunks = raw.chunks_exact(layout.stride());
    if !chunks.remainder().is_empty() {
        log::debug!(
            "dropping {} trailing bytes of a partial slot",
            chunks.remainder().len()
        );
    }

    chunks
        .map(|chunk| {
            chunk
                .get(..SIZEOF_FLOAT)
                .and_then(|bytes| <[u8; SIZEOF_FLOAT]>::try_from(bytes).ok())
                .map(f32::from_le_bytes)
                .unwrap_or(f32::NAN)
        })
        .collect()
}

/// Decodes a dump of the three player arrays into one state per player, in slot order.
pub fn decode(raw: &[u8], layout: &MemoryLayout) -> Result<Vec<(PlayerId, PlayerState)>> {
    let values = read_values(raw, layout);
    if values.len() != VALUES_PER_DUMP {
        return Err(DumpError::MalformedDump {
            expected: VALUES_PER_DUMP,
            found: values.len(),
        });
    }

    let run = |field: Field| {
        let start = layout.order().position(field) * NUMBER_OF_PLAYERS;
        &values[start..start + NUMBER_OF_PLAYERS]
    };

    let states = izip!(PlayerId::all(), run(Field::X), run(Field::Y), run(Field::Direction))
        .map(|(player, x, y, direction)| (player, PlayerState::new(*x, *y, *direction)))
        .collect();
    Ok(states)
}

/// Lays out player states the way they sit in memory.
///
/// Players that are not listed keep zeroes.
pub fn encode(states: &[(PlayerId, PlayerState)], layout: &MemoryLayout) -> Vec<u8> {
    let mut raw = vec![0; layout.region_len()];
    for (player, state) in states {
        for (field, value) in [
            (Field::X, state.x),
            (Field::Y, state.y),
            (Field::Direction, state.direction),
        ] {
            let offset = layout.offset(field, *player);
            raw[offset..offset + SIZEOF_FLOAT].copy_from_slice(&value.to_le_bytes());
        }
    }
    raw
}
