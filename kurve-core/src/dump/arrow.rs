use std::f64::consts::{PI, TAU};

/// Compass arrows, starting with the direction the game calls 0 and turning counterclockwise.
pub const ARROWS: [&str; 8] = ["↓", "↘", "→", "↗", "↑", "↖", "←", "↙"];

pub const NUMBER_OF_ARROWS: usize = ARROWS.len();

/// Index into [`ARROWS`] for a raw direction.
///
/// Each arrow covers a sector of π/4 centered on its own angle, so sector 0 spans
/// -π/8..π/8 and angles just below 2π still point down. Non-finite angles have no sector.
pub fn arrow_sector(raw_direction: f32) -> Option<usize> {
    if !raw_direction.is_finite() {
        return None;
    }

    let cycle = TAU;
    let aligned_direction = f64::from(raw_direction) + PI / NUMBER_OF_ARROWS as f64;
    let index = (aligned_direction.rem_euclid(cycle) / cycle * NUMBER_OF_ARROWS as f64) as usize;
    // rem_euclid can round up to exactly one cycle
    Some(index % NUMBER_OF_ARROWS)
}

pub fn arrow_for_direction(raw_direction: f32) -> Option<&'static str> {
    arrow_sector(raw_direction).map(|index| ARROWS[index])
}
