use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter, EnumString, FromRepr, IntoEnumIterator, IntoStaticStr};

/// A player of the game, in the order the game keeps them in its arrays.
#[derive(
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    EnumCount,
    FromRepr,
    IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
#[repr(u8)]
pub enum PlayerId {
    Red = 0,
    Yellow = 1,
    Orange = 2,
    Green = 3,
    Pink = 4,
    Blue = 5,
}

pub const NUMBER_OF_PLAYERS: usize = <PlayerId as EnumCount>::COUNT;

impl PlayerId {
    /// Zero-based position of the player in each of the player arrays.
    pub fn slot(self) -> usize {
        self as usize
    }

    pub fn from_slot(slot: usize) -> Option<Self> {
        u8::try_from(slot).ok().and_then(Self::from_repr)
    }

    pub fn name(self) -> &'static str {
        self.into()
    }

    pub fn glyph(self) -> &'static str {
        match self {
            PlayerId::Red => "🟥",
            PlayerId::Yellow => "🟨",
            PlayerId::Orange => "🟧",
            PlayerId::Green => "🟩",
            PlayerId::Pink => "🟪",
            PlayerId::Blue => "🟦",
        }
    }

    pub fn all() -> impl Iterator<Item = PlayerId> {
        Self::iter()
    }
}

/// Position and heading of one player as stored in memory.
///
/// `direction` is in radians, in the raw convention of the game.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayerState {
    pub x: f32,
    pub y: f32,
    pub direction: f32,
}

impl PlayerState {
    pub fn new(x: f32, y: f32, direction: f32) -> Self {
        Self { x, y, direction }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slots() {
        let slots: Vec<usize> = PlayerId::all().map(PlayerId::slot).collect();
        assert_eq!(slots, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(NUMBER_OF_PLAYERS, 6);

        for player in PlayerId::all() {
            assert_eq!(PlayerId::from_slot(player.slot()), Some(player));
        }
        assert_eq!(PlayerId::from_slot(6), None);
        assert_eq!(PlayerId::from_slot(300), None);
    }

    #[test]
    fn test_names() {
        assert_eq!(PlayerId::Pink.name(), "Pink");
        assert_eq!(PlayerId::Blue.to_string(), "Blue");
        assert_eq!("yellow".parse::<PlayerId>().unwrap(), PlayerId::Yellow);
        assert!("purple".parse::<PlayerId>().is_err());
        assert_eq!(PlayerId::Green.glyph(), "🟩");
    }
}
