//! Where the player arrays live in the memory of the game.
//!
//! The game keeps three parallel arrays with one `f32` per player: x-coordinates,
//! y-coordinates and directions. They follow each other without gaps, so a single
//! base address locates all of them.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::error::LayoutError;
use crate::player::{PlayerId, NUMBER_OF_PLAYERS};

pub const SIZEOF_FLOAT: usize = 4;

/// Largest supported distance between two player slots.
pub const MAX_STRIDE: usize = 0x1000;

/// Address of the x-coordinate array in the DOSBox process the scenarios were written against.
pub const DEFAULT_BASE_ADDRESS: u64 = 0x7fff_d801_0ff6;

/// One of the three player arrays.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Field {
    X,
    Y,
    Direction,
}

pub const NUMBER_OF_FIELDS: usize = 3;

/// The order in which the three arrays follow each other in memory.
///
/// Every field occurs exactly once.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "[Field; 3]", into = "[Field; 3]")]
pub struct ArrayOrder([Field; NUMBER_OF_FIELDS]);

impl ArrayOrder {
    pub const STANDARD: ArrayOrder = ArrayOrder([Field::X, Field::Y, Field::Direction]);

    pub fn fields(&self) -> [Field; NUMBER_OF_FIELDS] {
        self.0
    }

    /// Index of the array holding `field`.
    pub fn position(&self, field: Field) -> usize {
        self.0
            .iter()
            .position(|f| *f == field)
            .expect("an array order holds every field")
    }
}

impl Default for ArrayOrder {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl TryFrom<[Field; NUMBER_OF_FIELDS]> for ArrayOrder {
    type Error = LayoutError;

    fn try_from(fields: [Field; NUMBER_OF_FIELDS]) -> Result<Self, Self::Error> {
        for (i, field) in fields.iter().enumerate() {
            if fields[..i].contains(field) {
                return Err(LayoutError::DuplicateField(*field));
            }
        }
        Ok(Self(fields))
    }
}

impl From<ArrayOrder> for [Field; NUMBER_OF_FIELDS] {
    fn from(order: ArrayOrder) -> Self {
        order.0
    }
}

/// Parses a comma separated list, e.g. `x,y,direction`.
impl FromStr for ArrayOrder {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields = s
            .split(',')
            .map(|name| {
                let name = name.trim();
                Field::from_str(name).map_err(|_| LayoutError::UnknownField(name.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let fields: [Field; NUMBER_OF_FIELDS] = fields
            .try_into()
            .map_err(|fields: Vec<Field>| LayoutError::WrongFieldCount(fields.len()))?;
        Self::try_from(fields)
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
struct LayoutDef {
    base_address: u64,
    stride: usize,
    order: ArrayOrder,
}

impl Default for LayoutDef {
    fn default() -> Self {
        MemoryLayout::default().into()
    }
}

/// Addresses of the player arrays in the target process.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LayoutDef", into = "LayoutDef")]
pub struct MemoryLayout {
    base_address: u64,
    stride: usize,
    order: ArrayOrder,
}

impl Default for MemoryLayout {
    fn default() -> Self {
        Self::packed(DEFAULT_BASE_ADDRESS)
    }
}

impl TryFrom<LayoutDef> for MemoryLayout {
    type Error = LayoutError;

    fn try_from(def: LayoutDef) -> Result<Self, Self::Error> {
        Ok(Self::new(def.base_address)?
            .with_stride(def.stride)?
            .with_order(def.order))
    }
}

impl From<MemoryLayout> for LayoutDef {
    fn from(layout: MemoryLayout) -> Self {
        Self {
            base_address: layout.base_address,
            stride: layout.stride,
            order: layout.order,
        }
    }
}

impl MemoryLayout {
    const fn packed(base_address: u64) -> Self {
        Self {
            base_address,
            stride: SIZEOF_FLOAT,
            order: ArrayOrder::STANDARD,
        }
    }

    /// Packed `f32` arrays in x, y, direction order starting at `base_address`.
    pub fn new(base_address: u64) -> Result<Self, LayoutError> {
        Self::packed(base_address).checked()
    }

    pub fn with_base_address(mut self, base_address: u64) -> Result<Self, LayoutError> {
        self.base_address = base_address;
        self.checked()
    }

    /// Distance in bytes between two neighbouring slots; the value sits at the start of each slot.
    pub fn with_stride(mut self, stride: usize) -> Result<Self, LayoutError> {
        if !(SIZEOF_FLOAT..=MAX_STRIDE).contains(&stride) {
            return Err(LayoutError::StrideOutOfRange {
                stride,
                min: SIZEOF_FLOAT,
                max: MAX_STRIDE,
            });
        }
        self.stride = stride;
        self.checked()
    }

    /// All three arrays have to end inside the 64-bit address space.
    fn checked(self) -> Result<Self, LayoutError> {
        let end = self
            .stride
            .checked_mul(NUMBER_OF_FIELDS * NUMBER_OF_PLAYERS)
            .and_then(|len| u64::try_from(len).ok())
            .and_then(|len| self.base_address.checked_add(len));
        match end {
            Some(_) => Ok(self),
            None => Err(LayoutError::RegionOutOfRange {
                base_address: self.base_address,
                stride: self.stride,
            }),
        }
    }

    pub fn with_order(mut self, order: ArrayOrder) -> Self {
        self.order = order;
        self
    }

    pub fn base_address(&self) -> u64 {
        self.base_address
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn order(&self) -> ArrayOrder {
        self.order
    }

    /// Byte offset of `field` of `player` from the base address.
    pub fn offset(&self, field: Field, player: PlayerId) -> usize {
        self.order.position(field) * self.array_len() + player.slot() * self.stride
    }

    pub fn array_base(&self, field: Field) -> u64 {
        self.base_address + (self.order.position(field) * self.array_len()) as u64
    }

    pub fn address(&self, field: Field, player: PlayerId) -> u64 {
        self.base_address + self.offset(field, player) as u64
    }

    /// Size in bytes of a single array.
    pub fn array_len(&self) -> usize {
        NUMBER_OF_PLAYERS * self.stride
    }

    /// Size in bytes of all three arrays.
    pub fn region_len(&self) -> usize {
        NUMBER_OF_FIELDS * self.array_len()
    }
}

/// Layout values applied on top of a configured layout, from the command line or a scenario file.
///
/// Fields left out keep the value of the layout underneath.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_address: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stride: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<ArrayOrder>,
}

impl LayoutOverrides {
    /// The region is checked once with all overrides in place.
    pub fn apply(&self, mut layout: MemoryLayout) -> Result<MemoryLayout, LayoutError> {
        if let Some(base_address) = self.base_address {
            layout.base_address = base_address;
        }
        if let Some(order) = self.order {
            layout = layout.with_order(order);
        }
        match self.stride {
            Some(stride) => layout.with_stride(stride),
            None => layout.checked(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_addresses() {
        let layout = MemoryLayout::new(0x1000).unwrap();
        assert_eq!(layout.array_base(Field::X), 0x1000);
        assert_eq!(layout.array_base(Field::Y), 0x1000 + 6 * 4);
        assert_eq!(layout.array_base(Field::Direction), 0x1000 + 12 * 4);

        assert_eq!(layout.address(Field::X, PlayerId::Yellow), 0x1004);
        assert_eq!(layout.address(Field::Y, PlayerId::Red), 0x1018);
        assert_eq!(layout.address(Field::Direction, PlayerId::Blue), 0x1030 + 5 * 4);
        assert_eq!(layout.region_len(), 72);
    }

    #[test]
    fn test_custom_order_and_stride() {
        let order: ArrayOrder = "direction, x, y".parse().unwrap();
        let layout = MemoryLayout::new(0x2000)
            .unwrap()
            .with_stride(8)
            .unwrap()
            .with_order(order);

        assert_eq!(layout.array_base(Field::Direction), 0x2000);
        assert_eq!(layout.array_base(Field::X), 0x2000 + 48);
        assert_eq!(layout.address(Field::Y, PlayerId::Orange), 0x2000 + 96 + 16);
        assert_eq!(layout.region_len(), 144);
    }

    #[test]
    fn test_invalid_layouts() {
        assert_eq!(
            "x,x,y".parse::<ArrayOrder>(),
            Err(LayoutError::DuplicateField(Field::X))
        );
        assert_eq!(
            "x,y".parse::<ArrayOrder>(),
            Err(LayoutError::WrongFieldCount(2))
        );
        assert_eq!(
            "x,y,heading".parse::<ArrayOrder>(),
            Err(LayoutError::UnknownField("heading".to_string()))
        );
        assert_eq!(
            MemoryLayout::new(0).unwrap().with_stride(2),
            Err(LayoutError::StrideOutOfRange {
                stride: 2,
                min: 4,
                max: MAX_STRIDE
            })
        );
    }

    #[test]
    fn test_overrides() {
        let overrides = LayoutOverrides {
            base_address: Some(0x40),
            ..Default::default()
        };
        let layout = overrides.apply(MemoryLayout::default()).unwrap();
        assert_eq!(layout, MemoryLayout::new(0x40).unwrap());

        let unchanged = LayoutOverrides::default()
            .apply(MemoryLayout::default())
            .unwrap();
        assert_eq!(unchanged.base_address(), DEFAULT_BASE_ADDRESS);
    }

    #[test]
    fn test_region_must_fit_address_space() {
        let region = 18 * 4;
        let last = u64::MAX - region;
        let layout = MemoryLayout::new(last).unwrap();
        assert_eq!(
            layout.address(Field::Direction, PlayerId::Blue),
            u64::MAX - 4
        );

        assert_eq!(
            MemoryLayout::new(last + 1),
            Err(LayoutError::RegionOutOfRange {
                base_address: last + 1,
                stride: 4
            })
        );
        assert_eq!(
            MemoryLayout::new(0xffff_ffff_ffff_fff0),
            Err(LayoutError::RegionOutOfRange {
                base_address: 0xffff_ffff_ffff_fff0,
                stride: 4
            })
        );
        assert!(layout.with_stride(8).is_err());
        assert!(MemoryLayout::default().with_base_address(u64::MAX).is_err());
    }

    #[test]
    fn test_stride_limits() {
        assert!(MemoryLayout::default().with_stride(MAX_STRIDE).is_ok());
        assert_eq!(
            MemoryLayout::default().with_stride(usize::MAX / 2),
            Err(LayoutError::StrideOutOfRange {
                stride: usize::MAX / 2,
                min: 4,
                max: MAX_STRIDE
            })
        );

        let overrides = LayoutOverrides {
            stride: Some(usize::MAX / 2),
            ..Default::default()
        };
        assert!(overrides.apply(MemoryLayout::default()).is_err());

        let overrides = LayoutOverrides {
            base_address: Some(u64::MAX - 8),
            ..Default::default()
        };
        assert!(matches!(
            overrides.apply(MemoryLayout::default()),
            Err(LayoutError::RegionOutOfRange { .. })
        ));
    }

    #[test]
    fn test_overrides_are_checked_together() {
        // a base close to the end only fits with the smaller stride given alongside it
        let wide = MemoryLayout::new(0).unwrap().with_stride(16).unwrap();
        let overrides = LayoutOverrides {
            base_address: Some(u64::MAX - 18 * 4),
            stride: Some(4),
            order: None,
        };
        let layout = overrides.apply(wide).unwrap();
        assert_eq!(layout.region_len(), 72);
    }

    #[test]
    fn test_default_layout_is_valid() {
        assert_eq!(
            MemoryLayout::new(DEFAULT_BASE_ADDRESS),
            Ok(MemoryLayout::default())
        );
        for field in [Field::X, Field::Y, Field::Direction] {
            assert!(ArrayOrder::STANDARD.position(field) < NUMBER_OF_FIELDS);
        }
    }
}
