//! Map cell types (rm.h)

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Cell/terrain type
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum CellType {
    #[default]
    Stone = 0,
    VWall = 1,
    HWall = 2,
    TLCorner = 3,
    TRCorner = 4,
    BLCorner = 5,
    BRCorner = 6,
    CrossWall = 7,
    TUWall = 8,  // T-wall up
    TDWall = 9,  // T-wall down
    TLWall = 10, // T-wall left
    TRWall = 11, // T-wall right
    DBWall = 12, // Drawbridge wall
    Tree = 13,
    SecretDoor = 14,
    SecretCorridor = 15,
    Pool = 16,
    Moat = 17,
    Water = 18,
    DrawbridgeUp = 19,
    Lava = 20,
    IronBars = 21,
    Door = 22,
    Corridor = 23,
    Room = 24,
    Stairs = 25,
    Fountain = 26,
    Throne = 27,
    Sink = 28,
    Grave = 29,
    Altar = 30,
    Ice = 31,
    DrawbridgeDown = 32,
    Air = 33,
    Cloud = 34,
}

impl CellType {
    /// Any wall subtype, including the drawbridge wall.
    pub const fn is_wall(&self) -> bool {
        (*self as u8) >= 1 && (*self as u8) <= 12
    }

    /// Stone or any wall (`IS_STWALL`).
    pub const fn is_solid(&self) -> bool {
        (*self as u8) <= 12
    }

    pub const fn is_door(&self) -> bool {
        matches!(self, CellType::Door | CellType::SecretDoor)
    }

    /// Part of a wall run for spine purposes: walls, doors in walls and bars.
    pub const fn is_wall_like(&self) -> bool {
        self.is_wall() || self.is_door() || matches!(self, CellType::IronBars)
    }

    /// Traversable terrain for connectivity. Secret doors and corridors
    /// count once found; water and a raised drawbridge with its portcullis
    /// count as crossable.
    pub const fn is_passable(&self) -> bool {
        matches!(
            self,
            CellType::DBWall
                | CellType::Pool
                | CellType::Moat
                | CellType::Water
                | CellType::DrawbridgeUp
                | CellType::Room
                | CellType::Corridor
                | CellType::Door
                | CellType::SecretDoor
                | CellType::SecretCorridor
                | CellType::Stairs
                | CellType::Fountain
                | CellType::Throne
                | CellType::Sink
                | CellType::Grave
                | CellType::Altar
                | CellType::Ice
                | CellType::DrawbridgeDown
                | CellType::Air
                | CellType::Cloud
        )
    }

    pub const fn is_corridor(&self) -> bool {
        matches!(self, CellType::Corridor | CellType::SecretCorridor)
    }

    pub const fn is_pool(&self) -> bool {
        matches!(self, CellType::Pool | CellType::Moat | CellType::Water)
    }

    /// Dungeon furniture that occupies a floor square.
    pub const fn is_furniture(&self) -> bool {
        matches!(
            self,
            CellType::Stairs
                | CellType::Fountain
                | CellType::Throne
                | CellType::Sink
                | CellType::Grave
                | CellType::Altar
        )
    }

    /// Display character
    pub const fn symbol(&self) -> char {
        match self {
            CellType::Stone => ' ',
            CellType::VWall | CellType::TLWall | CellType::TRWall | CellType::DBWall => '|',
            CellType::HWall
            | CellType::TLCorner
            | CellType::TRCorner
            | CellType::BLCorner
            | CellType::BRCorner
            | CellType::CrossWall
            | CellType::TUWall
            | CellType::TDWall => '-',
            CellType::Tree => '#',
            CellType::SecretDoor => '+',
            CellType::SecretCorridor => '#',
            CellType::Pool | CellType::Moat | CellType::Water | CellType::Lava => '}',
            CellType::DrawbridgeUp | CellType::IronBars => '#',
            CellType::Door => '+',
            CellType::Corridor => '#',
            CellType::Room | CellType::Ice | CellType::DrawbridgeDown => '.',
            CellType::Stairs => '>',
            CellType::Fountain => '{',
            CellType::Throne => '\\',
            CellType::Sink => '#',
            CellType::Grave => '|',
            CellType::Altar => '_',
            CellType::Air => ' ',
            CellType::Cloud => '#',
        }
    }
}

bitflags! {
    /// Door state flags
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct DoorState: u8 {
        const NO_DOOR = 0x00;
        const BROKEN = 0x01;
        const OPEN = 0x02;
        const CLOSED = 0x04;
        const LOCKED = 0x08;
        const TRAPPED = 0x10;
        const SECRET = 0x20;
    }
}

bitflags! {
    /// Per-cell generation flags
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct CellFlags: u8 {
        /// Digging is refused here.
        const NON_DIGGABLE = 0x01;
        /// Phasing through is refused here.
        const NON_PASSWALL = 0x02;
        /// Stairs lead up.
        const UP_STAIR = 0x04;
        /// Wall shared by two rooms.
        const SHARED = 0x08;
    }
}

macro_rules! bits_serde {
    ($ty:ty) => {
        impl Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                self.bits().serialize(serializer)
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let bits = u8::deserialize(deserializer)?;
                Ok(<$ty>::from_bits_truncate(bits))
            }
        }
    };
}

bits_serde!(DoorState);
bits_serde!(CellFlags);

/// A single map cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub typ: CellType,
    pub lit: bool,
    /// Door state, meaningful on door cells only
    pub door: DoorState,
    pub flags: CellFlags,
    /// Owning room (interior and wall cells)
    pub roomno: Option<u8>,
}

impl Cell {
    pub const fn stone() -> Self {
        Self {
            typ: CellType::Stone,
            lit: false,
            door: DoorState::NO_DOOR,
            flags: CellFlags::empty(),
            roomno: None,
        }
    }

    pub const fn of(typ: CellType) -> Self {
        Self {
            typ,
            ..Self::stone()
        }
    }

    pub fn is_diggable(&self) -> bool {
        !self.flags.contains(CellFlags::NON_DIGGABLE)
    }

    /// Character used by the ASCII dump.
    pub fn glyph(&self) -> char {
        if self.typ == CellType::Stairs {
            if self.flags.contains(CellFlags::UP_STAIR) {
                '<'
            } else {
                '>'
            }
        } else if self.typ == CellType::Door && !self.door.intersects(DoorState::CLOSED | DoorState::LOCKED) {
            if self.door.contains(DoorState::OPEN) { '|' } else { '.' }
        } else {
            self.typ.symbol()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_wall_range() {
        let walls: Vec<CellType> = CellType::iter().filter(|t| t.is_wall()).collect();
        assert_eq!(walls.len(), 12);
        assert!(walls.contains(&CellType::DBWall));
        assert!(!CellType::Stone.is_wall());
        assert!(CellType::Stone.is_solid());
        assert!(!CellType::Door.is_solid());
    }

    #[test]
    fn test_walls_are_not_passable() {
        for t in CellType::iter().filter(|t| t.is_solid() && *t != CellType::DBWall) {
            assert!(!t.is_passable(), "{t} should block");
        }
        assert!(CellType::DBWall.is_passable());
    }

    #[test]
    fn test_secret_passages_are_passable() {
        assert!(CellType::SecretDoor.is_passable());
        assert!(CellType::SecretCorridor.is_passable());
        assert!(CellType::SecretDoor.is_wall_like());
        assert!(CellType::Moat.is_passable());
        assert!(!CellType::Lava.is_passable());
    }

    #[test]
    fn test_flags_serialize_as_bits() {
        let cell = Cell {
            door: DoorState::LOCKED | DoorState::TRAPPED,
            flags: CellFlags::NON_DIGGABLE,
            ..Cell::of(CellType::Door)
        };
        let json = serde_json::to_string(&cell).unwrap();
        let back: Cell = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cell);
        assert!(json.contains("\"door\":24"));
    }

    #[test]
    fn test_glyphs() {
        let mut up = Cell::of(CellType::Stairs);
        up.flags |= CellFlags::UP_STAIR;
        assert_eq!(up.glyph(), '<');
        assert_eq!(Cell::of(CellType::Stairs).glyph(), '>');
        assert_eq!(Cell::of(CellType::Door).glyph(), '.');
        let closed = Cell {
            door: DoorState::CLOSED,
            ..Cell::of(CellType::Door)
        };
        assert_eq!(closed.glyph(), '+');
    }
}
