//! Room types and structures (mkroom.h)

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::{DoorState, Rect};

/// Room types matching C mkroom.h enum
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum RoomType {
    /// Ordinary room (OROOM = 0)
    #[default]
    Ordinary = 0,
    /// Throne room with king/queen (COURT = 2)
    Court = 2,
    /// Swamp with pools and eels (SWAMP = 3)
    Swamp = 3,
    /// Secret vault with gold (VAULT = 4)
    Vault = 4,
    /// Bee hive with queen bee (BEEHIVE = 5)
    Beehive = 5,
    /// Morgue with undead (MORGUE = 6)
    Morgue = 6,
    /// Soldier barracks (BARRACKS = 7)
    Barracks = 7,
    /// Zoo with sleeping monsters and gold (ZOO = 8)
    Zoo = 8,
    /// Oracle's chamber (DELPHI = 9)
    Delphi = 9,
    /// Temple with altar and priest (TEMPLE = 10)
    Temple = 10,
    /// Leprechaun treasure hall (LEPREHALL = 11)
    LeprechaunHall = 11,
    /// Cockatrice nest with statues (COCKNEST = 12)
    CockatriceNest = 12,
    /// Ant colony (ANTHOLE = 13)
    Anthole = 13,
    GeneralShop = 14,
    ArmorShop = 15,
    ScrollShop = 16,
    PotionShop = 17,
    WeaponShop = 18,
    FoodShop = 19,
    RingShop = 20,
    WandShop = 21,
    ToolShop = 22,
    BookShop = 23,
    HealthFoodShop = 24,
    CandleShop = 25,
}

impl RoomType {
    pub fn is_shop(self) -> bool {
        self as u8 >= RoomType::GeneralShop as u8
    }

    /// Monsters generated to fill this room start asleep.
    pub fn monsters_sleep(self) -> bool {
        matches!(
            self,
            RoomType::Court
                | RoomType::Beehive
                | RoomType::Morgue
                | RoomType::Barracks
                | RoomType::Zoo
                | RoomType::LeprechaunHall
                | RoomType::CockatriceNest
                | RoomType::Anthole
        )
    }

    /// Object class symbol a shop of this type stocks (`None` = anything).
    pub fn shop_stock(self) -> Option<char> {
        match self {
            RoomType::ArmorShop => Some('['),
            RoomType::ScrollShop => Some('?'),
            RoomType::PotionShop => Some('!'),
            RoomType::WeaponShop => Some(')'),
            RoomType::FoodShop | RoomType::HealthFoodShop => Some('%'),
            RoomType::RingShop => Some('='),
            RoomType::WandShop => Some('/'),
            RoomType::ToolShop | RoomType::CandleShop => Some('('),
            RoomType::BookShop => Some('+'),
            _ => None,
        }
    }

    /// Name used by level scripts (`des.region` type strings).
    pub fn script_name(self) -> &'static str {
        match self {
            RoomType::Ordinary => "ordinary",
            RoomType::Court => "throne",
            RoomType::Swamp => "swamp",
            RoomType::Vault => "vault",
            RoomType::Beehive => "beehive",
            RoomType::Morgue => "morgue",
            RoomType::Barracks => "barracks",
            RoomType::Zoo => "zoo",
            RoomType::Delphi => "delphi",
            RoomType::Temple => "temple",
            RoomType::LeprechaunHall => "leprechaun hall",
            RoomType::CockatriceNest => "cockatrice nest",
            RoomType::Anthole => "anthole",
            RoomType::GeneralShop => "shop",
            RoomType::ArmorShop => "armor shop",
            RoomType::ScrollShop => "scroll shop",
            RoomType::PotionShop => "potion shop",
            RoomType::WeaponShop => "weapon shop",
            RoomType::FoodShop => "food shop",
            RoomType::RingShop => "ring shop",
            RoomType::WandShop => "wand shop",
            RoomType::ToolShop => "tool shop",
            RoomType::BookShop => "bookstore",
            RoomType::HealthFoodShop => "health food shop",
            RoomType::CandleShop => "candle shop",
        }
    }
}

/// Which wall of its room a door sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum WallSide {
    Top,
    Bottom,
    Left,
    Right,
}

impl WallSide {
    /// Step from the door away from the room.
    pub fn outward(self) -> (i32, i32) {
        match self {
            WallSide::Top => (0, -1),
            WallSide::Bottom => (0, 1),
            WallSide::Left => (-1, 0),
            WallSide::Right => (1, 0),
        }
    }
}

/// A door record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Door {
    pub x: usize,
    pub y: usize,
    pub state: DoorState,
    pub side: WallSide,
    /// Room whose wall holds the door, if any
    pub room: Option<usize>,
}

/// A rectangular room. `lx..=hx`, `ly..=hy` is the floor; walls sit one
/// cell outside.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub lx: usize,
    pub ly: usize,
    pub hx: usize,
    pub hy: usize,
    pub rtype: RoomType,
    pub lit: bool,
    /// Indices into the level's door list
    pub doors: Vec<usize>,
    /// Parent room index (if this is a subroom)
    pub parent: Option<usize>,
    pub subrooms: Vec<usize>,
    /// Placed by a script that wants it joined to the rest.
    pub needjoining: bool,
}

impl Room {
    pub fn new(interior: Rect, lit: bool) -> Self {
        Self {
            lx: interior.lx,
            ly: interior.ly,
            hx: interior.hx,
            hy: interior.hy,
            rtype: RoomType::Ordinary,
            lit,
            doors: Vec::new(),
            parent: None,
            subrooms: Vec::new(),
            needjoining: true,
        }
    }

    pub fn interior(&self) -> Rect {
        Rect::new(self.lx, self.ly, self.hx, self.hy)
    }

    /// Interior plus walls.
    pub fn bounds(&self) -> Rect {
        Rect::new(self.lx - 1, self.ly - 1, self.hx + 1, self.hy + 1)
    }

    /// Bounds plus the one-cell clearance other rooms must keep.
    pub fn margined(&self) -> Rect {
        self.bounds().expanded(1)
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        self.interior().contains(x, y)
    }

    pub fn area(&self) -> usize {
        self.interior().area()
    }

    pub fn is_subroom(&self) -> bool {
        self.parent.is_some()
    }

    /// Which wall `(x, y)` lies on, if it is on the perimeter but not a corner.
    pub fn wall_side(&self, x: usize, y: usize) -> Option<WallSide> {
        let b = self.bounds();
        let inside_x = x >= self.lx && x <= self.hx;
        let inside_y = y >= self.ly && y <= self.hy;
        if y == b.ly && inside_x {
            Some(WallSide::Top)
        } else if y == b.hy && inside_x {
            Some(WallSide::Bottom)
        } else if x == b.lx && inside_y {
            Some(WallSide::Left)
        } else if x == b.hx && inside_y {
            Some(WallSide::Right)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_shop_range() {
        let shops: Vec<RoomType> = RoomType::iter().filter(|t| t.is_shop()).collect();
        assert_eq!(shops.len(), 12);
        assert!(!RoomType::Anthole.is_shop());
        assert_eq!(RoomType::GeneralShop.shop_stock(), None);
        assert_eq!(RoomType::WandShop.shop_stock(), Some('/'));
    }

    #[test]
    fn test_room_bounds() {
        let room = Room::new(Rect::new(5, 3, 9, 6), true);
        assert_eq!(room.bounds(), Rect::new(4, 2, 10, 7));
        assert_eq!(room.margined(), Rect::new(3, 1, 11, 8));
        assert_eq!(room.area(), 20);
    }

    #[test]
    fn test_wall_side() {
        let room = Room::new(Rect::new(5, 3, 9, 6), true);
        assert_eq!(room.wall_side(6, 2), Some(WallSide::Top));
        assert_eq!(room.wall_side(6, 7), Some(WallSide::Bottom));
        assert_eq!(room.wall_side(4, 4), Some(WallSide::Left));
        assert_eq!(room.wall_side(10, 4), Some(WallSide::Right));
        assert_eq!(room.wall_side(4, 2), None);
        assert_eq!(room.wall_side(6, 4), None);
        assert_eq!(WallSide::Left.outward(), (-1, 0));
    }
}
