//! Dungeon system
//!
//! Level structure, cells and rooms, plus the stages that carve and furnish
//! a level: placement, corridors, mazes, wall classification, features,
//! special rooms and mineralization.

mod cell;
mod level;
mod rect;
mod room;

pub mod corridor;
pub mod features;
pub mod maze;
pub mod mineralize;
pub mod placement;
pub mod special_room;
pub mod wall;

pub use cell::{Cell, CellFlags, CellType, DoorState};
pub use corridor::{ConnectivityTracker, make_corridors, make_niches};
pub use level::{
    Alignment, Branch, Deposit, DepositKind, Engraving, EngravingType, Feature, FeatureKind, Level,
    LevelFlags, MonsterPlacement, ObjectPlacement, Stairway, TRAPNUM, Trap, TrapType,
};
pub use rect::Rect;
pub use room::{Door, Room, RoomType, WallSide};
