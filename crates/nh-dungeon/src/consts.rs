//! Map geometry and generation limits.

/// Map dimensions
pub const COLNO: usize = 80;
pub const ROWNO: usize = 21;

/// Room limits
pub const MAXNROFROOMS: usize = 40;
pub const MAX_SUBROOMS: usize = 24;
pub const DOORMAX: usize = 120;

/// Smallest and largest interior of a randomly placed room.
pub const ROOM_MIN_WIDTH: usize = 3;
pub const ROOM_MAX_WIDTH: usize = 14;
pub const ROOM_MIN_HEIGHT: usize = 2;
pub const ROOM_MAX_HEIGHT: usize = 5;

/// Maze bounds: the maze grid spans columns 2..=X_MAZE_MAX and rows
/// 2..=Y_MAZE_MAX, both rounded down to even.
pub const X_MAZE_MAX: usize = (COLNO - 1) - ((COLNO - 1) % 2);
pub const Y_MAZE_MAX: usize = (ROWNO - 1) - ((ROWNO - 1) % 2);

/// Padding width rumors and engravings are stored at.
pub const TEXT_PAD_WIDTH: usize = 60;

/// Shops are only rolled above this depth.
pub const MEDUSA_DEPTH: i32 = 21;
/// Fewest rooms a level needs before one may become a shop.
pub const ROOM_THRESHOLD: usize = 3;
