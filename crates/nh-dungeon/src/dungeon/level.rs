//! Level structure (dlevel_t from rm.h)

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::{Cell, CellFlags, CellType, Door, Room};
use crate::{COLNO, ROWNO};

/// Create default cells grid
fn default_cells() -> Vec<Vec<Cell>> {
    vec![vec![Cell::stone(); ROWNO]; COLNO]
}

/// Trap types, numbered as in trap.h.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[repr(u8)]
pub enum TrapType {
    Arrow = 1,
    Dart = 2,
    RockFall = 3,
    Squeaky = 4,
    BearTrap = 5,
    LandMine = 6,
    RollingBoulder = 7,
    SleepingGas = 8,
    RustTrap = 9,
    FireTrap = 10,
    Pit = 11,
    SpikedPit = 12,
    Hole = 13,
    TrapDoor = 14,
    Teleport = 15,
    LevelTeleport = 16,
    MagicPortal = 17,
    Web = 18,
    Statue = 19,
    MagicTrap = 20,
    AntiMagic = 21,
    Polymorph = 22,
    VibratingSquare = 23,
}

/// One past the last trap number.
pub const TRAPNUM: i32 = 24;

impl TrapType {
    pub fn from_index(n: i32) -> Option<TrapType> {
        use strum::IntoEnumIterator;
        TrapType::iter().find(|t| *t as i32 == n)
    }

    /// Name used by level scripts.
    pub fn script_name(self) -> &'static str {
        match self {
            TrapType::Arrow => "arrow",
            TrapType::Dart => "dart",
            TrapType::RockFall => "falling rock",
            TrapType::Squeaky => "board",
            TrapType::BearTrap => "bear",
            TrapType::LandMine => "land mine",
            TrapType::RollingBoulder => "rolling boulder",
            TrapType::SleepingGas => "sleep gas",
            TrapType::RustTrap => "rust",
            TrapType::FireTrap => "fire",
            TrapType::Pit => "pit",
            TrapType::SpikedPit => "spiked pit",
            TrapType::Hole => "hole",
            TrapType::TrapDoor => "trap door",
            TrapType::Teleport => "teleport",
            TrapType::LevelTeleport => "level teleport",
            TrapType::MagicPortal => "magic portal",
            TrapType::Web => "web",
            TrapType::Statue => "statue",
            TrapType::MagicTrap => "magic",
            TrapType::AntiMagic => "anti magic",
            TrapType::Polymorph => "polymorph",
            TrapType::VibratingSquare => "vibrating square",
        }
    }

    pub fn from_script_name(name: &str) -> Option<TrapType> {
        use strum::IntoEnumIterator;
        TrapType::iter().find(|t| t.script_name() == name)
    }

    /// Falls through to the level below.
    pub fn is_hole(self) -> bool {
        matches!(self, TrapType::Hole | TrapType::TrapDoor)
    }
}

/// Trap on the level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trap {
    pub x: usize,
    pub y: usize,
    pub kind: TrapType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Alignment {
    Lawful,
    Neutral,
    Chaotic,
    /// Moloch's altars
    Unaligned,
}

impl Alignment {
    /// `rn2(3) - 1` style roll: -1, 0, 1.
    pub fn from_roll(n: i32) -> Alignment {
        match n {
            n if n < 0 => Alignment::Chaotic,
            0 => Alignment::Neutral,
            _ => Alignment::Lawful,
        }
    }
}

/// Furniture with its payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureKind {
    Fountain,
    Sink,
    Altar { alignment: Alignment, shrine: bool },
    Grave { epitaph: Option<String> },
    Throne,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    pub x: usize,
    pub y: usize,
    pub kind: FeatureKind,
}

/// An object left on the level for the object layer to instantiate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectPlacement {
    pub x: usize,
    pub y: usize,
    /// Object class symbol (`)`, `[`, `$`, `*`, ...)
    pub class: char,
    /// Specific object, when the generator asked for one
    pub name: Option<String>,
    pub quantity: i32,
    pub buried: bool,
    /// Names of objects inside a container
    pub contents: Vec<String>,
}

impl ObjectPlacement {
    pub fn new(x: usize, y: usize, class: char) -> Self {
        Self {
            x,
            y,
            class,
            name: None,
            quantity: 1,
            buried: false,
            contents: Vec::new(),
        }
    }

    pub fn named(x: usize, y: usize, class: char, name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            ..Self::new(x, y, class)
        }
    }
}

/// A monster for the monster layer to instantiate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonsterPlacement {
    pub x: usize,
    pub y: usize,
    /// Monster class symbol, if constrained
    pub class: Option<char>,
    /// Specific species, if constrained
    pub name: Option<String>,
    pub asleep: bool,
    pub peaceful: bool,
}

impl MonsterPlacement {
    /// Any monster appropriate to the level.
    pub fn random(x: usize, y: usize) -> Self {
        Self {
            x,
            y,
            class: None,
            name: None,
            asleep: false,
            peaceful: false,
        }
    }

    pub fn of_class(x: usize, y: usize, class: char) -> Self {
        Self {
            class: Some(class),
            ..Self::random(x, y)
        }
    }

    pub fn named(x: usize, y: usize, name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            ..Self::random(x, y)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EngravingType {
    #[default]
    Dust,
    Engrave,
    Burn,
    Mark,
    Headstone,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Engraving {
    pub x: usize,
    pub y: usize,
    pub text: String,
    pub kind: EngravingType,
}

/// Hidden mineral deposit, found only by digging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DepositKind {
    Gold { amount: i32 },
    Gems { count: i32 },
    Kelp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deposit {
    pub x: usize,
    pub y: usize,
    pub kind: DepositKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stairway {
    pub x: usize,
    pub y: usize,
    pub up: bool,
}

/// Where this level sits in its dungeon branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    pub name: String,
    /// Level number of this level within the branch
    pub level: i32,
    pub first_level: i32,
    pub last_level: i32,
    /// Whether the branch top leads out (the main dungeon's first level does)
    pub top_has_exit: bool,
}

impl Default for Branch {
    fn default() -> Self {
        Self {
            name: "The Dungeons of Doom".to_string(),
            level: 1,
            first_level: 1,
            last_level: 29,
            top_has_exit: true,
        }
    }
}

impl Branch {
    pub fn has_up_stairs(&self) -> bool {
        self.level > self.first_level || self.top_has_exit
    }

    pub fn has_down_stairs(&self) -> bool {
        self.level < self.last_level
    }

    /// Holes and trap doors need somewhere to fall to.
    pub fn can_dig_down(&self) -> bool {
        self.has_down_stairs()
    }

    pub fn in_gehennom(&self) -> bool {
        self.name == "Gehennom"
    }
}

/// Level flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelFlags {
    pub is_maze: bool,
    pub corridor_maze: bool,
    pub no_teleport: bool,
    pub hard_floor: bool,
    pub graveyard: bool,
    pub has_shop: bool,
    pub has_temple: bool,
    pub has_court: bool,
    pub has_swamp: bool,
    pub has_zoo: bool,
    pub has_morgue: bool,
    pub has_beehive: bool,
    pub has_barracks: bool,
    pub fountain_count: u8,
    pub sink_count: u8,
}

/// Complete level structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub depth: i32,
    pub branch: Branch,
    pub flags: LevelFlags,

    /// Map cells, indexed `[x][y]`
    #[serde(default = "default_cells")]
    pub cells: Vec<Vec<Cell>>,

    pub rooms: Vec<Room>,
    pub doors: Vec<Door>,
    pub traps: Vec<Trap>,
    pub features: Vec<Feature>,
    pub objects: Vec<ObjectPlacement>,
    pub monsters: Vec<MonsterPlacement>,
    pub engravings: Vec<Engraving>,
    pub deposits: Vec<Deposit>,
    pub upstair: Option<Stairway>,
    pub downstair: Option<Stairway>,
}

impl Level {
    pub fn new(depth: i32, branch: Branch) -> Self {
        Self {
            depth,
            branch,
            flags: LevelFlags::default(),
            cells: default_cells(),
            rooms: Vec::new(),
            doors: Vec::new(),
            traps: Vec::new(),
            features: Vec::new(),
            objects: Vec::new(),
            monsters: Vec::new(),
            engravings: Vec::new(),
            deposits: Vec::new(),
            upstair: None,
            downstair: None,
        }
    }

    /// NetHack's `isok`: column 0 is never part of the map.
    pub fn isok(x: i32, y: i32) -> bool {
        x >= 1 && x < COLNO as i32 && y >= 0 && y < ROWNO as i32
    }

    pub fn cell(&self, x: usize, y: usize) -> &Cell {
        &self.cells[x][y]
    }

    pub fn cell_mut(&mut self, x: usize, y: usize) -> &mut Cell {
        &mut self.cells[x][y]
    }

    pub fn typ(&self, x: usize, y: usize) -> CellType {
        self.cells[x][y].typ
    }

    /// Terrain at signed coordinates; off-map reads as stone.
    pub fn typ_at(&self, x: i32, y: i32) -> CellType {
        if x < 0 || y < 0 || x >= COLNO as i32 || y >= ROWNO as i32 {
            CellType::Stone
        } else {
            self.cells[x as usize][y as usize].typ
        }
    }

    pub fn set_typ(&mut self, x: usize, y: usize, typ: CellType) {
        self.cells[x][y].typ = typ;
    }

    pub fn trap_at(&self, x: usize, y: usize) -> Option<&Trap> {
        self.traps.iter().find(|t| t.x == x && t.y == y)
    }

    pub fn door_at(&self, x: usize, y: usize) -> Option<usize> {
        self.doors.iter().position(|d| d.x == x && d.y == y)
    }

    /// Something already claims this square (`occupied()` in mklev.c).
    pub fn occupied(&self, x: usize, y: usize) -> bool {
        let typ = self.typ(x, y);
        self.trap_at(x, y).is_some() || typ.is_furniture() || typ.is_pool() || typ == CellType::Lava
    }

    pub fn add_trap(&mut self, x: usize, y: usize, kind: TrapType) {
        if let Some(t) = self.traps.iter_mut().find(|t| t.x == x && t.y == y) {
            t.kind = kind;
        } else {
            self.traps.push(Trap { x, y, kind });
        }
    }

    /// Stamp furniture and record its payload.
    pub fn add_feature(&mut self, x: usize, y: usize, kind: FeatureKind) {
        let typ = match kind {
            FeatureKind::Fountain => {
                self.flags.fountain_count = self.flags.fountain_count.saturating_add(1);
                CellType::Fountain
            }
            FeatureKind::Sink => {
                self.flags.sink_count = self.flags.sink_count.saturating_add(1);
                CellType::Sink
            }
            FeatureKind::Altar { .. } => CellType::Altar,
            FeatureKind::Grave { .. } => CellType::Grave,
            FeatureKind::Throne => CellType::Throne,
        };
        self.set_typ(x, y, typ);
        self.features.push(Feature { x, y, kind });
    }

    pub fn set_stairs(&mut self, x: usize, y: usize, up: bool) {
        let cell = self.cell_mut(x, y);
        cell.typ = CellType::Stairs;
        cell.flags.set(CellFlags::UP_STAIR, up);
        let stair = Some(Stairway { x, y, up });
        if up {
            self.upstair = stair;
        } else {
            self.downstair = stair;
        }
    }

    /// Number of 4-connected passable regions.
    pub fn passable_regions(&self) -> usize {
        let mut seen = vec![vec![false; ROWNO]; COLNO];
        let mut regions = 0;
        for x in 0..COLNO {
            for y in 0..ROWNO {
                if seen[x][y] || !self.typ(x, y).is_passable() {
                    continue;
                }
                regions += 1;
                seen[x][y] = true;
                let mut queue = VecDeque::from([(x, y)]);
                while let Some((cx, cy)) = queue.pop_front() {
                    for (dx, dy) in [(0i32, -1i32), (0, 1), (-1, 0), (1, 0)] {
                        let nx = cx as i32 + dx;
                        let ny = cy as i32 + dy;
                        if nx < 0 || ny < 0 || nx >= COLNO as i32 || ny >= ROWNO as i32 {
                            continue;
                        }
                        let (nx, ny) = (nx as usize, ny as usize);
                        if !seen[nx][ny] && self.typ(nx, ny).is_passable() {
                            seen[nx][ny] = true;
                            queue.push_back((nx, ny));
                        }
                    }
                }
            }
        }
        regions
    }

    /// Terrain as text, one row per line.
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity((COLNO + 1) * ROWNO);
        for y in 0..ROWNO {
            let row: String = (0..COLNO).map(|x| self.cells[x][y].glyph()).collect();
            out.push_str(row.trim_end());
            out.push('\n');
        }
        out
    }
}
