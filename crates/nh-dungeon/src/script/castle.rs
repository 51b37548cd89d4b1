//! The castle: a moated fortress in a maze, guarding the wand of wishing.

use super::builder::{LevelBuilder, RegionSpec};
use super::map::MapTemplate;
use super::selection::Selection;
use crate::dungeon::maze::Heading;
use crate::dungeon::{DoorState, EngravingType, Rect, RoomType, TrapType, WallSide};
use crate::error::ScriptError;

const CASTLE_MAP: &str = r"
}}}}}}}}}.............................................}}}}}}}}}
}-------}.............................................}-------}
}|.....|-----------------------------------------------|.....|}
}|.....+...............................................+.....|}
}-------------------------------+-----------------------------}
}}}}}}|........|..........+...........|.......S.S.......|}}}}}}
.....}|........|..........|...........|.......|.|.......|}.....
.....}|........------------...........---------S---------}.....
.....}|...{....+..........+.........\.S.................+......
.....}|........------------...........---------S---------}.....
.....}|........|..........|...........|.......|.|.......|}.....
}}}}}}|........|..........+...........|.......S.S.......|}}}}}}
}-------------------------------+-----------------------------}
}|.....+...............................................+.....|}
}|.....|-----------------------------------------------|.....|}
}-------}.............................................}-------}
}}}}}}}}}.............................................}}}}}}}}}
";

const CLOSED_DOORS: [(i32, i32); 6] = [(7, 3), (55, 3), (15, 8), (26, 8), (7, 13), (55, 13)];

const LOCKED_DOORS: [(i32, i32); 12] = [
    (32, 4),
    (26, 5),
    (46, 5),
    (48, 5),
    (47, 7),
    (38, 8),
    (56, 8),
    (47, 9),
    (26, 11),
    (46, 11),
    (48, 11),
    (32, 12),
];

const STOREROOMS: [(i32, i32, i32, i32); 4] = [(39, 5, 45, 6), (49, 5, 55, 6), (39, 10, 45, 11), (49, 10, 55, 11)];

const TOWERS: [(i32, i32, i32, i32); 4] = [(2, 2, 6, 3), (56, 2, 60, 3), (2, 13, 6, 14), (56, 13, 60, 14)];

const BARRACKS: [(i32, i32, i32, i32); 2] = [(16, 5, 25, 6), (16, 10, 25, 11)];

const HALLWAYS: [(i32, i32, i32, i32); 4] = [(8, 3, 54, 3), (8, 13, 54, 13), (16, 8, 25, 8), (39, 8, 54, 8)];

/// Wishing chest goes in one tower, picked at random.
pub(super) const TOWER_SPOTS: [(i32, i32); 4] = [(4, 2), (58, 2), (4, 14), (58, 14)];

const TRAP_DOORS: [(i32, i32); 5] = [(40, 8), (44, 8), (48, 8), (52, 8), (55, 8)];

const SOLDIERS: [(i32, i32); 7] = [(8, 6), (9, 5), (11, 5), (12, 6), (10, 10), (9, 11), (11, 11)];

const DRAGONS: [(i32, i32); 4] = [(47, 5), (47, 6), (47, 10), (47, 11)];

const EELS: [(i32, i32); 4] = [(5, 7), (5, 9), (57, 7), (57, 9)];

const SHARKS: [(i32, i32); 4] = [(5, 0), (5, 16), (57, 0), (57, 16)];

const THRONE: (i32, i32) = (36, 8);

const COURT_MONSTERS: usize = 27;

pub(super) fn build(b: &mut LevelBuilder<'_>) -> Result<(), ScriptError> {
    let map = MapTemplate::parse(b.script(), CASTLE_MAP)?;
    b.maze_grid();
    b.map(&map)?;
    b.flags().no_teleport = true;

    let castle = b.region(RegionSpec::new(0, 0, 62, 16))?;
    b.region(RegionSpec::new(0, 6, 4, 10).lit().inside(castle))?;
    b.region(RegionSpec::new(58, 6, 62, 10).lit().inside(castle))?;
    b.region(RegionSpec::new(27, 5, 37, 11).lit().kind(RoomType::Court).inside(castle))?;
    b.region(RegionSpec::new(7, 5, 14, 11).inside(castle))?;
    for (x1, y1, x2, y2) in STOREROOMS.into_iter().chain(TOWERS).chain(HALLWAYS) {
        b.region(RegionSpec::new(x1, y1, x2, y2).inside(castle))?;
    }
    b.region(RegionSpec::new(47, 5, 47, 6).inside(castle))?;
    b.region(RegionSpec::new(47, 10, 47, 11).inside(castle))?;
    for (x1, y1, x2, y2) in BARRACKS {
        b.region(RegionSpec::new(x1, y1, x2, y2).lit().kind(RoomType::Barracks).inside(castle))?;
    }

    for (x, y) in CLOSED_DOORS {
        b.door(x, y, DoorState::CLOSED)?;
    }
    for (x, y) in LOCKED_DOORS {
        b.door(x, y, DoorState::LOCKED)?;
    }
    b.drawbridge(5, 8, WallSide::Right, false)?;

    let mut treasure = ['[', ')', '*', '%'];
    b.shuffle(&mut treasure);
    for (class, (x1, y1, x2, y2)) in treasure.into_iter().zip(STOREROOMS) {
        for x in x1..=x2 {
            for y in y1..=y2 {
                b.object(x, y, class, None)?;
            }
        }
    }

    let mut towers = Selection::from_points(TOWER_SPOTS);
    if let Some((x, y)) = towers.rndcoord(b.rng(), true) {
        b.object(x, y, '(', Some("chest"))?
            .contents
            .push("wand of wishing".to_string());
        b.engraving(x, y, EngravingType::Burn, "Elbereth")?;
        b.object(x, y, '?', Some("cursed scroll of scare monster"))?;
    }

    for (x, y) in TRAP_DOORS {
        b.trap(x, y, TrapType::TrapDoor)?;
    }

    for (x, y) in SOLDIERS {
        b.monster(x, y, Some('@'), Some("soldier"))?;
    }
    b.monster(12, 10, Some('@'), Some("lieutenant"))?;
    for (x1, y1, x2, y2) in BARRACKS {
        for (x, y) in Selection::rect(x1, y1, x2, y2).iter() {
            b.monster(x, y, Some('@'), Some("soldier"))?.asleep = true;
        }
    }
    for (x, y) in DRAGONS {
        b.monster(x, y, Some('D'), None)?;
    }
    for (x, y) in EELS {
        b.monster(x, y, Some(';'), Some("giant eel"))?;
    }
    for (x, y) in SHARKS {
        b.monster(x, y, Some(';'), Some("shark"))?;
    }

    let mut court_classes = ['L', 'N', 'E', 'H', 'M', 'O', 'R', 'T', 'X', 'Z'];
    b.shuffle(&mut court_classes);
    let mut court = Selection::rect(27, 5, 37, 11).without(THRONE.0, THRONE.1);
    for i in 0..COURT_MONSTERS {
        let Some((x, y)) = court.rndcoord(b.rng(), true) else {
            break;
        };
        let class = court_classes[i % court_classes.len()];
        b.monster(x, y, Some(class), None)?.asleep = true;
    }

    b.mazewalk(0, 10, Heading::West)?;
    b.mazewalk(62, 6, Heading::East)?;
    b.non_diggable(0, 0, 62, 16)?;

    b.stair_in_area(Rect::new(1, 0, 10, 20), Some((0, 0, 62, 16)), true)?;
    Ok(())
}
