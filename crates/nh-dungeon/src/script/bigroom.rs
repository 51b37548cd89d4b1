//! The big room: one huge lit hall with random contents.

use super::builder::{LevelBuilder, RegionSpec};
use super::map::MapTemplate;
use crate::error::ScriptError;

const WIDTH: usize = 75;
const FLOOR_ROWS: usize = 17;

fn bigroom_map() -> String {
    let wall = "-".repeat(WIDTH);
    let floor = format!("|{}|", ".".repeat(WIDTH - 2));
    let mut text = String::new();
    text.push_str(&wall);
    for _ in 0..FLOOR_ROWS {
        text.push('\n');
        text.push_str(&floor);
    }
    text.push('\n');
    text.push_str(&wall);
    text
}

pub(super) fn build(b: &mut LevelBuilder<'_>) -> Result<(), ScriptError> {
    let map = MapTemplate::parse(b.script(), &bigroom_map())?;
    b.map(&map)?;
    let room = b.region(RegionSpec::new(1, 1, WIDTH as i32 - 2, FLOOR_ROWS as i32).lit())?;

    b.stair_in_room(room, true);
    b.stair_in_room(room, false);
    for _ in 0..15 {
        b.object_in_room(room);
    }
    for _ in 0..6 {
        b.trap_in_room(room);
    }
    for _ in 0..28 {
        b.monster_in_room(room);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_shape() {
        let map = MapTemplate::parse("bigroom", &bigroom_map()).unwrap();
        assert_eq!((map.width(), map.height()), (75, 19));
    }
}
