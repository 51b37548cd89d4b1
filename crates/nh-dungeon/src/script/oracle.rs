//! Delphi: the Oracle's centre room, ringed by centaur statues, among a
//! handful of ordinary rooms.

use tracing::debug;

use super::builder::LevelBuilder;
use crate::consts::{COLNO, ROWNO};
use crate::dungeon::placement::RoomRequest;
use crate::dungeon::{DoorState, FeatureKind, RoomType};
use crate::error::ScriptError;

const CENTRE_SIZE: (usize, usize) = (11, 9);

const STATUES: [(usize, usize); 8] = [(0, 0), (0, 8), (10, 0), (10, 8), (5, 1), (5, 7), (2, 4), (8, 4)];

/// Fountains around the Oracle, relative to the inner room.
const FOUNTAINS: [(usize, usize); 4] = [(0, 1), (1, 0), (1, 2), (2, 1)];

pub(super) fn build(b: &mut LevelBuilder<'_>) -> Result<(), ScriptError> {
    let (w, h) = CENTRE_SIZE;
    let centre = b.room(RoomRequest {
        size: Some(CENTRE_SIZE),
        pos: Some(((COLNO - w) / 2, (ROWNO - h) / 2)),
        rtype: RoomType::Delphi,
        lit: Some(true),
        parent: None,
    });
    let Some(centre) = centre else {
        debug!("no space for the centre room");
        return Ok(());
    };
    let (cx, cy) = {
        let r = &b.level().rooms[centre];
        (r.lx as i32, r.ly as i32)
    };

    for (x, y) in STATUES {
        b.object(cx + x as i32, cy + y as i32, '`', Some("centaur statue"))?;
    }

    if let Some(inner) = b.subroom(centre, 4, 3, (3, 3), RoomType::Ordinary) {
        let (ix, iy) = {
            let r = &b.level().rooms[inner];
            (r.lx as i32, r.ly as i32)
        };
        for (x, y) in FOUNTAINS {
            b.feature(ix + x as i32, iy + y as i32, FeatureKind::Fountain)?;
        }
        b.monster(ix + 1, iy + 1, Some('@'), Some("Oracle"))?.peaceful = true;
        b.door_in_random_wall(inner, DoorState::NO_DOOR);
    }
    b.monster_in_room(centre);
    b.monster_in_room(centre);

    if let Some(room) = b.room(RoomRequest::default()) {
        b.stair_in_room(room, true);
        b.object_in_room(room);
    }
    if let Some(room) = b.room(RoomRequest::default()) {
        b.stair_in_room(room, false);
        b.object_in_room(room);
        b.trap_in_room(room);
        b.monster_in_room(room);
        b.monster_in_room(room);
    }
    if let Some(room) = b.room(RoomRequest::default()) {
        b.object_in_room(room);
        b.object_in_room(room);
        b.monster_in_room(room);
    }
    for _ in 0..2 {
        if let Some(room) = b.room(RoomRequest::default()) {
            b.object_in_room(room);
            b.trap_in_room(room);
            b.monster_in_room(room);
        }
    }

    b.random_corridors();
    Ok(())
}
