//! Room placement (mklev.c: makerooms, create_room, sort_rooms, topologize)
//!
//! Rooms are dropped at random: a size is drawn, then a top-left corner,
//! and the candidate is kept only if its wall box plus a one-cell clearance
//! fits the allowed area and stays clear of every sibling's clearance box.
//! A room that cannot be placed within the retry budget is skipped.

use tracing::debug;

use super::{CellFlags, CellType, Rect, Room, RoomType};
use crate::consts::{
    COLNO, MAX_SUBROOMS, MAXNROFROOMS, ROOM_MAX_HEIGHT, ROOM_MAX_WIDTH, ROOM_MIN_HEIGHT,
    ROOM_MIN_WIDTH, ROWNO,
};
use crate::context::GenerationContext;

/// What a caller wants from [`create_room`]. Unset fields are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RoomRequest {
    /// Interior size
    pub size: Option<(usize, usize)>,
    /// Interior top-left corner (absolute map coordinates)
    pub pos: Option<(usize, usize)>,
    pub rtype: RoomType,
    pub lit: Option<bool>,
    pub parent: Option<usize>,
}

/// Area the clearance box of a top-level room must stay inside.
fn level_area() -> Rect {
    Rect::new(1, 0, COLNO - 1, ROWNO - 1)
}

/// `litstate_rnd`: deeper rooms are more often dark.
pub fn roll_lit(ctx: &mut GenerationContext) -> bool {
    let depth = ctx.level.depth.abs();
    ctx.rng.rnd(1 + depth) < 11 && ctx.rng.rn2(77) != 0
}

/// Place up to `max_rooms` ordinary rooms. Returns how many were placed.
pub fn place_rooms(ctx: &mut GenerationContext, max_rooms: usize) -> usize {
    let before = ctx.level.rooms.len();
    for attempt in 0..max_rooms {
        if ctx.level.rooms.len() >= MAXNROFROOMS {
            break;
        }
        if create_room(ctx, RoomRequest::default()).is_none() {
            debug!(attempt, "room skipped after exhausting retries");
        }
    }
    ctx.level.rooms.len() - before
}

/// Place one room (or subroom) and stamp it. `None` when the retry
/// budget runs out or an explicit placement does not fit.
pub fn create_room(ctx: &mut GenerationContext, req: RoomRequest) -> Option<usize> {
    let lit = match req.lit {
        Some(lit) => lit,
        None => roll_lit(ctx),
    };

    let (area, siblings) = match req.parent {
        Some(p) => {
            if ctx.level.rooms[p].subrooms.len() >= MAX_SUBROOMS {
                return None;
            }
            (ctx.level.rooms[p].interior(), ctx.level.rooms[p].subrooms.clone())
        }
        None => (
            level_area(),
            (0..ctx.level.rooms.len())
                .filter(|&i| !ctx.level.rooms[i].is_subroom())
                .collect(),
        ),
    };

    let tries = if req.size.is_some() && req.pos.is_some() {
        1
    } else {
        ctx.options.room_retries.max(1)
    };

    for _ in 0..tries {
        let (w, h) = match req.size {
            Some(size) => size,
            None => (
                ctx.rng
                    .rn1((ROOM_MAX_WIDTH - ROOM_MIN_WIDTH + 1) as i32, ROOM_MIN_WIDTH as i32)
                    as usize,
                ctx.rng
                    .rn1((ROOM_MAX_HEIGHT - ROOM_MIN_HEIGHT + 1) as i32, ROOM_MIN_HEIGHT as i32)
                    as usize,
            ),
        };

        let (x, y) = match req.pos {
            Some(pos) => pos,
            None => {
                // Clearance box is [x-2, x+w+1] x [y-2, y+h+1].
                let xspan = area.width() as i32 - w as i32 - 3;
                let yspan = area.height() as i32 - h as i32 - 3;
                if xspan <= 0 || yspan <= 0 {
                    continue;
                }
                (
                    area.lx + 2 + ctx.rng.rn2(xspan) as usize,
                    area.ly + 2 + ctx.rng.rn2(yspan) as usize,
                )
            }
        };

        if x < 2 || y < 2 || w == 0 || h == 0 {
            continue;
        }
        let interior = Rect::new(x, y, x + w - 1, y + h - 1);
        let candidate = Room::new(interior, lit);
        let clear = candidate.margined();
        if !clear.is_inside(&area) {
            continue;
        }
        if siblings
            .iter()
            .any(|&i| ctx.level.rooms[i].margined().intersects(&clear))
        {
            continue;
        }

        return Some(add_room(ctx, candidate, req.rtype, req.parent));
    }
    None
}

/// Stamp floor and raw walls for a room whose geometry is already decided.
pub fn add_room(
    ctx: &mut GenerationContext,
    mut room: Room,
    rtype: RoomType,
    parent: Option<usize>,
) -> usize {
    room.rtype = rtype;
    room.parent = parent;
    let idx = ctx.level.rooms.len();
    let lit = room.lit;
    let bounds = room.bounds();

    for (x, y) in bounds.cells() {
        let cell = ctx.level.cell_mut(x, y);
        cell.typ = if room.contains(x, y) {
            CellType::Room
        } else if y == bounds.ly || y == bounds.hy {
            CellType::HWall
        } else {
            CellType::VWall
        };
        cell.lit = lit;
    }

    ctx.level.rooms.push(room);
    if let Some(p) = parent {
        ctx.level.rooms[p].subrooms.push(idx);
    }
    debug!(idx, ?bounds, ?rtype, "room placed");
    idx
}

/// Order top-level rooms left to right, ties broken top to bottom.
/// Subrooms follow every top-level room in their old order, and room
/// indices held by rooms, doors and cells are renumbered to match.
pub fn sort_rooms(ctx: &mut GenerationContext) {
    let level = &mut ctx.level;
    let mut order: Vec<usize> = (0..level.rooms.len())
        .filter(|&i| !level.rooms[i].is_subroom())
        .collect();
    order.sort_by_key(|&i| (level.rooms[i].lx, level.rooms[i].ly));
    order.extend((0..level.rooms.len()).filter(|&i| level.rooms[i].is_subroom()));
    if order.iter().enumerate().all(|(new, &old)| new == old) {
        return;
    }

    let mut renumber = vec![0; order.len()];
    for (new, &old) in order.iter().enumerate() {
        renumber[old] = new;
    }
    let mut rooms: Vec<Room> = order.iter().map(|&old| level.rooms[old].clone()).collect();
    for room in &mut rooms {
        room.parent = room.parent.map(|p| renumber[p]);
        for s in &mut room.subrooms {
            *s = renumber[*s];
        }
    }
    level.rooms = rooms;
    for door in &mut level.doors {
        door.room = door.room.map(|r| renumber[r]);
    }
    for cell in level.cells.iter_mut().flatten() {
        if let Some(r) = cell.roomno {
            cell.roomno = Some(renumber[r as usize] as u8);
        }
    }
}

/// Record room ownership on every floor and wall cell.
pub fn topologize(ctx: &mut GenerationContext) {
    for idx in 0..ctx.level.rooms.len() {
        let room = ctx.level.rooms[idx].clone();
        let owner = idx as u8;
        for (x, y) in room.bounds().cells() {
            let cell = ctx.level.cell_mut(x, y);
            if room.contains(x, y) {
                cell.roomno = Some(owner);
            } else {
                match cell.roomno {
                    None => cell.roomno = Some(owner),
                    Some(other) if other != owner => cell.flags |= CellFlags::SHARED,
                    Some(_) => {}
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::tests::test_context;
    use crate::dungeon::DoorState;
    use crate::dungeon::corridor::add_door;

    #[test]
    fn test_rooms_keep_clearance() {
        for seed in [1, 7, 42, 12345] {
            let mut ctx = test_context(seed);
            place_rooms(&mut ctx, 12);
            let rooms = &ctx.level.rooms;
            assert!(!rooms.is_empty());
            for (i, a) in rooms.iter().enumerate() {
                assert!(a.margined().is_inside(&level_area()));
                for b in &rooms[i + 1..] {
                    assert!(!a.margined().intersects(&b.margined()));
                }
            }
        }
    }

    #[test]
    fn test_room_stamped_with_raw_walls() {
        let mut ctx = test_context(3);
        let idx = create_room(
            &mut ctx,
            RoomRequest {
                size: Some((4, 3)),
                pos: Some((10, 5)),
                lit: Some(true),
                ..RoomRequest::default()
            },
        )
        .unwrap();
        let level = &ctx.level;
        assert_eq!(level.rooms[idx].interior(), Rect::new(10, 5, 13, 7));
        assert_eq!(level.typ(10, 5), CellType::Room);
        assert_eq!(level.typ(9, 4), CellType::HWall);
        assert_eq!(level.typ(11, 4), CellType::HWall);
        assert_eq!(level.typ(9, 6), CellType::VWall);
        assert_eq!(level.typ(14, 8), CellType::HWall);
        assert!(level.cell(12, 6).lit);
        assert_eq!(ctx.rng.draw_count(), 0);
    }

    #[test]
    fn test_explicit_overlap_rejected() {
        let mut ctx = test_context(3);
        let req = RoomRequest {
            size: Some((4, 3)),
            pos: Some((10, 5)),
            lit: Some(false),
            ..RoomRequest::default()
        };
        assert!(create_room(&mut ctx, req).is_some());
        let near = RoomRequest {
            pos: Some((16, 5)),
            ..req
        };
        assert!(create_room(&mut ctx, near).is_none());
        let far = RoomRequest {
            pos: Some((19, 5)),
            ..req
        };
        assert!(create_room(&mut ctx, far).is_some());
    }

    #[test]
    fn test_subroom_inside_parent() {
        let mut ctx = test_context(11);
        let parent = create_room(
            &mut ctx,
            RoomRequest {
                size: Some((14, 5)),
                pos: Some((20, 6)),
                lit: Some(true),
                ..RoomRequest::default()
            },
        )
        .unwrap();
        let child = create_room(
            &mut ctx,
            RoomRequest {
                size: Some((3, 1)),
                parent: Some(parent),
                rtype: RoomType::Vault,
                ..RoomRequest::default()
            },
        )
        .unwrap();
        let level = &ctx.level;
        assert_eq!(level.rooms[child].parent, Some(parent));
        assert_eq!(level.rooms[parent].subrooms, vec![child]);
        assert!(level.rooms[child].margined().is_inside(&level.rooms[parent].interior()));
    }

    #[test]
    fn test_sort_and_topologize() {
        let mut ctx = test_context(42);
        place_rooms(&mut ctx, 10);
        sort_rooms(&mut ctx);
        topologize(&mut ctx);
        let rooms = &ctx.level.rooms;
        for pair in rooms.windows(2) {
            assert!((pair[0].lx, pair[0].ly) <= (pair[1].lx, pair[1].ly));
        }
        for (i, room) in rooms.iter().enumerate() {
            for (x, y) in room.interior().cells() {
                assert_eq!(ctx.level.cell(x, y).roomno, Some(i as u8));
            }
        }
    }

    #[test]
    fn test_sort_renumbers_subrooms_and_doors() {
        let mut ctx = test_context(3);
        let right = create_room(
            &mut ctx,
            RoomRequest {
                size: Some((9, 7)),
                pos: Some((50, 5)),
                lit: Some(true),
                ..RoomRequest::default()
            },
        )
        .unwrap();
        let inner = create_room(
            &mut ctx,
            RoomRequest {
                size: Some((3, 3)),
                pos: Some((53, 7)),
                lit: Some(true),
                parent: Some(right),
                ..RoomRequest::default()
            },
        )
        .unwrap();
        let left = create_room(
            &mut ctx,
            RoomRequest {
                size: Some((4, 3)),
                pos: Some((10, 5)),
                lit: Some(true),
                ..RoomRequest::default()
            },
        )
        .unwrap();
        assert_eq!((right, inner, left), (0, 1, 2));
        add_door(&mut ctx, 52, 8, inner, DoorState::NO_DOOR);

        sort_rooms(&mut ctx);
        let rooms = &ctx.level.rooms;
        assert_eq!((rooms[0].lx, rooms[1].lx, rooms[2].lx), (10, 50, 53));
        assert_eq!(rooms[1].subrooms, vec![2]);
        assert_eq!(rooms[2].parent, Some(1));
        assert_eq!(ctx.level.doors[0].room, Some(2));
        assert_eq!(rooms[2].doors, vec![0]);
    }

    #[test]
    fn test_placement_is_deterministic() {
        let mut a = test_context(99);
        let mut b = test_context(99);
        place_rooms(&mut a, 12);
        place_rooms(&mut b, 12);
        assert_eq!(a.level.rooms, b.level.rooms);
        assert_eq!(a.rng.draw_count(), b.rng.draw_count());
    }
}
