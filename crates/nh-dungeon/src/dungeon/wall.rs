//! Wall classification (mkmap.c wallification, sp_lev.c wallify_map)
//!
//! Raw walls are stamped as plain horizontal/vertical segments. This pass
//! removes walls buried in rock and then picks each remaining wall's
//! subtype (corner, T-junction, cross) from the walls around it. It reads
//! only the grid and makes no random draws, so it can be rerun after any
//! carving.

use super::{CellType, Level, Rect};

/// Subtype for each `N<<3 | S<<2 | E<<1 | W` spine pattern.
const SPINE_ARRAY: [CellType; 16] = [
    CellType::VWall,
    CellType::HWall,
    CellType::HWall,
    CellType::HWall,
    CellType::VWall,
    CellType::TRCorner,
    CellType::TLCorner,
    CellType::TDWall,
    CellType::VWall,
    CellType::BRCorner,
    CellType::BLCorner,
    CellType::TUWall,
    CellType::VWall,
    CellType::TLWall,
    CellType::TRWall,
    CellType::CrossWall,
];

fn is_solid(level: &Level, x: i32, y: i32) -> bool {
    !Level::isok(x, y) || level.typ_at(x, y).is_solid()
}

fn iswall(level: &Level, x: i32, y: i32) -> bool {
    Level::isok(x, y) && level.typ_at(x, y).is_wall_like()
}

fn iswall_or_stone(level: &Level, x: i32, y: i32) -> bool {
    if !Level::isok(x, y) {
        return true;
    }
    let typ = level.typ_at(x, y);
    typ == CellType::Stone || typ.is_wall_like()
}

/// Whether the wall continues toward `(dx, dy)`. A wall run that is
/// flanked by rock on both sides, right up to the next cell, is the back
/// of a thicker mass and does not count.
fn extend_spine(locale: &[[bool; 3]; 3], wall_there: bool, dx: i32, dy: i32) -> bool {
    if !wall_there {
        return false;
    }
    let nx = (1 + dx) as usize;
    let ny = (1 + dy) as usize;
    if dx != 0 {
        !(locale[1][0] && locale[1][2] && locale[nx][0] && locale[nx][2])
    } else {
        !(locale[0][1] && locale[2][1] && locale[0][ny] && locale[2][ny])
    }
}

/// Subtype for the wall at `(x, y)`, or `None` when it stands alone.
pub fn spine_type(level: &Level, x: usize, y: usize) -> Option<CellType> {
    let (x, y) = (x as i32, y as i32);
    let mut locale = [[false; 3]; 3];
    for (i, row) in locale.iter_mut().enumerate() {
        for (j, cell) in row.iter_mut().enumerate() {
            *cell = iswall_or_stone(level, x + i as i32 - 1, y + j as i32 - 1);
        }
    }

    let bits = (usize::from(extend_spine(&locale, iswall(level, x, y - 1), 0, -1)) << 3)
        | (usize::from(extend_spine(&locale, iswall(level, x, y + 1), 0, 1)) << 2)
        | (usize::from(extend_spine(&locale, iswall(level, x + 1, y), 1, 0)) << 1)
        | usize::from(extend_spine(&locale, iswall(level, x - 1, y), -1, 0));

    (bits != 0).then_some(SPINE_ARRAY[bits])
}

/// Turn walls with nothing but rock and walls around them into rock.
pub fn wall_cleanup(level: &mut Level, area: Rect) {
    for (x, y) in area.cells() {
        let typ = level.typ(x, y);
        if !typ.is_wall() || typ == CellType::DBWall {
            continue;
        }
        let (xi, yi) = (x as i32, y as i32);
        let buried = (-1..=1)
            .flat_map(|dx| (-1..=1).map(move |dy| (dx, dy)))
            .filter(|&d| d != (0, 0))
            .all(|(dx, dy)| is_solid(level, xi + dx, yi + dy));
        if buried {
            level.set_typ(x, y, CellType::Stone);
        }
    }
}

/// Give every wall in `area` its directional subtype.
pub fn fix_wall_spines(level: &mut Level, area: Rect) {
    for (x, y) in area.cells() {
        let typ = level.typ(x, y);
        if !typ.is_wall() || typ == CellType::DBWall {
            continue;
        }
        if let Some(spine) = spine_type(level, x, y) {
            level.set_typ(x, y, spine);
        }
    }
}

/// Cleanup then spine fix over `area`.
pub fn classify(level: &mut Level, area: Rect) {
    wall_cleanup(level, area);
    fix_wall_spines(level, area);
}

/// Floor-like terrain a wall should enclose.
fn is_room(typ: CellType) -> bool {
    typ as u8 >= CellType::Room as u8
}

/// Wrap rock that touches floor in `area` with raw walls: horizontal when
/// the floor is above or below, vertical when only beside it.
pub fn wallify(level: &mut Level, area: Rect) {
    for y in area.ly..=area.hy {
        let lo_y = y.saturating_sub(1);
        let hi_y = if y < area.hy { y + 1 } else { area.hy };
        for x in area.lx..=area.hx {
            if level.typ(x, y) != CellType::Stone {
                continue;
            }
            let lo_x = if x > 1 { x - 1 } else { 1 };
            let hi_x = if x < area.hx { x + 1 } else { area.hx };
            let touching = (lo_y..=hi_y)
                .flat_map(|yy| (lo_x..=hi_x).map(move |xx| (xx, yy)))
                .find(|&(xx, yy)| {
                    let t = level.typ(xx, yy);
                    is_room(t) || t == CellType::CrossWall
                });
            if let Some((_, yy)) = touching {
                let typ = if yy != y { CellType::HWall } else { CellType::VWall };
                level.set_typ(x, y, typ);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::tests::test_context;
    use crate::dungeon::placement::{RoomRequest, create_room};

    fn boxed_room() -> Level {
        let mut ctx = test_context(1);
        create_room(
            &mut ctx,
            RoomRequest {
                size: Some((4, 3)),
                pos: Some((10, 5)),
                lit: Some(true),
                ..RoomRequest::default()
            },
        )
        .unwrap();
        ctx.into_level()
    }

    #[test]
    fn test_box_room_corners() {
        let mut level = boxed_room();
        classify(&mut level, Rect::map());
        assert_eq!(level.typ(9, 4), CellType::TLCorner);
        assert_eq!(level.typ(14, 4), CellType::TRCorner);
        assert_eq!(level.typ(9, 8), CellType::BLCorner);
        assert_eq!(level.typ(14, 8), CellType::BRCorner);
        assert_eq!(level.typ(11, 4), CellType::HWall);
        assert_eq!(level.typ(9, 6), CellType::VWall);
    }

    #[test]
    fn test_buried_wall_removed() {
        let mut level = boxed_room();
        level.set_typ(40, 10, CellType::HWall);
        level.set_typ(41, 10, CellType::HWall);
        classify(&mut level, Rect::map());
        assert_eq!(level.typ(40, 10), CellType::Stone);
        assert_eq!(level.typ(41, 10), CellType::Stone);
        assert_eq!(level.typ(9, 4), CellType::TLCorner);
    }

    #[test]
    fn test_t_junction_on_shared_wall() {
        let mut level = boxed_room();
        // A corridor meeting the right wall from the right, walled on both sides.
        for x in 15..20 {
            level.set_typ(x, 5, CellType::HWall);
            level.set_typ(x, 6, CellType::Corridor);
            level.set_typ(x, 7, CellType::HWall);
        }
        classify(&mut level, Rect::map());
        assert_eq!(level.typ(14, 5), CellType::TRWall);
        assert_eq!(level.typ(14, 7), CellType::TRWall);
    }

    #[test]
    fn test_classify_is_idempotent() {
        let mut level = boxed_room();
        level.set_typ(14, 6, CellType::Door);
        classify(&mut level, Rect::map());
        let once = level.clone();
        classify(&mut level, Rect::map());
        assert_eq!(level, once);
    }

    #[test]
    fn test_wallify_surrounds_floor() {
        let mut level = boxed_room();
        let mut bare = Level::new(level.depth, level.branch.clone());
        for (x, y) in level.rooms[0].interior().cells() {
            bare.set_typ(x, y, CellType::Room);
        }
        wallify(&mut bare, Rect::map());
        classify(&mut bare, Rect::map());
        classify(&mut level, Rect::map());
        for (x, y) in level.rooms[0].bounds().cells() {
            assert_eq!(bare.typ(x, y), level.typ(x, y), "({x},{y})");
        }
    }
}
