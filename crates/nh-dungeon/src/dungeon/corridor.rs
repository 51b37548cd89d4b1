//! Corridor generation (mklev.c: makecorridors, join, dig_corridor)
//!
//! Implements the NetHack 4-phase corridor algorithm:
//! 1. Connect adjacent rooms (room[i] to room[i+1])
//! 2. Connect rooms two steps apart if not already connected
//! 3. Join every pair that is still apart
//! 4. Add random extra corridors for variety
//!
//! A dig that fails part way is rolled back, so no dangling stubs or orphan
//! doors survive. A final breadth-first pass joins anything the random
//! phases left apart.

use std::collections::VecDeque;

use tracing::{debug, warn};

use super::{CellType, Door, DoorState, ObjectPlacement, Room, RoomType, TrapType, WallSide};
use super::{Engraving, EngravingType};
use crate::consts::{COLNO, DOORMAX, ROWNO};
use crate::context::GenerationContext;
use crate::dungeon::features::random_object_class;
use crate::dungeon::Level;

/// Room connectivity as the corridor phases see it (smeq[] in C), plus
/// the true joined components.
///
/// `join` only copies one label: the room with the larger label takes the
/// smaller. Rooms already sharing a label with the loser keep their old
/// one, so `are_connected` can report two joined rooms as apart and the
/// later phases dig extra corridors between them. `reachable` tracks the
/// real components and is what the final repair pass trusts.
#[derive(Debug, Clone)]
pub struct ConnectivityTracker {
    smeq: Vec<usize>,
    component: Vec<usize>,
}

impl ConnectivityTracker {
    /// Create a new tracker for the given number of rooms
    pub fn new(num_rooms: usize) -> Self {
        Self {
            smeq: (0..num_rooms).collect(),
            component: (0..num_rooms).collect(),
        }
    }

    /// Whether the corridor phases treat `a` and `b` as joined.
    pub fn are_connected(&self, a: usize, b: usize) -> bool {
        self.smeq[a] == self.smeq[b]
    }

    /// Whether a corridor path really links `a` and `b`.
    pub fn reachable(&self, a: usize, b: usize) -> bool {
        self.component[a] == self.component[b]
    }

    /// Record a corridor between `a` and `b`.
    pub fn merge(&mut self, a: usize, b: usize) {
        if self.smeq[a] < self.smeq[b] {
            self.smeq[b] = self.smeq[a];
        } else {
            self.smeq[a] = self.smeq[b];
        }

        let (keep, drop) = if self.component[a] < self.component[b] {
            (self.component[a], self.component[b])
        } else {
            (self.component[b], self.component[a])
        };
        for c in &mut self.component {
            if *c == drop {
                *c = keep;
            }
        }
    }

    /// Every room is in one real component.
    pub fn all_connected(&self) -> bool {
        self.component.windows(2).all(|w| w[0] == w[1])
    }
}

/// A door or secret door is orthogonally next to (x, y).
pub fn bydoor(level: &Level, x: usize, y: usize) -> bool {
    [(0i32, -1i32), (0, 1), (-1, 0), (1, 0)]
        .iter()
        .any(|&(dx, dy)| level.typ_at(x as i32 + dx, y as i32 + dy).is_door())
}

/// A plain wall segment that can take a new door.
pub fn okdoor(level: &Level, x: usize, y: usize) -> bool {
    matches!(level.typ(x, y), CellType::HWall | CellType::VWall)
        && level.doors.len() < DOORMAX
        && !bydoor(level, x, y)
}

/// Pick a door position on the wall segment `(xl,yl)..(xh,yh)`: a random
/// spot if it is usable, else the first usable one, else an existing door.
pub fn finddpos(
    ctx: &mut GenerationContext,
    xl: usize,
    yl: usize,
    xh: usize,
    yh: usize,
) -> (usize, usize) {
    let x = ctx.rng.rn1((xh - xl + 1) as i32, xl as i32) as usize;
    let y = ctx.rng.rn1((yh - yl + 1) as i32, yl as i32) as usize;
    if okdoor(&ctx.level, x, y) {
        return (x, y);
    }

    let segment = || (xl..=xh).flat_map(move |x| (yl..=yh).map(move |y| (x, y)));
    if let Some(pos) = segment().find(|&(x, y)| okdoor(&ctx.level, x, y)) {
        return pos;
    }
    if let Some(pos) = segment().find(|&(x, y)| ctx.level.typ(x, y).is_door()) {
        return pos;
    }
    (xl, yh)
}

/// Side of `room` that `(x, y)` belongs to.
fn door_side(room: &Room, x: usize, y: usize) -> WallSide {
    room.wall_side(x, y).unwrap_or(if y < room.ly {
        WallSide::Top
    } else if y > room.hy {
        WallSide::Bottom
    } else if x < room.lx {
        WallSide::Left
    } else {
        WallSide::Right
    })
}

/// Record a door, updating the existing record if there is one.
pub fn add_door(ctx: &mut GenerationContext, x: usize, y: usize, room: usize, state: DoorState) {
    ctx.level.cell_mut(x, y).door = state;
    let side = door_side(&ctx.level.rooms[room], x, y);
    let idx = match ctx.level.door_at(x, y) {
        Some(idx) => {
            ctx.level.doors[idx].state = state;
            idx
        }
        None => {
            ctx.level.doors.push(Door {
                x,
                y,
                state,
                side,
                room: Some(room),
            });
            ctx.level.doors.len() - 1
        }
    };
    if !ctx.level.rooms[room].doors.contains(&idx) {
        ctx.level.rooms[room].doors.push(idx);
    }
}

/// Place a door of the given type and roll its state.
pub fn dosdoor(ctx: &mut GenerationContext, x: usize, y: usize, room: usize, typ: CellType) {
    let shdoor = ctx.level.rooms[room].rtype.is_shop();
    let difficulty = ctx.difficulty();
    let typ = if ctx.level.typ(x, y).is_wall() {
        typ
    } else {
        CellType::Door
    };
    ctx.level.set_typ(x, y, typ);

    let state = if typ == CellType::Door {
        if ctx.rng.rn2(3) == 0 {
            let mut state = if ctx.rng.rn2(5) == 0 {
                DoorState::OPEN
            } else if ctx.rng.rn2(6) == 0 {
                DoorState::LOCKED
            } else {
                DoorState::CLOSED
            };
            if state != DoorState::OPEN && !shdoor && difficulty >= 5 && ctx.rng.rn2(25) == 0 {
                state |= DoorState::TRAPPED;
            }
            state
        } else if shdoor {
            DoorState::OPEN
        } else {
            DoorState::NO_DOOR
        }
    } else {
        let mut state = if shdoor || ctx.rng.rn2(5) == 0 {
            DoorState::LOCKED
        } else {
            DoorState::CLOSED
        };
        if !shdoor && difficulty >= 4 && ctx.rng.rn2(20) == 0 {
            state |= DoorState::TRAPPED;
        }
        state | DoorState::SECRET
    };
    add_door(ctx, x, y, room, state);
}

/// Place a door, secret one time in eight.
pub fn dodoor(ctx: &mut GenerationContext, x: usize, y: usize, room: usize) {
    if ctx.level.doors.len() >= DOORMAX {
        return;
    }
    let typ = if ctx.rng.rn2(8) != 0 {
        CellType::Door
    } else {
        CellType::SecretDoor
    };
    dosdoor(ctx, x, y, room, typ);
}

fn diggable_through(typ: CellType) -> bool {
    matches!(
        typ,
        CellType::Stone | CellType::Corridor | CellType::SecretCorridor
    )
}

/// Dig from `org` to `dest`, turning stone into corridor. Straight runs
/// are broken by occasional sidesteps toward the target, so paths come
/// out staircase-shaped. Returns false, with every dug cell restored, if
/// the path runs into something it cannot dig through or gives up.
pub fn dig_corridor(
    ctx: &mut GenerationContext,
    org: (i32, i32),
    dest: (i32, i32),
    nxcor: bool,
) -> bool {
    let (mut xx, mut yy) = org;
    let (tx, ty) = dest;
    let cols = COLNO as i32;
    let rows = ROWNO as i32;
    if xx <= 0 || yy <= 0 || tx <= 0 || ty <= 0 || xx > cols - 1 || tx > cols - 1 || yy > rows - 1 || ty > rows - 1 {
        return false;
    }

    let (mut dx, mut dy) = if tx > xx {
        (1, 0)
    } else if ty > yy {
        (0, 1)
    } else if tx < xx {
        (-1, 0)
    } else {
        (0, -1)
    };

    let mut dug: Vec<(usize, usize)> = Vec::new();
    let objects_before = ctx.level.objects.len();
    let secret_chance = ctx.options.secret_corridor_chance;
    let abort_chance = ctx.options.nxcor_abort_chance;

    xx -= dx;
    yy -= dy;
    let mut cct = 0;
    let ok = loop {
        if xx == tx && yy == ty {
            break true;
        }
        cct += 1;
        if cct > 500 || (nxcor && ctx.rng.rn2(abort_chance) == 0) {
            break false;
        }

        xx += dx;
        yy += dy;
        if xx >= cols - 1 || xx <= 0 || yy <= 0 || yy >= rows - 1 {
            break false;
        }

        let (ux, uy) = (xx as usize, yy as usize);
        match ctx.level.typ(ux, uy) {
            CellType::Stone => {
                let typ = if ctx.rng.rn2(secret_chance) != 0 {
                    CellType::Corridor
                } else {
                    CellType::SecretCorridor
                };
                ctx.level.set_typ(ux, uy, typ);
                dug.push((ux, uy));
                if typ == CellType::Corridor && nxcor && ctx.rng.rn2(50) == 0 {
                    ctx.level
                        .objects
                        .push(ObjectPlacement::named(ux, uy, '`', "boulder"));
                }
            }
            CellType::Corridor | CellType::SecretCorridor => {}
            _ => break false,
        }

        // find next corridor position
        let mut dix = (xx - tx).abs();
        let mut diy = (yy - ty).abs();

        if dix > diy && diy != 0 && ctx.rng.rn2(dix - diy + 1) == 0 {
            dix = 0;
        } else if diy > dix && dix != 0 && ctx.rng.rn2(diy - dix + 1) == 0 {
            diy = 0;
        }

        // do we have to change direction?
        if dy != 0 && dix > diy {
            let ddx = if xx > tx { -1 } else { 1 };
            if diggable_through(ctx.level.typ_at(xx + ddx, yy)) {
                dx = ddx;
                dy = 0;
                continue;
            }
        } else if dx != 0 && diy > dix {
            let ddy = if yy > ty { -1 } else { 1 };
            if diggable_through(ctx.level.typ_at(xx, yy + ddy)) {
                dy = ddy;
                dx = 0;
                continue;
            }
        }

        // continue straight on?
        if diggable_through(ctx.level.typ_at(xx + dx, yy + dy)) {
            continue;
        }

        // try to change direction
        if dx != 0 {
            dx = 0;
            dy = if ty < yy { -1 } else { 1 };
        } else {
            dy = 0;
            dx = if tx < xx { -1 } else { 1 };
        }
        if diggable_through(ctx.level.typ_at(xx + dx, yy + dy)) {
            continue;
        }
        dy = -dy;
        dx = -dx;
    };

    if !ok {
        for (x, y) in dug {
            ctx.level.set_typ(x, y, CellType::Stone);
        }
        ctx.level.objects.truncate(objects_before);
    }
    ok
}

/// Connect rooms `a` and `b` through their facing walls.
pub fn join(ctx: &mut GenerationContext, a: usize, b: usize, nxcor: bool) -> bool {
    if ctx.level.doors.len() >= DOORMAX {
        return false;
    }
    let croom = ctx.level.rooms[a].clone();
    let troom = ctx.level.rooms[b].clone();

    let (dd, tt, dx, dy) = if troom.lx > croom.hx {
        let dd = finddpos(ctx, croom.hx + 1, croom.ly, croom.hx + 1, croom.hy);
        let tt = finddpos(ctx, troom.lx - 1, troom.ly, troom.lx - 1, troom.hy);
        (dd, tt, 1, 0)
    } else if troom.hy < croom.ly {
        let dd = finddpos(ctx, croom.lx, croom.ly - 1, croom.hx, croom.ly - 1);
        let tt = finddpos(ctx, troom.lx, troom.hy + 1, troom.hx, troom.hy + 1);
        (dd, tt, 0, -1)
    } else if troom.hx < croom.lx {
        let dd = finddpos(ctx, croom.lx - 1, croom.ly, croom.lx - 1, croom.hy);
        let tt = finddpos(ctx, troom.hx + 1, troom.ly, troom.hx + 1, troom.hy);
        (dd, tt, -1, 0)
    } else {
        let dd = finddpos(ctx, croom.lx, croom.hy + 1, croom.hx, croom.hy + 1);
        let tt = finddpos(ctx, troom.lx, troom.ly - 1, troom.hx, troom.ly - 1);
        (dd, tt, 0, 1)
    };

    let org = (dd.0 as i32 + dx, dd.1 as i32 + dy);
    let dest = (tt.0 as i32 - dx, tt.1 as i32 - dy);

    let usable = |level: &Level, (x, y): (usize, usize)| okdoor(level, x, y) || level.typ(x, y).is_door();
    if nxcor {
        if ctx.level.typ_at(org.0, org.1) != CellType::Stone {
            return false;
        }
        // An extra corridor must end at a doorway on both sides.
        if !usable(&ctx.level, dd) || !usable(&ctx.level, tt) {
            return false;
        }
    }

    if !dig_corridor(ctx, org, dest, nxcor) {
        return false;
    }

    if okdoor(&ctx.level, dd.0, dd.1) || !nxcor {
        dodoor(ctx, dd.0, dd.1, a);
    }
    if okdoor(&ctx.level, tt.0, tt.1) || !nxcor {
        dodoor(ctx, tt.0, tt.1, b);
    }
    true
}

/// Wall cells of `room` a corridor could leave from, paired with the
/// stone or corridor square just outside.
fn exits(level: &Level, room: &Room) -> Vec<((usize, usize), (usize, usize))> {
    let b = room.bounds();
    let mut out = Vec::new();
    for (x, y) in b.cells() {
        let Some(side) = room.wall_side(x, y) else {
            continue;
        };
        if !(okdoor(level, x, y) || level.typ(x, y).is_door()) {
            continue;
        }
        let (dx, dy) = side.outward();
        let (ox, oy) = (x as i32 + dx, y as i32 + dy);
        if ox <= 0 || oy <= 0 || ox >= COLNO as i32 - 1 || oy >= ROWNO as i32 - 1 {
            continue;
        }
        if diggable_through(level.typ(ox as usize, oy as usize)) {
            out.push(((x, y), (ox as usize, oy as usize)));
        }
    }
    out
}

/// Breadth-first corridor from any room in `from` to room `to`. Makes no
/// draws except for the two doors.
fn connect_by_search(ctx: &mut GenerationContext, from: &[usize], to: usize) -> bool {
    let mut sources: Vec<((usize, usize), (usize, usize), usize)> = Vec::new();
    for &r in from {
        let room = ctx.level.rooms[r].clone();
        sources.extend(exits(&ctx.level, &room).into_iter().map(|(d, o)| (d, o, r)));
    }
    let target_room = ctx.level.rooms[to].clone();
    let targets = exits(&ctx.level, &target_room);
    if sources.is_empty() || targets.is_empty() {
        return false;
    }

    let mut prev: Vec<Vec<Option<(usize, usize)>>> = vec![vec![None; ROWNO]; COLNO];
    let mut seen = vec![vec![false; ROWNO]; COLNO];
    let mut queue = VecDeque::new();
    for &(_, (ox, oy), _) in &sources {
        if !seen[ox][oy] {
            seen[ox][oy] = true;
            queue.push_back((ox, oy));
        }
    }

    let mut reached = None;
    while let Some((x, y)) = queue.pop_front() {
        if let Some(t) = targets.iter().find(|(_, o)| *o == (x, y)) {
            reached = Some(*t);
            break;
        }
        for (dx, dy) in [(0i32, -1i32), (0, 1), (-1, 0), (1, 0)] {
            let (nx, ny) = (x as i32 + dx, y as i32 + dy);
            if nx <= 0 || ny <= 0 || nx >= COLNO as i32 - 1 || ny >= ROWNO as i32 - 1 {
                continue;
            }
            let (nx, ny) = (nx as usize, ny as usize);
            if !seen[nx][ny] && diggable_through(ctx.level.typ(nx, ny)) {
                seen[nx][ny] = true;
                prev[nx][ny] = Some((x, y));
                queue.push_back((nx, ny));
            }
        }
    }

    let Some((tdoor, tout)) = reached else {
        return false;
    };

    let mut at = tout;
    loop {
        if ctx.level.typ(at.0, at.1) == CellType::Stone {
            ctx.level.set_typ(at.0, at.1, CellType::Corridor);
        }
        match prev[at.0][at.1] {
            Some(p) => at = p,
            None => break,
        }
    }
    let Some(&(sdoor, _, sroom)) = sources.iter().find(|(_, o, _)| *o == at) else {
        return false;
    };

    if !ctx.level.typ(sdoor.0, sdoor.1).is_door() {
        dodoor(ctx, sdoor.0, sdoor.1, sroom);
    }
    if !ctx.level.typ(tdoor.0, tdoor.1).is_door() {
        dodoor(ctx, tdoor.0, tdoor.1, to);
    }
    true
}

/// Join every top-level room into one network.
pub fn make_corridors(ctx: &mut GenerationContext) {
    let tops: Vec<usize> = (0..ctx.level.rooms.len())
        .filter(|&r| !ctx.level.rooms[r].is_subroom())
        .collect();
    let nroom = tops.len();
    let mut smeq = ConnectivityTracker::new(nroom);
    if nroom < 2 {
        return;
    }
    let link = |ctx: &mut GenerationContext, smeq: &mut ConnectivityTracker, a: usize, b: usize, nxcor: bool| {
        if join(ctx, tops[a], tops[b], nxcor) {
            smeq.merge(a, b);
        }
    };

    for a in 0..nroom - 1 {
        link(ctx, &mut smeq, a, a + 1, false);
        if ctx.rng.rn2(50) == 0 {
            break; // allow some randomness
        }
    }
    for a in 0..nroom.saturating_sub(2) {
        if !smeq.are_connected(a, a + 2) {
            link(ctx, &mut smeq, a, a + 2, false);
        }
    }
    let mut any = true;
    for a in 0..nroom {
        if !any {
            break;
        }
        any = false;
        for b in 0..nroom {
            if !smeq.are_connected(a, b) {
                link(ctx, &mut smeq, a, b, false);
                any = true;
            }
        }
    }
    if nroom > 2 && ctx.options.extra_corridors {
        for _ in 0..ctx.rng.rn2(nroom as i32) + 4 {
            let a = ctx.rng.rn2(nroom as i32) as usize;
            let mut b = ctx.rng.rn2(nroom as i32 - 2) as usize;
            if b >= a {
                b += 2;
            }
            link(ctx, &mut smeq, a, b, true);
        }
    }

    repair_connectivity(ctx, &tops, &mut smeq);
}

/// Join rooms the random phases left apart.
fn repair_connectivity(ctx: &mut GenerationContext, tops: &[usize], smeq: &mut ConnectivityTracker) {
    for b in 1..tops.len() {
        if smeq.reachable(0, b) {
            continue;
        }
        warn!(room = tops[b], "room left unconnected by random corridors, repairing");
        let component: Vec<usize> = (0..tops.len())
            .filter(|&r| smeq.reachable(0, r))
            .map(|r| tops[r])
            .collect();
        if connect_by_search(ctx, &component, tops[b]) {
            smeq.merge(0, b);
        } else {
            warn!(room = tops[b], "no corridor route found");
        }
    }
}

/// Closets off the top or bottom wall of ordinary rooms.
pub fn make_niches(ctx: &mut GenerationContext) {
    let nroom = ctx.level.rooms.len();
    if nroom == 0 {
        return;
    }
    let depth = ctx.depth();
    let mut ltptr = !ctx.level.flags.no_teleport && depth > 15;
    let mut vamp = depth > 5 && depth < 25;

    let mut ct = ctx.rng.rnd((nroom as i32 >> 1) + 1);
    while ct > 0 {
        ct -= 1;
        if ltptr && ctx.rng.rn2(6) == 0 {
            ltptr = false;
            makeniche(ctx, Some(TrapType::LevelTeleport));
        } else if vamp && ctx.rng.rn2(6) == 0 {
            vamp = false;
            makeniche(ctx, Some(TrapType::TrapDoor));
        } else {
            makeniche(ctx, None);
        }
    }
}

fn makeniche(ctx: &mut GenerationContext, trap: Option<TrapType>) {
    let nroom = ctx.level.rooms.len() as i32;
    for _ in 0..8 {
        let ri = ctx.rng.rn2(nroom) as usize;
        let room = ctx.level.rooms[ri].clone();
        if room.rtype != RoomType::Ordinary {
            continue;
        }
        if room.doors.len() == 1 && ctx.rng.rn2(5) != 0 {
            continue;
        }
        let (dd, dy) = if ctx.rng.rn2(2) != 0 {
            (finddpos(ctx, room.lx, room.hy + 1, room.hx, room.hy + 1), 1i32)
        } else {
            (finddpos(ctx, room.lx, room.ly - 1, room.hx, room.ly - 1), -1i32)
        };
        let ny = dd.1 as i32 + dy;
        if !Level::isok(dd.0 as i32, ny) || ctx.level.typ_at(dd.0 as i32, ny) != CellType::Stone {
            continue;
        }
        let niche = (dd.0, ny as usize);

        ctx.level.set_typ(niche.0, niche.1, CellType::Corridor);
        if trap.is_some() || ctx.rng.rn2(4) == 0 {
            if let Some(mut kind) = trap {
                if kind.is_hole() && !ctx.level.branch.can_dig_down() {
                    kind = TrapType::RockFall;
                }
                ctx.level.add_trap(niche.0, niche.1, kind);
                let text = match kind {
                    TrapType::TrapDoor => Some("Vlad was here"),
                    TrapType::Teleport | TrapType::LevelTeleport => Some("ad aerarium"),
                    _ => None,
                };
                if let Some(text) = text {
                    let inside = (dd.1 as i32 - dy) as usize;
                    ctx.level.engravings.push(Engraving {
                        x: dd.0,
                        y: inside,
                        text: text.to_string(),
                        kind: EngravingType::Dust,
                    });
                }
            }
            let typ = if ctx.rng.rn2(5) != 0 {
                CellType::SecretDoor
            } else {
                CellType::Door
            };
            dosdoor(ctx, dd.0, dd.1, ri, typ);
        } else {
            let typ = if ctx.rng.rn2(7) != 0 {
                if ctx.rng.rn2(5) != 0 {
                    CellType::SecretDoor
                } else {
                    CellType::Door
                }
            } else {
                // A sealed trove: locked behind a secret door, with a way out.
                if !ctx.level.flags.no_teleport {
                    ctx.level.objects.push(ObjectPlacement::named(
                        niche.0,
                        niche.1,
                        '?',
                        "scroll of teleportation",
                    ));
                }
                if ctx.rng.rn2(3) == 0 {
                    let class = random_object_class(ctx);
                    ctx.level
                        .objects
                        .push(ObjectPlacement::new(niche.0, niche.1, class));
                }
                CellType::SecretDoor
            };
            dosdoor(ctx, dd.0, dd.1, ri, typ);
        }
        debug!(x = niche.0, y = niche.1, room = ri, "niche dug");
        return;
    }
}
