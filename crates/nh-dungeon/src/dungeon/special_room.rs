//! Themed rooms (mkroom.c, shknam.c: mkroom, mkshop, mkzoo, fill_zoo,
//! mktemple, mkswamp)
//!
//! At most one ordinary room per level is converted, picked by a depth
//! gated chain of chances. Each [`RoomType`] maps to the handler that
//! claims a room and fills it.

use tracing::{debug, info};

use super::features::{has_stairs, make_grave, random_box, random_object_class, somexy};
use super::{
    Alignment, CellType, DoorState, Engraving, EngravingType, FeatureKind, Level, MonsterPlacement,
    ObjectPlacement, RoomType, WallSide,
};
use crate::consts::{MEDUSA_DEPTH, ROOM_THRESHOLD};
use crate::context::GenerationContext;

type RoomHandler = fn(&mut GenerationContext, RoomType) -> Option<usize>;

/// Handler that builds a room of `kind`.
fn handler(kind: RoomType) -> RoomHandler {
    match kind {
        k if k.is_shop() => mkshop,
        RoomType::Temple => mktemple,
        RoomType::Swamp => mkswamp,
        _ => mkzoo,
    }
}

/// Roll which themed room, if any, this level gets. A shop comes back as
/// [`RoomType::GeneralShop`]; the kind of shop is rolled when it is built.
pub fn pick_special_room(ctx: &mut GenerationContext) -> Option<RoomType> {
    let depth = ctx.depth();
    let nroom = ctx.level.rooms.len();
    let rng = &mut ctx.rng;
    let kind = if depth > 1 && depth < MEDUSA_DEPTH && nroom >= ROOM_THRESHOLD && rng.rn2(depth) < 3 {
        RoomType::GeneralShop
    } else if depth > 4 && rng.rn2(6) == 0 {
        RoomType::Court
    } else if depth > 5 && rng.rn2(8) == 0 {
        RoomType::LeprechaunHall
    } else if depth > 6 && rng.rn2(7) == 0 {
        RoomType::Zoo
    } else if depth > 8 && rng.rn2(5) == 0 {
        RoomType::Temple
    } else if depth > 9 && rng.rn2(5) == 0 {
        RoomType::Beehive
    } else if depth > 11 && rng.rn2(6) == 0 {
        RoomType::Morgue
    } else if depth > 12 && rng.rn2(8) == 0 {
        RoomType::Anthole
    } else if depth > 14 && rng.rn2(4) == 0 {
        RoomType::Barracks
    } else if depth > 15 && rng.rn2(6) == 0 {
        RoomType::Swamp
    } else if depth > 16 && rng.rn2(8) == 0 {
        RoomType::CockatriceNest
    } else {
        return None;
    };
    Some(kind)
}

/// Build a room of `kind`. Returns the converted room, or `None` when no
/// room qualified.
pub fn make_special_room(ctx: &mut GenerationContext, kind: RoomType) -> Option<usize> {
    let room = handler(kind)(ctx, kind);
    match room {
        Some(room) => info!(room, kind = %ctx.level.rooms[room].rtype, "special room"),
        None => debug!(%kind, "no room qualified"),
    }
    room
}

/// Roll and build this level's themed room.
pub fn make_special_rooms(ctx: &mut GenerationContext) {
    if let Some(kind) = pick_special_room(ctx) {
        make_special_room(ctx, kind);
    }
}

/// Record on the level that it holds a room of `kind`.
pub fn set_room_flag(level: &mut Level, kind: RoomType) {
    let flags = &mut level.flags;
    match kind {
        RoomType::Court => flags.has_court = true,
        RoomType::Swamp => flags.has_swamp = true,
        RoomType::Beehive => flags.has_beehive = true,
        RoomType::Morgue => flags.has_morgue = true,
        RoomType::Barracks => flags.has_barracks = true,
        RoomType::Zoo => flags.has_zoo = true,
        RoomType::Temple => flags.has_temple = true,
        k if k.is_shop() => flags.has_shop = true,
        _ => {}
    }
}

/// Start at a random room and walk forward for an ordinary one without
/// stairs. `strict` also rules out the down stairs room, which is
/// otherwise only usually skipped.
fn pick_room(ctx: &mut GenerationContext, strict: bool) -> Option<usize> {
    let nroom = ctx.level.rooms.len();
    if nroom == 0 {
        return None;
    }
    let start = ctx.rng.rn2(nroom as i32) as usize;
    for i in 0..nroom {
        let idx = (start + i) % nroom;
        let room = &ctx.level.rooms[idx];
        if room.rtype != RoomType::Ordinary || room.is_subroom() {
            continue;
        }
        let in_room = |s: Option<super::Stairway>| s.is_some_and(|s| room.contains(s.x, s.y));
        let (up, down) = (in_room(ctx.level.upstair), in_room(ctx.level.downstair));
        if strict {
            if up || down {
                continue;
            }
        } else if up || (down && ctx.rng.rn2(3) != 0) {
            continue;
        }
        if ctx.level.rooms[idx].doors.len() == 1 || ctx.rng.rn2(5) == 0 {
            return Some(idx);
        }
    }
    None
}

/// Shop odds out of 100. Candle shops only come from scripts.
const SHOP_PROBS: [(RoomType, i32); 12] = [
    (RoomType::GeneralShop, 42),
    (RoomType::ArmorShop, 14),
    (RoomType::ScrollShop, 10),
    (RoomType::PotionShop, 10),
    (RoomType::WeaponShop, 5),
    (RoomType::FoodShop, 5),
    (RoomType::RingShop, 3),
    (RoomType::WandShop, 3),
    (RoomType::ToolShop, 3),
    (RoomType::BookShop, 3),
    (RoomType::HealthFoodShop, 2),
    (RoomType::CandleShop, 0),
];

fn light_room(level: &mut Level, room: usize) {
    let bounds = level.rooms[room].bounds();
    for (x, y) in bounds.cells() {
        level.cell_mut(x, y).lit = true;
    }
    level.rooms[room].lit = true;
}

/// First one-door ordinary room without stairs becomes a shop.
fn mkshop(ctx: &mut GenerationContext, _: RoomType) -> Option<usize> {
    let room = (0..ctx.level.rooms.len()).find(|&i| {
        let r = &ctx.level.rooms[i];
        r.rtype == RoomType::Ordinary && !r.is_subroom() && !has_stairs(&ctx.level, i) && r.doors.len() == 1
    })?;

    if !ctx.level.rooms[room].lit {
        light_room(&mut ctx.level, room);
    }

    let mut roll = ctx.rng.rnd(100);
    let mut kind = RoomType::GeneralShop;
    for &(k, prob) in &SHOP_PROBS {
        roll -= prob;
        if roll <= 0 {
            kind = k;
            break;
        }
    }
    if ctx.level.rooms[room].area() > 20 && matches!(kind, RoomType::WandShop | RoomType::BookShop) {
        kind = RoomType::GeneralShop;
    }
    ctx.level.rooms[room].rtype = kind;
    set_room_flag(&mut ctx.level, kind);
    stock_shop(ctx, room);
    Some(room)
}

/// Open up the shop door, post the shopkeeper inside it and fill the
/// floor with stock.
pub fn stock_shop(ctx: &mut GenerationContext, room: usize) {
    let Some(&door_idx) = ctx.level.rooms[room].doors.first() else {
        return;
    };
    let door = ctx.level.doors[door_idx];
    let (dx, dy) = door.side.outward();

    let mut state = door.state;
    if ctx.level.typ(door.x, door.y) == CellType::SecretDoor {
        ctx.level.set_typ(door.x, door.y, CellType::Door);
        state.remove(DoorState::SECRET);
        if !state.contains(DoorState::LOCKED) {
            state |= DoorState::CLOSED;
        }
    }
    if state == DoorState::NO_DOOR {
        state = DoorState::OPEN;
    }
    if state.contains(DoorState::TRAPPED) {
        state = DoorState::NO_DOOR;
    }
    ctx.level.cell_mut(door.x, door.y).door = state;
    ctx.level.doors[door_idx].state = state;
    if state == DoorState::LOCKED {
        let (ox, oy) = (door.x as i32 + dx, door.y as i32 + dy);
        if Level::isok(ox, oy) {
            ctx.level.engravings.push(Engraving {
                x: ox as usize,
                y: oy as usize,
                text: "Closed for inventory".to_string(),
                kind: EngravingType::Dust,
            });
        }
    }

    let (sx, sy) = ((door.x as i32 - dx) as usize, (door.y as i32 - dy) as usize);
    ctx.level.monsters.push(MonsterPlacement {
        peaceful: true,
        ..MonsterPlacement::named(sx, sy, "shopkeeper")
    });

    let r = ctx.level.rooms[room].clone();
    let stock = r.rtype.shop_stock();
    let depth = ctx.depth();
    for (x, y) in r.interior().cells() {
        let by_door = match door.side {
            WallSide::Left => x == r.lx,
            WallSide::Right => x == r.hx,
            WallSide::Top => y == r.ly,
            WallSide::Bottom => y == r.hy,
        };
        if by_door {
            continue;
        }
        if ctx.rng.rn2(100) < depth {
            ctx.level.monsters.push(MonsterPlacement::of_class(x, y, 'm'));
            continue;
        }
        let class = match stock {
            Some(class) => class,
            None => random_object_class(ctx),
        };
        ctx.level.objects.push(ObjectPlacement::new(x, y, class));
    }
}

fn courtmon(ctx: &mut GenerationContext, x: usize, y: usize) -> MonsterPlacement {
    let difficulty = ctx.difficulty();
    let i = ctx.rng.rn2(60) + ctx.rng.rn2(3 * difficulty);
    match i {
        i if i > 100 => MonsterPlacement::of_class(x, y, 'D'),
        i if i > 95 => MonsterPlacement::of_class(x, y, 'H'),
        i if i > 85 => MonsterPlacement::of_class(x, y, 'T'),
        i if i > 75 => MonsterPlacement::of_class(x, y, 'C'),
        i if i > 60 => MonsterPlacement::of_class(x, y, 'o'),
        i if i > 45 => MonsterPlacement::named(x, y, "bugbear"),
        i if i > 30 => MonsterPlacement::named(x, y, "hobgoblin"),
        i if i > 15 => MonsterPlacement::of_class(x, y, 'G'),
        _ => MonsterPlacement::of_class(x, y, 'k'),
    }
}

const SQUAD: [(&str, i32); 4] = [("soldier", 80), ("sergeant", 15), ("lieutenant", 4), ("captain", 1)];

fn squadmon(ctx: &mut GenerationContext, x: usize, y: usize) -> MonsterPlacement {
    let difficulty = ctx.difficulty();
    let sel = ctx.rng.rnd(80 + difficulty);
    let mut cpro = 0;
    for &(name, prob) in &SQUAD {
        cpro += prob;
        if cpro > sel {
            return MonsterPlacement::named(x, y, name);
        }
    }
    let (name, _) = SQUAD[ctx.rng.rn2(SQUAD.len() as i32) as usize];
    MonsterPlacement::named(x, y, name)
}

fn morguemon(ctx: &mut GenerationContext, x: usize, y: usize) -> MonsterPlacement {
    let difficulty = ctx.difficulty();
    let i = ctx.rng.rn2(100);
    let hd = ctx.rng.rn2(difficulty);
    if hd > 10 && i < 10 {
        MonsterPlacement::of_class(x, y, '&')
    } else if hd > 8 && i > 85 {
        MonsterPlacement::of_class(x, y, 'V')
    } else if i < 20 {
        MonsterPlacement::named(x, y, "ghost")
    } else if i < 40 {
        MonsterPlacement::named(x, y, "wraith")
    } else {
        MonsterPlacement::of_class(x, y, 'Z')
    }
}

/// Ant species is fixed per depth.
fn antholemon(depth: i32) -> &'static str {
    match depth.rem_euclid(3) {
        0 => "soldier ant",
        1 => "fire ant",
        _ => "giant beetle",
    }
}

fn mkzoo(ctx: &mut GenerationContext, kind: RoomType) -> Option<usize> {
    let room = pick_room(ctx, false)?;
    ctx.level.rooms[room].rtype = kind;
    fill_zoo(ctx, room);
    Some(room)
}

/// Stock a themed room by its type: a sleeping monster on every square
/// plus the type's loot.
pub fn fill_zoo(ctx: &mut GenerationContext, room: usize) {
    let r = ctx.level.rooms[room].clone();
    let kind = r.rtype;
    let difficulty = ctx.difficulty();
    let mut goldlim = 500 * difficulty;
    let door = r.doors.first().map(|&d| ctx.level.doors[d]);

    let mut throne = None;
    match kind {
        RoomType::Court => {
            let existing = r
                .interior()
                .cells()
                .find(|&(x, y)| ctx.level.typ(x, y) == CellType::Throne);
            throne = match existing {
                Some(pos) => Some(pos),
                None => {
                    let mut pos = somexy(ctx, room);
                    let mut tries = 100;
                    while ctx.level.occupied(pos.0, pos.1) && tries > 1 {
                        pos = somexy(ctx, room);
                        tries -= 1;
                    }
                    Some(pos)
                }
            };
        }
        RoomType::Beehive => {
            throne = Some((r.lx + (r.hx - r.lx + 1) / 2, r.ly + (r.hy - r.ly + 1) / 2));
        }
        _ => {}
    }

    for (x, y) in r.interior().cells() {
        if kind == RoomType::Court && ctx.level.typ(x, y) == CellType::Throne {
            continue;
        }
        let mut mon = match kind {
            RoomType::Court => courtmon(ctx, x, y),
            RoomType::Barracks => squadmon(ctx, x, y),
            RoomType::Morgue => morguemon(ctx, x, y),
            RoomType::Beehive if throne == Some((x, y)) => MonsterPlacement::named(x, y, "queen bee"),
            RoomType::Beehive => MonsterPlacement::named(x, y, "killer bee"),
            RoomType::LeprechaunHall => MonsterPlacement::named(x, y, "leprechaun"),
            RoomType::CockatriceNest => MonsterPlacement::named(x, y, "cockatrice"),
            RoomType::Anthole => MonsterPlacement::named(x, y, antholemon(ctx.depth())),
            _ => MonsterPlacement::random(x, y),
        };
        mon.asleep = kind.monsters_sleep();
        ctx.level.monsters.push(mon);

        match kind {
            RoomType::Zoo | RoomType::LeprechaunHall => {
                let mut i = match door {
                    Some(d) => {
                        let ddx = x as i32 - d.x as i32;
                        let ddy = y as i32 - d.y as i32;
                        let dist2 = ddx * ddx + ddy * ddy;
                        dist2.saturating_mul(dist2)
                    }
                    None => goldlim,
                };
                if i >= goldlim {
                    i = 5 * difficulty;
                }
                goldlim -= i;
                let amount = ctx.rng.rn1(i, 10);
                ctx.level.objects.push(ObjectPlacement {
                    quantity: amount,
                    ..ObjectPlacement::named(x, y, '$', "gold piece")
                });
            }
            RoomType::Morgue => {
                if ctx.rng.rn2(5) == 0 {
                    ctx.level
                        .objects
                        .push(ObjectPlacement::named(x, y, '%', "corpse"));
                }
                if ctx.rng.rn2(10) == 0 {
                    let boxed = random_box(ctx, x, y);
                    ctx.level.objects.push(boxed);
                }
                if ctx.rng.rn2(5) == 0 {
                    make_grave(ctx, x, y, None);
                }
            }
            RoomType::Beehive => {
                if ctx.rng.rn2(3) == 0 {
                    ctx.level
                        .objects
                        .push(ObjectPlacement::named(x, y, '%', "lump of royal jelly"));
                }
            }
            RoomType::Barracks => {
                if ctx.rng.rn2(20) == 0 {
                    let boxed = random_box(ctx, x, y);
                    ctx.level.objects.push(boxed);
                }
            }
            RoomType::CockatriceNest => {
                if ctx.rng.rn2(3) == 0 {
                    ctx.level
                        .objects
                        .push(ObjectPlacement::named(x, y, '`', "statue"));
                }
            }
            RoomType::Anthole => {
                if ctx.rng.rn2(3) == 0 {
                    ctx.level.objects.push(ObjectPlacement::new(x, y, '%'));
                }
            }
            _ => {}
        }
    }

    if kind == RoomType::Court {
        if let Some((tx, ty)) = throne {
            if ctx.level.typ(tx, ty) != CellType::Throne {
                ctx.level.add_feature(tx, ty, FeatureKind::Throne);
            }
        }
        let (cx, cy) = somexy(ctx, room);
        let coffers = ctx.rng.rn1(50 * difficulty, 10);
        ctx.level.objects.push(ObjectPlacement {
            contents: vec![format!("{coffers} gold pieces")],
            ..ObjectPlacement::named(cx, cy, '(', "chest")
        });
    }
    set_room_flag(&mut ctx.level, kind);
    debug!(room, %kind, "room filled");
}

/// Altar square of a temple: the middle, nudged at random when the room
/// has an even span.
fn shrine_pos(ctx: &mut GenerationContext, room: usize) -> (usize, usize) {
    let r = &ctx.level.rooms[room];
    let (lx, ly, dx, dy) = (r.lx, r.ly, r.hx - r.lx, r.hy - r.ly);
    let mut x = lx + dx / 2;
    if dx % 2 == 1 && ctx.rng.rn2(2) != 0 {
        x += 1;
    }
    let mut y = ly + dy / 2;
    if dy % 2 == 1 && ctx.rng.rn2(2) != 0 {
        y += 1;
    }
    (x, y)
}

fn mktemple(ctx: &mut GenerationContext, _: RoomType) -> Option<usize> {
    let room = pick_room(ctx, true)?;
    ctx.level.rooms[room].rtype = RoomType::Temple;
    let (x, y) = shrine_pos(ctx, room);
    let alignment = Alignment::from_roll(ctx.rng.rn2(3) - 1);
    ctx.level.add_feature(x, y, FeatureKind::Altar { alignment, shrine: true });
    ctx.level.monsters.push(MonsterPlacement {
        peaceful: true,
        ..MonsterPlacement::named(x, y, "aligned priest")
    });
    set_room_flag(&mut ctx.level, RoomType::Temple);
    Some(room)
}

fn next_to_door(level: &Level, x: usize, y: usize) -> bool {
    (-1..=1)
        .flat_map(|dx| (-1..=1).map(move |dy| (dx, dy)))
        .filter(|&d| d != (0, 0))
        .any(|(dx, dy)| level.typ_at(x as i32 + dx, y as i32 + dy).is_door())
}

/// Up to five tries at random rooms; every room that qualifies is flooded
/// in a checkerboard with eels in the water and fungus on the dry squares.
fn mkswamp(ctx: &mut GenerationContext, _: RoomType) -> Option<usize> {
    let nroom = ctx.level.rooms.len();
    if nroom == 0 {
        return None;
    }
    let mut first = None;
    let mut eelct = 0;
    for _ in 0..5 {
        let idx = ctx.rng.rn2(nroom as i32) as usize;
        let r = ctx.level.rooms[idx].clone();
        if r.rtype != RoomType::Ordinary || r.is_subroom() || has_stairs(&ctx.level, idx) {
            continue;
        }
        ctx.level.rooms[idx].rtype = RoomType::Swamp;
        for (x, y) in r.interior().cells() {
            let level = &ctx.level;
            let busy = level.objects.iter().any(|o| o.x == x && o.y == y)
                || level.monsters.iter().any(|m| m.x == x && m.y == y)
                || level.trap_at(x, y).is_some()
                || level.typ(x, y) != CellType::Room
                || next_to_door(level, x, y);
            if busy {
                continue;
            }
            if (x + y) % 2 == 1 {
                ctx.level.set_typ(x, y, CellType::Pool);
                if eelct == 0 || ctx.rng.rn2(4) == 0 {
                    let name = if ctx.rng.rn2(5) != 0 {
                        "giant eel"
                    } else if ctx.rng.rn2(2) != 0 {
                        "piranha"
                    } else {
                        "electric eel"
                    };
                    ctx.level.monsters.push(MonsterPlacement::named(x, y, name));
                    eelct += 1;
                }
            } else if ctx.rng.rn2(4) == 0 {
                ctx.level.monsters.push(MonsterPlacement::of_class(x, y, 'F'));
            }
        }
        set_room_flag(&mut ctx.level, RoomType::Swamp);
        first.get_or_insert(idx);
    }
    first
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::tests::test_context_at;
    use crate::dungeon::corridor::dodoor;
    use crate::dungeon::placement::{RoomRequest, create_room};

    fn room_with_door(ctx: &mut GenerationContext, x: usize, y: usize) -> usize {
        let room = create_room(
            ctx,
            RoomRequest {
                size: Some((6, 4)),
                pos: Some((x, y)),
                lit: Some(false),
                ..RoomRequest::default()
            },
        )
        .unwrap();
        dodoor(ctx, x + 2, y - 1, room);
        room
    }

    #[test]
    fn test_shop_table_sums_to_100() {
        assert_eq!(SHOP_PROBS.iter().map(|&(_, p)| p).sum::<i32>(), 100);
        assert!(SHOP_PROBS.iter().all(|&(k, _)| k.is_shop()));
    }

    #[test]
    fn test_no_special_rooms_on_level_one() {
        for seed in 0..50u64 {
            let mut ctx = test_context_at(seed, 1);
            assert_eq!(pick_special_room(&mut ctx), None);
        }
    }

    #[test]
    fn test_shop_is_stocked_and_lit() {
        let mut ctx = test_context_at(12, 5);
        let room = room_with_door(&mut ctx, 20, 6);
        assert_eq!(make_special_room(&mut ctx, RoomType::GeneralShop), Some(room));
        let level = &ctx.level;
        assert!(level.rooms[room].rtype.is_shop());
        assert!(level.rooms[room].lit);
        assert!(level.flags.has_shop);
        let keeper = level.monsters.iter().find(|m| m.name.as_deref() == Some("shopkeeper")).unwrap();
        assert_eq!((keeper.x, keeper.y), (22, 6));
        // The row along the door wall stays clear for the shopkeeper.
        assert!(level.objects.iter().all(|o| o.y != 6));
        assert!(!level.objects.is_empty() || level.monsters.len() > 1);
        let door = level.doors[0];
        assert_eq!(level.typ(door.x, door.y), CellType::Door);
        assert!(!door.state.contains(DoorState::TRAPPED));
    }

    #[test]
    fn test_shop_needs_a_single_door() {
        let mut ctx = test_context_at(12, 5);
        let room = room_with_door(&mut ctx, 20, 6);
        dodoor(&mut ctx, 26, 8, room);
        assert_eq!(make_special_room(&mut ctx, RoomType::GeneralShop), None);
        assert!(!ctx.level.flags.has_shop);
    }

    #[test]
    fn test_zoo_fills_every_square() {
        let mut ctx = test_context_at(3, 10);
        let room = room_with_door(&mut ctx, 20, 6);
        ctx.level.rooms[room].rtype = RoomType::Zoo;
        fill_zoo(&mut ctx, room);
        let level = &ctx.level;
        assert_eq!(level.monsters.len(), 24);
        assert!(level.monsters.iter().all(|m| m.asleep));
        assert_eq!(level.objects.iter().filter(|o| o.class == '$').count(), 24);
        assert!(level.objects.iter().all(|o| o.quantity >= 10));
        assert!(level.flags.has_zoo);
    }

    #[test]
    fn test_court_gets_a_throne() {
        let mut ctx = test_context_at(9, 12);
        let room = room_with_door(&mut ctx, 20, 6);
        ctx.level.rooms[room].rtype = RoomType::Court;
        fill_zoo(&mut ctx, room);
        let thrones: Vec<_> = ctx
            .level
            .features
            .iter()
            .filter(|f| f.kind == FeatureKind::Throne)
            .collect();
        assert_eq!(thrones.len(), 1);
        assert!(ctx.level.objects.iter().any(|o| o.name.as_deref() == Some("chest")));
        assert!(ctx.level.flags.has_court);
    }

    #[test]
    fn test_temple_altar_is_a_shrine() {
        let mut ctx = test_context_at(4, 10);
        let room = room_with_door(&mut ctx, 20, 6);
        assert_eq!(make_special_room(&mut ctx, RoomType::Temple), Some(room));
        let altar = &ctx.level.features[0];
        assert!(matches!(altar.kind, FeatureKind::Altar { shrine: true, .. }));
        assert!(ctx.level.rooms[room].contains(altar.x, altar.y));
        assert!(ctx.level.flags.has_temple);
    }

    #[test]
    fn test_swamp_keeps_door_squares_dry() {
        let mut ctx = test_context_at(7, 16);
        let room = room_with_door(&mut ctx, 20, 6);
        if mkswamp(&mut ctx, RoomType::Swamp).is_none() {
            return;
        }
        let level = &ctx.level;
        assert!(level.flags.has_swamp);
        for (x, y) in level.rooms[room].interior().cells() {
            if level.typ(x, y) == CellType::Pool {
                assert_eq!((x + y) % 2, 1);
                assert!(!next_to_door(level, x, y));
            }
        }
    }
}
