//! Room furnishing (mklev.c: makelevel room loop, mkstairs, mktrap,
//! mkfount, mksink, mkaltar, mkgrave)
//!
//! Everything here finds its square the same way: draw a random point in
//! the room, test it, and try again until the retry budget runs out. A
//! feature that finds no square is skipped, never forced.

use tracing::debug;

use super::corridor::bydoor;
use super::maze::mazexy;
use super::{
    Alignment, CellType, Engraving, EngravingType, FeatureKind, Level, MonsterPlacement,
    ObjectPlacement, RoomType, TrapType, TRAPNUM,
};
use crate::context::GenerationContext;

/// Object class odds for a random object, out of 100.
const OBJECT_CLASS_PROBS: [(char, i32); 11] = [
    (')', 10),
    ('[', 10),
    ('%', 20),
    ('(', 8),
    ('*', 8),
    ('!', 16),
    ('?', 16),
    ('+', 4),
    ('/', 4),
    ('=', 3),
    ('"', 1),
];

/// Class of a random object.
pub fn random_object_class(ctx: &mut GenerationContext) -> char {
    let mut roll = ctx.rng.rnd(100);
    for &(class, prob) in &OBJECT_CLASS_PROBS {
        roll -= prob;
        if roll <= 0 {
            return class;
        }
    }
    OBJECT_CLASS_PROBS[0].0
}

/// A uniformly random interior square of `room`: one draw for x, one for y.
pub fn somexy(ctx: &mut GenerationContext, room: usize) -> (usize, usize) {
    let r = &ctx.level.rooms[room];
    let (lx, ly, w, h) = (r.lx, r.ly, r.hx - r.lx + 1, r.hy - r.ly + 1);
    let x = ctx.rng.rn1(w as i32, lx as i32) as usize;
    let y = ctx.rng.rn1(h as i32, ly as i32) as usize;
    (x, y)
}

fn in_subroom(level: &Level, room: usize, x: usize, y: usize) -> bool {
    level.rooms[room]
        .subrooms
        .iter()
        .any(|&s| level.rooms[s].bounds().contains(x, y))
}

/// Draw squares in `room` until one passes `accept`, at most
/// `feature_retries` times. Squares inside a subroom never pass.
pub fn find_in_room<F>(ctx: &mut GenerationContext, room: usize, what: &str, accept: F) -> Option<(usize, usize)>
where
    F: Fn(&Level, usize, usize) -> bool,
{
    for _ in 0..ctx.options.feature_retries.max(1) {
        let (x, y) = somexy(ctx, room);
        if !in_subroom(&ctx.level, room, x, y) && accept(&ctx.level, x, y) {
            return Some((x, y));
        }
    }
    debug!(room, what, "no square found");
    None
}

/// Bare floor with nothing on it and no door alongside.
pub fn okay_roompos(level: &Level, x: usize, y: usize) -> bool {
    level.typ(x, y) == CellType::Room && !level.occupied(x, y) && !bydoor(level, x, y)
}

fn any_square(_: &Level, _: usize, _: usize) -> bool {
    true
}

/// Whether `room` holds a staircase.
pub fn has_stairs(level: &Level, room: usize) -> bool {
    let r = &level.rooms[room];
    [level.upstair, level.downstair]
        .iter()
        .flatten()
        .any(|s| r.contains(s.x, s.y))
}

/// Pick a top-level ordinary room with odds proportional to its floor
/// area, skipping `exclude`.
pub fn weighted_room(ctx: &mut GenerationContext, exclude: Option<usize>) -> Option<usize> {
    let candidates: Vec<(usize, i32)> = ctx
        .level
        .rooms
        .iter()
        .enumerate()
        .filter(|&(i, r)| Some(i) != exclude && !r.is_subroom() && r.rtype == RoomType::Ordinary)
        .map(|(i, r)| (i, r.area() as i32))
        .collect();
    let total: i32 = candidates.iter().map(|&(_, a)| a).sum();
    if total <= 0 {
        return None;
    }
    let mut roll = ctx.rng.rn2(total);
    for &(i, area) in &candidates {
        if roll < area {
            return Some(i);
        }
        roll -= area;
    }
    None
}

fn stair_square(ctx: &mut GenerationContext, room: usize, up: bool) -> bool {
    let what = if up { "up stairs" } else { "down stairs" };
    match find_in_room(ctx, room, what, okay_roompos) {
        Some((x, y)) => {
            ctx.level.set_stairs(x, y, up);
            debug!(x, y, up, room, "stairs placed");
            true
        }
        None => false,
    }
}

/// Down stairs, then up stairs in a different room when there is one.
/// A branch end without a way on gets no staircase on that side.
pub fn place_stairs(ctx: &mut GenerationContext) {
    let mut down_room = None;
    if ctx.level.branch.has_down_stairs() {
        if let Some(room) = weighted_room(ctx, None) {
            if stair_square(ctx, room, false) {
                down_room = Some(room);
            }
        }
    }
    if ctx.level.branch.has_up_stairs() {
        let room = weighted_room(ctx, down_room).or(down_room);
        if let Some(room) = room {
            stair_square(ctx, room, true);
        }
    }
}

/// Trap kind for the current depth (`mktrap` with no kind given).
pub fn random_trap_kind(ctx: &mut GenerationContext) -> TrapType {
    let lvl = ctx.difficulty();
    let no_teleport = ctx.level.flags.no_teleport;
    let in_hell = ctx.level.branch.in_gehennom();
    if in_hell && ctx.rng.rn2(5) == 0 {
        return TrapType::FireTrap;
    }
    let kind = loop {
        let Some(kind) = TrapType::from_index(ctx.rng.rnd(TRAPNUM - 1)) else {
            continue;
        };
        let rejected = match kind {
            TrapType::MagicPortal | TrapType::VibratingSquare => true,
            TrapType::RollingBoulder | TrapType::SleepingGas => lvl < 2,
            TrapType::LevelTeleport => lvl < 5 || no_teleport,
            TrapType::SpikedPit => lvl < 5,
            TrapType::LandMine => lvl < 6,
            TrapType::Web => lvl < 7,
            TrapType::Statue | TrapType::Polymorph => lvl < 8,
            TrapType::FireTrap => !in_hell,
            TrapType::Teleport => no_teleport,
            TrapType::Hole => ctx.rng.rn2(7) != 0,
            _ => false,
        };
        if !rejected {
            break kind;
        }
    };
    if kind.is_hole() && !ctx.level.branch.can_dig_down() {
        TrapType::RockFall
    } else {
        kind
    }
}

/// Place a trap in `room`, or anywhere in the maze when `room` is `None`.
pub fn mktrap(ctx: &mut GenerationContext, kind: Option<TrapType>, room: Option<usize>) -> Option<(usize, usize)> {
    let kind = match kind {
        Some(kind) => kind,
        None => random_trap_kind(ctx),
    };
    let free = |level: &Level, x: usize, y: usize| {
        !level.occupied(x, y) && !level.objects.iter().any(|o| o.x == x && o.y == y && o.name.as_deref() == Some("boulder"))
    };
    let pos = match room {
        Some(room) => find_in_room(ctx, room, "trap", free),
        None => (0..ctx.options.feature_retries.max(1))
            .find_map(|_| mazexy(ctx).filter(|&(x, y)| free(&ctx.level, x, y))),
    }?;
    ctx.level.add_trap(pos.0, pos.1, kind);
    Some(pos)
}

/// `mkgold(0, ...)` amount.
pub fn gold_amount(ctx: &mut GenerationContext) -> i32 {
    let difficulty = ctx.difficulty();
    1 + ctx.rng.rnd(difficulty + 2) * ctx.rng.rnd(30)
}

pub fn mkgold(ctx: &mut GenerationContext, x: usize, y: usize) {
    let amount = gold_amount(ctx);
    ctx.level.objects.push(ObjectPlacement {
        quantity: amount,
        ..ObjectPlacement::named(x, y, '$', "gold piece")
    });
}

pub fn mkfount(ctx: &mut GenerationContext, room: usize) {
    if let Some((x, y)) = find_in_room(ctx, room, "fountain", okay_roompos) {
        ctx.level.add_feature(x, y, FeatureKind::Fountain);
    }
}

pub fn mksink(ctx: &mut GenerationContext, room: usize) {
    if let Some((x, y)) = find_in_room(ctx, room, "sink", okay_roompos) {
        ctx.level.add_feature(x, y, FeatureKind::Sink);
    }
}

pub fn mkaltar(ctx: &mut GenerationContext, room: usize) {
    if ctx.level.rooms[room].rtype != RoomType::Ordinary {
        return;
    }
    if let Some((x, y)) = find_in_room(ctx, room, "altar", okay_roompos) {
        let alignment = Alignment::from_roll(ctx.rng.rn2(3) - 1);
        ctx.level.add_feature(
            x,
            y,
            FeatureKind::Altar {
                alignment,
                shrine: false,
            },
        );
    }
}

/// A grave at `(x, y)` with its buried goods. `epitaph` of `None` draws
/// one from the pool.
pub fn make_grave(ctx: &mut GenerationContext, x: usize, y: usize, epitaph: Option<&str>) {
    let epitaph = match epitaph {
        Some(text) => text.to_string(),
        None => ctx.texts.epitaph(&mut ctx.rng, &ctx.options),
    };
    ctx.level.add_feature(
        x,
        y,
        FeatureKind::Grave {
            epitaph: Some(epitaph),
        },
    );
}

pub fn mkgrave(ctx: &mut GenerationContext, room: usize) {
    if ctx.level.rooms[room].rtype != RoomType::Ordinary {
        return;
    }
    let dobell = ctx.rng.rn2(10) == 0;
    let Some((x, y)) = find_in_room(ctx, room, "grave", okay_roompos) else {
        return;
    };
    make_grave(ctx, x, y, dobell.then_some("Saved by the bell!"));

    if ctx.rng.rn2(3) == 0 {
        let amount = gold_amount(ctx);
        ctx.level.objects.push(ObjectPlacement {
            quantity: amount,
            buried: true,
            ..ObjectPlacement::named(x, y, '$', "gold piece")
        });
    }
    for _ in 0..ctx.rng.rn2(5) {
        let class = random_object_class(ctx);
        ctx.level.objects.push(ObjectPlacement {
            buried: true,
            ..ObjectPlacement::new(x, y, class)
        });
    }
    if dobell {
        ctx.level.objects.push(ObjectPlacement {
            buried: true,
            ..ObjectPlacement::named(x, y, '(', "bell")
        });
    }
}

/// A large box two times in three, a chest otherwise.
pub fn random_box(ctx: &mut GenerationContext, x: usize, y: usize) -> ObjectPlacement {
    let name = if ctx.rng.rn2(3) != 0 { "large box" } else { "chest" };
    ObjectPlacement::named(x, y, '(', name)
}

fn mkengraving(ctx: &mut GenerationContext, room: usize) {
    let text = ctx.texts.engraving(&mut ctx.rng, &ctx.options);
    if text.is_empty() {
        return;
    }
    let (mut x, mut y) = somexy(ctx, room);
    while ctx.level.typ(x, y) != CellType::Room && ctx.rng.rn2(40) != 0 {
        (x, y) = somexy(ctx, room);
    }
    let typ = ctx.level.typ(x, y);
    if typ.is_pool() || typ.is_furniture() {
        return;
    }
    ctx.level.engravings.push(Engraving {
        x,
        y,
        text,
        kind: EngravingType::Mark,
    });
}

fn random_object(ctx: &mut GenerationContext, room: usize) {
    if let Some((x, y)) = find_in_room(ctx, room, "object", any_square) {
        let class = random_object_class(ctx);
        ctx.level.objects.push(ObjectPlacement::new(x, y, class));
    }
}

/// Furnish one ordinary room.
fn fill_room(ctx: &mut GenerationContext, room: usize) {
    let nroom = ctx.level.rooms.len() as i32;
    let depth = ctx.depth().abs();

    if ctx.rng.rn2(3) == 0 {
        if let Some((x, y)) = find_in_room(ctx, room, "monster", any_square) {
            ctx.level.monsters.push(MonsterPlacement {
                asleep: true,
                ..MonsterPlacement::random(x, y)
            });
        }
    }

    let trap_odds = (8 - ctx.difficulty() / 6).max(2);
    while ctx.rng.rn2(trap_odds) == 0 {
        mktrap(ctx, None, Some(room));
    }

    if ctx.rng.rn2(3) == 0 {
        if let Some((x, y)) = find_in_room(ctx, room, "gold", any_square) {
            mkgold(ctx, x, y);
        }
    }
    if ctx.rng.rn2(10) == 0 {
        mkfount(ctx, room);
    }
    if ctx.rng.rn2(60) == 0 {
        mksink(ctx, room);
    }
    if ctx.rng.rn2(60) == 0 {
        mkaltar(ctx, room);
    }
    if ctx.rng.rn2((80 - depth * 2).max(2)) == 0 {
        mkgrave(ctx, room);
    }
    if ctx.rng.rn2(20) == 0 {
        if let Some((x, y)) = find_in_room(ctx, room, "statue", any_square) {
            ctx.level
                .objects
                .push(ObjectPlacement::named(x, y, '`', "statue"));
        }
    }
    if ctx.rng.rn2((nroom * 5 / 2).max(1)) == 0 {
        if let Some((x, y)) = find_in_room(ctx, room, "box", any_square) {
            let boxed = random_box(ctx, x, y);
            ctx.level.objects.push(boxed);
        }
    }
    if ctx.rng.rn2(27 + 3 * depth) == 0 {
        mkengraving(ctx, room);
    }

    if ctx.rng.rn2(3) == 0 {
        random_object(ctx, room);
        let mut tryct = 0;
        while ctx.rng.rn2(5) == 0 {
            tryct += 1;
            if tryct > 100 {
                break;
            }
            random_object(ctx, room);
        }
    }
}

/// Furnish every top-level ordinary room, in room order.
pub fn fill_ordinary_rooms(ctx: &mut GenerationContext) {
    for room in 0..ctx.level.rooms.len() {
        let r = &ctx.level.rooms[room];
        if r.rtype != RoomType::Ordinary || r.is_subroom() {
            continue;
        }
        fill_room(ctx, room);
    }
}
