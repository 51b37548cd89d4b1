//! Maze generation (mkmaze.c: makemaz, create_maze, walkfrom, mazexy)
//!
//! The maze is carved on a grid whose odd/odd squares are cells and whose
//! other squares are walls between them. A depth-first walk from a random
//! cell knocks out walls until every cell is reached, which yields a
//! spanning tree. Dead ends can then be braided or pruned, and the result
//! optionally scaled up to wider corridors and thicker walls.

use std::collections::VecDeque;

use tracing::debug;

use super::features::{mkgold, mktrap, random_object_class};
use super::wall::classify;
use super::{CellType, Level, MonsterPlacement, ObjectPlacement, Rect};
use crate::consts::{X_MAZE_MAX, Y_MAZE_MAX};
use crate::context::GenerationContext;
use crate::options::DeadEndPolicy;

/// Direction a script-driven maze walk leaves its start square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heading {
    North,
    East,
    South,
    West,
}

/// `mz_move`: 0 north, 1 east, 2 south, 3 west.
const STEPS: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

/// Floor a maze is carved from.
pub fn maze_floor(level: &Level) -> CellType {
    if level.flags.corridor_maze {
        CellType::Corridor
    } else {
        CellType::Room
    }
}

/// Lay the unit grid over `2..=x_max` by `2..=y_max`: rock cells with
/// walls between them, or plain rock for a corridor maze.
pub fn init_grid(level: &mut Level, x_max: usize, y_max: usize) {
    if level.flags.corridor_maze {
        for x in 2..x_max {
            for y in 2..y_max {
                level.set_typ(x, y, CellType::Stone);
            }
        }
    } else {
        for x in 2..=x_max {
            for y in 2..=y_max {
                let typ = if x % 2 == 1 && y % 2 == 1 {
                    CellType::Stone
                } else {
                    CellType::HWall
                };
                level.set_typ(x, y, typ);
            }
        }
    }
}

/// A cell two steps away in `dir` is uncarved rock inside the walk bounds.
fn okay(level: &Level, x: usize, y: usize, dir: usize, bounds: (usize, usize)) -> bool {
    let (dx, dy) = STEPS[dir];
    let nx = x as i32 + 2 * dx;
    let ny = y as i32 + 2 * dy;
    if nx < 3 || ny < 3 || nx > bounds.0 as i32 || ny > bounds.1 as i32 {
        return false;
    }
    level.typ(nx as usize, ny as usize) == CellType::Stone
}

/// Depth-first carve from `(x, y)` with an explicit stack. Each visit
/// shuffles the four directions and takes the first open one.
pub fn walkfrom(ctx: &mut GenerationContext, x: usize, y: usize, floor: CellType, bounds: (usize, usize)) {
    if !ctx.level.typ(x, y).is_door() {
        ctx.level.set_typ(x, y, floor);
    }
    let mut stack = vec![(x, y)];
    while let Some(&(cx, cy)) = stack.last() {
        let mut dirs = [0usize, 1, 2, 3];
        ctx.rng.shuffle(&mut dirs);
        match dirs
            .into_iter()
            .find(|&d| okay(&ctx.level, cx, cy, d, bounds))
        {
            Some(d) => {
                let (dx, dy) = STEPS[d];
                let mid = ((cx as i32 + dx) as usize, (cy as i32 + dy) as usize);
                let next = ((cx as i32 + 2 * dx) as usize, (cy as i32 + 2 * dy) as usize);
                ctx.level.set_typ(mid.0, mid.1, floor);
                ctx.level.set_typ(next.0, next.1, floor);
                stack.push(next);
            }
            None => {
                stack.pop();
            }
        }
    }
}

fn maze_inbounds(x: i32, y: i32, bounds: (usize, usize)) -> bool {
    x >= 2 && y >= 2 && x < bounds.0 as i32 && y < bounds.1 as i32 && Level::isok(x, y)
}

/// Open one wall at every dead-end cell toward a passage beyond it.
pub fn braid_dead_ends(ctx: &mut GenerationContext, floor: CellType, bounds: (usize, usize)) {
    for x in 2..bounds.0 {
        for y in 2..bounds.1 {
            if x % 2 == 0 || y % 2 == 0 || !ctx.level.typ(x, y).is_passable() {
                continue;
            }
            let mut open = Vec::with_capacity(4);
            let mut closed = 0;
            for (dir, &(dx, dy)) in STEPS.iter().enumerate() {
                let (wx, wy) = (x as i32 + dx, y as i32 + dy);
                let (bx, by) = (x as i32 + 2 * dx, y as i32 + 2 * dy);
                if !maze_inbounds(wx, wy, bounds) || !maze_inbounds(bx, by, bounds) {
                    closed += 1;
                    continue;
                }
                if !ctx.level.typ_at(wx, wy).is_passable() && ctx.level.typ_at(bx, by).is_passable() {
                    open.push(dir);
                    closed += 1;
                }
            }
            if closed >= 3 && !open.is_empty() {
                let dir = open[ctx.rng.rn2(open.len() as i32) as usize];
                let (dx, dy) = STEPS[dir];
                ctx.level
                    .set_typ((x as i32 + dx) as usize, (y as i32 + dy) as usize, floor);
            }
        }
    }
}

fn carved_neighbours(level: &Level, x: usize, y: usize) -> usize {
    STEPS
        .iter()
        .filter(|&&(dx, dy)| level.typ_at(x as i32 + dx, y as i32 + dy).is_passable())
        .count()
}

/// Fill dead ends back in until none are left or `tolerance` squares have
/// been filled. Squares in `keep` are never filled. Returns how many were
/// filled.
pub fn prune_dead_ends(level: &mut Level, tolerance: Option<u32>, bounds: (usize, usize), keep: &[(usize, usize)]) -> u32 {
    let fill = if level.flags.corridor_maze {
        CellType::Stone
    } else {
        CellType::HWall
    };
    let limit = tolerance.unwrap_or(u32::MAX);
    let mut filled = 0;
    loop {
        let mut progress = false;
        for x in 2..=bounds.0 {
            for y in 2..=bounds.1 {
                if filled >= limit {
                    return filled;
                }
                if keep.contains(&(x, y)) {
                    continue;
                }
                if level.typ(x, y).is_passable() && carved_neighbours(level, x, y) == 1 {
                    level.set_typ(x, y, fill);
                    filled += 1;
                    progress = true;
                }
            }
        }
        if !progress {
            return filled;
        }
    }
}

/// The carved square furthest from `from`, walking the passages.
fn furthest_square(level: &Level, from: (usize, usize), bounds: (usize, usize)) -> (usize, usize) {
    let mut seen = vec![vec![false; bounds.1 + 1]; bounds.0 + 1];
    seen[from.0][from.1] = true;
    let mut queue = VecDeque::from([from]);
    let mut last = from;
    while let Some((x, y)) = queue.pop_front() {
        last = (x, y);
        for &(dx, dy) in &STEPS {
            let (nx, ny) = (x as i32 + dx, y as i32 + dy);
            if nx < 2 || ny < 2 || nx > bounds.0 as i32 || ny > bounds.1 as i32 {
                continue;
            }
            let (nx, ny) = (nx as usize, ny as usize);
            if !seen[nx][ny] && level.typ(nx, ny).is_passable() {
                seen[nx][ny] = true;
                queue.push_back((nx, ny));
            }
        }
    }
    last
}

/// Blow each unit square of the carved grid up to `corrwid` by `corrwid`
/// for cells and `wallthick` for walls. The outermost walls stay one
/// square thick.
fn scale_maze(level: &mut Level, corrwid: usize, wallthick: usize, rdx: usize, rdy: usize) {
    let mut tmp = vec![vec![CellType::Stone; Y_MAZE_MAX]; X_MAZE_MAX];
    for (x, col) in tmp.iter_mut().enumerate().skip(1) {
        for (y, typ) in col.iter_mut().enumerate().skip(1) {
            *typ = level.typ(x, y);
        }
    }

    let (mut rx, mut x) = (2, 2);
    while rx < X_MAZE_MAX {
        let mx = if x % 2 == 1 {
            corrwid
        } else if x == 2 || x == rdx * 2 {
            1
        } else {
            wallthick
        };
        let (mut ry, mut y) = (2, 2);
        while ry < Y_MAZE_MAX {
            let my = if y % 2 == 1 {
                corrwid
            } else if y == 2 || y == rdy * 2 {
                1
            } else {
                wallthick
            };
            for dx in 0..mx {
                for dy in 0..my {
                    if rx + dx >= X_MAZE_MAX || ry + dy >= Y_MAZE_MAX {
                        break;
                    }
                    level.set_typ(rx + dx, ry + dy, tmp[x][y]);
                }
            }
            ry += my;
            y += 1;
        }
        rx += mx;
        x += 1;
    }
}

/// Carve a maze over the whole map. `corrwid` and `wallthick` are clamped
/// to `1..=5`; anything above the unit 1/1 is scaled up after carving.
///
/// Pruning keeps the walk's start square and the square furthest from it,
/// so a full prune leaves the single passage between the two. Those ends
/// are returned for an unscaled pruned maze.
pub fn create_maze(ctx: &mut GenerationContext, corrwid: i32, wallthick: i32, braid: bool) -> Option<[(usize, usize); 2]> {
    let corrwid = corrwid.clamp(1, 5) as usize;
    let wallthick = wallthick.clamp(1, 5) as usize;
    let scale = corrwid + wallthick;
    let rdx = X_MAZE_MAX / scale;
    let rdy = Y_MAZE_MAX / scale;
    let bounds = (rdx * 2, rdy * 2);

    init_grid(&mut ctx.level, bounds.0, bounds.1);
    let floor = maze_floor(&ctx.level);

    let start_x = 3 + 2 * ctx.rng.rn2((bounds.0 >> 1) as i32 - 1) as usize;
    let start_y = 3 + 2 * ctx.rng.rn2((bounds.1 >> 1) as i32 - 1) as usize;
    walkfrom(ctx, start_x, start_y, floor, bounds);

    let mut ends = None;
    match ctx.options.dead_ends {
        DeadEndPolicy::Random if braid => braid_dead_ends(ctx, floor, bounds),
        DeadEndPolicy::Braid => braid_dead_ends(ctx, floor, bounds),
        DeadEndPolicy::Prune { tolerance } => {
            let start = (start_x, start_y);
            let kept = [start, furthest_square(&ctx.level, start, bounds)];
            let filled = prune_dead_ends(&mut ctx.level, tolerance, bounds, &kept);
            debug!(filled, ?kept, "maze dead ends pruned");
            ends = Some(kept);
        }
        DeadEndPolicy::Random | DeadEndPolicy::Keep => {}
    }

    if scale > 2 {
        scale_maze(&mut ctx.level, corrwid, wallthick, rdx, rdy);
        ends = None;
    }
    debug!(corrwid, wallthick, braid, "maze carved");
    ends
}

/// A random maze floor square: 100 random tries, then a scan.
pub fn mazexy(ctx: &mut GenerationContext) -> Option<(usize, usize)> {
    let floor = maze_floor(&ctx.level);
    for _ in 0..100 {
        let x = 1 + ctx.rng.rn2(X_MAZE_MAX as i32) as usize;
        let y = 1 + ctx.rng.rn2(Y_MAZE_MAX as i32) as usize;
        if ctx.level.typ(x, y) == floor {
            return Some((x, y));
        }
    }
    let found = (1..X_MAZE_MAX)
        .flat_map(|x| (1..Y_MAZE_MAX).map(move |y| (x, y)))
        .find(|&(x, y)| ctx.level.typ(x, y) == floor);
    if found.is_none() {
        debug!("maze has no floor left");
    }
    found
}

/// Step off `(x, y)` toward `heading`, snap to odd cell parity, and carve
/// a maze from there into the surrounding rock.
pub fn mazewalk(ctx: &mut GenerationContext, x: usize, y: usize, heading: Heading) {
    let floor = maze_floor(&ctx.level);
    let (mut x, mut y) = (x as i32, y as i32);
    match heading {
        Heading::North => y -= 1,
        Heading::South => y += 1,
        Heading::East => x += 1,
        Heading::West => x -= 1,
    }
    if !Level::isok(x, y) {
        return;
    }
    if !ctx.level.typ(x as usize, y as usize).is_door() {
        ctx.level.set_typ(x as usize, y as usize, floor);
    }
    if x % 2 == 0 {
        x += if heading == Heading::East { 1 } else { -1 };
        if !Level::isok(x, y) {
            return;
        }
        ctx.level.set_typ(x as usize, y as usize, floor);
    }
    if y % 2 == 0 {
        y += if heading == Heading::South { 1 } else { -1 };
    }
    if !Level::isok(x, y) {
        return;
    }
    walkfrom(ctx, x as usize, y as usize, floor, (X_MAZE_MAX, Y_MAZE_MAX));
}

/// Random full-level maze with stairs and its usual population.
pub fn make_maze_level(ctx: &mut GenerationContext) {
    ctx.level.flags.is_maze = true;
    ctx.level.flags.corridor_maze = ctx.rng.rn2(3) == 0;

    let (corrwid, wallthick) = if ctx.options.maze_scaling && ctx.rng.rn2(2) != 0 {
        let corrscale = ctx.rng.rnd(4);
        (corrscale, ctx.rng.rnd(4) - corrscale)
    } else {
        (1, 1)
    };
    let braid = ctx.options.dead_ends == DeadEndPolicy::Random && ctx.rng.rn2(5) == 0;
    let ends = create_maze(ctx, corrwid, wallthick, braid);

    if !ctx.level.flags.corridor_maze {
        classify(&mut ctx.level, Rect::new(2, 2, X_MAZE_MAX, Y_MAZE_MAX));
    }

    // a pruned passage runs from one staircase to the other
    let (up, down) = match ends {
        Some([up, down]) => (Some(up), Some(down)),
        None => (None, None),
    };
    if ctx.level.branch.has_up_stairs() {
        if let Some((x, y)) = up.or_else(|| mazexy(ctx)) {
            ctx.level.set_stairs(x, y, true);
        }
    }
    if ctx.level.branch.has_down_stairs() {
        if let Some((x, y)) = down.or_else(|| mazexy(ctx)) {
            ctx.level.set_stairs(x, y, false);
        }
    }

    populate_maze(ctx);
}

fn populate_maze(ctx: &mut GenerationContext) {
    for _ in 0..ctx.rng.rn1(8, 11) {
        if let Some((x, y)) = mazexy(ctx) {
            let class = if ctx.rng.rn2(2) != 0 {
                '*'
            } else {
                random_object_class(ctx)
            };
            ctx.level.objects.push(ObjectPlacement::new(x, y, class));
        }
    }
    for _ in 0..ctx.rng.rn1(10, 2) {
        if let Some((x, y)) = mazexy(ctx) {
            ctx.level
                .objects
                .push(ObjectPlacement::named(x, y, '`', "boulder"));
        }
    }
    for _ in 0..ctx.rng.rn2(3) {
        if let Some((x, y)) = mazexy(ctx) {
            ctx.level
                .monsters
                .push(MonsterPlacement::named(x, y, "minotaur"));
        }
    }
    for _ in 0..ctx.rng.rn1(5, 7) {
        if let Some((x, y)) = mazexy(ctx) {
            ctx.level.monsters.push(MonsterPlacement::random(x, y));
        }
    }
    for _ in 0..ctx.rng.rn1(6, 7) {
        if let Some((x, y)) = mazexy(ctx) {
            mkgold(ctx, x, y);
        }
    }
    for _ in 0..ctx.rng.rn1(6, 7) {
        mktrap(ctx, None, None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::tests::test_context_at;

    fn carved(ctx: &mut GenerationContext, policy: DeadEndPolicy, braid: bool) {
        ctx.options.dead_ends = policy;
        ctx.level.flags.is_maze = true;
        create_maze(ctx, 1, 1, braid);
    }

    fn dead_ends(level: &Level) -> usize {
        (1..X_MAZE_MAX)
            .flat_map(|x| (1..Y_MAZE_MAX).map(move |y| (x, y)))
            .filter(|&(x, y)| level.typ(x, y).is_passable() && carved_neighbours(level, x, y) == 1)
            .count()
    }

    #[test]
    fn test_unit_maze_reaches_every_cell() {
        let mut ctx = test_context_at(17, 12);
        carved(&mut ctx, DeadEndPolicy::Keep, false);
        for x in (3..X_MAZE_MAX).step_by(2) {
            for y in (3..Y_MAZE_MAX).step_by(2) {
                assert_eq!(ctx.level.typ(x, y), CellType::Room, "({x},{y})");
            }
        }
        assert_eq!(ctx.level.passable_regions(), 1);
        assert!(dead_ends(&ctx.level) > 0);
    }

    #[test]
    fn test_braid_removes_dead_ends() {
        for seed in 0..10u64 {
            let mut ctx = test_context_at(seed, 12);
            carved(&mut ctx, DeadEndPolicy::Braid, false);
            assert_eq!(dead_ends(&ctx.level), 0, "seed {seed}");
            assert_eq!(ctx.level.passable_regions(), 1);
        }
    }

    #[test]
    fn test_prune_respects_tolerance() {
        let mut ctx = test_context_at(3, 12);
        carved(&mut ctx, DeadEndPolicy::Keep, false);
        let before = ctx.level.cells.iter().flatten().filter(|c| c.typ.is_passable()).count();
        let filled = prune_dead_ends(&mut ctx.level, Some(25), (X_MAZE_MAX, Y_MAZE_MAX), &[]);
        assert_eq!(filled, 25);
        let after = ctx.level.cells.iter().flatten().filter(|c| c.typ.is_passable()).count();
        assert_eq!(before - after, 25);
        assert_eq!(ctx.level.passable_regions(), 1);
    }

    #[test]
    fn test_full_prune_leaves_one_passage() {
        for seed in 0..6u64 {
            let mut ctx = test_context_at(seed, 12);
            ctx.options.dead_ends = DeadEndPolicy::Prune { tolerance: None };
            ctx.level.flags.is_maze = true;
            let [a, b] = create_maze(&mut ctx, 1, 1, false).unwrap();
            assert_ne!(a, b);
            assert_eq!(carved_neighbours(&ctx.level, a.0, a.1), 1, "seed {seed}");
            assert_eq!(carved_neighbours(&ctx.level, b.0, b.1), 1, "seed {seed}");
            assert_eq!(dead_ends(&ctx.level), 2, "seed {seed}");
            assert_eq!(ctx.level.passable_regions(), 1);
        }
    }

    #[test]
    fn test_scaled_maze_stays_connected() {
        let mut ctx = test_context_at(8, 12);
        carved(&mut ctx, DeadEndPolicy::Keep, false);
        let mut wide = test_context_at(8, 12);
        wide.options.dead_ends = DeadEndPolicy::Keep;
        create_maze(&mut wide, 2, 1, false);
        assert_eq!(wide.level.passable_regions(), 1);
        assert_ne!(wide.level, ctx.level);
    }

    #[test]
    fn test_mazexy_finds_floor() {
        let mut ctx = test_context_at(5, 12);
        carved(&mut ctx, DeadEndPolicy::Keep, false);
        for _ in 0..50 {
            let (x, y) = mazexy(&mut ctx).unwrap();
            assert_eq!(ctx.level.typ(x, y), CellType::Room);
        }
    }

    #[test]
    fn test_mazexy_on_solid_rock() {
        let mut ctx = test_context_at(5, 12);
        assert_eq!(mazexy(&mut ctx), None);
        assert_eq!(ctx.rng.draw_count(), 200);
    }

    #[test]
    fn test_maze_level_populated() {
        let mut ctx = test_context_at(33, 14);
        make_maze_level(&mut ctx);
        let level = &ctx.level;
        assert!(level.flags.is_maze);
        assert!(level.upstair.is_some());
        assert!(level.downstair.is_some());
        assert!(level.objects.len() >= 11);
        assert!(level.monsters.len() >= 7);
        assert_eq!(level.passable_regions(), 1);
    }

    #[test]
    fn test_mazewalk_snaps_to_odd_cells() {
        let mut ctx = test_context_at(2, 12);
        init_grid(&mut ctx.level, X_MAZE_MAX, Y_MAZE_MAX);
        // Start on an even column heading west: carve (9,6) then snap.
        mazewalk(&mut ctx, 10, 6, Heading::West);
        assert_eq!(ctx.level.typ(9, 6), CellType::Room);
        assert_eq!(ctx.level.typ(9, 5), CellType::Room);
        assert_eq!(ctx.level.passable_regions(), 1);
    }
}
