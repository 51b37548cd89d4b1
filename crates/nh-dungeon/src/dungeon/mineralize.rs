//! Hidden deposits and dig bounds (mkmaze.c: bound_digging, mklev.c:
//! mineralize)

use tracing::debug;

use super::{CellFlags, CellType, Deposit, DepositKind, Level};
use crate::consts::{COLNO, ROWNO};
use crate::context::GenerationContext;

/// Mark everything outside the level's used area as undiggable, so
/// nobody tunnels off the edge of the map.
pub fn bound_digging(level: &mut Level) {
    let is_maze = level.flags.is_maze;
    let scan = |cells: &mut dyn Iterator<Item = (usize, usize)>| {
        let mut found = false;
        let mut nonwall = false;
        for (x, y) in cells {
            let typ = level.typ(x, y);
            if typ != CellType::Stone {
                found = true;
                if !typ.is_wall() {
                    nonwall = true;
                }
            }
        }
        (found, nonwall)
    };
    let margin = |nonwall: bool| if nonwall || !is_maze { 2 } else { 1 };

    let mut xmin = 0i32;
    let mut xmax = COLNO as i32 - 1;
    let mut ymin = 0i32;
    let mut ymax = ROWNO as i32 - 1;

    if let Some((col, nonwall)) = (0..COLNO)
        .map(|x| (x, scan(&mut (0..ROWNO).map(move |y| (x, y)))))
        .find(|(_, (found, _))| *found)
        .map(|(x, (_, nonwall))| (x, nonwall))
    {
        xmin = (col as i32 + 1 - margin(nonwall)).max(0);
    }
    if let Some((col, nonwall)) = (0..COLNO)
        .rev()
        .map(|x| (x, scan(&mut (0..ROWNO).map(move |y| (x, y)))))
        .find(|(_, (found, _))| *found)
        .map(|(x, (_, nonwall))| (x, nonwall))
    {
        xmax = (col as i32 - 1 + margin(nonwall)).min(COLNO as i32 - 1);
    }
    let (lo, hi) = (xmin.max(0) as usize, xmax.max(0) as usize);
    if let Some((row, nonwall)) = (0..ROWNO)
        .map(|y| (y, scan(&mut (lo..=hi).map(move |x| (x, y)))))
        .find(|(_, (found, _))| *found)
        .map(|(y, (_, nonwall))| (y, nonwall))
    {
        ymin = (row as i32 + 1 - margin(nonwall)).max(0);
    }
    if let Some((row, nonwall)) = (0..ROWNO)
        .rev()
        .map(|y| (y, scan(&mut (lo..=hi).map(move |x| (x, y)))))
        .find(|(_, (found, _))| *found)
        .map(|(y, (_, nonwall))| (y, nonwall))
    {
        ymax = (row as i32 - 1 + margin(nonwall)).min(ROWNO as i32 - 1);
    }

    for x in 0..COLNO {
        for y in 0..ROWNO {
            let (xi, yi) = (x as i32, y as i32);
            if yi <= ymin || yi >= ymax || xi <= xmin || xi >= xmax {
                level.cell_mut(x, y).flags |= CellFlags::NON_DIGGABLE;
            }
        }
    }
}

/// Rock that is stone all around and may be dug.
fn embeddable(level: &Level, x: usize, y: usize) -> bool {
    if !level.cell(x, y).is_diggable() {
        return false;
    }
    let (x, y) = (x as i32, y as i32);
    [(-1, -1), (0, -1), (1, -1), (-1, 0), (1, 0), (-1, 1), (1, 1)]
        .iter()
        .all(|&(dx, dy)| level.typ_at(x + dx, y + dy) == CellType::Stone)
}

/// Kelp in water, then gold and gems sealed in solid rock.
pub fn mineralize(ctx: &mut GenerationContext) {
    let kelp_pool = ctx.options.kelp_pool;
    let kelp_moat = ctx.options.kelp_moat;
    for x in 2..COLNO - 2 {
        for y in 1..ROWNO - 1 {
            let kelp = match ctx.level.typ(x, y) {
                CellType::Pool => ctx.rng.rn2(kelp_pool) == 0,
                CellType::Moat => ctx.rng.rn2(kelp_moat) == 0,
                _ => false,
            };
            if kelp {
                ctx.level.deposits.push(Deposit {
                    x,
                    y,
                    kind: DepositKind::Kelp,
                });
            }
        }
    }

    let goldprob = ctx
        .options
        .goldprob
        .unwrap_or(20 + ctx.depth().abs() / 3);
    let gemprob = ctx.options.gemprob.unwrap_or(goldprob / 4);
    let dunlev = ctx.level.branch.level.abs();

    let mut gold = 0;
    let mut gems = 0;
    for x in 2..COLNO - 2 {
        let mut y = 1;
        while y < ROWNO - 1 {
            if ctx.level.typ(x, y + 1) != CellType::Stone {
                y += 3;
                continue;
            }
            if ctx.level.typ(x, y) != CellType::Stone {
                y += 2;
                continue;
            }
            if embeddable(&ctx.level, x, y) {
                if ctx.rng.rn2(1000) < goldprob {
                    let amount = 1 + ctx.rng.rnd(goldprob * 3);
                    ctx.level.deposits.push(Deposit {
                        x,
                        y,
                        kind: DepositKind::Gold { amount },
                    });
                    gold += 1;
                }
                if ctx.rng.rn2(1000) < gemprob {
                    let count = ctx.rng.rnd(2 + dunlev / 3);
                    ctx.level.deposits.push(Deposit {
                        x,
                        y,
                        kind: DepositKind::Gems { count },
                    });
                    gems += 1;
                }
            }
            y += 1;
        }
    }
    debug!(goldprob, gemprob, gold, gems, "level mineralized");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::tests::test_context_at;
    use crate::dungeon::placement::{RoomRequest, create_room};

    #[test]
    fn test_no_gold_when_goldprob_zero() {
        let mut ctx = test_context_at(6, 10);
        ctx.options.goldprob = Some(0);
        ctx.options.gemprob = Some(0);
        mineralize(&mut ctx);
        assert!(ctx.level.deposits.is_empty());
    }

    #[test]
    fn test_deposits_sit_in_solid_rock() {
        let mut ctx = test_context_at(6, 30);
        ctx.options.goldprob = Some(400);
        ctx.options.gemprob = Some(400);
        create_room(
            &mut ctx,
            RoomRequest {
                size: Some((10, 4)),
                pos: Some((30, 8)),
                lit: Some(true),
                ..RoomRequest::default()
            },
        )
        .unwrap();
        mineralize(&mut ctx);
        assert!(!ctx.level.deposits.is_empty());
        for d in &ctx.level.deposits {
            assert_eq!(ctx.level.typ(d.x, d.y), CellType::Stone);
            assert!(!ctx.level.rooms[0].margined().contains(d.x, d.y));
            match d.kind {
                DepositKind::Gold { amount } => assert!((2..=1201).contains(&amount)),
                DepositKind::Gems { count } => assert!(count >= 1),
                DepositKind::Kelp => panic!("no water on this level"),
            }
        }
    }

    #[test]
    fn test_gems_above_the_surface() {
        for depth in [-6, -12, -30] {
            let mut ctx = test_context_at(3, depth);
            ctx.options.gemprob = Some(1000);
            mineralize(&mut ctx);
            let most = 2 + depth.abs() / 3;
            let counts: Vec<i32> = ctx
                .level
                .deposits
                .iter()
                .filter_map(|d| match d.kind {
                    DepositKind::Gems { count } => Some(count),
                    _ => None,
                })
                .collect();
            assert!(!counts.is_empty(), "depth {depth}");
            assert!(counts.iter().all(|c| (1..=most).contains(c)), "depth {depth}");
        }
    }

    #[test]
    fn test_kelp_only_in_water() {
        let mut ctx = test_context_at(1, 5);
        ctx.options.kelp_pool = 1;
        ctx.options.goldprob = Some(0);
        ctx.options.gemprob = Some(0);
        ctx.level.set_typ(10, 10, CellType::Pool);
        mineralize(&mut ctx);
        assert_eq!(
            ctx.level.deposits,
            vec![Deposit {
                x: 10,
                y: 10,
                kind: DepositKind::Kelp
            }]
        );
    }

    #[test]
    fn test_bound_digging_edges() {
        let mut ctx = test_context_at(1, 5);
        create_room(
            &mut ctx,
            RoomRequest {
                size: Some((10, 4)),
                pos: Some((30, 8)),
                lit: Some(true),
                ..RoomRequest::default()
            },
        )
        .unwrap();
        bound_digging(&mut ctx.level);
        let level = &ctx.level;
        // Walls span x 29..=40, y 7..=12; only that box stays diggable.
        assert!(!level.cell(28, 8).is_diggable());
        assert!(level.cell(29, 8).is_diggable());
        assert!(level.cell(40, 12).is_diggable());
        assert!(!level.cell(41, 12).is_diggable());
        assert!(!level.cell(35, 6).is_diggable());
        assert!(level.cell(35, 7).is_diggable());
        assert!(!level.cell(35, 13).is_diggable());
    }
}
