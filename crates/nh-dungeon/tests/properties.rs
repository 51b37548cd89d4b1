//! Whole-level invariants over random seeds.

use nh_dungeon::dungeon::wall::classify;
use nh_dungeon::dungeon::{Level, Rect};
use nh_dungeon::text::xcrypt;
use nh_dungeon::{GenOptions, LevelParams, generate, generate_traced};
use proptest::prelude::*;

fn ordinary(seed: u64, depth: i32) -> Level {
    generate(seed, &LevelParams::ordinary(depth), &GenOptions::default())
        .unwrap()
        .level
}

fn in_some_room(level: &Level, x: i32, y: i32) -> Option<usize> {
    if !Level::isok(x, y) {
        return None;
    }
    level
        .rooms
        .iter()
        .position(|r| r.contains(x as usize, y as usize))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_generation_is_deterministic(seed in any::<u64>(), depth in 1i32..30) {
        let params = LevelParams::ordinary(depth);
        let options = GenOptions::default();
        let a = generate_traced(seed, &params, &options).unwrap();
        let b = generate_traced(seed, &params, &options).unwrap();
        prop_assert_eq!(&a.level, &b.level);
        prop_assert_eq!(&a.trace, &b.trace);
        prop_assert_eq!(a.level.to_ascii(), b.level.to_ascii());
    }

    #[test]
    fn prop_ordinary_levels_are_connected(seed in any::<u64>(), depth in 1i32..30) {
        let level = ordinary(seed, depth);
        prop_assert_eq!(level.passable_regions(), 1, "\n{}", level.to_ascii());
    }

    #[test]
    fn prop_maze_levels_are_connected(seed in any::<u64>(), depth in 10i32..30) {
        let level = generate(seed, &LevelParams::maze(depth), &GenOptions::default()).unwrap().level;
        prop_assert_eq!(level.passable_regions(), 1, "\n{}", level.to_ascii());
    }

    #[test]
    fn prop_rooms_keep_their_margin(seed in any::<u64>(), depth in 1i32..30) {
        let level = ordinary(seed, depth);
        let tops: Vec<_> = level.rooms.iter().filter(|r| !r.is_subroom()).collect();
        for (i, a) in tops.iter().enumerate() {
            for b in &tops[i + 1..] {
                prop_assert!(!a.margined().intersects(&b.margined()));
            }
        }
    }

    #[test]
    fn prop_wall_classification_is_idempotent(seed in any::<u64>(), depth in 1i32..30) {
        let mut once = ordinary(seed, depth);
        classify(&mut once, Rect::map());
        let mut twice = once.clone();
        classify(&mut twice, Rect::map());
        prop_assert_eq!(once.cells, twice.cells);
    }

    #[test]
    fn prop_doors_join_a_room_to_the_outside(seed in any::<u64>(), depth in 1i32..30) {
        let level = ordinary(seed, depth);
        for door in &level.doors {
            let (x, y) = (door.x as i32, door.y as i32);
            if !level.typ(door.x, door.y).is_door() {
                continue;
            }
            let neighbours = [(x, y - 1), (x, y + 1), (x - 1, y), (x + 1, y)];
            let inside: Vec<usize> = neighbours
                .iter()
                .filter_map(|&(nx, ny)| in_some_room(&level, nx, ny))
                .collect();
            prop_assert_eq!(inside.len(), 1, "door at ({},{})\n{}", x, y, level.to_ascii());
            let outside = neighbours.iter().any(|&(nx, ny)| {
                level.typ_at(nx, ny).is_corridor()
                    || in_some_room(&level, nx, ny).is_some_and(|r| r != inside[0])
            });
            prop_assert!(outside, "door at ({},{}) leads nowhere\n{}", x, y, level.to_ascii());
        }
    }

    #[test]
    fn prop_xcrypt_is_self_inverse(bytes in proptest::collection::vec(any::<u8>(), 0..256)) {
        prop_assert_eq!(xcrypt(&xcrypt(&bytes)), bytes);
    }

    #[test]
    fn prop_xcrypt_is_self_inverse_on_text(s in "[ -~]{0,80}") {
        let back = xcrypt(&xcrypt(s.as_bytes()));
        prop_assert_eq!(String::from_utf8(back).unwrap(), s);
    }
}
