//! Golden-fixture parity for ordinary levels.
//!
//! Regenerate with:
//! `cargo test -p nh-compare --test golden -- --ignored --nocapture`

use std::path::PathBuf;

use nh_compare::fixture::{DrawKey, FIXTURE_DIR, GoldenFixture};
use nh_dungeon::{GenOptions, LevelParams, generate_traced};

const GOLDEN_SEEDS: [(u64, i32); 1] = [(42, 1)];

fn fixture_path(seed: u64, depth: i32) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join(FIXTURE_DIR)
        .join(GoldenFixture::file_name("ordinary", seed, depth))
}

#[test]
fn test_seed_42_matches_reference() {
    let fixture = GoldenFixture::load(&fixture_path(42, 1)).unwrap();
    let params = LevelParams::ordinary(fixture.depth);
    let out = generate_traced(fixture.seed, &params, &GenOptions::default()).unwrap();

    assert_eq!(fixture.first_draws.len(), 20);
    assert_eq!(fixture.first_mismatch(&out.trace), None, "draw log diverged");
    assert_eq!(out.level.rooms.len(), fixture.rooms);
    assert_eq!(out.level.doors.len(), fixture.doors, "door count diverged");
}

#[test]
#[ignore]
fn regenerate_golden_fixtures() {
    for (seed, depth) in GOLDEN_SEEDS {
        let params = LevelParams::ordinary(depth);
        let out = generate_traced(seed, &params, &GenOptions::default()).unwrap();
        let fixture = GoldenFixture {
            seed,
            depth,
            style: "ordinary".to_string(),
            rooms: out.level.rooms.len(),
            doors: out.level.doors.len(),
            first_draws: out.trace.iter().take(20).map(DrawKey::from).collect(),
        };
        let path = fixture_path(seed, depth);
        fixture.save(&path).unwrap();
        println!("Generated: {} ({} rooms, {} doors)", path.display(), fixture.rooms, fixture.doors);
    }
}
