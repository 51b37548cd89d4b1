//! Level generation entry point (mklev.c: mklev, makelevel)
//!
//! Picks the generator for the requested style and runs its stages in
//! their fixed order over one [`GenerationContext`].

use std::sync::Arc;

use nh_rng::{GameRng, RngTraceEntry};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span};

use crate::context::{GenerationContext, LevelParams, LevelStyle};
use crate::dungeon::corridor::{make_corridors, make_niches};
use crate::dungeon::features::{fill_ordinary_rooms, place_stairs};
use crate::dungeon::maze::make_maze_level;
use crate::dungeon::mineralize::{bound_digging, mineralize};
use crate::dungeon::placement::{place_rooms, sort_rooms, topologize};
use crate::dungeon::special_room::make_special_rooms;
use crate::dungeon::wall::classify;
use crate::dungeon::{Level, Rect};
use crate::error::GenerateError;
use crate::options::GenOptions;
use crate::script::{ScriptedLevel, run_script};
use crate::text::TextPools;

/// A finished level and the draws that made it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedLevel {
    pub seed: u64,
    pub level: Level,
    /// Draw log; empty unless the sequencer was tracing
    pub trace: Vec<RngTraceEntry>,
    /// Raw engine words consumed, logged or not
    pub draws: u64,
}

/// Generate one level from `seed` with draw logging off.
pub fn generate(seed: u64, params: &LevelParams, options: &GenOptions) -> Result<GeneratedLevel, GenerateError> {
    let texts = TextPools::for_options(options)?;
    generate_with(GameRng::new(seed), params, options, texts)
}

/// Generate one level from `seed`, recording every draw.
pub fn generate_traced(seed: u64, params: &LevelParams, options: &GenOptions) -> Result<GeneratedLevel, GenerateError> {
    let texts = TextPools::for_options(options)?;
    let mut rng = GameRng::new(seed);
    rng.enable_tracing();
    generate_with(rng, params, options, texts)
}

/// Generate one level on a caller-prepared sequencer. Tracing state is
/// left as the caller set it.
pub fn generate_with(
    rng: GameRng,
    params: &LevelParams,
    options: &GenOptions,
    texts: Arc<TextPools>,
) -> Result<GeneratedLevel, GenerateError> {
    let seed = rng.seed();
    let span = info_span!("level_gen", seed, depth = params.depth, style = ?params.style);
    let _enter = span.enter();

    let mut ctx = GenerationContext::new(rng, params, options.clone(), texts);
    match params.style {
        LevelStyle::Ordinary => make_ordinary_level(&mut ctx),
        LevelStyle::Maze => make_maze(&mut ctx),
        LevelStyle::Scripted(script) => make_scripted_level(&mut ctx, script)?,
    }

    let trace = ctx.rng.take_trace();
    let draws = ctx.rng.draw_count();
    let level = ctx.into_level();
    info!(
        rooms = level.rooms.len(),
        doors = level.doors.len(),
        traps = level.traps.len(),
        draws,
        "level generated"
    );
    Ok(GeneratedLevel {
        seed,
        level,
        trace,
        draws,
    })
}

fn make_ordinary_level(ctx: &mut GenerationContext) {
    let max_rooms = ctx.options.max_rooms;
    let placed = place_rooms(ctx, max_rooms);
    debug!(placed, "rooms placed");
    sort_rooms(ctx);
    topologize(ctx);
    place_stairs(ctx);
    make_corridors(ctx);
    if ctx.options.niches {
        make_niches(ctx);
    }
    classify(&mut ctx.level, Rect::map());
    if ctx.options.special_rooms {
        make_special_rooms(ctx);
    }
    fill_ordinary_rooms(ctx);
    bound_digging(&mut ctx.level);
    if ctx.options.mineralize {
        mineralize(ctx);
    }
}

fn make_maze(ctx: &mut GenerationContext) {
    make_maze_level(ctx);
    bound_digging(&mut ctx.level);
    if ctx.options.mineralize && !ctx.level.branch.in_gehennom() {
        mineralize(ctx);
    }
}

fn make_scripted_level(ctx: &mut GenerationContext, script: ScriptedLevel) -> Result<(), GenerateError> {
    run_script(ctx, script)?;
    bound_digging(&mut ctx.level);
    if script == ScriptedLevel::Oracle && ctx.options.mineralize {
        mineralize(ctx);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinary_level_has_rooms_and_stairs() {
        let out = generate(7, &LevelParams::ordinary(3), &GenOptions::default()).unwrap();
        assert!(!out.level.rooms.is_empty());
        assert!(out.level.upstair.is_some());
        assert!(out.level.downstair.is_some());
        assert!(out.trace.is_empty());
        assert!(out.draws > 0);
    }

    #[test]
    fn test_traced_run_matches_untraced() {
        let params = LevelParams::ordinary(5);
        let options = GenOptions::default();
        let plain = generate(11, &params, &options).unwrap();
        let traced = generate_traced(11, &params, &options).unwrap();
        assert_eq!(plain.level, traced.level);
        assert_eq!(plain.draws, traced.draws);
        assert!(!traced.trace.is_empty());
    }

    #[test]
    fn test_maze_level_is_flagged() {
        let out = generate(3, &LevelParams::maze(20), &GenOptions::default()).unwrap();
        assert!(out.level.flags.is_maze);
        assert!(out.level.rooms.is_empty());
    }

    #[test]
    fn test_scripted_levels_generate() {
        for script in ScriptedLevel::ALL {
            let out = generate(2, &LevelParams::scripted(script), &GenOptions::default()).unwrap();
            assert_eq!(out.level.depth, script.default_depth(), "{script}");
        }
    }

    #[test]
    fn test_unreadable_text_dir_is_an_error() {
        let options = GenOptions {
            text_dir: Some("/nonexistent/nh-dungeon/pools".into()),
            ..GenOptions::default()
        };
        let err = generate(1, &LevelParams::ordinary(1), &options).unwrap_err();
        assert!(matches!(err, GenerateError::Text(_)));
    }
}
