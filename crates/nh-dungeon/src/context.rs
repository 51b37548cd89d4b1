//! Per-call generation state.
//!
//! A [`GenerationContext`] owns the one sequencer and the one grid a
//! generation call works on. Every stage takes it by `&mut`; nothing about a
//! level lives in globals, so independently seeded contexts can run side by
//! side.

use std::sync::Arc;

use nh_rng::GameRng;
use serde::{Deserialize, Serialize};

use crate::dungeon::{Branch, Level};
use crate::options::GenOptions;
use crate::script::ScriptedLevel;
use crate::text::TextPools;

/// Which generator builds the level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LevelStyle {
    /// Rooms and corridors
    #[default]
    Ordinary,
    /// A full-level maze
    Maze,
    /// A hand-authored level
    Scripted(ScriptedLevel),
}

/// Inputs of one generation call besides the seed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelParams {
    pub depth: i32,
    pub style: LevelStyle,
    pub branch: Branch,
}

impl Default for LevelParams {
    fn default() -> Self {
        Self {
            depth: 1,
            style: LevelStyle::Ordinary,
            branch: Branch::default(),
        }
    }
}

impl LevelParams {
    pub fn ordinary(depth: i32) -> Self {
        Self {
            depth,
            branch: Branch {
                level: depth,
                ..Branch::default()
            },
            ..Self::default()
        }
    }

    pub fn maze(depth: i32) -> Self {
        Self {
            style: LevelStyle::Maze,
            ..Self::ordinary(depth)
        }
    }

    pub fn scripted(level: ScriptedLevel) -> Self {
        let depth = level.default_depth();
        Self {
            style: LevelStyle::Scripted(level),
            ..Self::ordinary(depth)
        }
    }
}

/// Everything a pipeline stage may read or change.
#[derive(Debug, Clone)]
pub struct GenerationContext {
    pub rng: GameRng,
    pub level: Level,
    pub options: GenOptions,
    pub texts: Arc<TextPools>,
}

impl GenerationContext {
    pub fn new(rng: GameRng, params: &LevelParams, options: GenOptions, texts: Arc<TextPools>) -> Self {
        Self {
            rng,
            level: Level::new(params.depth, params.branch.clone()),
            options,
            texts,
        }
    }

    pub fn depth(&self) -> i32 {
        self.level.depth
    }

    /// `level_difficulty()`: generation uses plain depth.
    pub fn difficulty(&self) -> i32 {
        self.level.depth.max(1)
    }

    /// Hand the finished level out, keeping nothing behind.
    pub fn into_level(self) -> Level {
        self.level
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Ordinary depth-1 context with default options.
    pub(crate) fn test_context(seed: u64) -> GenerationContext {
        test_context_at(seed, 1)
    }

    pub(crate) fn test_context_at(seed: u64, depth: i32) -> GenerationContext {
        GenerationContext::new(
            GameRng::new(seed),
            &LevelParams::ordinary(depth),
            GenOptions::default(),
            TextPools::builtin(),
        )
    }

    #[test]
    fn test_params_constructors() {
        let p = LevelParams::maze(12);
        assert_eq!(p.style, LevelStyle::Maze);
        assert_eq!(p.branch.level, 12);
        let ctx = test_context_at(1, 0);
        assert_eq!(ctx.difficulty(), 1);
    }
}
