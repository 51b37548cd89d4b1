//! Scripted levels (sp_lev.c and the level description files)
//!
//! A scripted level is a Rust function driving a [`LevelBuilder`]: it
//! stamps map templates, marks regions, places doors, stairs, objects and
//! monsters, and may fall back to random rooms and corridors. Each command
//! draws from the same sequencer as the ordinary generator, in call order.

mod bigroom;
mod builder;
mod castle;
mod map;
mod oracle;
mod selection;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

pub use builder::{LevelBuilder, RegionSpec};
pub use map::{MapTemplate, terrain_for};
pub use selection::Selection;

use crate::context::GenerationContext;
use crate::error::ScriptError;

/// The hand-authored levels this crate knows how to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScriptedLevel {
    Castle,
    BigRoom,
    Oracle,
}

type ScriptFn = fn(&mut LevelBuilder<'_>) -> Result<(), ScriptError>;

impl ScriptedLevel {
    pub const ALL: [ScriptedLevel; 3] = [ScriptedLevel::Castle, ScriptedLevel::BigRoom, ScriptedLevel::Oracle];

    pub fn name(self) -> &'static str {
        match self {
            ScriptedLevel::Castle => "castle",
            ScriptedLevel::BigRoom => "bigroom",
            ScriptedLevel::Oracle => "oracle",
        }
    }

    pub fn from_name(name: &str) -> Result<Self, ScriptError> {
        Self::ALL
            .into_iter()
            .find(|level| level.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| ScriptError::UnknownLevel(name.to_string()))
    }

    /// Where the level usually sits in the main dungeon.
    pub fn default_depth(self) -> i32 {
        match self {
            ScriptedLevel::Castle => 27,
            ScriptedLevel::BigRoom => 12,
            ScriptedLevel::Oracle => 7,
        }
    }

    fn script(self) -> ScriptFn {
        match self {
            ScriptedLevel::Castle => castle::build,
            ScriptedLevel::BigRoom => bigroom::build,
            ScriptedLevel::Oracle => oracle::build,
        }
    }
}

impl fmt::Display for ScriptedLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScriptedLevel {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

/// Run `level`'s script against `ctx`, then close it out.
pub fn run_script(ctx: &mut GenerationContext, level: ScriptedLevel) -> Result<(), ScriptError> {
    debug!(script = level.name(), "running level script");
    let mut builder = LevelBuilder::new(ctx, level.name());
    (level.script())(&mut builder)?;
    builder.finish();
    Ok(())
}
