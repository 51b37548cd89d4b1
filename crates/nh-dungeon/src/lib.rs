//! nh-dungeon: seeded NetHack-style level generation
//!
//! One call to [`generate`] turns a seed and [`LevelParams`] into a
//! [`GeneratedLevel`]: the terrain grid, every room, door, trap and
//! placement record, and (optionally) the trace of random draws that
//! produced it. The same seed, parameters and options always give the same
//! level and the same trace.

pub mod context;
pub mod dungeon;
pub mod error;
pub mod generate;
pub mod options;
pub mod script;
pub mod text;

mod consts;

pub use consts::*;
pub use context::{GenerationContext, LevelParams, LevelStyle};
pub use error::{GenerateError, OptionsError, ScriptError, TextPoolError};
pub use generate::{GeneratedLevel, generate, generate_traced, generate_with};
pub use options::{DeadEndPolicy, GenOptions};
pub use script::ScriptedLevel;
pub use text::TextPools;
