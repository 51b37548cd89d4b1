//! Error types for level generation.
//!
//! Placement loops that run out of attempts are not errors: they skip the
//! entity and log at debug level. Only malformed input surfaces here.

use std::io;

use thiserror::Error;

/// A scripted level could not be loaded or run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    #[error("malformed map template in script '{script}': {reason}")]
    MalformedTemplate { script: String, reason: String },

    #[error("no scripted level named '{0}'")]
    UnknownLevel(String),

    #[error("script '{script}' addresses ({x},{y}) outside the map")]
    OutOfBounds { script: String, x: i32, y: i32 },
}

/// Generation options could not be read.
#[derive(Error, Debug)]
pub enum OptionsError {
    #[error("could not read options file: {0}")]
    Io(#[from] io::Error),

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
}

/// A text pool could not be loaded.
#[derive(Error, Debug)]
pub enum TextPoolError {
    #[error("could not read text pool: {0}")]
    Io(#[from] io::Error),

    #[error("text pool '{0}' has no lines")]
    Empty(String),
}

/// Anything that stops `generate` from producing a level.
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error(transparent)]
    Script(#[from] ScriptError),

    #[error(transparent)]
    Text(#[from] TextPoolError),
}
