//! Parity comparison for generated levels.
//!
//! Captures a normalized [`snapshot::LevelSnapshot`] of a generated level,
//! diffs draw logs call by call and terrain cell by cell, and rolls the
//! results of many seeds into a [`report::ConvergenceReport`]. Golden
//! fixtures recorded from a reference run live under `data/fixtures/`.

pub mod diff;
pub mod fixture;
pub mod report;
pub mod snapshot;
