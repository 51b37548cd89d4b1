//! Golden fixtures recorded from a reference run.
//!
//! A fixture pins the parts of a generated level a reimplementation must
//! reproduce exactly: the room count, the door count, and the
//! first draws of the log as `(func, args, result)` triples.

use std::path::{Path, PathBuf};

use nh_rng::RngTraceEntry;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fixture directory relative to this crate's manifest.
pub const FIXTURE_DIR: &str = "data/fixtures";

#[derive(Error, Debug)]
pub enum FixtureError {
    #[error("could not read fixture {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("fixture {path} is not valid JSON: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// One draw as compared across implementations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawKey {
    pub func: String,
    pub args: String,
    pub result: i32,
}

impl From<&RngTraceEntry> for DrawKey {
    fn from(e: &RngTraceEntry) -> Self {
        Self {
            func: e.func.clone(),
            args: e.args.clone(),
            result: e.result,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoldenFixture {
    pub seed: u64,
    pub depth: i32,
    pub style: String,
    pub rooms: usize,
    pub doors: usize,
    pub first_draws: Vec<DrawKey>,
}

impl GoldenFixture {
    /// File name a fixture is stored under.
    pub fn file_name(style: &str, seed: u64, depth: i32) -> String {
        format!("{style}_seed{seed}_depth{depth}.json")
    }

    pub fn load(path: &Path) -> Result<Self, FixtureError> {
        let text = std::fs::read_to_string(path).map_err(|source| FixtureError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| FixtureError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), FixtureError> {
        let io = |source| FixtureError::Io {
            path: path.to_path_buf(),
            source,
        };
        let json = serde_json::to_string_pretty(self).map_err(|source| FixtureError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(io)?;
        }
        std::fs::write(path, json + "\n").map_err(io)
    }

    /// Index of the first of `trace`'s draws that disagrees with the
    /// fixture, or `None` when the fixture's draws are a prefix of it.
    pub fn first_mismatch(&self, trace: &[RngTraceEntry]) -> Option<usize> {
        self.first_draws
            .iter()
            .enumerate()
            .find(|(i, want)| trace.get(*i).map(DrawKey::from).as_ref() != Some(*want))
            .map(|(i, _)| i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_mismatch() {
        let trace: Vec<RngTraceEntry> = [("rnd", "2", 1), ("rn2", "77", 16)]
            .into_iter()
            .enumerate()
            .map(|(i, (f, a, r))| RngTraceEntry {
                seq: i as u64,
                func: f.to_string(),
                args: a.to_string(),
                result: r,
                call_site: String::new(),
            })
            .collect();
        let mut fixture = GoldenFixture {
            seed: 42,
            depth: 1,
            style: "ordinary".to_string(),
            rooms: 0,
            doors: 0,
            first_draws: trace.iter().map(DrawKey::from).collect(),
        };
        assert_eq!(fixture.first_mismatch(&trace), None);
        fixture.first_draws[1].result = 17;
        assert_eq!(fixture.first_mismatch(&trace), Some(1));
        assert_eq!(fixture.first_mismatch(&trace[..0]), Some(0));
    }

    #[test]
    fn test_fixture_without_doors_is_rejected() {
        let json = r#"{"seed":42,"depth":1,"style":"ordinary","rooms":9,"first_draws":[]}"#;
        assert!(serde_json::from_str::<GoldenFixture>(json).is_err());
        let json = r#"{"seed":42,"depth":1,"style":"ordinary","rooms":9,"doors":null,"first_draws":[]}"#;
        assert!(serde_json::from_str::<GoldenFixture>(json).is_err());
    }

    #[test]
    fn test_missing_fixture_is_io_error() {
        let err = GoldenFixture::load(Path::new("/nonexistent/fixture.json")).unwrap_err();
        assert!(matches!(err, FixtureError::Io { .. }));
    }
}
