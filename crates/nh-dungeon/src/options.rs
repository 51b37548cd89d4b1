//! Generation options (nethackrc format)
//!
//! Tunables for every stage of the pipeline. Loaded from `OPTIONS=` lines:
//!
//! ```text
//! # fewer, denser rooms
//! OPTIONS=max_rooms:8,!niches
//! OPTIONS=dead_ends:braid,goldprob:0
//! ```

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::TEXT_PAD_WIDTH;
use crate::error::OptionsError;

/// What to do with maze dead ends after carving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DeadEndPolicy {
    /// Braid one maze in five, leave the rest alone.
    #[default]
    Random,
    /// Open a wall at every dead end so it joins a neighbouring passage.
    Braid,
    /// Leave the spanning tree as carved.
    Keep,
    /// Fill dead ends back in, at most `tolerance` cells (`None` = until none remain).
    Prune { tolerance: Option<u32> },
}

/// Options controlling level generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenOptions {
    /// Room placement attempts per ordinary level
    pub max_rooms: usize,
    /// Redraws per room before it is skipped
    pub room_retries: u32,
    /// Dig the random redundant corridors after the spanning joins
    pub extra_corridors: bool,
    /// An extra corridor gives up with probability 1/n per dug cell
    pub nxcor_abort_chance: i32,
    /// A dug corridor cell is secret with probability 1/n
    pub secret_corridor_chance: i32,
    pub niches: bool,
    pub special_rooms: bool,
    /// Allow wide-corridor / thick-wall mazes
    pub maze_scaling: bool,
    pub dead_ends: DeadEndPolicy,
    /// Candidate draws before a feature is skipped
    pub feature_retries: u32,
    pub mineralize: bool,
    /// Per-mille gold chance; depth-derived when unset
    pub goldprob: Option<i32>,
    /// Per-mille gem chance; derived from gold when unset
    pub gemprob: Option<i32>,
    pub kelp_pool: i32,
    pub kelp_moat: i32,
    /// Longest padded text line accepted before redrawing
    pub text_max_line: usize,
    pub text_retries: u32,
    /// Directory holding encrypted `rumors.tru`, `rumors.fal`,
    /// `epitaph` and `engrave` pools to use instead of the built-in ones
    pub text_dir: Option<PathBuf>,
}

impl Default for GenOptions {
    fn default() -> Self {
        Self {
            max_rooms: 12,
            room_retries: 10,
            extra_corridors: true,
            nxcor_abort_chance: 35,
            secret_corridor_chance: 100,
            niches: true,
            special_rooms: true,
            maze_scaling: true,
            dead_ends: DeadEndPolicy::Random,
            feature_retries: 100,
            mineralize: true,
            goldprob: None,
            gemprob: None,
            kelp_pool: 10,
            kelp_moat: 30,
            text_max_line: TEXT_PAD_WIDTH,
            text_retries: 10,
            text_dir: None,
        }
    }
}

impl GenOptions {
    /// Load options from a file
    pub fn load_from_file(path: &Path) -> Result<Self, OptionsError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_config(&contents)
    }

    /// Parse options from a config string (nethackrc format)
    pub fn parse_config(contents: &str) -> Result<Self, OptionsError> {
        let mut options = Self::default();

        for (idx, line) in contents.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some(opts) = line.strip_prefix("OPTIONS=") else {
                return Err(OptionsError::Parse {
                    line: idx + 1,
                    message: format!("expected OPTIONS=, found '{line}'"),
                });
            };
            for opt in opts.split(',').map(str::trim).filter(|o| !o.is_empty()) {
                options
                    .parse_option(opt)
                    .map_err(|message| OptionsError::Parse {
                        line: idx + 1,
                        message,
                    })?;
            }
        }

        Ok(options)
    }

    fn parse_option(&mut self, opt: &str) -> Result<(), String> {
        if let Some((key, value)) = opt.split_once(':').or_else(|| opt.split_once('=')) {
            return self.set_option(key.trim(), value.trim());
        }
        let (value, name) = match opt.strip_prefix('!') {
            Some(name) => (false, name),
            None => (true, opt),
        };
        self.set_bool_option(name, value)
    }

    fn set_bool_option(&mut self, name: &str, value: bool) -> Result<(), String> {
        match name {
            "extra_corridors" => self.extra_corridors = value,
            "niches" => self.niches = value,
            "special_rooms" => self.special_rooms = value,
            "maze_scaling" => self.maze_scaling = value,
            "mineralize" => self.mineralize = value,
            _ => return Err(format!("unknown option '{name}'")),
        }
        Ok(())
    }

    fn set_option(&mut self, name: &str, value: &str) -> Result<(), String> {
        fn num<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, String> {
            value
                .parse()
                .map_err(|_| format!("invalid value '{value}' for option '{name}'"))
        }
        fn positive(name: &str, value: &str) -> Result<i32, String> {
            let n: i32 = num(name, value)?;
            if n <= 0 {
                return Err(format!("option '{name}' must be positive, got {n}"));
            }
            Ok(n)
        }

        match name {
            "max_rooms" => self.max_rooms = num(name, value)?,
            "room_retries" => self.room_retries = num(name, value)?,
            "nxcor_abort_chance" => self.nxcor_abort_chance = positive(name, value)?,
            "secret_corridor_chance" => self.secret_corridor_chance = positive(name, value)?,
            "feature_retries" => self.feature_retries = num(name, value)?,
            "goldprob" => self.goldprob = Some(num(name, value)?),
            "gemprob" => self.gemprob = Some(num(name, value)?),
            "kelp_pool" => self.kelp_pool = positive(name, value)?,
            "kelp_moat" => self.kelp_moat = positive(name, value)?,
            "text_max_line" => self.text_max_line = num(name, value)?,
            "text_retries" => self.text_retries = num(name, value)?,
            "text_dir" => self.text_dir = Some(PathBuf::from(value)),
            "dead_ends" => {
                self.dead_ends = match value.to_lowercase().as_str() {
                    "random" => DeadEndPolicy::Random,
                    "braid" => DeadEndPolicy::Braid,
                    "keep" => DeadEndPolicy::Keep,
                    "prune" => DeadEndPolicy::Prune { tolerance: None },
                    other => match other.strip_prefix("prune/") {
                        Some(n) => DeadEndPolicy::Prune {
                            tolerance: Some(num(name, n)?),
                        },
                        None => return Err(format!("invalid value '{value}' for option '{name}'")),
                    },
                };
            }
            _ => return Err(format!("unknown option '{name}'")),
        }
        Ok(())
    }

    /// Render as an `OPTIONS=` line that parses back to the same options.
    pub fn to_config_string(&self) -> String {
        let flag = |on: bool, name: &str| if on { name.to_string() } else { format!("!{name}") };
        let mut parts = vec![
            format!("max_rooms:{}", self.max_rooms),
            format!("room_retries:{}", self.room_retries),
            flag(self.extra_corridors, "extra_corridors"),
            format!("nxcor_abort_chance:{}", self.nxcor_abort_chance),
            format!("secret_corridor_chance:{}", self.secret_corridor_chance),
            flag(self.niches, "niches"),
            flag(self.special_rooms, "special_rooms"),
            flag(self.maze_scaling, "maze_scaling"),
            flag(self.mineralize, "mineralize"),
            format!("feature_retries:{}", self.feature_retries),
            format!("kelp_pool:{}", self.kelp_pool),
            format!("kelp_moat:{}", self.kelp_moat),
            format!("text_max_line:{}", self.text_max_line),
            format!("text_retries:{}", self.text_retries),
        ];
        parts.push(match self.dead_ends {
            DeadEndPolicy::Random => "dead_ends:random".to_string(),
            DeadEndPolicy::Braid => "dead_ends:braid".to_string(),
            DeadEndPolicy::Keep => "dead_ends:keep".to_string(),
            DeadEndPolicy::Prune { tolerance: None } => "dead_ends:prune".to_string(),
            DeadEndPolicy::Prune { tolerance: Some(n) } => format!("dead_ends:prune/{n}"),
        });
        if let Some(p) = self.goldprob {
            parts.push(format!("goldprob:{p}"));
        }
        if let Some(p) = self.gemprob {
            parts.push(format!("gemprob:{p}"));
        }
        if let Some(dir) = &self.text_dir {
            parts.push(format!("text_dir:{}", dir.display()));
        }

        let mut out = String::new();
        let _ = writeln!(out, "OPTIONS={}", parts.join(","));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opts = GenOptions::default();
        assert_eq!(opts.max_rooms, 12);
        assert!(opts.extra_corridors);
        assert_eq!(opts.dead_ends, DeadEndPolicy::Random);
        assert_eq!(opts.goldprob, None);
    }

    #[test]
    fn test_parse_bool_option() {
        let config = "# comment\nOPTIONS=!niches,mineralize\n\nOPTIONS=!extra_corridors";
        let opts = GenOptions::parse_config(config).unwrap();
        assert!(!opts.niches);
        assert!(opts.mineralize);
        assert!(!opts.extra_corridors);
    }

    #[test]
    fn test_parse_value_option() {
        let config = "OPTIONS=max_rooms:6, goldprob:0, dead_ends:prune/40, text_dir=/tmp/pools";
        let opts = GenOptions::parse_config(config).unwrap();
        assert_eq!(opts.max_rooms, 6);
        assert_eq!(opts.goldprob, Some(0));
        assert_eq!(opts.dead_ends, DeadEndPolicy::Prune { tolerance: Some(40) });
        assert_eq!(opts.text_dir, Some(PathBuf::from("/tmp/pools")));
    }

    #[test]
    fn test_unknown_option_reports_line() {
        let err = GenOptions::parse_config("OPTIONS=niches\nOPTIONS=sparkles").unwrap_err();
        match err {
            OptionsError::Parse { line, message } => {
                assert_eq!(line, 2);
                assert!(message.contains("sparkles"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_rejects_non_positive_chance() {
        assert!(GenOptions::parse_config("OPTIONS=kelp_pool:0").is_err());
        assert!(GenOptions::parse_config("OPTIONS=max_rooms:many").is_err());
        assert!(GenOptions::parse_config("BIND=g:pickup").is_err());
    }

    #[test]
    fn test_roundtrip() {
        let opts = GenOptions {
            max_rooms: 7,
            niches: false,
            dead_ends: DeadEndPolicy::Braid,
            goldprob: Some(0),
            text_dir: Some(PathBuf::from("pools")),
            ..GenOptions::default()
        };
        let parsed = GenOptions::parse_config(&opts.to_config_string()).unwrap();
        assert_eq!(parsed, opts);
    }
}
