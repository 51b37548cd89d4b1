//! nh-levelgen
//!
//! Generates one level from a seed and prints it as ASCII.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use nh_compare::snapshot::LevelSnapshot;
use nh_dungeon::{
    GenOptions, GenerateError, LevelParams, OptionsError, ScriptedLevel, generate, generate_traced,
};
use thiserror::Error;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

/// Seeded NetHack-style level generator
#[derive(Parser, Debug)]
#[command(name = "nh-levelgen")]
#[command(author, version, about = "Generate a dungeon level from a seed", long_about = None)]
struct Args {
    /// Seed for the level's random sequence
    #[arg(short = 's', long = "seed", default_value_t = 0)]
    seed: u64,

    /// Dungeon depth (scripted levels default to their usual depth)
    #[arg(short = 'd', long = "depth")]
    depth: Option<i32>,

    /// Build a full-level maze instead of rooms and corridors
    #[arg(short = 'm', long = "maze", conflicts_with = "level")]
    maze: bool,

    /// Build a scripted level (castle, bigroom, oracle)
    #[arg(short = 'l', long = "level")]
    level: Option<ScriptedLevel>,

    /// Options file in `OPTIONS=` format
    #[arg(short = 'o', long = "options")]
    options: Option<PathBuf>,

    /// Write the draw log as JSON
    #[arg(long = "trace-json")]
    trace_json: Option<PathBuf>,

    /// Write a level snapshot as JSON
    #[arg(long = "snapshot-json")]
    snapshot_json: Option<PathBuf>,

    /// Log generation milestones
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

#[derive(Error, Debug)]
enum CliError {
    #[error("bad options file: {0}")]
    Options(#[from] OptionsError),

    #[error("generation failed: {0}")]
    Generate(#[from] GenerateError),

    #[error("could not encode JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Args {
    fn params(&self) -> LevelParams {
        let mut params = match self.level {
            Some(level) => LevelParams::scripted(level),
            None if self.maze => LevelParams::maze(self.depth.unwrap_or(1)),
            None => LevelParams::ordinary(self.depth.unwrap_or(1)),
        };
        if let (Some(_), Some(depth)) = (self.level, self.depth) {
            params.depth = depth;
            params.branch.level = depth;
        }
        params
    }

    fn wants_trace(&self) -> bool {
        self.trace_json.is_some() || self.snapshot_json.is_some()
    }
}

fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = if verbose {
        EnvFilter::new(fallback)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn write_file(path: &Path, contents: String) -> Result<(), CliError> {
    fs::write(path, contents).map_err(|source| CliError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn run(args: &Args) -> Result<(), CliError> {
    let options = match &args.options {
        Some(path) => GenOptions::load_from_file(path)?,
        None => GenOptions::default(),
    };
    let params = args.params();
    debug!(seed = args.seed, depth = params.depth, style = ?params.style, "generating");

    let generated = if args.wants_trace() {
        generate_traced(args.seed, &params, &options)?
    } else {
        generate(args.seed, &params, &options)?
    };

    if let Some(path) = &args.trace_json {
        write_file(path, serde_json::to_string_pretty(&generated.trace)?)?;
    }
    if let Some(path) = &args.snapshot_json {
        let snapshot = LevelSnapshot::capture(&generated, &params, "nh-levelgen");
        write_file(path, snapshot.to_json()?)?;
    }

    print!("{}", generated.level.to_ascii());
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("nh-levelgen: {e}");
            ExitCode::FAILURE
        }
    }
}
