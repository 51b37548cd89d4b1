//! Level snapshots for comparing two generators.
//!
//! A snapshot is a normalized view of a generated level that survives a
//! JSON round trip, so a reference run can be recorded once and replayed
//! against later builds.

use nh_dungeon::{COLNO, GeneratedLevel, LevelParams, LevelStyle, ROWNO};
use nh_rng::RngTraceEntry;
use serde::{Deserialize, Serialize};

/// Everything about a level that parity checks look at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelSnapshot {
    pub seed: u64,
    pub depth: i32,
    /// "ordinary", "maze" or the script name
    pub style: String,
    /// One string per map row, one glyph per column
    pub terrain: Vec<String>,
    pub rooms: Vec<RoomSnapshot>,
    pub doors: Vec<DoorSnapshot>,
    pub traps: Vec<TrapSnapshot>,
    pub stairs: Vec<StairSnapshot>,
    /// Draw log; empty when the run was not traced
    pub trace: Vec<RngTraceEntry>,
    /// Source identifier ("ours" or "reference")
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSnapshot {
    pub lx: usize,
    pub ly: usize,
    pub hx: usize,
    pub hy: usize,
    pub rtype: String,
    pub lit: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoorSnapshot {
    pub x: usize,
    pub y: usize,
    /// Raw door-state bits
    pub state: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrapSnapshot {
    pub x: usize,
    pub y: usize,
    pub kind: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StairSnapshot {
    pub x: usize,
    pub y: usize,
    pub up: bool,
}

pub fn style_name(style: LevelStyle) -> String {
    match style {
        LevelStyle::Ordinary => "ordinary".to_string(),
        LevelStyle::Maze => "maze".to_string(),
        LevelStyle::Scripted(level) => level.name().to_string(),
    }
}

impl LevelSnapshot {
    /// Snapshot a finished generation run.
    pub fn capture(generated: &GeneratedLevel, params: &LevelParams, source: &str) -> Self {
        let level = &generated.level;
        let terrain = (0..ROWNO)
            .map(|y| (0..COLNO).map(|x| level.cell(x, y).glyph()).collect())
            .collect();
        let rooms = level
            .rooms
            .iter()
            .map(|r| RoomSnapshot {
                lx: r.lx,
                ly: r.ly,
                hx: r.hx,
                hy: r.hy,
                rtype: r.rtype.script_name().to_string(),
                lit: r.lit,
            })
            .collect();
        let doors = level
            .doors
            .iter()
            .map(|d| DoorSnapshot {
                x: d.x,
                y: d.y,
                state: d.state.bits(),
            })
            .collect();
        let traps = level
            .traps
            .iter()
            .map(|t| TrapSnapshot {
                x: t.x,
                y: t.y,
                kind: t.kind.script_name().to_string(),
            })
            .collect();
        let stairs = level
            .upstair
            .iter()
            .chain(level.downstair.iter())
            .map(|s| StairSnapshot { x: s.x, y: s.y, up: s.up })
            .collect();

        Self {
            seed: generated.seed,
            depth: params.depth,
            style: style_name(params.style),
            terrain,
            rooms,
            doors,
            traps,
            stairs,
            trace: generated.trace.clone(),
            source: source.to_string(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use nh_dungeon::{GenOptions, generate_traced};

    use super::*;

    #[test]
    fn test_capture_ordinary_level() {
        let params = LevelParams::ordinary(2);
        let generated = generate_traced(8, &params, &GenOptions::default()).unwrap();
        let snap = LevelSnapshot::capture(&generated, &params, "ours");

        assert_eq!(snap.terrain.len(), ROWNO);
        assert!(snap.terrain.iter().all(|row| row.chars().count() == COLNO));
        assert_eq!(snap.rooms.len(), generated.level.rooms.len());
        assert_eq!(snap.stairs.len(), 2);
        assert_eq!(snap.style, "ordinary");
        assert!(!snap.trace.is_empty());

        let back = LevelSnapshot::from_json(&snap.to_json().unwrap()).unwrap();
        assert_eq!(back, snap);
    }
}
