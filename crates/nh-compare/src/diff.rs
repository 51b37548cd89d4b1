//! Snapshot diffing and draw-log comparison.
//!
//! Compares two `LevelSnapshot`s field by field into `StateDiff`s with a
//! severity, finds the first divergent draw between two logs, and lists
//! terrain cells that differ.

use nh_rng::RngTraceEntry;
use serde::{Deserialize, Serialize};

use crate::snapshot::LevelSnapshot;

/// How important a difference is for convergence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Minor,
    Major,
    Critical,
}

impl core::fmt::Display for Severity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Severity::Minor => write!(f, "MINOR"),
            Severity::Major => write!(f, "MAJOR"),
            Severity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// A single difference between two snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateDiff {
    pub severity: Severity,
    pub field: String,
    pub ours: String,
    pub reference: String,
}

impl core::fmt::Display for StateDiff {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "[{}] {}: ours={}, reference={}", self.severity, self.field, self.ours, self.reference)
    }
}

/// Compare two level snapshots and return all differences. Terrain and
/// draw logs are summarized here; use [`diff_terrain`] and
/// [`compare_rng_traces`] for the detail.
pub fn diff_snapshots(ours: &LevelSnapshot, reference: &LevelSnapshot) -> Vec<StateDiff> {
    let mut diffs = Vec::new();

    diff_field(&mut diffs, Severity::Critical, "rooms.len", ours.rooms.len(), reference.rooms.len());
    diff_field(&mut diffs, Severity::Critical, "doors.len", ours.doors.len(), reference.doors.len());
    let terrain = diff_terrain(&ours.terrain, &reference.terrain);
    diff_field(&mut diffs, Severity::Critical, "terrain.cells_differing", terrain.len(), 0);

    for (i, (a, b)) in ours.rooms.iter().zip(&reference.rooms).enumerate() {
        if (a.lx, a.ly, a.hx, a.hy) != (b.lx, b.ly, b.hx, b.hy) {
            diffs.push(StateDiff {
                severity: Severity::Major,
                field: format!("rooms[{i}].bounds"),
                ours: format!("({},{})-({},{})", a.lx, a.ly, a.hx, a.hy),
                reference: format!("({},{})-({},{})", b.lx, b.ly, b.hx, b.hy),
            });
        }
        diff_field(&mut diffs, Severity::Minor, &format!("rooms[{i}].rtype"), &a.rtype, &b.rtype);
        diff_field(&mut diffs, Severity::Minor, &format!("rooms[{i}].lit"), a.lit, b.lit);
    }

    for (i, (a, b)) in ours.doors.iter().zip(&reference.doors).enumerate() {
        if (a.x, a.y) != (b.x, b.y) {
            diffs.push(StateDiff {
                severity: Severity::Major,
                field: format!("doors[{i}].pos"),
                ours: format!("({},{})", a.x, a.y),
                reference: format!("({},{})", b.x, b.y),
            });
        }
        diff_field(&mut diffs, Severity::Minor, &format!("doors[{i}].state"), a.state, b.state);
    }

    diff_field(&mut diffs, Severity::Major, "traps.len", ours.traps.len(), reference.traps.len());
    let stairs = |s: &LevelSnapshot| {
        s.stairs
            .iter()
            .map(|st| format!("{}({},{})", if st.up { '<' } else { '>' }, st.x, st.y))
            .collect::<Vec<_>>()
            .join(" ")
    };
    diff_field(&mut diffs, Severity::Major, "stairs", stairs(ours), stairs(reference));

    diffs
}

fn diff_field<T: PartialEq + core::fmt::Display>(diffs: &mut Vec<StateDiff>, severity: Severity, field: &str, ours: T, reference: T) {
    if ours != reference {
        diffs.push(StateDiff {
            severity,
            field: field.to_string(),
            ours: ours.to_string(),
            reference: reference.to_string(),
        });
    }
}

/// One terrain cell that differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellDiff {
    pub x: usize,
    pub y: usize,
    pub ours: char,
    pub reference: char,
}

/// Cell-by-cell terrain comparison. Missing rows or columns compare as
/// stone (`' '`).
pub fn diff_terrain(ours: &[String], reference: &[String]) -> Vec<CellDiff> {
    let rows = ours.len().max(reference.len());
    let mut out = Vec::new();
    for y in 0..rows {
        let a: Vec<char> = ours.get(y).map(|r| r.chars().collect()).unwrap_or_default();
        let b: Vec<char> = reference.get(y).map(|r| r.chars().collect()).unwrap_or_default();
        for x in 0..a.len().max(b.len()) {
            let oc = a.get(x).copied().unwrap_or(' ');
            let rc = b.get(x).copied().unwrap_or(' ');
            if oc != rc {
                out.push(CellDiff {
                    x,
                    y,
                    ours: oc,
                    reference: rc,
                });
            }
        }
    }
    out
}

/// How two draw logs first disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DivergenceKind {
    Function,
    Arguments,
    Result,
    /// One log ran out first
    Length,
}

impl DivergenceKind {
    fn between(ours: &RngTraceEntry, reference: &RngTraceEntry) -> Self {
        if ours.func != reference.func {
            DivergenceKind::Function
        } else if ours.args != reference.args {
            DivergenceKind::Arguments
        } else {
            DivergenceKind::Result
        }
    }
}

impl core::fmt::Display for DivergenceKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DivergenceKind::Function => write!(f, "function"),
            DivergenceKind::Arguments => write!(f, "argument"),
            DivergenceKind::Result => write!(f, "result"),
            DivergenceKind::Length => write!(f, "length"),
        }
    }
}

/// Most draws kept from the diverging call site.
const SITE_CONTEXT: usize = 8;

/// Point where two draw logs part ways.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceDivergence {
    pub call_index: usize,
    pub kind: DivergenceKind,
    /// Our call site for the diverging draw, or for our last draw when
    /// our log is the one that ran out
    pub call_site: String,
    /// The unbroken run of our draws from `call_site` that ends at the
    /// divergence
    pub ours_context: Vec<RngTraceEntry>,
    /// Reference draws at the same call indices
    pub reference_context: Vec<RngTraceEntry>,
    pub description: String,
}

fn show(entry: Option<&RngTraceEntry>) -> String {
    match entry {
        Some(e) => format!("{}({}) = {}", e.func, e.args, e.result),
        None => "nothing".to_string(),
    }
}

/// First index of the run of draws sharing `log[at]`'s call site.
fn site_run_start(log: &[RngTraceEntry], at: usize) -> usize {
    let Some(site) = log.get(at).map(|e| e.call_site.as_str()) else {
        return at;
    };
    let floor = at.saturating_sub(SITE_CONTEXT - 1);
    (floor..at)
        .rev()
        .take_while(|&i| log[i].call_site == site)
        .last()
        .unwrap_or(at)
}

/// Compare two draw logs on `(func, args, result)` and find the first
/// point of divergence. Call sites are informational and never compared;
/// ours are used to group the context around the divergence.
///
/// Returns `None` if the logs match over their whole length.
pub fn compare_rng_traces(ours: &[RngTraceEntry], reference: &[RngTraceEntry]) -> Option<TraceDivergence> {
    let first = ours.iter().zip(reference).position(|(o, r)| o.key() != r.key());
    let (call_index, kind) = match first {
        Some(i) => (i, DivergenceKind::between(&ours[i], &reference[i])),
        None if ours.len() != reference.len() => (ours.len().min(reference.len()), DivergenceKind::Length),
        None => return None,
    };

    let anchor = call_index.min(ours.len().saturating_sub(1));
    let call_site = ours.get(anchor).map(|e| e.call_site.clone()).unwrap_or_default();
    let from = site_run_start(ours, anchor);
    let window = |log: &[RngTraceEntry]| log[from.min(log.len())..(call_index + 1).min(log.len())].to_vec();

    let description = match kind {
        DivergenceKind::Length => format!(
            "log length mismatch after call {call_index}: ours={} calls, reference={} calls (last site {call_site})",
            ours.len(),
            reference.len()
        ),
        _ => format!(
            "{kind} mismatch at call {call_index} from {call_site}: ours {}, reference {}",
            show(ours.get(call_index)),
            show(reference.get(call_index))
        ),
    };

    Some(TraceDivergence {
        call_index,
        kind,
        call_site,
        ours_context: window(ours),
        reference_context: window(reference),
        description,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{DoorSnapshot, RoomSnapshot};

    fn entry(func: &str, args: &str, result: i32, site: &str) -> RngTraceEntry {
        RngTraceEntry {
            seq: 0,
            func: func.to_string(),
            args: args.to_string(),
            result,
            call_site: site.to_string(),
        }
    }

    fn empty_snapshot() -> LevelSnapshot {
        LevelSnapshot {
            seed: 1,
            depth: 1,
            style: "ordinary".to_string(),
            terrain: vec!["  --- ".to_string(), "  |.| ".to_string()],
            rooms: vec![RoomSnapshot {
                lx: 3,
                ly: 1,
                hx: 3,
                hy: 1,
                rtype: "ordinary".to_string(),
                lit: true,
            }],
            doors: vec![DoorSnapshot { x: 2, y: 1, state: 0 }],
            traps: Vec::new(),
            stairs: Vec::new(),
            trace: Vec::new(),
            source: "ours".to_string(),
        }
    }

    #[test]
    fn test_identical_snapshots_no_diffs() {
        let s = empty_snapshot();
        assert!(diff_snapshots(&s, &s.clone()).is_empty());
    }

    #[test]
    fn test_room_count_diff_is_critical() {
        let a = empty_snapshot();
        let mut b = a.clone();
        b.rooms.clear();
        let diffs = diff_snapshots(&a, &b);
        assert_eq!(diffs[0].severity, Severity::Critical);
        assert_eq!(diffs[0].field, "rooms.len");
    }

    #[test]
    fn test_terrain_diff_positions() {
        let ours = vec!["--.".to_string(), "|.|".to_string()];
        let reference = vec!["---".to_string(), "|.".to_string()];
        let diffs = diff_terrain(&ours, &reference);
        assert_eq!(
            diffs,
            vec![
                CellDiff {
                    x: 2,
                    y: 0,
                    ours: '.',
                    reference: '-'
                },
                CellDiff {
                    x: 2,
                    y: 1,
                    ours: '|',
                    reference: ' '
                },
            ]
        );
    }

    #[test]
    fn test_rng_trace_match_ignores_call_sites() {
        let a = vec![entry("rn2", "10", 3, "a.rs:1"), entry("rnd", "6", 2, "a.rs:2")];
        let b = vec![entry("rn2", "10", 3, "mklev.c:100"), entry("rnd", "6", 2, "mklev.c:101")];
        assert!(compare_rng_traces(&a, &b).is_none());
    }

    #[test]
    fn test_rng_trace_divergence() {
        let a = vec![entry("rn2", "10", 3, "x"), entry("rn2", "77", 5, "x")];
        let b = vec![entry("rn2", "10", 3, "x"), entry("rn2", "77", 9, "x")];
        let div = compare_rng_traces(&a, &b).unwrap();
        assert_eq!(div.call_index, 1);
        assert_eq!(div.kind, DivergenceKind::Result);
        assert!(div.description.starts_with("result mismatch"));
        assert_eq!(div.ours_context.len(), 2);
    }

    #[test]
    fn test_rng_trace_context_follows_call_site() {
        let a = vec![
            entry("rnd", "2", 1, "placement.rs:36"),
            entry("rn2", "77", 16, "placement.rs:36"),
            entry("rn2", "12", 8, "placement.rs:88"),
            entry("rn2", "4", 1, "placement.rs:88"),
            entry("rn2", "65", 24, "placement.rs:88"),
        ];
        let mut b = a.clone();
        b[4].args = "66".to_string();
        let div = compare_rng_traces(&a, &b).unwrap();
        assert_eq!(div.kind, DivergenceKind::Arguments);
        assert_eq!(div.call_site, "placement.rs:88");
        assert_eq!(div.ours_context, a[2..].to_vec());
        assert_eq!(div.reference_context, b[2..].to_vec());
        assert!(div.description.contains("rn2(65) = 24"));
    }

    #[test]
    fn test_rng_trace_context_is_capped() {
        let a: Vec<_> = (0..20).map(|i| entry("rn2", "100", i, "dig.rs:9")).collect();
        let mut b = a.clone();
        b[15].func = "rnd".to_string();
        let div = compare_rng_traces(&a, &b).unwrap();
        assert_eq!(div.kind, DivergenceKind::Function);
        assert_eq!(div.ours_context.len(), SITE_CONTEXT);
        assert_eq!(div.ours_context.last(), Some(&a[15]));
    }

    #[test]
    fn test_rng_trace_length_mismatch() {
        let a = vec![entry("rn2", "10", 3, "x")];
        let div = compare_rng_traces(&a, &[]).unwrap();
        assert_eq!(div.call_index, 0);
        assert_eq!(div.kind, DivergenceKind::Length);
        assert!(div.description.contains("length"));
        assert_eq!(div.ours_context, a);
        assert!(div.reference_context.is_empty());

        let short = vec![entry("rn2", "10", 3, "a.rs:1"), entry("rnd", "4", 2, "b.rs:2")];
        let long = vec![short[0].clone(), short[1].clone(), entry("rnd", "4", 1, "b.rs:2")];
        let div = compare_rng_traces(&short, &long).unwrap();
        assert_eq!(div.call_index, 2);
        assert_eq!(div.call_site, "b.rs:2");
        assert_eq!(div.ours_context, short[1..].to_vec());
        assert_eq!(div.reference_context, long[1..].to_vec());
    }
}
