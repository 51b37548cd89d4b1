//! Convergence reporting: aggregates per-seed comparisons into human-readable
//! and machine-readable reports.

use serde::{Deserialize, Serialize};

use crate::diff::{CellDiff, Severity, StateDiff, TraceDivergence};

/// Summary of comparing a batch of seeds.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConvergenceReport {
    /// Descriptive label (e.g. "ordinary depth=5 seeds 1..100").
    pub label: String,
    pub seeds_compared: u64,
    /// Seeds whose draw logs and terrain both matched.
    pub seeds_converged: u64,
    /// Lowest call index any seed diverged at.
    pub earliest_divergence: Option<usize>,
    pub critical_count: u64,
    pub major_count: u64,
    pub minor_count: u64,
    pub cells_differing: u64,
    pub seed_entries: Vec<SeedEntry>,
}

/// Outcome for one seed that did not converge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedEntry {
    pub seed: u64,
    pub divergence: Option<TraceDivergence>,
    pub diffs: Vec<StateDiff>,
    pub cells_differing: usize,
}

impl ConvergenceReport {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    /// Record the comparison of one seed.
    pub fn add_seed(&mut self, seed: u64, divergence: Option<TraceDivergence>, diffs: Vec<StateDiff>, cells: &[CellDiff]) {
        self.seeds_compared += 1;
        self.cells_differing += cells.len() as u64;
        let critical = diffs.iter().any(|d| d.severity == Severity::Critical);
        if divergence.is_none() && cells.is_empty() && !critical {
            self.seeds_converged += 1;
        }
        if let Some(div) = &divergence {
            self.earliest_divergence = Some(match self.earliest_divergence {
                Some(i) => i.min(div.call_index),
                None => div.call_index,
            });
        }
        for d in &diffs {
            match d.severity {
                Severity::Critical => self.critical_count += 1,
                Severity::Major => self.major_count += 1,
                Severity::Minor => self.minor_count += 1,
            }
        }
        if divergence.is_some() || !diffs.is_empty() || !cells.is_empty() {
            self.seed_entries.push(SeedEntry {
                seed,
                divergence,
                diffs,
                cells_differing: cells.len(),
            });
        }
    }

    /// True when every compared seed converged.
    pub fn passed(&self) -> bool {
        self.seeds_converged == self.seeds_compared
    }

    /// Share of seeds that converged, in `0.0..=1.0`.
    pub fn convergence_rate(&self) -> f64 {
        if self.seeds_compared == 0 {
            return 1.0;
        }
        self.seeds_converged as f64 / self.seeds_compared as f64
    }

    /// Print a human-readable summary to stdout.
    pub fn print_summary(&self) {
        println!("\n============================================================");
        println!("Convergence Report: {}", self.label);
        println!("Result: {}", if self.passed() { "PASS" } else { "FAIL" });
        println!(
            "Seeds: {}/{} converged ({:.1}%)",
            self.seeds_converged,
            self.seeds_compared,
            self.convergence_rate() * 100.0
        );
        println!(
            "Diffs: {} critical, {} major, {} minor, {} cells",
            self.critical_count, self.major_count, self.minor_count, self.cells_differing
        );
        if let Some(i) = self.earliest_divergence {
            println!("Earliest draw divergence at call {i}");
        }

        let show = self.seed_entries.len().min(10);
        if show > 0 {
            println!("\nFirst {show} seeds with diffs:");
            for entry in &self.seed_entries[..show] {
                println!("  Seed {} ({} cells):", entry.seed, entry.cells_differing);
                if let Some(div) = &entry.divergence {
                    println!("    {}", div.description);
                }
                for d in &entry.diffs {
                    println!("    {d}");
                }
            }
            if self.seed_entries.len() > show {
                println!("  ... and {} more seeds with diffs", self.seed_entries.len() - show);
            }
        }
        println!("============================================================\n");
    }

    /// Serialize to JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn divergence(call_index: usize) -> TraceDivergence {
        TraceDivergence {
            call_index,
            kind: crate::diff::DivergenceKind::Result,
            call_site: String::new(),
            ours_context: Vec::new(),
            reference_context: Vec::new(),
            description: format!("result mismatch at call {call_index}"),
        }
    }

    #[test]
    fn test_report_counts() {
        let mut report = ConvergenceReport::new("unit");
        report.add_seed(1, None, Vec::new(), &[]);
        report.add_seed(2, Some(divergence(40)), Vec::new(), &[]);
        report.add_seed(
            3,
            Some(divergence(12)),
            vec![StateDiff {
                severity: Severity::Critical,
                field: "rooms.len".to_string(),
                ours: "6".to_string(),
                reference: "7".to_string(),
            }],
            &[CellDiff {
                x: 1,
                y: 1,
                ours: '.',
                reference: ' ',
            }],
        );

        assert_eq!(report.seeds_compared, 3);
        assert_eq!(report.seeds_converged, 1);
        assert_eq!(report.earliest_divergence, Some(12));
        assert_eq!(report.critical_count, 1);
        assert_eq!(report.cells_differing, 1);
        assert_eq!(report.seed_entries.len(), 2);
        assert!(!report.passed());
    }

    #[test]
    fn test_empty_report_passes() {
        let report = ConvergenceReport::new("empty");
        assert!(report.passed());
        assert_eq!(report.convergence_rate(), 1.0);
        assert!(report.to_json().contains("\"label\": \"empty\""));
    }
}
