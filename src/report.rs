//! Final analysis report and text rendering
//!
//! The report is the immutable hand-off from the engine to the output
//! sinks: per-candidate verdicts with their operation histories, category
//! totals, the observed callee-name set, and warning diagnostics.

use crate::ops::Operation;
use crate::registry::TypeCategory;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Warning diagnostic for a dropped operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// File containing the offending call
    pub file: String,
    pub line: u32,
    pub callee: String,
    pub message: String,
}

/// Classification outcome for one candidate field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateVerdict {
    /// Declaration file (identity)
    pub file: String,
    /// Declaration line (identity)
    pub line: u32,
    /// Declared name (diagnostic only)
    pub name: String,
    pub category: TypeCategory,
    /// True when the history satisfies the acceptance rule
    pub accepted: bool,
    /// Contributing operation history, in discovery order
    pub operations: Vec<Operation>,
}

impl CandidateVerdict {
    /// "file:line" identity string
    pub fn location(&self) -> String {
        format!("{}:{}", self.file, self.line)
    }

    /// History rendered as "[set(1), delta(+1), ...]"
    pub fn operations_summary(&self) -> String {
        let ops: Vec<String> = self.operations.iter().map(Operation::to_string).collect();
        format!("[{}]", ops.join(", "))
    }
}

/// Complete analysis result over all processed source units
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Source units fed through the engine
    pub units_processed: u64,
    /// Candidates in declaration-location order
    pub candidates: Vec<CandidateVerdict>,
    /// Registered candidate counts per category
    pub category_totals: BTreeMap<TypeCategory, u64>,
    /// Every distinct callee name encountered, for coverage auditing
    pub observed_callees: BTreeSet<String>,
    /// Warnings for operations dropped as unresolvable
    pub diagnostics: Vec<Diagnostic>,
}

impl AnalysisReport {
    /// Number of candidates the heuristic accepted
    pub fn accepted_count(&self) -> usize {
        self.candidates.iter().filter(|c| c.accepted).count()
    }

    /// Distinct declaration files, for per-file log output
    pub fn declaration_files(&self) -> BTreeSet<&str> {
        self.candidates.iter().map(|c| c.file.as_str()).collect()
    }

    /// Render the summary table shown on stdout in text mode
    pub fn render_text(&self, show_ops: bool) -> String {
        let mut out = String::new();

        if self.candidates.is_empty() {
            out.push_str("No candidate fields found.\n");
        } else {
            out.push_str(&format!(
                "{:<40} {:<20} {:<14} {:>5} verdict\n",
                "location", "name", "type", "ops"
            ));
            out.push_str(&format!(
                "{} {} {} {} {}\n",
                "-".repeat(40),
                "-".repeat(20),
                "-".repeat(14),
                "-".repeat(5),
                "-".repeat(8)
            ));

            for candidate in &self.candidates {
                out.push_str(&format!(
                    "{:<40} {:<20} {:<14} {:>5} {}\n",
                    candidate.location(),
                    candidate.name,
                    candidate.category,
                    candidate.operations.len(),
                    if candidate.accepted { "refcount" } else { "rejected" }
                ));
                if show_ops && !candidate.operations.is_empty() {
                    out.push_str(&format!("    {}\n", candidate.operations_summary()));
                }
            }
        }

        out.push('\n');
        out.push_str(&self.render_category_totals());
        out.push_str(&format!(
            "\n{} candidates, {} accepted; {} units processed; {} callees observed; {} warnings\n",
            self.candidates.len(),
            self.accepted_count(),
            self.units_processed,
            self.observed_callees.len(),
            self.diagnostics.len()
        ));

        out
    }

    /// "atomic_t: N" lines for every category, in report order
    pub fn render_category_totals(&self) -> String {
        let mut out = String::new();
        for category in TypeCategory::ALL {
            let count = self.category_totals.get(&category).copied().unwrap_or(0);
            out.push_str(&format!("{}: {}\n", category, count));
        }
        out
    }

    /// Render the per-declaration-file log written under --log-dir
    ///
    /// Lists every candidate declared in `file` with its verdict and
    /// history, followed by the file's category counts.
    pub fn render_file_log(&self, file: &str) -> String {
        let mut out = String::new();
        let mut counts: BTreeMap<TypeCategory, u64> = BTreeMap::new();

        for candidate in self.candidates.iter().filter(|c| c.file == file) {
            *counts.entry(candidate.category).or_insert(0) += 1;
            out.push_str(&format!(
                "{:<10} Name: {:<20} Type: {:<14} {} {}\n",
                candidate.line,
                candidate.name,
                candidate.category,
                if candidate.accepted { "refcount" } else { "rejected" },
                candidate.operations_summary()
            ));
        }

        for category in TypeCategory::ALL {
            let count = counts.get(&category).copied().unwrap_or(0);
            out.push_str(&format!("{}: {}\n", category, count));
        }

        out
    }
}
