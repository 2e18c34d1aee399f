//! Aggregation engine
//!
//! The [`Analyzer`] owns all mutable analysis state: the candidate
//! registry, the operation log, the observed callee-name set, and the
//! per-call diagnostics. It is fed one source unit at a time and then
//! finalized into an immutable [`AnalysisReport`]; the acceptance rule
//! runs exactly once per candidate, after the last unit. Call sites are
//! processed strictly one at a time, so the classifier always reads a
//! stable, fully populated log.

use crate::classify::classify_callee;
use crate::facts::{CallFact, SourceUnitFacts};
use crate::filter::CategoryFilter;
use crate::heuristic;
use crate::ops::{Operation, OperationLog};
use crate::registry::CandidateRegistry;
use crate::report::{AnalysisReport, CandidateVerdict, Diagnostic};
use crate::resolve::{resolve_args, ValueOutcome};
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Accumulates analysis state across source units
#[derive(Debug, Default)]
pub struct Analyzer {
    registry: CandidateRegistry,
    log: OperationLog,
    observed_callees: BTreeSet<String>,
    diagnostics: Vec<Diagnostic>,
    units_processed: u64,
}

impl Analyzer {
    /// Create an analyzer tracking all five type categories
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an analyzer restricted to a category subset
    pub fn with_categories(categories: CategoryFilter) -> Self {
        Self {
            registry: CandidateRegistry::with_categories(categories),
            ..Self::default()
        }
    }

    /// Feed one source unit's facts through the pipeline
    ///
    /// Declarations register before calls so that a unit's own call sites
    /// can correlate against fields it declares.
    pub fn process_unit(&mut self, unit: &SourceUnitFacts) {
        debug!(unit = %unit.unit, "processing source unit");
        for decl in &unit.declarations {
            if let Some(field) = self.registry.register(decl) {
                debug!(field = %field.id, category = %field.category, "registered candidate");
            }
        }
        for call in &unit.calls {
            self.process_call(call);
        }
        self.units_processed += 1;
    }

    /// Turn one call site into at most one logged operation
    fn process_call(&mut self, call: &CallFact) {
        self.observed_callees.insert(call.callee.clone());

        let Some((kind, shape)) = classify_callee(&call.callee) else {
            debug!(
                callee = %call.callee,
                location = %call.location(),
                "callee outside the API vocabulary, ignored"
            );
            return;
        };

        let Some(resolved) = resolve_args(call, shape) else {
            debug!(
                callee = %call.callee,
                location = %call.location(),
                "reference argument does not reduce to a member access, ignored"
            );
            return;
        };

        if !self.registry.contains(&resolved.field) {
            debug!(
                field = %resolved.field,
                location = %call.location(),
                "referenced field is not a tracked candidate, ignored"
            );
            return;
        }

        let value = match resolved.value {
            ValueOutcome::NotRequired => None,
            ValueOutcome::Literal(value) => Some(value),
            ValueOutcome::Unresolved => {
                warn!(
                    callee = %call.callee,
                    location = %call.location(),
                    field = %resolved.field,
                    "value argument is not an integer literal, operation dropped"
                );
                self.diagnostics.push(Diagnostic {
                    file: call.file.clone(),
                    line: call.line,
                    callee: call.callee.clone(),
                    message: format!(
                        "value argument of {} is not an integer literal; operation dropped",
                        call.callee
                    ),
                });
                return;
            }
        };

        if let Some(op) = Operation::from_call(kind, value) {
            self.log.append(resolved.field, op);
        }
    }

    /// Finish the analysis: classify every candidate and hand off the
    /// report
    pub fn finalize(self) -> AnalysisReport {
        let candidates: Vec<CandidateVerdict> = self
            .registry
            .iter()
            .map(|field| {
                let ops = self.log.operations(&field.id);
                CandidateVerdict {
                    file: field.id.file.clone(),
                    line: field.id.line,
                    name: field.name.clone(),
                    category: field.category,
                    accepted: heuristic::accepts(ops),
                    operations: ops.to_vec(),
                }
            })
            .collect();

        AnalysisReport {
            units_processed: self.units_processed,
            candidates,
            category_totals: self.registry.category_totals(),
            observed_callees: self.observed_callees,
            diagnostics: self.diagnostics,
        }
    }
}
