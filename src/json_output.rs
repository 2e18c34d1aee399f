//! JSON output format for analysis reports
//!
//! Wraps the report in a small envelope identifying the tool and schema
//! so downstream consumers can detect format drift.

use crate::report::AnalysisReport;
use anyhow::{Context, Result};
use serde::Serialize;

/// JSON document emitted for --format json
#[derive(Debug, Clone, Serialize)]
pub struct JsonReport<'a> {
    /// Always "recuento"
    pub tool: &'a str,
    /// Crate version that produced the document
    pub version: &'a str,
    #[serde(flatten)]
    pub report: &'a AnalysisReport,
}

/// Serialize a report as pretty-printed JSON
pub fn to_json(report: &AnalysisReport) -> Result<String> {
    let doc = JsonReport {
        tool: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        report,
    };
    serde_json::to_string_pretty(&doc).context("Failed to serialize analysis report")
}
