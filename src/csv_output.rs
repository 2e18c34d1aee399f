//! CSV output format for analysis reports
//!
//! One row per candidate field, for spreadsheet analysis and machine
//! parsing.

use crate::report::AnalysisReport;

/// CSV output formatter
#[derive(Debug)]
pub struct CsvOutput {
    include_ops: bool,
}

impl CsvOutput {
    /// Create a CSV formatter; `include_ops` adds the history column
    pub fn new(include_ops: bool) -> Self {
        Self { include_ops }
    }

    /// Escape CSV field (handle commas, quotes, newlines)
    fn escape_field(field: &str) -> String {
        if field.contains(',') || field.contains('"') || field.contains('\n') {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }

    fn header(&self) -> String {
        let mut headers = vec!["file", "line", "name", "type", "ops", "verdict"];
        if self.include_ops {
            headers.push("history");
        }
        headers.join(",")
    }

    /// Generate CSV output for a report
    pub fn to_csv(&self, report: &AnalysisReport) -> String {
        let mut output = String::new();

        output.push_str(&self.header());
        output.push('\n');

        for candidate in &report.candidates {
            let mut fields = vec![
                Self::escape_field(&candidate.file),
                candidate.line.to_string(),
                Self::escape_field(&candidate.name),
                candidate.category.to_string(),
                candidate.operations.len().to_string(),
                if candidate.accepted { "refcount" } else { "rejected" }.to_string(),
            ];
            if self.include_ops {
                fields.push(Self::escape_field(&candidate.operations_summary()));
            }
            output.push_str(&fields.join(","));
            output.push('\n');
        }

        output
    }
}

impl Default for CsvOutput {
    fn default() -> Self {
        Self::new(false)
    }
}
