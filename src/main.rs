use anyhow::{Context, Result};
use clap::Parser;
use recuento::cli::{Cli, OutputFormat};
use recuento::csv_output::CsvOutput;
use recuento::engine::Analyzer;
use recuento::facts::SourceUnitFacts;
use recuento::filter::{CategoryFilter, UnitFilter};
use recuento::json_output;
use recuento::report::AnalysisReport;
use recuento::seen::{DirSeenSet, MemorySeenSet, SeenSet};
use std::fs;
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for diagnostic output
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Write a per-declaration-file log under the log directory
fn write_file_logs(report: &AnalysisReport, dir: &Path) -> Result<()> {
    for file in report.declaration_files() {
        let sanitized: String = file
            .chars()
            .map(|c| if c == '/' || c == '\\' { '_' } else { c })
            .collect();
        let path = dir.join(format!("{}.log", sanitized));
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
        }
        fs::write(&path, report.render_file_log(file))
            .with_context(|| format!("Failed to write log file {}", path.display()))?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let categories = match &cli.categories {
        Some(spec) => CategoryFilter::from_spec(spec)?,
        None => CategoryFilter::all(),
    };
    let unit_filter = match &cli.include {
        Some(pattern) => Some(UnitFilter::from_pattern(pattern)?),
        None => None,
    };

    let mut seen: Box<dyn SeenSet> = match &cli.log_dir {
        Some(dir) => Box::new(DirSeenSet::new(dir)?),
        None => Box::new(MemorySeenSet::new()),
    };

    let mut analyzer = Analyzer::with_categories(categories);
    for path in &cli.facts_files {
        let units = SourceUnitFacts::load_file(path)?;
        for unit in &units {
            if let Some(filter) = &unit_filter {
                if !filter.matches(&unit.unit) {
                    tracing::debug!(unit = %unit.unit, "unit excluded by --include filter");
                    continue;
                }
            }
            if seen.check_and_mark(&unit.unit)? {
                tracing::debug!(unit = %unit.unit, "unit already processed, skipping");
                continue;
            }
            analyzer.process_unit(unit);
        }
    }

    let report = analyzer.finalize();

    if let Some(dir) = &cli.log_dir {
        write_file_logs(&report, dir)?;
    }

    match cli.format {
        OutputFormat::Text => print!("{}", report.render_text(cli.show_ops)),
        OutputFormat::Json => println!("{}", json_output::to_json(&report)?),
        OutputFormat::Csv => print!("{}", CsvOutput::new(cli.show_ops).to_csv(&report)),
    }

    Ok(())
}
