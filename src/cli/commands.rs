//! CLI command implementations
//!
//! A run is: resolve the filter (no I/O), load config, run the batch,
//! write the aggregated table, optionally write issue drafts. The table is
//! written even when sources failed, before the failure is turned into a
//! nonzero exit.

use std::io::{self, Write};

use uuid::Uuid;

use crate::aggregate::{AggregateTable, OutputTarget};
use crate::batch::{BatchRunner, FailurePolicy, RunContext, SourceFailure};
use crate::filter::FilterRegistry;
use crate::inventory::FileSourceLoader;
use crate::issues;
use crate::observability::{Event, EventSink, StderrSink};

use super::args::Cli;
use super::config::AuditConfig;
use super::errors::{CliError, CliResult};

/// What a successful run produced
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub filter: String,
    pub matched_rows: usize,
    pub evaluated_sources: usize,
    pub failures: Vec<SourceFailure>,
    pub issues_written: usize,
}

/// Main CLI entry point
///
/// Parses arguments and dispatches. This is the only function that main.rs
/// should call.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();

    if cli.list_filters {
        return list_filters(&FilterRegistry::builtin(), &mut io::stdout().lock());
    }

    let sink = StderrSink::verbose(cli.verbose);
    execute(&cli, &sink).map(|_| ())
}

/// Print filter names and descriptions, one per line
pub fn list_filters<W: Write>(registry: &FilterRegistry, out: &mut W) -> CliResult<()> {
    let width = registry.names().iter().map(|n| n.len()).max().unwrap_or(0);
    for filter in registry.filters() {
        writeln!(out, "{:<width$}  {}", filter.name(), filter.description(), width = width)?;
    }
    out.flush()?;
    Ok(())
}

/// Execute one audit run.
///
/// # Errors
///
/// - unknown filter (before any I/O)
/// - unreadable config, source or output
/// - every source failed, or any failed under fail-fast; the output is
///   written first
pub fn execute(cli: &Cli, sink: &dyn EventSink) -> CliResult<RunSummary> {
    let registry = FilterRegistry::builtin();
    let name = cli
        .filter
        .as_deref()
        .ok_or_else(|| CliError::config_error("No filter given"))?;
    let filter = registry.resolve(name)?;

    let mut config = match &cli.config {
        Some(path) => AuditConfig::load(path)?,
        None => AuditConfig::default(),
    };
    if cli.fail_fast {
        config.fail_fast = true;
    }

    let ctx = RunContext::new(sink);
    if let Some(path) = &cli.config {
        let path = path.display().to_string();
        ctx.emit(Event::ConfigLoaded, &[("path", path.as_str())]);
    }

    let loader = FileSourceLoader::new(config.read_options());
    let runner = BatchRunner::new(&loader, &ctx).with_policy(config.failure_policy());
    let report = runner.run(filter, &cli.input).map_err(|e| {
        let message = e.to_string();
        ctx.emit(Event::RunFailed, &[("error", message.as_str())]);
        CliError::from(e)
    })?;

    let table = AggregateTable::from_report(&report, filter.columns());
    let target = OutputTarget::from_arg(cli.output.clone());
    target.write(&table, &config.write_options()).map_err(|e| {
        let message = e.to_string();
        ctx.emit(Event::RunFailed, &[("error", message.as_str())]);
        CliError::from(e)
    })?;

    let target_name = target.display_name();
    let rows = table.len().to_string();
    ctx.emit(
        Event::OutputWritten,
        &[("target", target_name.as_str()), ("rows", rows.as_str())],
    );

    let mut issues_written = 0;
    if cli.post_to_github && !report.failures().is_empty() {
        let drafts = issues::drafts_for(report.failures(), &config.issue_labels);
        issues::emit_drafts(&drafts, cli.issues_out.as_deref()).map_err(|e| {
            CliError::io_error(format!("Failed to write issue drafts: {}", e))
        })?;
        issues_written = drafts.len();
        let count = issues_written.to_string();
        ctx.emit(Event::IssuesWritten, &[("count", count.as_str())]);
    }

    let failed = report.failures().len().to_string();
    let evaluated = report.evaluated().len().to_string();
    ctx.emit(
        Event::RunComplete,
        &[
            ("filter", filter.name()),
            ("evaluated", evaluated.as_str()),
            ("failed", failed.as_str()),
            ("rows", rows.as_str()),
        ],
    );

    if !report.is_success() {
        let sources: Vec<&str> = report.failures().iter().map(|f| f.source.as_str()).collect();
        let message = match report.policy() {
            FailurePolicy::CollectAll => format!(
                "Filter {} failed on every source: {}",
                filter.name(),
                sources.join(", ")
            ),
            FailurePolicy::FailFast => format!(
                "Filter {} failed on {}",
                filter.name(),
                sources.join(", ")
            ),
        };
        return Err(CliError::sources_failed(message));
    }

    Ok(RunSummary {
        run_id: ctx.run_id(),
        filter: filter.name().to_string(),
        matched_rows: table.len(),
        evaluated_sources: report.evaluated().len(),
        failures: report.failures().to_vec(),
        issues_written,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_filters() {
        let mut out = Vec::new();
        list_filters(&FilterRegistry::builtin(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(text.lines().count(), 9);
        assert!(text.starts_with("probably_not_missing_but_unmarked"));
        assert!(text.contains("empty_and_not_ignored"));
        assert!(text.contains("no content, not excluded"));
    }
}
