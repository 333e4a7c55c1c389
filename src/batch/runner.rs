//! Batch runner

use std::path::Path;

use crate::filter::{Filter, FilterRegistry};
use crate::inventory::{InventoryResult, InventoryTable, SourceLoader};
use crate::observability::Event;

use super::context::RunContext;
use super::errors::{BatchError, BatchResult};
use super::report::{BatchReport, FailureKind, FailurePolicy, SourceFailure};

/// Applies one filter across a list of sources.
pub struct BatchRunner<'a, L: SourceLoader> {
    loader: &'a L,
    context: &'a RunContext<'a>,
    policy: FailurePolicy,
}

impl<'a, L: SourceLoader> BatchRunner<'a, L> {
    pub fn new(loader: &'a L, context: &'a RunContext<'a>) -> Self {
        Self {
            loader,
            context,
            policy: FailurePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Resolves `name` in the registry, then runs the batch.
    ///
    /// An unknown name fails before any source is loaded.
    pub fn run_named<P: AsRef<Path>>(
        &self,
        registry: &FilterRegistry,
        name: &str,
        sources: &[P],
    ) -> BatchResult<BatchReport> {
        let filter = registry.resolve(name)?;
        self.run(filter, sources)
    }

    /// Runs `filter` over `sources` in order.
    ///
    /// # Errors
    ///
    /// Only unreadable or malformed sources end the batch. Evaluation
    /// failures are recorded in the report.
    pub fn run<P: AsRef<Path>>(&self, filter: &Filter, sources: &[P]) -> BatchResult<BatchReport> {
        let mut report = BatchReport::new(filter.name(), self.policy, sources.len());
        let total = sources.len().to_string();
        self.context.emit(
            Event::RunStart,
            &[("filter", filter.name()), ("sources", total.as_str())],
        );

        for source in sources {
            let table = self.loader.load(source.as_ref()).map_err(BatchError::from)?;
            let rows = table.len().to_string();
            self.context.emit(
                Event::SourceLoaded,
                &[("source", table.source()), ("rows", rows.as_str())],
            );

            match evaluate(filter, &table) {
                Ok(selected) => {
                    let matched = selected.len().to_string();
                    if selected.is_empty() {
                        self.context.emit(
                            Event::FilterNoMatches,
                            &[("filter", filter.name()), ("source", table.source())],
                        );
                    } else {
                        self.context.emit(
                            Event::FilterMatched,
                            &[
                                ("filter", filter.name()),
                                ("source", table.source()),
                                ("matched", matched.as_str()),
                            ],
                        );
                    }
                    report.record_evaluated(&table, selected);
                }
                Err(e) => {
                    let kind = FailureKind::from_error(&e)
                        .ok_or_else(|| BatchError::from(e.clone()))?;
                    let message = e.to_string();
                    self.context.emit(
                        Event::FilterFailed,
                        &[
                            ("filter", filter.name()),
                            ("source", table.source()),
                            ("kind", kind.as_str()),
                            ("error", message.as_str()),
                        ],
                    );
                    report.record_failure(SourceFailure {
                        source: table.source().to_string(),
                        filter: filter.name().to_string(),
                        kind,
                        message,
                    });

                    if self.policy == FailurePolicy::FailFast {
                        report.mark_stopped();
                        let skipped = report.skipped().to_string();
                        self.context
                            .emit(Event::BatchStopped, &[("skipped", skipped.as_str())]);
                        break;
                    }
                }
            }
        }

        Ok(report)
    }
}

/// Applies a filter to one table and returns the selected rows.
pub fn evaluate(filter: &Filter, table: &InventoryTable) -> InventoryResult<InventoryTable> {
    let mask = filter.apply(table)?;
    Ok(table.select(&mask))
}
