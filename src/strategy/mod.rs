//! Processing strategy module for reconciliation pipelines
//!
//! Defines the Strategy pattern over the complete batch pipeline: loading
//! the payments and statements CSVs, normalizing, running the matching
//! engine, and writing the report. Loading differs per strategy; the
//! matching passes themselves are always sequential and identical.

use crate::cli::StrategyType;
use crate::core::engine::MatchConfig;
use crate::core::{normalize, ReconEngine};
use crate::io::report_format::write_report_json;
use crate::types::{RawRecord, ReconciliationReport};
use std::io::Write;
use std::path::Path;

pub mod r#async;
pub mod sync;

pub use self::r#async::AsyncProcessingStrategy;
pub use sync::SyncProcessingStrategy;

/// Processing strategy trait for complete reconciliation pipelines
///
/// Each strategy reads both input files, runs the matching engine, and
/// writes the JSON report to `output`. The finished report is also returned
/// so callers can derive further artifacts (journal, summaries) without
/// re-parsing the output.
pub trait ProcessingStrategy: Send + Sync {
    /// Reconcile one batch from the two input files
    ///
    /// # Errors
    ///
    /// Returns an error if the batch id is empty, either input file cannot
    /// be opened, or the report cannot be written. Row-level CSV problems
    /// and field-level validation failures never abort the run; those rows
    /// are dropped with a warning and counted by the normalizer.
    fn process(
        &self,
        batch_id: &str,
        payments_path: &Path,
        statements_path: &Path,
        output: &mut dyn Write,
    ) -> Result<ReconciliationReport, String>;
}

/// Create a processing strategy based on the specified strategy type
///
/// Both strategies share the same `MatchConfig`; only file loading differs.
pub fn create_strategy(
    strategy_type: StrategyType,
    config: MatchConfig,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy::new(config)),
        StrategyType::Async => Box::new(AsyncProcessingStrategy::new(config)),
    }
}

/// Run the engine over loaded raw records and emit the report
///
/// Shared tail of both strategies: normalization, matching, and report
/// serialization behave identically regardless of how the files were read.
pub(crate) fn reconcile_and_report(
    batch_id: &str,
    raw_payments: Vec<RawRecord>,
    raw_statements: Vec<RawRecord>,
    config: MatchConfig,
    output: &mut dyn Write,
) -> Result<ReconciliationReport, String> {
    let payments = normalize(raw_payments, "payments");
    let statements = normalize(raw_statements, "statements");

    let engine = ReconEngine::with_config(config);
    let report = engine.reconcile(batch_id, payments.records, statements.records);

    write_report_json(&report, output).map_err(|e| format!("Failed to write report: {}", e))?;

    Ok(report)
}

pub(crate) fn validate_batch_id(batch_id: &str) -> Result<(), String> {
    if batch_id.trim().is_empty() {
        return Err(crate::types::ReconError::invalid_batch_id(batch_id).to_string());
    }
    Ok(())
}
