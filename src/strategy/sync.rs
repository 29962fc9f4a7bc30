//! Synchronous processing strategy
//!
//! Single-threaded implementation of the ProcessingStrategy trait. Streams
//! both CSV files through `SyncReader` one after the other, then hands the
//! loaded batch to the shared engine tail.

use crate::core::engine::MatchConfig;
use crate::io::sync_reader::SyncReader;
use crate::strategy::{reconcile_and_report, validate_batch_id, ProcessingStrategy};
use crate::types::{RawRecord, ReconciliationReport};
use std::io::Write;
use std::path::Path;

/// Synchronous processing strategy
///
/// Reads the payments file to completion, then the statements file, then
/// runs the engine. Suited to small batches and environments without an
/// async runtime.
#[derive(Debug, Clone)]
pub struct SyncProcessingStrategy {
    config: MatchConfig,
}

impl SyncProcessingStrategy {
    pub fn new(config: MatchConfig) -> Self {
        Self { config }
    }

    fn load(path: &Path) -> Result<Vec<RawRecord>, String> {
        Ok(SyncReader::new(path)?.read_all())
    }
}

impl ProcessingStrategy for SyncProcessingStrategy {
    fn process(
        &self,
        batch_id: &str,
        payments_path: &Path,
        statements_path: &Path,
        output: &mut dyn Write,
    ) -> Result<ReconciliationReport, String> {
        validate_batch_id(batch_id)?;

        metrics::counter!("recon_jobs_total", "status" => "started").increment(1);
        tracing::info!(batch_id, strategy = "sync", "starting reconciliation");

        let result = Self::load(payments_path)
            .and_then(|raw_payments| {
                let raw_statements = Self::load(statements_path)?;
                reconcile_and_report(
                    batch_id,
                    raw_payments,
                    raw_statements,
                    self.config.clone(),
                    output,
                )
            });

        match &result {
            Ok(_) => metrics::counter!("recon_jobs_total", "status" => "completed").increment(1),
            Err(e) => {
                metrics::counter!("recon_jobs_total", "status" => "failed").increment(1);
                tracing::error!(batch_id, error = %e, "reconciliation failed");
            }
        }

        result
    }
}
