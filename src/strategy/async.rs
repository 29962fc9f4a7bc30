//! Asynchronous processing strategy
//!
//! Loads the payments and statements files concurrently on a tokio runtime,
//! then runs the same strictly sequential matching passes as the sync
//! strategy. Concurrency ends at the load boundary; matching inside a batch
//! is never parallelized, so both strategies produce identical reports for
//! identical inputs.

use crate::core::engine::MatchConfig;
use crate::io::async_reader::AsyncReader;
use crate::strategy::{reconcile_and_report, validate_batch_id, ProcessingStrategy};
use crate::types::{RawRecord, ReconciliationReport};
use std::io::Write;
use std::path::Path;
use tokio_util::compat::TokioAsyncReadCompatExt;

/// Asynchronous processing strategy
///
/// The default strategy: both input files are usually fetched from network
/// storage, so overlapping the two reads roughly halves load time on large
/// batches.
#[derive(Debug, Clone)]
pub struct AsyncProcessingStrategy {
    config: MatchConfig,
}

impl AsyncProcessingStrategy {
    pub fn new(config: MatchConfig) -> Self {
        Self { config }
    }

    async fn load(path: &Path) -> Result<Vec<RawRecord>, String> {
        let file = tokio::fs::File::open(path)
            .await
            .map_err(|e| format!("Failed to open file '{}': {}", path.display(), e))?;

        let mut reader = AsyncReader::new(file.compat());
        Ok(reader.read_all().await)
    }
}

impl ProcessingStrategy for AsyncProcessingStrategy {
    fn process(
        &self,
        batch_id: &str,
        payments_path: &Path,
        statements_path: &Path,
        output: &mut dyn Write,
    ) -> Result<ReconciliationReport, String> {
        validate_batch_id(batch_id)?;

        metrics::counter!("recon_jobs_total", "status" => "started").increment(1);
        tracing::info!(batch_id, strategy = "async", "starting reconciliation");

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .map_err(|e| format!("Failed to create tokio runtime: {}", e))?;

        let result = runtime.block_on(async {
            let (raw_payments, raw_statements) =
                tokio::try_join!(Self::load(payments_path), Self::load(statements_path))?;

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
