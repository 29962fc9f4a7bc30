use crate::core::engine::MatchConfig;
use clap::{Parser, ValueEnum};
use rust_decimal::Decimal;
use std::path::PathBuf;

/// Reconcile payment instructions against bank statements
#[derive(Parser, Debug)]
#[command(name = "recon-engine")]
#[command(about = "Reconcile payment instructions against bank statement records", long_about = None)]
pub struct CliArgs {
    /// Batch identifier stamped on the report and journal
    #[arg(value_name = "BATCH_ID", help = "Batch identifier for this reconciliation run")]
    pub batch_id: String,

    /// Payments CSV file
    #[arg(value_name = "PAYMENTS", help = "Path to the payments CSV file")]
    pub payments_file: PathBuf,

    /// Bank statements CSV file
    #[arg(value_name = "STATEMENTS", help = "Path to the bank statements CSV file")]
    pub statements_file: PathBuf,

    /// Loading strategy for the two input files
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "async",
        help = "Loading strategy: 'sync' for sequential reads or 'async' for concurrent reads"
    )]
    pub strategy: StrategyType,

    /// Fuzzy match tolerance override
    #[arg(
        long = "tolerance",
        value_name = "FRACTION",
        help = "Fuzzy amount tolerance as a fraction (default: 0.01, range: (0, 1))"
    )]
    pub tolerance: Option<Decimal>,

    /// Report output file (stdout when omitted)
    #[arg(
        long = "output",
        value_name = "FILE",
        help = "Write the JSON report to this file instead of stdout"
    )]
    pub output: Option<PathBuf>,

    /// Journal output file
    #[arg(
        long = "journal",
        value_name = "FILE",
        help = "Also write a Tally journal CSV to this file"
    )]
    pub journal: Option<PathBuf>,
}

/// Available loading strategies
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

impl CliArgs {
    /// Create a MatchConfig from CLI arguments
    ///
    /// An out-of-range tolerance falls back to the default with a warning
    /// rather than aborting the run.
    pub fn to_match_config(&self) -> MatchConfig {
        match self.tolerance {
            Some(tolerance) => MatchConfig::with_tolerance(tolerance),
            None => MatchConfig::default(),
        }
    }
}
