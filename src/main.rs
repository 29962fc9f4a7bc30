//! Reconciliation Engine CLI
//!
//! Command-line interface for reconciling payment instructions against bank
//! statement records.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- BATCH-001 payments.csv statements.csv > report.json
//! cargo run -- BATCH-001 payments.csv statements.csv --strategy sync
//! cargo run -- BATCH-001 payments.csv statements.csv --tolerance 0.02
//! cargo run -- BATCH-001 payments.csv statements.csv --output report.json --journal journal.csv
//! ```
//!
//! The program loads both CSV files using the selected strategy, runs the
//! matching engine, and writes the JSON report to stdout or the `--output`
//! path. With `--journal`, a Tally import CSV is also produced.
//!
//! Logging is controlled through `RUST_LOG` (e.g. `RUST_LOG=recon_engine=debug`).
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (missing arguments, file not found, write failure, etc.)

use recon_engine::cli;
use recon_engine::io::journal;
use recon_engine::strategy;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = cli::parse_args();

    let strategy = strategy::create_strategy(args.strategy, args.to_match_config());

    let report = {
        // Report goes to stdout unless --output redirects it
        let run = |output: &mut dyn std::io::Write| {
            strategy.process(&args.batch_id, &args.payments_file, &args.statements_file, output)
        };

        let result = match &args.output {
            Some(path) => match std::fs::File::create(path) {
                Ok(mut file) => run(&mut file),
                Err(e) => Err(format!("Failed to create '{}': {}", path.display(), e)),
            },
            None => run(&mut std::io::stdout()),
        };

        match result {
            Ok(report) => report,
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        }
    };

    if let Some(path) = &args.journal {
        if let Err(e) = journal::write_journal(&report, path) {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
