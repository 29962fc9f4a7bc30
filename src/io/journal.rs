//! Tally journal generation
//!
//! Renders a finished `ReconciliationReport` as a Tally v1 import CSV and
//! hashes the bytes for the audit trail. Every matched pair becomes a
//! balanced debit/credit voucher pair; every exception becomes a suspense
//! voucher pair; one summary row closes the file.
//!
//! Voucher numbering: `PAY-<paymentId>` for matches, `EXC-<transactionId>`
//! for exceptions, `SUMMARY-<batchId>` for the trailer.

use crate::types::ReconciliationReport;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Tally v1 import header
const TALLY_HEADER: [&str; 8] = [
    "Voucher Type Name",
    "Date",
    "Voucher Number",
    "Account Name",
    "Debit",
    "Credit",
    "Narration",
    "Reference",
];

const VOUCHER_TYPE: &str = "Payment";

/// A generated journal with its content hash
///
/// The hash covers the exact CSV bytes, so re-hashing the written file
/// must reproduce `sha256`.
#[derive(Debug, Clone)]
pub struct JournalArtifact {
    /// Full CSV content, header included
    pub csv: String,
    /// Lowercase SHA-256 hex digest of `csv`
    pub sha256: String,
    /// Voucher rows written, excluding header and summary trailer
    pub entries: usize,
}

/// Generate the Tally journal for one report
///
/// Infallible by construction: writing CSV into an in-memory buffer cannot
/// fail and every field is already validated upstream.
pub fn generate_journal(report: &ReconciliationReport) -> JournalArtifact {
    let mut writer = csv::Writer::from_writer(Vec::new());
    let mut entries = 0usize;

    // Header row is data to Tally, not a CSV header, but the csv crate
    // writes it the same way either way.
    write_row(&mut writer, TALLY_HEADER.map(String::from));

    for m in &report.matched {
        let date = tally_date(m.payment_data.timestamp, report.timestamp);
        let voucher = format!("PAY-{}", m.payment_id);

        write_row(
            &mut writer,
            [
                VOUCHER_TYPE.to_string(),
                date.clone(),
                voucher.clone(),
                format!("Bank Account - {}", m.payment_data.from_account),
                m.amount.to_string(),
                Decimal::ZERO.to_string(),
                format!(
                    "Payment to {} via {}",
                    m.payment_data.to_account, m.payment_data.payment_method
                ),
                m.payment_id.clone(),
            ],
        );
        write_row(
            &mut writer,
            [
                VOUCHER_TYPE.to_string(),
                date,
                voucher,
                format!("Bank Account - {}", m.payment_data.to_account),
                Decimal::ZERO.to_string(),
                m.amount.to_string(),
                format!(
                    "Payment from {} via {}",
                    m.payment_data.from_account, m.payment_data.payment_method
                ),
                m.statement_id.clone(),
            ],
        );
        entries += 2;
    }

    for exception in &report.exceptions {
        let date = tally_date(exception.timestamp, report.timestamp);
        let voucher = format!("EXC-{}", exception.transaction_id);
        let narration = format!("Unmatched payment - {}", exception.exception_reason);

        write_row(
            &mut writer,
            [
                VOUCHER_TYPE.to_string(),
                date.clone(),
                voucher.clone(),
                "Suspense Account".to_string(),
                exception.amount.to_string(),
                Decimal::ZERO.to_string(),
                narration.clone(),
                exception.transaction_id.clone(),
            ],
        );
        write_row(
            &mut writer,
            [
                VOUCHER_TYPE.to_string(),
                date,
                voucher,
                format!("Bank Account - {}", exception.from_account),
                Decimal::ZERO.to_string(),
                exception.amount.to_string(),
                narration,
                exception.transaction_id.clone(),
            ],
        );
        entries += 2;
    }

    write_row(
        &mut writer,
        [
            VOUCHER_TYPE.to_string(),
            report.timestamp.format("%d-%m-%Y").to_string(),
            format!("SUMMARY-{}", report.batch_id),
            "Reconciliation Summary".to_string(),
            Decimal::ZERO.to_string(),
            Decimal::ZERO.to_string(),
            format!(
                "Total: {}, Matched: {}, Unmatched: {}",
                report.summary.total_payments,
                report.summary.matched_count,
                report.summary.unmatched_count
            ),
            report.batch_id.clone(),
        ],
    );

    let bytes = writer
        .into_inner()
        .unwrap_or_default();
    let csv = String::from_utf8_lossy(&bytes).into_owned();
    let sha256 = hex::encode(Sha256::digest(csv.as_bytes()));

    metrics::counter!("journal_entries_generated_total").increment(entries as u64);
    tracing::info!(
        batch_id = %report.batch_id,
        entries,
        hash = %sha256,
        "generated journal"
    );

    JournalArtifact {
        csv,
        sha256,
        entries,
    }
}

/// Generate the journal and persist it to `path`
pub fn write_journal(
    report: &ReconciliationReport,
    path: &Path,
) -> Result<JournalArtifact, String> {
    let artifact = generate_journal(report);
    std::fs::write(path, artifact.csv.as_bytes())
        .map_err(|e| format!("Failed to write journal '{}': {}", path.display(), e))?;
    tracing::info!(path = %path.display(), "saved journal file");
    Ok(artifact)
}

fn write_row<W: std::io::Write>(writer: &mut csv::Writer<W>, fields: [String; 8]) {
    // In-memory Vec<u8> sink; write errors cannot occur here
    let _ = writer.write_record(&fields);
}

fn tally_date(record_ts: Option<DateTime<Utc>>, batch_ts: DateTime<Utc>) -> String {
    record_ts.unwrap_or(batch_ts).format("%d-%m-%Y").to_string()
}
