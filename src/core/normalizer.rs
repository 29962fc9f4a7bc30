//! Record normalization
//!
//! Cleans and type-coerces raw records into the canonical form the matchers
//! operate on. Data-quality problems never fail a batch here: a record that
//! cannot be normalized is dropped and counted, and the batch continues.
//!
//! Drop rules:
//! - amount missing, unparseable, or negative
//! - `transactionId`, `fromAccount`, or `toAccount` missing or empty after trim
//! - `paymentMethod` missing or empty after trim
//!
//! Timestamps are optional at this stage: a missing or unparseable timestamp
//! is kept as `None` and defaulted to the batch processing time downstream.

use crate::types::{PaymentMethod, RawRecord, TxnRecord};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::{debug, info};

/// Output of one normalization run over a single record set
#[derive(Debug)]
pub struct NormalizedBatch {
    /// Records that passed normalization, in input order
    pub records: Vec<TxnRecord>,
    /// Number of records dropped for missing or malformed critical data
    pub dropped: usize,
}

/// Normalize a raw record set of one kind (`"payments"` or `"statements"`)
///
/// The kind string is only used for log context. Emits an info event with
/// the in/retained counts for observability; downstream logic never depends
/// on it.
pub fn normalize(raw_records: Vec<RawRecord>, kind: &str) -> NormalizedBatch {
    let records_in = raw_records.len();
    let mut records = Vec::with_capacity(records_in);
    let mut dropped = 0;

    for raw in raw_records {
        match normalize_record(raw) {
            Some(record) => records.push(record),
            None => dropped += 1,
        }
    }

    info!(
        kind,
        records_in,
        retained = records.len(),
        dropped,
        "normalized record set"
    );

    NormalizedBatch { records, dropped }
}

/// Normalize one raw record, or `None` if critical data is missing
fn normalize_record(raw: RawRecord) -> Option<TxnRecord> {
    let transaction_id = non_empty_trimmed(raw.transaction_id.as_deref())?;
    let from_account = non_empty_trimmed(raw.from_account.as_deref())?;
    let to_account = non_empty_trimmed(raw.to_account.as_deref())?;
    let method = non_empty_trimmed(raw.payment_method.as_deref())?;

    let amount_str = raw.amount.as_deref()?.trim();
    let amount = match Decimal::from_str(amount_str) {
        Ok(amount) if !amount.is_sign_negative() => amount,
        Ok(_) | Err(_) => {
            debug!(transaction_id, amount = amount_str, "dropping record with invalid amount");
            return None;
        }
    };

    // Timestamp parse failure is not fatal: the value stays absent and the
    // engine fills it with the batch processing time.
    let timestamp = raw
        .timestamp
        .as_deref()
        .and_then(|s| DateTime::parse_from_rfc3339(s.trim()).ok())
        .map(|dt| dt.with_timezone(&Utc));

    Some(TxnRecord {
        transaction_id,
        amount,
        from_account,
        to_account,
        payment_method: PaymentMethod::from_raw(&method),
        timestamp,
    })
}

fn non_empty_trimmed(value: Option<&str>) -> Option<String> {
    let trimmed = value?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
