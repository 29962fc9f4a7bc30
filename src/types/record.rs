//! Record types for the reconciliation engine
//!
//! This module defines the raw record shape as read from input files and the
//! canonical record produced by normalization. Payments and statements share
//! the same canonical shape; only their role in the pipeline differs.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// Raw record as read from a payments or statements CSV file
///
/// Every field is optional at this stage: missing or malformed values are the
/// normalizer's concern, not the reader's. Extra columns in the input file
/// (reference numbers, fees, UTRs) are ignored during deserialization.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawRecord {
    pub transaction_id: Option<String>,
    pub amount: Option<String>,
    pub from_account: Option<String>,
    pub to_account: Option<String>,
    pub payment_method: Option<String>,
    pub timestamp: Option<String>,
}

/// Payment method carried on a record
///
/// Input values are trimmed and uppercased before parsing. Unknown methods
/// pass through as `Other` so normalization never rejects a record on
/// method alone.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PaymentMethod {
    Rtgs,
    Neft,
    Imps,
    Upi,
    Other(String),
}

impl PaymentMethod {
    /// Parse a raw method string: trim, uppercase, no enum validation
    pub fn from_raw(raw: &str) -> Self {
        let normalized = raw.trim().to_uppercase();
        match normalized.as_str() {
            "RTGS" => PaymentMethod::Rtgs,
            "NEFT" => PaymentMethod::Neft,
            "IMPS" => PaymentMethod::Imps,
            "UPI" => PaymentMethod::Upi,
            _ => PaymentMethod::Other(normalized),
        }
    }

    /// Canonical uppercase representation
    pub fn as_str(&self) -> &str {
        match self {
            PaymentMethod::Rtgs => "RTGS",
            PaymentMethod::Neft => "NEFT",
            PaymentMethod::Imps => "IMPS",
            PaymentMethod::Upi => "UPI",
            PaymentMethod::Other(s) => s,
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for PaymentMethod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PaymentMethod {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(PaymentMethod::from_raw(&raw))
    }
}

/// Canonical record produced by the normalizer
///
/// Used for both payments and statements. Amounts are exact decimals so
/// equality and tolerance checks never go through floating point. The
/// timestamp stays `None` until the engine fills it with the batch
/// processing time at the start of a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TxnRecord {
    /// Unique identifier within its own record set
    pub transaction_id: String,

    /// Non-negative amount in currency minor-unit precision
    pub amount: Decimal,

    /// Debit account, trimmed with case preserved
    pub from_account: String,

    /// Credit account, trimmed with case preserved
    pub to_account: String,

    /// Uppercased payment method; unknown values pass through
    pub payment_method: PaymentMethod,

    /// Record timestamp; absent values are defaulted at matching time
    pub timestamp: Option<DateTime<Utc>>,
}
