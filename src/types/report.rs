//! Report types emitted by the reconciliation engine
//!
//! These types form the stable JSON contract consumed by the downstream
//! journal formatter: field names serialize in camelCase and taxonomy values
//! in SCREAMING_SNAKE_CASE, exactly as the bookkeeping side expects.

use crate::types::{PaymentMethod, TxnRecord};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

/// How a payment was paired with a statement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MatchType {
    Exact,
    Fuzzy,
}

impl MatchType {
    /// Fixed confidence score attached to a match
    ///
    /// Fuzzy confidence is constant regardless of the actual amount delta.
    /// This mirrors the documented reporting behavior rather than deriving a
    /// score from closeness.
    pub fn confidence(&self) -> f64 {
        match self {
            MatchType::Exact => 1.0,
            MatchType::Fuzzy => 0.8,
        }
    }
}

/// One payment/statement pairing with the full records embedded for audit
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub payment_id: String,
    pub statement_id: String,
    pub amount: Decimal,
    pub match_type: MatchType,
    pub confidence: f64,
    pub payment_data: TxnRecord,
    pub statement_data: TxnRecord,
}

/// Exception taxonomy for payments that survive both matching passes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExceptionType {
    HighValueUnmatched,
    RtgsUnmatched,
    UpiUnmatched,
    GeneralUnmatched,
}

impl ExceptionType {
    /// Fixed human-readable reason string per type (lookup, no templating)
    pub fn reason(&self) -> &'static str {
        match self {
            ExceptionType::HighValueUnmatched => "High value transaction requires manual review",
            ExceptionType::RtgsUnmatched => "RTGS transaction not found in bank statements",
            ExceptionType::UpiUnmatched => "UPI transaction not found in bank statements",
            ExceptionType::GeneralUnmatched => "Transaction not matched with any bank statement",
        }
    }

    /// Fixed severity per type, guiding manual-review urgency
    pub fn severity(&self) -> Severity {
        match self {
            ExceptionType::HighValueUnmatched => Severity::High,
            ExceptionType::RtgsUnmatched => Severity::Medium,
            ExceptionType::UpiUnmatched => Severity::Low,
            ExceptionType::GeneralUnmatched => Severity::Medium,
        }
    }
}

/// Priority tag on an exception
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    High,
    Medium,
    Low,
}

/// A payment that could not be paired with any statement in either pass
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconException {
    pub transaction_id: String,
    pub amount: Decimal,
    pub from_account: String,
    pub to_account: String,
    pub payment_method: PaymentMethod,
    pub timestamp: Option<DateTime<Utc>>,
    pub exception_type: ExceptionType,
    pub exception_reason: &'static str,
    pub severity: Severity,
}

/// Aggregate statistics over one batch
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconSummary {
    pub total_payments: usize,
    pub matched_count: usize,
    pub unmatched_count: usize,
    /// Percentage rounded to 2 decimal places; 0 for an empty batch
    pub auto_match_percentage: Decimal,
    pub exact_matches: usize,
    pub fuzzy_matches: usize,
}

/// Terminal output of one reconciliation run
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciliationReport {
    pub batch_id: String,
    pub timestamp: DateTime<Utc>,
    pub summary: ReconSummary,
    pub matched: Vec<MatchResult>,
    pub exceptions: Vec<ReconException>,
}
