//! Report aggregation
//!
//! Merges the two match sets and the exception list into one
//! `ReconciliationReport`. The inputs are disjoint by construction, so this
//! stage only counts and formats; it never recomputes membership.

use crate::core::exact::MatchedPair;
use crate::types::{
    MatchResult, MatchType, ReconException, ReconSummary, ReconciliationReport,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Build the terminal report for one batch
///
/// `auto_match_percentage` is rounded to 2 decimal places and guarded
/// against an empty batch: zero payments yields 0, never a division error.
pub fn build_report(
    batch_id: &str,
    timestamp: DateTime<Utc>,
    exact: Vec<MatchedPair>,
    fuzzy: Vec<MatchedPair>,
    exceptions: Vec<ReconException>,
) -> ReconciliationReport {
    let exact_matches = exact.len();
    let fuzzy_matches = fuzzy.len();
    let matched_count = exact_matches + fuzzy_matches;
    let total_payments = matched_count + exceptions.len();

    let auto_match_percentage = if total_payments == 0 {
        Decimal::ZERO
    } else {
        (Decimal::from(matched_count as u64) / Decimal::from(total_payments as u64)
            * Decimal::ONE_HUNDRED)
            .round_dp(2)
    };

    let matched = exact
        .into_iter()
        .map(|pair| to_match_result(pair, MatchType::Exact))
        .chain(
            fuzzy
                .into_iter()
                .map(|pair| to_match_result(pair, MatchType::Fuzzy)),
        )
        .collect();

    ReconciliationReport {
        batch_id: batch_id.to_string(),
        timestamp,
        summary: ReconSummary {
            total_payments,
            matched_count,
            unmatched_count: exceptions.len(),
            auto_match_percentage,
            exact_matches,
            fuzzy_matches,
        },
        matched,
        exceptions,
    }
}

fn to_match_result(pair: MatchedPair, match_type: MatchType) -> MatchResult {
    MatchResult {
        payment_id: pair.payment.transaction_id.clone(),
        statement_id: pair.statement.transaction_id.clone(),
        amount: pair.payment.amount,
        match_type,
        confidence: match_type.confidence(),
        payment_data: pair.payment,
        statement_data: pair.statement,
    }
}
