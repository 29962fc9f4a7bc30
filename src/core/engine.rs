//! Reconciliation engine
//!
//! Orchestrates the pipeline over one batch already loaded into memory:
//! exact pass, fuzzy pass on the remainder, exception classification on what
//! is left, then aggregation into a single report.
//!
//! The engine is a pure function of its inputs plus the processing-time
//! default for absent timestamps. It performs no I/O, runs the passes in
//! strict sequence on one thread, and exposes no partial results; callers
//! may run independent batches concurrently, each with its own records.

use crate::core::aggregator::build_report;
use crate::core::arena::RecordArena;
use crate::core::classifier::classify_remaining;
use crate::core::exact::match_exact;
use crate::core::fuzzy::match_fuzzy;
use crate::types::{ReconciliationReport, TxnRecord};
use chrono::Utc;
use metrics::gauge;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tracing::{info, warn};

/// Matching parameters
///
/// Defaults reproduce the documented behavior: a 1% fuzzy amount window and
/// a 100000 high-value exception threshold.
#[derive(Debug, Clone)]
pub struct MatchConfig {
    /// Fuzzy amount tolerance as a fraction of the payment amount
    pub tolerance: Decimal,
    /// Amounts strictly above this classify as high-value exceptions
    pub high_value_threshold: Decimal,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            tolerance: Decimal::new(1, 2),
            high_value_threshold: Decimal::new(100_000, 0),
        }
    }
}

impl MatchConfig {
    /// Create a config with a custom tolerance, falling back to the default
    /// when the value is out of range
    pub fn with_tolerance(tolerance: Decimal) -> Self {
        let default = Self::default();

        let tolerance = if tolerance <= Decimal::ZERO || tolerance >= Decimal::ONE {
            warn!(
                %tolerance,
                default = %default.tolerance,
                "tolerance out of range (0, 1), using default"
            );
            default.tolerance
        } else {
            tolerance
        };

        Self { tolerance, ..default }
    }
}

/// Reconciliation matching engine
///
/// Stateless across batches: every invocation owns its record copies and
/// produces a fresh report.
#[derive(Debug, Clone, Default)]
pub struct ReconEngine {
    config: MatchConfig,
}

impl ReconEngine {
    /// Create an engine with default matching parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with explicit matching parameters
    pub fn with_config(config: MatchConfig) -> Self {
        Self { config }
    }

    /// Reconcile one batch of canonical payments against statements
    ///
    /// Record order is significant: both tie-break rules bind the first
    /// qualifying counterpart in input order, so the same ordered inputs
    /// always produce the same report.
    pub fn reconcile(
        &self,
        batch_id: &str,
        mut payments: Vec<TxnRecord>,
        mut statements: Vec<TxnRecord>,
    ) -> ReconciliationReport {
        let processed_at = Utc::now();

        // Absent timestamps default to the batch processing time.
        for record in payments.iter_mut().chain(statements.iter_mut()) {
            record.timestamp.get_or_insert(processed_at);
        }

        let mut payment_arena = RecordArena::new(payments);
        let mut statement_arena = RecordArena::new(statements);

        let exact = match_exact(&mut payment_arena, &mut statement_arena);
        let fuzzy = match_fuzzy(&mut payment_arena, &mut statement_arena, &self.config);
        let exceptions = classify_remaining(&payment_arena, &self.config);

        let report = build_report(batch_id, processed_at, exact, fuzzy, exceptions);

        gauge!("auto_match_percentage").set(
            report
                .summary
                .auto_match_percentage
                .to_f64()
                .unwrap_or(0.0),
        );
        info!(
            batch_id,
            exact_matches = report.summary.exact_matches,
            fuzzy_matches = report.summary.fuzzy_matches,
            exceptions = report.summary.unmatched_count,
            auto_match_percentage = %report.summary.auto_match_percentage,
            "reconciliation completed"
        );

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ExceptionType, MatchType, PaymentMethod, Severity};
    use std::collections::HashSet;
    use std::str::FromStr;

    fn record(id: &str, amount: &str, from: &str, to: &str, method: PaymentMethod) -> TxnRecord {
        TxnRecord {
            transaction_id: id.to_string(),
            amount: Decimal::from_str(amount).unwrap(),
            from_account: from.to_string(),
            to_account: to.to_string(),
            payment_method: method,
            timestamp: None,
        }
    }

    #[test]
    fn test_exact_match_scenario() {
        // Identical payment and statement pair exactly with confidence 1.0
        let engine = ReconEngine::new();
        let report = engine.reconcile(
            "BATCH-1",
            vec![record("PAY-1", "1000", "A", "B", PaymentMethod::Rtgs)],
            vec![record("STMT-1", "1000", "A", "B", PaymentMethod::Rtgs)],
        );

        assert_eq!(report.summary.exact_matches, 1);
        assert_eq!(report.summary.fuzzy_matches, 0);
        assert_eq!(report.matched[0].match_type, MatchType::Exact);
        assert_eq!(report.matched[0].confidence, 1.0);
        assert_eq!(report.summary.auto_match_percentage, Decimal::new(10000, 2));
    }

    #[test]
    fn test_fuzzy_match_scenario() {
        // 1005 vs 1000 is a 0.5% delta, inside the 1% window
        let engine = ReconEngine::new();
        let report = engine.reconcile(
            "BATCH-1",
            vec![record("PAY-1", "1000", "A", "B", PaymentMethod::Rtgs)],
            vec![record("STMT-1", "1005", "A", "B", PaymentMethod::Rtgs)],
        );

        assert_eq!(report.summary.fuzzy_matches, 1);
        assert_eq!(report.matched[0].match_type, MatchType::Fuzzy);
        assert_eq!(report.matched[0].confidence, 0.8);
    }

    #[test]
    fn test_exact_pass_runs_before_fuzzy_pass() {
        // The identical statement wins even though a closer-indexed fuzzy
        // candidate exists; the fuzzy pass then binds the near statement to
        // nothing since the payment is already consumed.
        let engine = ReconEngine::new();
        let report = engine.reconcile(
            "BATCH-1",
            vec![record("PAY-1", "1000", "A", "B", PaymentMethod::Neft)],
            vec![
                record("STMT-1", "1001", "A", "B", PaymentMethod::Neft),
                record("STMT-2", "1000", "A", "B", PaymentMethod::Neft),
            ],
        );

        assert_eq!(report.summary.exact_matches, 1);
        assert_eq!(report.summary.fuzzy_matches, 0);
        assert_eq!(report.matched[0].statement_id, "STMT-2");
    }

    #[test]
    fn test_high_value_exception_scenario() {
        let engine = ReconEngine::new();
        let report = engine.reconcile(
            "BATCH-1",
            vec![record("PAY-1", "150000", "A", "B", PaymentMethod::Rtgs)],
            vec![],
        );

        assert_eq!(report.exceptions.len(), 1);
        assert_eq!(
            report.exceptions[0].exception_type,
            ExceptionType::HighValueUnmatched
        );
        assert_eq!(report.exceptions[0].severity, Severity::High);
    }

    #[test]
    fn test_upi_exception_scenario() {
        let engine = ReconEngine::new();
        let report = engine.reconcile(
            "BATCH-1",
            vec![record("PAY-1", "500", "A", "B", PaymentMethod::Upi)],
            vec![],
        );

        assert_eq!(
            report.exceptions[0].exception_type,
            ExceptionType::UpiUnmatched
        );
        assert_eq!(report.exceptions[0].severity, Severity::Low);
    }

    #[test]
    fn test_empty_statements_scenario() {
        // 3 payments, no statements: 0 matches, 3 exceptions, 0%
        let engine = ReconEngine::new();
        let report = engine.reconcile(
            "BATCH-1",
            vec![
                record("PAY-1", "100", "A", "B", PaymentMethod::Neft),
                record("PAY-2", "200", "A", "B", PaymentMethod::Upi),
                record("PAY-3", "300", "A", "B", PaymentMethod::Rtgs),
            ],
            vec![],
        );

        assert_eq!(report.summary.matched_count, 0);
        assert_eq!(report.summary.unmatched_count, 3);
        assert_eq!(report.summary.auto_match_percentage, Decimal::ZERO);
    }

    #[test]
    fn test_empty_batch_is_not_an_error() {
        let engine = ReconEngine::new();
        let report = engine.reconcile("BATCH-1", vec![], vec![]);

        assert_eq!(report.summary.total_payments, 0);
        assert_eq!(report.summary.auto_match_percentage, Decimal::ZERO);
        assert!(report.matched.is_empty());
        assert!(report.exceptions.is_empty());
    }

    #[test]
    fn test_partition_invariant() {
        // Every payment ends in exactly one of the three outcome sets
        let engine = ReconEngine::new();
        let payments = vec![
            record("PAY-1", "1000", "A", "B", PaymentMethod::Rtgs),
            record("PAY-2", "2000", "C", "D", PaymentMethod::Neft),
            record("PAY-3", "3000", "E", "F", PaymentMethod::Upi),
            record("PAY-4", "150000", "G", "H", PaymentMethod::Rtgs),
        ];
        let statements = vec![
            record("STMT-1", "1000", "A", "B", PaymentMethod::Rtgs),
            record("STMT-2", "2010", "C", "D", PaymentMethod::Imps),
        ];

        let report = engine.reconcile("BATCH-1", payments.clone(), statements);

        let mut seen: HashSet<String> = HashSet::new();
        for result in &report.matched {
            assert!(seen.insert(result.payment_id.clone()));
        }
        for exception in &report.exceptions {
            assert!(seen.insert(exception.transaction_id.clone()));
        }
        let all_ids: HashSet<String> =
            payments.iter().map(|p| p.transaction_id.clone()).collect();
        assert_eq!(seen, all_ids);
        assert_eq!(
            report.summary.total_payments,
            report.summary.matched_count + report.summary.unmatched_count
        );
    }

    #[test]
    fn test_statement_consumed_once_across_passes() {
        // One statement cannot satisfy both an exact and a fuzzy candidate
        let engine = ReconEngine::new();
        let report = engine.reconcile(
            "BATCH-1",
            vec![
                record("PAY-1", "1000", "A", "B", PaymentMethod::Neft),
                record("PAY-2", "1001", "A", "B", PaymentMethod::Neft),
            ],
            vec![record("STMT-1", "1000", "A", "B", PaymentMethod::Neft)],
        );

        assert_eq!(report.summary.matched_count, 1);
        assert_eq!(report.matched[0].payment_id, "PAY-1");
        assert_eq!(report.summary.unmatched_count, 1);
        assert_eq!(report.exceptions[0].transaction_id, "PAY-2");
    }

    #[test]
    fn test_deterministic_given_same_ordered_inputs() {
        let engine = ReconEngine::new();
        let payments = vec![
            record("PAY-1", "1000", "A", "B", PaymentMethod::Neft),
            record("PAY-2", "1000", "A", "B", PaymentMethod::Neft),
            record("PAY-3", "995", "A", "B", PaymentMethod::Upi),
        ];
        let statements = vec![
            record("STMT-1", "1000", "A", "B", PaymentMethod::Neft),
            record("STMT-2", "998", "A", "B", PaymentMethod::Neft),
            record("STMT-3", "1000", "A", "B", PaymentMethod::Neft),
        ];

        let summarize = |report: &ReconciliationReport| {
            report
                .matched
                .iter()
                .map(|m| (m.payment_id.clone(), m.statement_id.clone(), m.match_type))
                .collect::<Vec<_>>()
        };

        let first = engine.reconcile("B", payments.clone(), statements.clone());
        let second = engine.reconcile("B", payments, statements);
        assert_eq!(summarize(&first), summarize(&second));
    }

    #[test]
    fn test_missing_timestamps_are_filled() {
        let engine = ReconEngine::new();
        let report = engine.reconcile(
            "BATCH-1",
            vec![record("PAY-1", "500", "A", "B", PaymentMethod::Upi)],
            vec![],
        );

        assert_eq!(report.exceptions[0].timestamp, Some(report.timestamp));
    }

    #[test]
    fn test_custom_tolerance_widens_window() {
        // 5% tolerance accepts a 3% delta the default would reject
        let engine = ReconEngine::with_config(MatchConfig::with_tolerance(Decimal::new(5, 2)));
        let report = engine.reconcile(
            "BATCH-1",
            vec![record("PAY-1", "1000", "A", "B", PaymentMethod::Neft)],
            vec![record("STMT-1", "1030", "A", "B", PaymentMethod::Neft)],
        );
        assert_eq!(report.summary.fuzzy_matches, 1);
    }

    #[test]
    fn test_out_of_range_tolerance_falls_back_to_default() {
        let config = MatchConfig::with_tolerance(Decimal::new(2, 0));
        assert_eq!(config.tolerance, MatchConfig::default().tolerance);

        let config = MatchConfig::with_tolerance(Decimal::ZERO);
        assert_eq!(config.tolerance, MatchConfig::default().tolerance);
    }
}
