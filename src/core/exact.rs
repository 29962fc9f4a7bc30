//! Exact matching pass
//!
//! Pairs payments with statements that agree exactly on amount, both
//! accounts, and payment method. Payments are processed in arrival order and
//! each binds the first qualifying statement in the statements' original
//! order. This greedy first-wins choice is deliberate and load-bearing:
//! downstream consumers depend on it, so no globally optimal assignment is
//! attempted.
//!
//! A hash index keyed by the full match tuple replaces the naive scan over
//! all statements. Each key maps to a FIFO queue of statement indices in
//! original order, so popping the front yields exactly the statement the
//! linear scan would have found first.

use crate::core::arena::RecordArena;
use crate::types::{PaymentMethod, TxnRecord};
use metrics::counter;
use rust_decimal::Decimal;
use std::collections::{HashMap, VecDeque};

/// A payment bound to a statement by one of the matching passes
#[derive(Debug, Clone)]
pub struct MatchedPair {
    pub payment: TxnRecord,
    pub statement: TxnRecord,
}

#[derive(Debug, PartialEq, Eq, Hash)]
struct ExactKey {
    amount: Decimal,
    from_account: String,
    to_account: String,
    payment_method: PaymentMethod,
}

impl ExactKey {
    fn of(record: &TxnRecord) -> Self {
        Self {
            amount: record.amount,
            from_account: record.from_account.clone(),
            to_account: record.to_account.clone(),
            payment_method: record.payment_method.clone(),
        }
    }
}

/// Run the exact pass, consuming matched records from both arenas
///
/// Every returned pair agrees exactly on `(amount, fromAccount, toAccount,
/// paymentMethod)`; each record is consumed at most once.
pub fn match_exact(
    payments: &mut RecordArena,
    statements: &mut RecordArena,
) -> Vec<MatchedPair> {
    let mut index: HashMap<ExactKey, VecDeque<usize>> = HashMap::new();
    for (statement_index, statement) in statements.remaining() {
        index
            .entry(ExactKey::of(statement))
            .or_default()
            .push_back(statement_index);
    }

    let mut matched = Vec::new();
    for payment_index in 0..payments.len() {
        if payments.is_consumed(payment_index) {
            continue;
        }

        let key = ExactKey::of(payments.get(payment_index));
        let Some(queue) = index.get_mut(&key) else {
            continue;
        };
        let Some(statement_index) = queue.pop_front() else {
            continue;
        };

        matched.push(MatchedPair {
            payment: payments.get(payment_index).clone(),
            statement: statements.get(statement_index).clone(),
        });
        payments.consume(payment_index);
        statements.consume(statement_index);
    }

    counter!("matched_transactions_total", "match_type" => "exact").increment(matched.len() as u64);

    matched
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, amount: i64, from: &str, to: &str, method: PaymentMethod) -> TxnRecord {
        TxnRecord {
            transaction_id: id.to_string(),
            amount: Decimal::new(amount, 0),
            from_account: from.to_string(),
            to_account: to.to_string(),
            payment_method: method,
            timestamp: None,
        }
    }

    #[test]
    fn test_identical_records_match_exactly() {
        // Scenario: one payment, one identical statement
        let mut payments = RecordArena::new(vec![record(
            "PAY-1", 1000, "A", "B", PaymentMethod::Rtgs,
        )]);
        let mut statements = RecordArena::new(vec![record(
            "STMT-1", 1000, "A", "B", PaymentMethod::Rtgs,
        )]);

        let matched = match_exact(&mut payments, &mut statements);

        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].payment.transaction_id, "PAY-1");
        assert_eq!(matched[0].statement.transaction_id, "STMT-1");
        assert_eq!(payments.remaining_count(), 0);
        assert_eq!(statements.remaining_count(), 0);
    }

    #[test]
    fn test_first_qualifying_statement_wins_ties() {
        let mut payments = RecordArena::new(vec![record(
            "PAY-1", 1000, "A", "B", PaymentMethod::Neft,
        )]);
        let mut statements = RecordArena::new(vec![
            record("STMT-1", 1000, "A", "B", PaymentMethod::Neft),
            record("STMT-2", 1000, "A", "B", PaymentMethod::Neft),
        ]);

        let matched = match_exact(&mut payments, &mut statements);

        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].statement.transaction_id, "STMT-1");
        assert!(!statements.is_consumed(1));
    }

    #[test]
    fn test_duplicate_payments_consume_statements_in_order() {
        let mut payments = RecordArena::new(vec![
            record("PAY-1", 500, "A", "B", PaymentMethod::Upi),
            record("PAY-2", 500, "A", "B", PaymentMethod::Upi),
        ]);
        let mut statements = RecordArena::new(vec![
            record("STMT-1", 500, "A", "B", PaymentMethod::Upi),
            record("STMT-2", 500, "A", "B", PaymentMethod::Upi),
        ]);

        let matched = match_exact(&mut payments, &mut statements);

        assert_eq!(matched.len(), 2);
        assert_eq!(matched[0].payment.transaction_id, "PAY-1");
        assert_eq!(matched[0].statement.transaction_id, "STMT-1");
        assert_eq!(matched[1].payment.transaction_id, "PAY-2");
        assert_eq!(matched[1].statement.transaction_id, "STMT-2");
    }

    #[test]
    fn test_no_match_on_amount_difference() {
        let mut payments = RecordArena::new(vec![record(
            "PAY-1", 1000, "A", "B", PaymentMethod::Rtgs,
        )]);
        let mut statements = RecordArena::new(vec![record(
            "STMT-1", 1001, "A", "B", PaymentMethod::Rtgs,
        )]);

        let matched = match_exact(&mut payments, &mut statements);

        assert!(matched.is_empty());
        assert_eq!(payments.remaining_count(), 1);
        assert_eq!(statements.remaining_count(), 1);
    }

    #[test]
    fn test_no_match_on_method_difference() {
        // The exact pass requires method equality, unlike the fuzzy pass
        let mut payments = RecordArena::new(vec![record(
            "PAY-1", 1000, "A", "B", PaymentMethod::Rtgs,
        )]);
        let mut statements = RecordArena::new(vec![record(
            "STMT-1", 1000, "A", "B", PaymentMethod::Neft,
        )]);

        let matched = match_exact(&mut payments, &mut statements);
        assert!(matched.is_empty());
    }

    #[test]
    fn test_no_match_on_account_difference() {
        let mut payments = RecordArena::new(vec![record(
            "PAY-1", 1000, "A", "B", PaymentMethod::Rtgs,
        )]);
        let mut statements = RecordArena::new(vec![record(
            "STMT-1", 1000, "A", "C", PaymentMethod::Rtgs,
        )]);

        let matched = match_exact(&mut payments, &mut statements);
        assert!(matched.is_empty());
    }

    #[test]
    fn test_equal_amounts_with_different_scale_match() {
        // 1000 and 1000.00 are the same decimal value
        let mut payments = RecordArena::new(vec![TxnRecord {
            amount: Decimal::new(1000, 0),
            ..record("PAY-1", 0, "A", "B", PaymentMethod::Imps)
        }]);
        let mut statements = RecordArena::new(vec![TxnRecord {
            amount: Decimal::new(100000, 2),
            ..record("STMT-1", 0, "A", "B", PaymentMethod::Imps)
        }]);

        let matched = match_exact(&mut payments, &mut statements);
        assert_eq!(matched.len(), 1);
    }

    #[test]
    fn test_deterministic_across_runs() {
        let payments_input = vec![
            record("PAY-1", 100, "A", "B", PaymentMethod::Neft),
            record("PAY-2", 100, "A", "B", PaymentMethod::Neft),
            record("PAY-3", 200, "C", "D", PaymentMethod::Upi),
        ];
        let statements_input = vec![
            record("STMT-1", 200, "C", "D", PaymentMethod::Upi),
            record("STMT-2", 100, "A", "B", PaymentMethod::Neft),
            record("STMT-3", 100, "A", "B", PaymentMethod::Neft),
        ];

        let run = || {
            let mut payments = RecordArena::new(payments_input.clone());
            let mut statements = RecordArena::new(statements_input.clone());
            match_exact(&mut payments, &mut statements)
                .into_iter()
                .map(|p| (p.payment.transaction_id, p.statement.transaction_id))
                .collect::<Vec<_>>()
        };

        assert_eq!(run(), run());
        assert_eq!(
            run(),
            vec![
                ("PAY-1".to_string(), "STMT-2".to_string()),
                ("PAY-2".to_string(), "STMT-3".to_string()),
                ("PAY-3".to_string(), "STMT-1".to_string()),
            ]
        );
    }
}
