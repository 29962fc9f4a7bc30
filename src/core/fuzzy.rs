//! Fuzzy matching pass
//!
//! Pairs leftover payments with leftover statements whose amount falls
//! inside `[amount x (1 - tolerance), amount x (1 + tolerance)]` and whose
//! accounts match exactly. Payment method equality is deliberately not
//! required here, so method-mislabeled records can still reconcile.
//!
//! Candidate selection: smallest absolute amount difference wins, ties
//! resolved by original statement order. The per-account-pair index keeps
//! statement amounts in a `BTreeSet<(amount, original_index)>` so a bounded
//! range query visits only in-window candidates while preserving exactly
//! the tie-break the linear scan would produce.

use crate::core::arena::RecordArena;
use crate::core::engine::MatchConfig;
use crate::core::exact::MatchedPair;
use metrics::counter;
use rust_decimal::Decimal;
use std::collections::{BTreeSet, HashMap};
use std::ops::Bound::Included;

/// Run the fuzzy pass over the records remaining after the exact pass
///
/// Every returned pair satisfies the tolerance window and exact account
/// equality; each record is consumed at most once.
pub fn match_fuzzy(
    payments: &mut RecordArena,
    statements: &mut RecordArena,
    config: &MatchConfig,
) -> Vec<MatchedPair> {
    // Index remaining statements per account pair, ordered by amount then
    // original index.
    let mut index: HashMap<(String, String), BTreeSet<(Decimal, usize)>> = HashMap::new();
    for (statement_index, statement) in statements.remaining() {
        index
            .entry((
                statement.from_account.clone(),
                statement.to_account.clone(),
            ))
            .or_default()
            .insert((statement.amount, statement_index));
    }

    let mut matched = Vec::new();
    for payment_index in 0..payments.len() {
        if payments.is_consumed(payment_index) {
            continue;
        }

        let payment = payments.get(payment_index);
        let window_low = payment.amount * (Decimal::ONE - config.tolerance);
        let window_high = payment.amount * (Decimal::ONE + config.tolerance);
        let bucket_key = (payment.from_account.clone(), payment.to_account.clone());

        let Some(bucket) = index.get_mut(&bucket_key) else {
            continue;
        };

        // Closest amount wins; equal differences fall back to the smaller
        // original index.
        let mut best: Option<(Decimal, usize, Decimal)> = None;
        for &(amount, statement_index) in
            bucket.range((Included((window_low, 0)), Included((window_high, usize::MAX))))
        {
            let difference = (amount - payment.amount).abs();
            let better = match best {
                None => true,
                Some((best_difference, best_index, _)) => {
                    (difference, statement_index) < (best_difference, best_index)
                }
            };
            if better {
                best = Some((difference, statement_index, amount));
            }
        }

        if let Some((_, statement_index, amount)) = best {
            bucket.remove(&(amount, statement_index));
            matched.push(MatchedPair {
                payment: payments.get(payment_index).clone(),
                statement: statements.get(statement_index).clone(),
            });
            payments.consume(payment_index);
            statements.consume(statement_index);
        }
    }

    counter!("matched_transactions_total", "match_type" => "fuzzy").increment(matched.len() as u64);

    matched
}
