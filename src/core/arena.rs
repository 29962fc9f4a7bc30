//! Record arena with index-based consumption
//!
//! Matching passes hand records from stage to stage without mutating any
//! record in place: a record enters the arena once, keeps its original index
//! for tie-break ordering, and is flipped to consumed exactly once when a
//! pass binds it into a match. Nothing is ever removed mid-scan.

use crate::types::TxnRecord;

/// Ordered set of records with exclusive consumption
///
/// Original insertion order is the order records arrived in the input file,
/// which the tie-break rules in both matching passes depend on.
#[derive(Debug)]
pub struct RecordArena {
    records: Vec<TxnRecord>,
    consumed: Vec<bool>,
}

impl RecordArena {
    /// Create an arena owning the given records, all unconsumed
    pub fn new(records: Vec<TxnRecord>) -> Self {
        let consumed = vec![false; records.len()];
        Self { records, consumed }
    }

    /// Total number of records, consumed or not
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the arena holds no records at all
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Access a record by its original index
    pub fn get(&self, index: usize) -> &TxnRecord {
        &self.records[index]
    }

    /// Whether the record at `index` has been bound into a match
    pub fn is_consumed(&self, index: usize) -> bool {
        self.consumed[index]
    }

    /// Mark the record at `index` as consumed
    ///
    /// Consumption is exclusive across passes; consuming twice is a logic
    /// error in the caller.
    pub fn consume(&mut self, index: usize) {
        debug_assert!(!self.consumed[index], "record consumed twice");
        self.consumed[index] = true;
    }

    /// Iterate unconsumed records in original order with their indices
    pub fn remaining(&self) -> impl Iterator<Item = (usize, &TxnRecord)> {
        self.records
            .iter()
            .enumerate()
            .filter(|(i, _)| !self.consumed[*i])
    }

    /// Number of unconsumed records
    pub fn remaining_count(&self) -> usize {
        self.consumed.iter().filter(|c| !**c).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PaymentMethod;
    use rust_decimal::Decimal;

    fn record(id: &str) -> TxnRecord {
        TxnRecord {
            transaction_id: id.to_string(),
            amount: Decimal::new(1000, 0),
            from_account: "A".to_string(),
            to_account: "B".to_string(),
            payment_method: PaymentMethod::Neft,
            timestamp: None,
        }
    }

    #[test]
    fn test_new_arena_has_nothing_consumed() {
        let arena = RecordArena::new(vec![record("1"), record("2")]);
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.remaining_count(), 2);
        assert!(!arena.is_consumed(0));
        assert!(!arena.is_consumed(1));
    }

    #[test]
    fn test_consume_removes_from_remaining() {
        let mut arena = RecordArena::new(vec![record("1"), record("2"), record("3")]);
        arena.consume(1);

        assert_eq!(arena.remaining_count(), 2);
        let remaining_ids: Vec<&str> = arena
            .remaining()
            .map(|(_, r)| r.transaction_id.as_str())
            .collect();
        assert_eq!(remaining_ids, vec!["1", "3"]);
    }

    #[test]
    fn test_remaining_preserves_original_order() {
        let mut arena = RecordArena::new(vec![record("a"), record("b"), record("c"), record("d")]);
        arena.consume(0);
        arena.consume(2);

        let indices: Vec<usize> = arena.remaining().map(|(i, _)| i).collect();
        assert_eq!(indices, vec![1, 3]);
    }

    #[test]
    fn test_empty_arena() {
        let arena = RecordArena::new(vec![]);
        assert!(arena.is_empty());
        assert_eq!(arena.remaining_count(), 0);
        assert_eq!(arena.remaining().count(), 0);
    }
}
