//! Exception classification
//!
//! Every payment that survives both matching passes becomes exactly one
//! exception. Classification is a pure function of the payment record; rules
//! are evaluated in a fixed order and the first matching rule wins:
//!
//! 1. amount above the high-value threshold
//! 2. RTGS method
//! 3. UPI method
//! 4. everything else

use crate::core::arena::RecordArena;
use crate::core::engine::MatchConfig;
use crate::types::{ExceptionType, PaymentMethod, ReconException, TxnRecord};

/// Classify one unmatched payment
pub fn classify(payment: &TxnRecord, config: &MatchConfig) -> ReconException {
    let exception_type = exception_type_of(payment, config);

    ReconException {
        transaction_id: payment.transaction_id.clone(),
        amount: payment.amount,
        from_account: payment.from_account.clone(),
        to_account: payment.to_account.clone(),
        payment_method: payment.payment_method.clone(),
        timestamp: payment.timestamp,
        exception_type,
        exception_reason: exception_type.reason(),
        severity: exception_type.severity(),
    }
}

/// Classify everything left unconsumed in the payments arena, in order
///
/// Never drops or merges: the output length equals the remaining count.
pub fn classify_remaining(payments: &RecordArena, config: &MatchConfig) -> Vec<ReconException> {
    payments
        .remaining()
        .map(|(_, payment)| classify(payment, config))
        .collect()
}

fn exception_type_of(payment: &TxnRecord, config: &MatchConfig) -> ExceptionType {
    if payment.amount > config.high_value_threshold {
        ExceptionType::HighValueUnmatched
    } else if payment.payment_method == PaymentMethod::Rtgs {
        ExceptionType::RtgsUnmatched
    } else if payment.payment_method == PaymentMethod::Upi {
        ExceptionType::UpiUnmatched
    } else {
        ExceptionType::GeneralUnmatched
    }
}
