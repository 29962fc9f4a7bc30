//! Core data types for the reconciliation engine
//!
//! This module contains record types (raw and canonical), the report types
//! that form the downstream JSON contract, and error definitions.

pub mod error;
pub mod record;
pub mod report;

pub use error::ReconError;
pub use record::{PaymentMethod, RawRecord, TxnRecord};
pub use report::{
    ExceptionType, MatchResult, MatchType, ReconException, ReconSummary, ReconciliationReport,
    Severity,
};
