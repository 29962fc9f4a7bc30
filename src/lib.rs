//! Reconciliation Engine Library
//! # Overview
//!
//! This library reconciles a batch of payment instructions against bank
//! statement records loaded from CSV, with both a sync and an async loading
//! strategy in front of one sequential matching engine.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (TxnRecord, ReconciliationReport, etc.)
//! - [`cli`] - CLI argument parsing
//! - [`core`] - Business logic components:
//!   - [`core::engine`] - Pipeline orchestration and matching configuration
//!   - [`core::exact`] / [`core::fuzzy`] - Indexed matching passes
//!   - [`core::classifier`] - Exception taxonomy for unmatched payments
//! - [`io`] - CSV readers, report serialization, and journal generation
//! - [`strategy`] - Pluggable file loading strategies
//!
//! # Matching Pipeline
//!
//! Each batch runs through a fixed sequence:
//!
//! 1. **Normalize**: parse raw CSV rows into canonical records, dropping
//!    rows that fail validation
//! 2. **Exact pass**: match on (amount, from, to, method)
//! 3. **Fuzzy pass**: match remaining records on equal accounts with an
//!    amount tolerance (default 1%)
//! 4. **Classify**: every leftover payment becomes exactly one exception
//! 5. **Aggregate**: summary counts and the auto-match percentage
//!
//! Matched payments and exceptions partition the normalized payment set;
//! no payment is ever dropped after normalization or reported twice.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod strategy;
pub mod types;

pub use crate::core::{MatchConfig, ReconEngine};
pub use crate::io::{generate_journal, write_report_json, JournalArtifact};
pub use crate::types::{
    ExceptionType, MatchResult, MatchType, PaymentMethod, RawRecord, ReconError, ReconException,
    ReconSummary, ReconciliationReport, Severity, TxnRecord,
};
