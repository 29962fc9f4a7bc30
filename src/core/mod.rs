//! Core reconciliation logic
//!
//! The pipeline runs in a fixed order over one in-memory batch:
//! normalize, exact pass, fuzzy pass, exception classification, aggregation.
//! Each stage consumes the previous stage's remainder; nothing is mutated in
//! place and nothing here performs I/O.

pub mod aggregator;
pub mod arena;
pub mod classifier;
pub mod engine;
pub mod exact;
pub mod fuzzy;
pub mod normalizer;

pub use arena::RecordArena;
pub use engine::{MatchConfig, ReconEngine};
pub use exact::MatchedPair;
pub use normalizer::{normalize, NormalizedBatch};
