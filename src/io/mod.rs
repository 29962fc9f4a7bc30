//! Input and output layer
//!
//! CSV readers for the two input files, JSON serialization of the finished
//! report, and the Tally journal artifact. Field validation does not live
//! here; readers hand raw rows to the normalizer untouched.

pub mod async_reader;
pub mod journal;
pub mod report_format;
pub mod sync_reader;

pub use async_reader::AsyncReader;
pub use journal::{generate_journal, write_journal, JournalArtifact};
pub use report_format::{save_report_json, write_report_json};
pub use sync_reader::SyncReader;
