//! Synchronous CSV reader with iterator interface
//!
//! Streams raw records from a payments or statements CSV file one row at a
//! time. The reader stays deliberately thin: it only deals with CSV
//! structure, leaving all field validation to the normalizer so that a row
//! with a bad amount still reaches the drop accounting there.
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, I/O errors) are returned from `new()`
//! - Individual row errors are yielded as Err variants with line numbers
//! - Unknown extra columns (reference numbers, fees, UTRs) are ignored

use crate::types::RawRecord;
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::path::Path;

/// Synchronous CSV reader
///
/// Implements `Iterator`, yielding one `RawRecord` per CSV row without
/// loading the whole file into memory.
#[derive(Debug)]
pub struct SyncReader {
    reader: csv::Reader<File>,
    line_num: usize,
}

impl SyncReader {
    /// Open a CSV file for streaming iteration
    ///
    /// The reader trims whitespace on all fields and tolerates flexible
    /// field counts, matching the loose shape bank exports tend to have.
    pub fn new(path: &Path) -> Result<Self, String> {
        let file = File::open(path)
            .map_err(|e| format!("Failed to open file '{}': {}", path.display(), e))?;

        let reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(file);

        Ok(Self {
            reader,
            line_num: 0,
        })
    }

    /// Read every row, logging and skipping rows that fail to parse
    ///
    /// Row-level failures never abort the load; they are surfaced as
    /// warnings and excluded, the same degradation the normalizer applies
    /// to malformed field values.
    pub fn read_all(self) -> Vec<RawRecord> {
        let mut records = Vec::new();
        for result in self {
            match result {
                Ok(record) => records.push(record),
                Err(e) => tracing::warn!(error = %e, "skipping unreadable CSV row"),
            }
        }
        records
    }
}

impl Iterator for SyncReader {
    type Item = Result<RawRecord, String>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut deserializer = self.reader.deserialize::<RawRecord>();

        match deserializer.next()? {
            Ok(record) => {
                self.line_num += 1;
                Some(Ok(record))
            }
            Err(e) => {
                self.line_num += 1;
                // Line numbers are offset by one for the header row
                Some(Err(format!(
                    "Line {}: CSV parse error: {}",
                    self.line_num + 1,
                    e
                )))
            }
        }
    }
}
