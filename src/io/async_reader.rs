//! Asynchronous CSV reader with stream interface
//!
//! Streams raw records from an async byte source. Used by the async
//! processing strategy to load the payments and statements files
//! concurrently before the matching passes run.

use crate::types::RawRecord;
use csv_async::AsyncReaderBuilder;
use futures::io::AsyncRead;
use futures::stream::StreamExt;

/// Asynchronous CSV reader
///
/// Wraps a `csv_async` deserializer over any `AsyncRead` source. Rows that
/// fail CSV-level parsing are logged and skipped, mirroring `SyncReader`.
pub struct AsyncReader<R: AsyncRead + Unpin> {
    csv_reader: csv_async::AsyncDeserializer<R>,
}

impl<R: AsyncRead + Unpin + Send + 'static> AsyncReader<R> {
    /// Create a new AsyncReader from an async byte source
    pub fn new(reader: R) -> Self {
        let csv_reader = AsyncReaderBuilder::new()
            .flexible(true)
            .trim(csv_async::Trim::All)
            .create_deserializer(reader);

        Self { csv_reader }
    }

    /// Read every remaining row from the source
    ///
    /// Malformed rows are skipped with a warning; the load never aborts on
    /// a single bad row.
    pub async fn read_all(&mut self) -> Vec<RawRecord> {
        let mut records = Vec::new();
        let mut rows = self.csv_reader.deserialize::<RawRecord>();

        while let Some(result) = rows.next().await {
            match result {
                Ok(record) => records.push(record),
                Err(e) => tracing::warn!(error = %e, "skipping unreadable CSV row"),
            }
        }

        records
    }
}
