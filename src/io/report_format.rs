//! Report serialization
//!
//! The report travels as pretty-printed JSON: human-reviewable in the
//! evidence store and stable enough for downstream consumers keyed on the
//! camelCase field names.

use crate::types::{ReconError, ReconciliationReport};
use std::io::Write;
use std::path::Path;

/// Serialize the report as pretty JSON into any writer
///
/// Unsized writers are accepted so the strategy layer can pass its
/// `&mut dyn Write` output straight through.
pub fn write_report_json<W: Write + ?Sized>(
    report: &ReconciliationReport,
    writer: &mut W,
) -> Result<(), ReconError> {
    serde_json::to_writer_pretty(&mut *writer, report)?;
    // Trailing newline keeps the file friendly to line-oriented tooling
    writer
        .write_all(b"\n")
        .map_err(|e| ReconError::Io {
            message: e.to_string(),
        })?;
    Ok(())
}

/// Serialize the report to a file at `path`
pub fn save_report_json(report: &ReconciliationReport, path: &Path) -> Result<(), ReconError> {
    let mut file = std::fs::File::create(path).map_err(|e| ReconError::Io {
        message: format!("Failed to create '{}': {}", path.display(), e),
    })?;
    write_report_json(report, &mut file)?;
    tracing::info!(path = %path.display(), "saved reconciliation report");
    Ok(())
}
