//! Ingestion error types.

use thiserror::Error;

use trip_model::SourceReport;

/// Errors from ingesting one source.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Zero rows survived blank/legend filtering (a source with no
    /// recoverable header information lands here too). Non-fatal at the
    /// merge level; the report says what was discarded.
    #[error("source {}: no rows left after filtering ({} parsed)", .report.source, .report.parsed)]
    EmptyResult { report: SourceReport },
}

impl IngestError {
    /// The ingest report for the failed source.
    #[must_use]
    pub fn report(&self) -> &SourceReport {
        match self {
            Self::EmptyResult { report } => report,
        }
    }
}

pub type Result<T> = std::result::Result<T, IngestError>;
