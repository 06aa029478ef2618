//! Source ingestion: turns one parsed source into normalized header-keyed
//! rows, dropping blank rows and embedded legend tables.

pub mod error;
pub mod ingestor;
pub mod options;

pub use error::{IngestError, Result};
pub use ingestor::{IngestedSource, ingest};
pub use options::IngestOptions;
