//! Ingestion tuning.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Dataset-specific ingestion tuning.
///
/// Source documents may embed a second legend table below the main data
/// table with no structural delimiter; rows whose concatenated text
/// contains one of these keywords are silently discarded. The defaults are
/// tuned to the reference itinerary's vocabulary and can be replaced from
/// a JSON file for other datasets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestOptions {
    /// Case-folded substrings marking a legend/footer row.
    pub footer_keywords: Vec<String>,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            footer_keywords: [
                "ค่าเข้า",
                "ค่าบริการ",
                "ราคา",
                "บาท",
                "หมายเหตุ:",
                "สัญลักษณ์",
                "legend",
                "admission",
            ]
            .iter()
            .map(|keyword| (*keyword).to_string())
            .collect(),
        }
    }
}

impl IngestOptions {
    /// Load options from a JSON file. Fields absent from the file keep
    /// their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, OptionsError> {
        let text = fs::read_to_string(path).map_err(|source| OptionsError::Read {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| OptionsError::Parse {
            path: path.display().to_string(),
            source,
        })
    }
}

/// Errors from loading an options file.
#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("read ingest options {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("parse ingest options {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
