//! The shape the external parser hands to ingestion.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One parsed source as produced by the delimited-text parser.
///
/// Parsers emit either header-keyed records together with the field list,
/// or bare positional rows whose first row is the header row. Ingestion
/// normalizes both to header-keyed rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RawSource {
    /// Field list plus header-keyed records (the preferred shape).
    Keyed {
        fields: Vec<String>,
        rows: Vec<BTreeMap<String, String>>,
    },
    /// Positional rows; the first row is taken as the header row.
    Positional { rows: Vec<Vec<String>> },
}

impl RawSource {
    /// Number of data rows the parser produced (the positional header row
    /// does not count).
    #[must_use]
    pub fn record_count(&self) -> usize {
        match self {
            Self::Keyed { rows, .. } => rows.len(),
            Self::Positional { rows } => rows.len().saturating_sub(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_record_count_excludes_header_row() {
        let raw = RawSource::Positional {
            rows: vec![
                vec!["Date".to_string(), "Place".to_string()],
                vec!["Jan 1".to_string(), "Wat Pho".to_string()],
            ],
        };
        assert_eq!(raw.record_count(), 1);

        let empty = RawSource::Positional { rows: Vec::new() };
        assert_eq!(empty.record_count(), 0);
    }
}
