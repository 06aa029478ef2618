//! Rows and row collections.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{RowId, SemanticRole, SourceId};

/// One ingested record: header-keyed cell values plus derived per-role
/// values computed once from the row's native header set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pub id: RowId,
    /// Owning source, set at ingestion and never mutated afterwards.
    pub source: SourceId,
    /// Header -> cell value. Missing cells are the empty string.
    pub values: BTreeMap<String, String>,
    /// Role -> first non-empty trimmed value of any native header bearing
    /// that role. Absent when no native header carries the role.
    pub derived: BTreeMap<SemanticRole, String>,
}

impl Row {
    /// Cell value under `header`, or the empty string.
    #[must_use]
    pub fn value(&self, header: &str) -> &str {
        self.values.get(header).map_or("", String::as_str)
    }

    /// Derived value for `role`, if any native header carried it.
    #[must_use]
    pub fn derived(&self, role: SemanticRole) -> Option<&str> {
        self.derived.get(&role).map(String::as_str)
    }
}

/// An ordered row collection together with the header list that gives its
/// columns display order. Insertion order is parse order within a source;
/// merged collections concatenate sources in request order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowSet {
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

impl RowSet {
    #[must_use]
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Header at `position`, used by the positional facet fallback.
    #[must_use]
    pub fn header_at(&self, position: usize) -> Option<&str> {
        self.headers.get(position).map(String::as_str)
    }
}
