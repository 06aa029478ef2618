//! The merged multi-source dataset and per-source ingest reporting.

use serde::{Deserialize, Serialize};

use crate::{RoleMap, RowSet, SourceId};

/// What ingestion did with one source's records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceReport {
    pub source: SourceId,
    /// Records the parser produced for this source.
    pub parsed: usize,
    /// Rows dropped because every cell was empty.
    pub dropped_blank: usize,
    /// Rows dropped by the metadata-footer heuristic.
    pub dropped_footer: usize,
    /// Rows that survived filtering.
    pub kept: usize,
}

impl SourceReport {
    #[must_use]
    pub fn new(source: SourceId) -> Self {
        Self {
            source,
            parsed: 0,
            dropped_blank: 0,
            dropped_footer: 0,
            kept: 0,
        }
    }

    /// True when filtering left nothing usable for this source.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kept == 0
    }
}

/// The merged, multi-source view of the dataset: the unified row collection,
/// each source's native collection, the union header role map, and the
/// per-source ingest reports.
///
/// Rebuilt from scratch on every (re)load and replaced atomically: the
/// unified and per-source collections always describe the same load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergedDataset {
    /// All sources' rows, concatenated in request order, each row widened
    /// to the union header list. Independent copies of the per-source rows.
    pub unified: RowSet,
    /// Each source's native view, in request order.
    pub sources: Vec<(SourceId, RowSet)>,
    /// Role map covering the union header list.
    pub role_map: RoleMap,
    /// One report per requested source, in request order.
    pub reports: Vec<SourceReport>,
}

impl MergedDataset {
    /// Source ids in request order.
    #[must_use]
    pub fn source_ids(&self) -> Vec<&SourceId> {
        self.sources.iter().map(|(id, _)| id).collect()
    }

    /// A single source's native view.
    #[must_use]
    pub fn view_for(&self, source: &SourceId) -> Option<&RowSet> {
        self.sources
            .iter()
            .find(|(id, _)| id == source)
            .map(|(_, view)| view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_lookup_by_source() {
        let day1 = SourceId::new("day1.csv");
        let day2 = SourceId::new("day2.csv");
        let dataset = MergedDataset {
            sources: vec![
                (day1.clone(), RowSet::new(vec!["A".to_string()])),
                (day2.clone(), RowSet::new(vec!["B".to_string()])),
            ],
            ..MergedDataset::default()
        };

        assert_eq!(dataset.source_ids(), vec![&day1, &day2]);
        assert_eq!(
            dataset.view_for(&day1).map(|view| view.headers.as_slice()),
            Some(&["A".to_string()][..])
        );
        assert!(dataset.view_for(&SourceId::new("missing.csv")).is_none());
    }

    #[test]
    fn empty_report_means_zero_kept() {
        let report = SourceReport {
            source: SourceId::new("legend.csv"),
            parsed: 4,
            dropped_blank: 1,
            dropped_footer: 3,
            kept: 0,
        };
        assert!(report.is_empty());
    }
}
