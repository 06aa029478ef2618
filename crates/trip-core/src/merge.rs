//! Multi-source merging.

use tracing::{debug, info, warn};

use trip_ingest::{IngestOptions, ingest};
use trip_map::{RoleLexicon, classify_headers};
use trip_model::{
    MergedDataset, PROVENANCE_HEADER, RawSource, RowSet, SourceId,
};

use crate::error::MergeError;

/// Merge a batch of parsed sources into one dataset.
///
/// Sources are ingested in request order. A source that comes back empty
/// is recovered locally: its report is kept, a warning is logged, and its
/// siblings proceed. Headers union across sources in first-seen order with
/// the synthetic provenance header appended last; every unified row
/// materializes a value for every union header (absent ones as the empty
/// string) and carries its source id in the provenance cell.
///
/// Merging the same inputs twice produces row-for-row identical output.
pub fn merge(
    sources: &[(SourceId, RawSource)],
    options: &IngestOptions,
    lexicon: &RoleLexicon,
) -> Result<MergedDataset, MergeError> {
    let mut union_headers: Vec<String> = Vec::new();
    let mut per_source: Vec<(SourceId, RowSet)> = Vec::new();
    let mut reports = Vec::new();

    for (source_id, raw) in sources {
        match ingest(raw, source_id, options, lexicon) {
            Ok(ingested) => {
                for header in &ingested.headers {
                    if !union_headers.contains(header) {
                        union_headers.push(header.clone());
                    }
                }
                reports.push(ingested.report);
                let mut view = RowSet::new(ingested.headers);
                for row in ingested.rows {
                    view.push_row(row);
                }
                per_source.push((source_id.clone(), view));
            }
            Err(error) => {
                warn!(source = %source_id, %error, "source skipped");
                reports.push(error.report().clone());
            }
        }
    }

    union_headers.push(PROVENANCE_HEADER.to_string());

    let mut unified = RowSet::new(union_headers.clone());
    for (source_id, view) in &per_source {
        for row in &view.rows {
            // Independent copy: mutating the unified row must never reach
            // the per-source collection.
            let mut widened = row.clone();
            for header in &union_headers {
                widened
                    .values
                    .entry(header.clone())
                    .or_insert_with(String::new);
            }
            widened
                .values
                .insert(PROVENANCE_HEADER.to_string(), source_id.to_string());
            unified.push_row(widened);
        }
    }

    if unified.is_empty() {
        warn!("merge rejected: unified collection is empty");
        return Err(MergeError::NoData);
    }

    let role_map = classify_headers(&union_headers, lexicon);
    debug!(
        headers = union_headers.len(),
        classified = role_map.len(),
        "built union role map"
    );
    info!(
        sources = sources.len(),
        usable = per_source.len(),
        rows = unified.len(),
        "merged dataset"
    );

    Ok(MergedDataset {
        unified,
        sources: per_source,
        role_map,
        reports,
    })
}

#[cfg(test)]
mod tests {
    use trip_model::SemanticRole;

    use super::*;

    fn keyed(fields: &[&str], rows: &[&[(&str, &str)]]) -> RawSource {
        RawSource::Keyed {
            fields: fields.iter().map(|f| (*f).to_string()).collect(),
            rows: rows
                .iter()
                .map(|row| {
                    row.iter()
                        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                        .collect()
                })
                .collect(),
        }
    }

    fn two_sources() -> Vec<(SourceId, RawSource)> {
        vec![
            (
                SourceId::new("day1.csv"),
                keyed(&["Name", "Date"], &[&[("Name", "Wat Pho"), ("Date", "Jan 1")]]),
            ),
            (
                SourceId::new("day2.csv"),
                keyed(
                    &["Place", "Date"],
                    &[&[("Place", "Chinatown"), ("Date", "Jan 2")]],
                ),
            ),
        ]
    }

    fn run(sources: &[(SourceId, RawSource)]) -> Result<MergedDataset, MergeError> {
        merge(sources, &IngestOptions::default(), &RoleLexicon::default())
    }

    #[test]
    fn union_headers_keep_first_seen_order_with_provenance_last() {
        let dataset = run(&two_sources()).unwrap();
        assert_eq!(
            dataset.unified.headers,
            vec!["Name", "Date", "Place", PROVENANCE_HEADER]
        );
    }

    #[test]
    fn unified_rows_backfill_absent_headers_with_empty() {
        let dataset = run(&two_sources()).unwrap();
        assert_eq!(dataset.unified.len(), 2);
        assert_eq!(dataset.unified.rows[0].value("Place"), "");
        assert_eq!(dataset.unified.rows[1].value("Name"), "");
        assert_eq!(dataset.unified.rows[0].value(PROVENANCE_HEADER), "day1.csv");
        assert_eq!(dataset.unified.rows[1].value(PROVENANCE_HEADER), "day2.csv");
    }

    #[test]
    fn derived_fields_come_from_native_headers_only() {
        let dataset = run(&two_sources()).unwrap();
        // Row 1's source had no Zone/Place-free date ambiguity: its derived
        // date comes from its own "Date" header.
        assert_eq!(
            dataset.unified.rows[0].derived(SemanticRole::Date),
            Some("Jan 1")
        );
        // "Place" exists only in day2.csv; day1's row must not borrow it.
        assert_eq!(
            dataset.unified.rows[0].derived(SemanticRole::Place),
            Some("Wat Pho")
        );
        assert_eq!(
            dataset.unified.rows[1].derived(SemanticRole::Place),
            Some("Chinatown")
        );
    }

    #[test]
    fn per_source_views_keep_native_headers() {
        let dataset = run(&two_sources()).unwrap();
        let day1 = dataset.view_for(&SourceId::new("day1.csv")).unwrap();
        assert_eq!(day1.headers, vec!["Name", "Date"]);
        assert_eq!(day1.len(), 1);
    }

    #[test]
    fn unified_rows_are_independent_copies() {
        let mut dataset = run(&two_sources()).unwrap();
        dataset.unified.rows[0]
            .values
            .insert("Name".to_string(), "MUTATED".to_string());
        let day1 = dataset.view_for(&SourceId::new("day1.csv")).unwrap();
        assert_eq!(day1.rows[0].value("Name"), "Wat Pho");
    }

    #[test]
    fn merge_is_idempotent() {
        let sources = two_sources();
        let first = run(&sources).unwrap();
        let second = run(&sources).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn empty_source_is_recovered_locally() {
        let mut sources = two_sources();
        sources.push((
            SourceId::new("legend.csv"),
            keyed(&["Note"], &[&[("Note", "ค่าเข้า 100 บาท")]]),
        ));
        let dataset = run(&sources).unwrap();
        assert_eq!(dataset.unified.len(), 2);
        assert_eq!(dataset.reports.len(), 3);
        assert!(dataset.reports[2].is_empty());
        assert_eq!(dataset.sources.len(), 2);
    }

    #[test]
    fn all_sources_empty_is_no_data() {
        let sources = vec![(
            SourceId::new("legend.csv"),
            keyed(&["Note"], &[&[("Note", "ค่าเข้า 100 บาท")]]),
        )];
        assert!(matches!(run(&sources), Err(MergeError::NoData)));
    }
}
