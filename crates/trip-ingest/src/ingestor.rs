//! The row ingestor.

use std::collections::BTreeMap;

use tracing::debug;

use trip_map::{RoleLexicon, classify_headers};
use trip_model::{RawSource, RoleMap, Row, RowId, SemanticRole, SourceId, SourceReport};

use crate::error::{IngestError, Result};
use crate::options::IngestOptions;

/// One source after normalization and filtering.
#[derive(Debug, Clone)]
pub struct IngestedSource {
    /// The source's native header list, parse order.
    pub headers: Vec<String>,
    /// Surviving rows, parse order, each tagged with the source id.
    pub rows: Vec<Row>,
    pub report: SourceReport,
}

/// Normalize one parsed source into header-keyed rows.
///
/// Both parser shapes are accepted: header-keyed records with a field list,
/// or positional rows whose first row is the header row. Blank rows and
/// rows matching the metadata-footer heuristic are dropped. Every
/// surviving row carries its source id, a deterministic row id, and the
/// derived per-role values computed from this source's own header set.
pub fn ingest(
    raw: &RawSource,
    source_id: &SourceId,
    options: &IngestOptions,
    lexicon: &RoleLexicon,
) -> Result<IngestedSource> {
    let mut report = SourceReport::new(source_id.clone());
    let (headers, records) = normalize_shape(raw);
    report.parsed = records.len();

    if headers.is_empty() {
        debug!(source = %source_id, "no recoverable header information");
        return Err(IngestError::EmptyResult { report });
    }

    let role_map = classify_headers(&headers, lexicon);
    let footer_keywords: Vec<String> = options
        .footer_keywords
        .iter()
        .map(|keyword| keyword.to_lowercase())
        .collect();

    let mut rows = Vec::new();
    for (index, record) in records.iter().enumerate() {
        if record.values().all(|value| value.trim().is_empty()) {
            report.dropped_blank += 1;
            continue;
        }
        if is_footer_row(record, &headers, &footer_keywords) {
            report.dropped_footer += 1;
            continue;
        }
        let record_number = (index as u64) + 1;
        rows.push(build_row(
            source_id,
            record_number,
            &headers,
            record,
            &role_map,
        ));
    }

    report.kept = rows.len();
    debug!(
        source = %source_id,
        parsed = report.parsed,
        blank = report.dropped_blank,
        footer = report.dropped_footer,
        kept = report.kept,
        "ingested source"
    );

    if rows.is_empty() {
        return Err(IngestError::EmptyResult { report });
    }
    Ok(IngestedSource {
        headers,
        rows,
        report,
    })
}

/// Both input shapes reduce to a header list plus header-keyed records.
fn normalize_shape(raw: &RawSource) -> (Vec<String>, Vec<BTreeMap<String, String>>) {
    match raw {
        RawSource::Keyed { fields, rows } => {
            let headers: Vec<String> = fields.iter().map(|field| normalize_header(field)).collect();
            let records = rows
                .iter()
                .map(|row| {
                    headers
                        .iter()
                        .zip(fields.iter())
                        .map(|(header, field)| {
                            let value = row.get(field).or_else(|| row.get(header));
                            (
                                header.clone(),
                                value.map_or_else(String::new, |cell| normalize_cell(cell)),
                            )
                        })
                        .collect()
                })
                .collect();
            (headers, records)
        }
        RawSource::Positional { rows } => {
            let Some((header_row, data_rows)) = rows.split_first() else {
                return (Vec::new(), Vec::new());
            };
            let headers: Vec<String> =
                header_row.iter().map(|token| normalize_header(token)).collect();
            let records = data_rows
                .iter()
                .map(|row| {
                    headers
                        .iter()
                        .enumerate()
                        .map(|(position, header)| {
                            let value = row.get(position).map_or("", String::as_str);
                            (header.clone(), normalize_cell(value))
                        })
                        .collect()
                })
                .collect();
            (headers, records)
        }
    }
}

/// Legend/footer heuristic: the case-folded concatenation of the row's
/// cells contains a configured footer keyword, or every cell value is
/// itself one of the known header strings (a parser that re-emits the
/// header row as data).
fn is_footer_row(
    record: &BTreeMap<String, String>,
    headers: &[String],
    footer_keywords: &[String],
) -> bool {
    let concatenated = record
        .values()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    if footer_keywords
        .iter()
        .any(|keyword| !keyword.is_empty() && concatenated.contains(keyword))
    {
        return true;
    }
    record
        .values()
        .all(|value| headers.iter().any(|header| header == value))
}

fn build_row(
    source_id: &SourceId,
    record_number: u64,
    headers: &[String],
    record: &BTreeMap<String, String>,
    role_map: &RoleMap,
) -> Row {
    let values: BTreeMap<String, String> = headers
        .iter()
        .map(|header| {
            (
                header.clone(),
                record.get(header).cloned().unwrap_or_default(),
            )
        })
        .collect();
    let derived = derive_fields(headers, &values, role_map);
    Row {
        id: RowId::derive(source_id, record_number),
        source: source_id.clone(),
        values,
        derived,
    }
}

/// Role -> first non-empty trimmed value of any header bearing that role,
/// walking headers in parse order.
fn derive_fields(
    headers: &[String],
    values: &BTreeMap<String, String>,
    role_map: &RoleMap,
) -> BTreeMap<SemanticRole, String> {
    let mut derived = BTreeMap::new();
    for header in headers {
        let Some(role) = role_map.get(header) else {
            continue;
        };
        if derived.contains_key(role) {
            continue;
        }
        let trimmed = values.get(header).map_or("", |value| value.trim());
        if !trimmed.is_empty() {
            derived.insert(*role, trimmed.to_string());
        }
    }
    derived
}

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}
