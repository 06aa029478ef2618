//! Delimited-text parsing, delegated to the `csv` crate.

use std::collections::BTreeMap;

use csv::ReaderBuilder;

use trip_model::RawSource;

/// Parse one source's text into the header-keyed shape.
///
/// The reader is flexible: short records key only the fields they have,
/// and downstream normalization pads the rest with empty cells.
pub fn parse_csv(text: &str) -> Result<RawSource, csv::Error> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());
    let fields: Vec<String> = reader
        .headers()?
        .iter()
        .map(|header| header.to_string())
        .collect();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row: BTreeMap<String, String> = fields
            .iter()
            .enumerate()
            .map(|(position, field)| {
                let value = record.get(position).unwrap_or("");
                (field.clone(), value.to_string())
            })
            .collect();
        rows.push(row);
    }
    Ok(RawSource::Keyed { fields, rows })
}
