//! Query evaluation: combined facet + free-text predicate over one view.

use tracing::trace;

use trip_map::RoleLexicon;
use trip_model::{ANY_SENTINEL, Row, RowSet, SemanticRole};

use crate::facets::facet_value;

/// The active filter inputs. All fields are optional restrictions; the
/// default value restricts nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Criteria {
    /// Date facet value; `None` or the "any" sentinel means unrestricted.
    pub date: Option<String>,
    /// Zone facet value; same convention as `date`.
    pub zone: Option<String>,
    /// Loose place filter: matches the derived place value or any raw cell.
    pub place: String,
    /// Column to search; `None` or the "any" sentinel means every header.
    pub column: Option<String>,
    /// Free-text query. Empty means unrestricted.
    pub query: String,
    /// When set, a cell must equal the query (case-insensitively) instead
    /// of merely containing it.
    pub whole_word: bool,
}

impl Criteria {
    /// True when nothing restricts the result.
    #[must_use]
    pub fn is_clear(&self) -> bool {
        self == &Self::default()
            || (facet_restriction(self.date.as_deref()).is_none()
                && facet_restriction(self.zone.as_deref()).is_none()
                && self.place.trim().is_empty()
                && self.query.trim().is_empty())
    }
}

/// Evaluate the criteria against a row collection.
///
/// Order-preserving: the result is a subsequence of `view.rows`. The input
/// is never mutated. All text matching is case-insensitive and literal;
/// no pattern syntax is interpreted, so metacharacters in the query need
/// no escaping.
#[must_use]
pub fn evaluate<'a>(
    view: &'a RowSet,
    criteria: &Criteria,
    lexicon: &RoleLexicon,
) -> Vec<&'a Row> {
    let date_want = facet_restriction(criteria.date.as_deref());
    let zone_want = facet_restriction(criteria.zone.as_deref());
    let place_needle = non_empty(&criteria.place).map(str::to_lowercase);
    let query_needle = non_empty(&criteria.query).map(str::to_lowercase);
    let target_column = criteria
        .column
        .as_deref()
        .filter(|column| *column != ANY_SENTINEL);

    let matched: Vec<&Row> = view
        .rows
        .iter()
        .filter(|row| {
            facet_passes(row, SemanticRole::Date, date_want, view, lexicon)
                && facet_passes(row, SemanticRole::Zone, zone_want, view, lexicon)
                && place_passes(row, place_needle.as_deref(), view)
                && text_passes(
                    row,
                    query_needle.as_deref(),
                    target_column,
                    view,
                    criteria.whole_word,
                )
        })
        .collect();
    trace!(
        total = view.rows.len(),
        matched = matched.len(),
        "evaluated criteria"
    );
    matched
}

/// A facet restricts only when set to something other than the sentinel
/// and non-blank. The restriction value is the trimmed criterion.
fn facet_restriction(facet: Option<&str>) -> Option<&str> {
    let trimmed = facet?.trim();
    if trimmed.is_empty() || trimmed == ANY_SENTINEL {
        None
    } else {
        Some(trimmed)
    }
}

fn non_empty(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    if trimmed.is_empty() { None } else { Some(trimmed) }
}

/// Exact comparison against the row's facet value, as stored. Ingestion
/// trims cell text, so stored values carry no outer whitespace; a value
/// that differs even by a trailing space does not match.
fn facet_passes(
    row: &Row,
    role: SemanticRole,
    want: Option<&str>,
    view: &RowSet,
    lexicon: &RoleLexicon,
) -> bool {
    let Some(want) = want else {
        return true;
    };
    facet_value(row, role, view, lexicon) == Some(want)
}

/// Place matching is deliberately looser than the other facets: the
/// derived place OR any raw cell may contain the needle, since place
/// names vary in formatting across sources.
fn place_passes(row: &Row, needle: Option<&str>, view: &RowSet) -> bool {
    let Some(needle) = needle else {
        return true;
    };
    if row
        .derived(SemanticRole::Place)
        .is_some_and(|place| place.to_lowercase().contains(needle))
    {
        return true;
    }
    view.headers
        .iter()
        .any(|header| row.value(header).to_lowercase().contains(needle))
}

fn text_passes(
    row: &Row,
    needle: Option<&str>,
    target_column: Option<&str>,
    view: &RowSet,
    whole_word: bool,
) -> bool {
    let Some(needle) = needle else {
        return true;
    };
    let cell_matches = |header: &str| {
        let value = row.value(header).to_lowercase();
        if whole_word {
            value == needle
        } else {
            value.contains(needle)
        }
    };
    match target_column {
        Some(column) => cell_matches(column),
        None => view.headers.iter().any(|header| cell_matches(header)),
    }
}
