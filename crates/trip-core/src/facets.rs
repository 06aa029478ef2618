//! Facet option lists.

use tracing::debug;

use trip_map::{RoleLexicon, classify};
use trip_model::{ANY_SENTINEL, Row, RowSet, SemanticRole};

/// True when some header of the view classifies into `role`.
pub(crate) fn view_has_role(view: &RowSet, role: SemanticRole, lexicon: &RoleLexicon) -> bool {
    view.headers
        .iter()
        .any(|header| classify(header, lexicon) == Some(role))
}

/// The value a row contributes to a facet: its derived value when the view
/// has a header for the role, otherwise the positional fallback column
/// (first header for date, second for zone). The fallback is a documented
/// degrade-gracefully policy for unheadered or misclassified sources, not
/// an accident.
pub(crate) fn facet_value<'a>(
    row: &'a Row,
    role: SemanticRole,
    view: &'a RowSet,
    lexicon: &RoleLexicon,
) -> Option<&'a str> {
    if view_has_role(view, role, lexicon) {
        return row.derived(role);
    }
    let header = role
        .positional_fallback()
        .and_then(|position| view.header_at(position))?;
    debug!(role = %role, header, "facet using positional fallback column");
    let value = row.value(header);
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Distinct values observed for one role across a row collection,
/// first-seen order, prefixed with the "any" sentinel.
///
/// Never cached: recompute whenever the active collection changes.
#[must_use]
pub fn options_for(role: SemanticRole, view: &RowSet, lexicon: &RoleLexicon) -> Vec<String> {
    let mut options = vec![ANY_SENTINEL.to_string()];
    for row in &view.rows {
        let Some(value) = facet_value(row, role, view, lexicon) else {
            continue;
        };
        if !options.iter().skip(1).any(|seen| seen == value) {
            options.push(value.to_string());
        }
    }
    options
}
