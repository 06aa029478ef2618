//! Semantic roles inferred from column header text.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Normalized category a column header can carry.
///
/// Classification is ordered: a header naming both a place and a date must
/// resolve to exactly one role, and earlier variants win. Headers matching
/// no role carry none (`Option<SemanticRole>` at the classification seam).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SemanticRole {
    Date,
    Place,
    Details,
    Transport,
    Zone,
    Recommend,
}

impl SemanticRole {
    /// All roles in classification precedence order.
    pub const ALL: [Self; 6] = [
        Self::Date,
        Self::Place,
        Self::Details,
        Self::Transport,
        Self::Zone,
        Self::Recommend,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Place => "place",
            Self::Details => "details",
            Self::Transport => "transport",
            Self::Zone => "zone",
            Self::Recommend => "recommend",
        }
    }

    /// Zero-based header position used when a view has no header classified
    /// into this role. Only the facet roles degrade positionally.
    #[must_use]
    pub fn positional_fallback(self) -> Option<usize> {
        match self {
            Self::Date => Some(0),
            Self::Zone => Some(1),
            _ => None,
        }
    }
}

impl fmt::Display for SemanticRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Header string to role mapping for one view's header set.
///
/// Recomputed whenever the active header set changes; headers classifying
/// to no role are simply absent.
pub type RoleMap = BTreeMap<String, SemanticRole>;
