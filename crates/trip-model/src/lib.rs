//! Data model for the itinerary viewer: sources, rows, headers, and the
//! semantic roles inferred from header text.

pub mod dataset;
pub mod ids;
pub mod raw;
pub mod role;
pub mod table;

pub use dataset::{MergedDataset, SourceReport};
pub use ids::{RowId, SourceId};
pub use raw::RawSource;
pub use role::{RoleMap, SemanticRole};
pub use table::{Row, RowSet};

/// Sentinel option meaning "no restriction" in facet lists and the
/// column selector. Distinct from any real data value.
pub const ANY_SENTINEL: &str = "__any__";

/// Synthetic header appended last to the union header list; its per-row
/// value mirrors the row's source id.
pub const PROVENANCE_HEADER: &str = "_source";
