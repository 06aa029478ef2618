//! Source retrieval and parsing.
//!
//! Retrieval is the only concurrent part of the system: every source is
//! fetched on its own thread and the load joins all of them before any
//! merging happens. One failed source fails the whole load; no partial
//! subset ever reaches the merger.

pub mod fetch;
pub mod parse;
pub mod source;

pub use fetch::{FetchError, fetch_all, load_sources};
pub use parse::parse_csv;
pub use source::{Locator, SourceSpec};
