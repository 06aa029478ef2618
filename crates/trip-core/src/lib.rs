//! The viewer core: merges ingested sources into a unified dataset and
//! answers facet/search queries over it.
//!
//! Nothing in this crate touches a rendering surface; the presentation
//! layer consumes row collections, facet option lists, and query results
//! through [`Session`] and re-renders whatever it gets back.

pub mod error;
pub mod facets;
pub mod merge;
pub mod query;
pub mod session;

pub use error::MergeError;
pub use facets::options_for;
pub use merge::merge;
pub use query::{Criteria, evaluate};
pub use session::{LoadOutcome, LoadToken, Session, SessionObserver, SourceScope};
