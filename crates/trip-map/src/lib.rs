//! Header classification: maps raw column header strings to semantic roles
//! by ordered, case-insensitive keyword matching.

pub mod classify;
pub mod lexicon;

pub use classify::{classify, classify_headers};
pub use lexicon::RoleLexicon;
