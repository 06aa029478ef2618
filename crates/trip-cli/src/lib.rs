//! Reusable pieces of the CLI binary.
//!
//! The binary's command plumbing lives in `main.rs`; logging setup is
//! exposed here so integration tests can configure it the same way.

pub mod logging;
