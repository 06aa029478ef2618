//! Merge-level errors.

use thiserror::Error;

/// Errors from merging a batch of sources.
#[derive(Debug, Error)]
pub enum MergeError {
    /// Every source came back empty: the merge is rejected wholesale and
    /// the previously installed dataset (if any) stays active.
    #[error("no rows in any source after filtering")]
    NoData,
}
