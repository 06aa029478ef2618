//! Identifier newtypes for sources and rows.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::Digest;

/// Opaque name for one originating delimited-text resource (a path or URL).
/// Immutable once a batch of rows has been ingested under it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceId(String);

impl SourceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SourceId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Stable row identity derived from the owning source and record number.
///
/// Two loads of the same inputs assign the same ids, which is what makes
/// merge idempotence checkable row-for-row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RowId([u8; 16]);

impl RowId {
    /// Deterministic: sha256("<source_id>\0<record_number>"), first 16 bytes.
    #[must_use]
    pub fn derive(source_id: &SourceId, record_number: u64) -> Self {
        let mut hasher = sha2::Sha256::new();
        hasher.update(source_id.as_str().as_bytes());
        hasher.update([0u8]);
        hasher.update(record_number.to_string().as_bytes());
        let digest: [u8; 32] = hasher.finalize().into();
        let mut first = [0u8; 16];
        first.copy_from_slice(&digest[..16]);
        Self(first)
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}
