//! Source descriptors.

use std::path::PathBuf;

use trip_model::SourceId;

/// Where one source's delimited text lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    Path(PathBuf),
    Url(String),
}

/// One requested source: its id plus the locator to retrieve it from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSpec {
    pub id: SourceId,
    pub locator: Locator,
}

impl SourceSpec {
    /// Build a spec from a command-line argument: anything with an http(s)
    /// scheme is a URL, everything else a filesystem path. The argument
    /// itself becomes the source id.
    #[must_use]
    pub fn from_arg(arg: &str) -> Self {
        let locator = if arg.starts_with("http://") || arg.starts_with("https://") {
            Locator::Url(arg.to_string())
        } else {
            Locator::Path(PathBuf::from(arg))
        };
        Self {
            id: SourceId::new(arg),
            locator,
        }
    }
}
