//! Concurrent retrieval with an all-or-nothing join.

use std::fs;
use std::thread;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, warn};

use trip_model::{RawSource, SourceId};

use crate::parse::parse_csv;
use crate::source::{Locator, SourceSpec};

/// HTTP request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// The whole-load retrieval failure: every failed source with its reason.
///
/// Retrieval is all-or-nothing; this error means the merge step never ran
/// and the caller's previous dataset (if any) is still the active one.
#[derive(Debug, Error)]
#[error("{} of {total} source(s) failed to load: {}", .failures.len(), describe(.failures))]
pub struct FetchError {
    pub total: usize,
    /// Failed sources in request order.
    pub failures: Vec<(SourceId, String)>,
}

fn describe(failures: &[(SourceId, String)]) -> String {
    failures
        .iter()
        .map(|(source, reason)| format!("{source} ({reason})"))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Retrieve every source's raw text, all sources concurrently, joining all
/// of them before returning. If any retrieval fails the whole call fails.
pub fn fetch_all(specs: &[SourceSpec]) -> Result<Vec<(SourceId, String)>, FetchError> {
    let results: Vec<Result<String, String>> = thread::scope(|scope| {
        let handles: Vec<_> = specs
            .iter()
            .map(|spec| scope.spawn(move || retrieve(spec)))
            .collect();
        handles
            .into_iter()
            .map(|handle| {
                handle
                    .join()
                    .unwrap_or_else(|_| Err("retrieval thread panicked".to_string()))
            })
            .collect()
    });

    let mut fetched = Vec::new();
    let mut failures = Vec::new();
    for (spec, result) in specs.iter().zip(results) {
        match result {
            Ok(text) => {
                debug!(source = %spec.id, bytes = text.len(), "fetched source");
                fetched.push((spec.id.clone(), text));
            }
            Err(reason) => {
                warn!(source = %spec.id, reason, "fetch failed");
                failures.push((spec.id.clone(), reason));
            }
        }
    }
    if failures.is_empty() {
        Ok(fetched)
    } else {
        Err(FetchError {
            total: specs.len(),
            failures,
        })
    }
}

/// Fetch and parse every source. A text that fails to parse counts as a
/// load failure like an unreachable source would.
pub fn load_sources(specs: &[SourceSpec]) -> Result<Vec<(SourceId, RawSource)>, FetchError> {
    let fetched = fetch_all(specs)?;
    let mut parsed = Vec::new();
    let mut failures = Vec::new();
    for (source, text) in fetched {
        match parse_csv(&text) {
            Ok(raw) => parsed.push((source, raw)),
            Err(error) => {
                warn!(source = %source, %error, "parse failed");
                failures.push((source, error.to_string()));
            }
        }
    }
    if failures.is_empty() {
        Ok(parsed)
    } else {
        Err(FetchError {
            total: specs.len(),
            failures,
        })
    }
}

fn retrieve(spec: &SourceSpec) -> Result<String, String> {
    match &spec.locator {
        Locator::Path(path) => {
            fs::read_to_string(path).map_err(|error| format!("read {}: {error}", path.display()))
        }
        Locator::Url(url) => {
            let client = reqwest::blocking::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .map_err(|error| format!("build http client: {error}"))?;
            let response = client
                .get(url)
                .send()
                .map_err(|error| format!("get {url}: {error}"))?;
            if !response.status().is_success() {
                return Err(format!("get {url}: status {}", response.status()));
            }
            response
                .text()
                .map_err(|error| format!("read body of {url}: {error}"))
        }
    }
}
