//! End-to-end pipeline: parse a dump, filter entries, analyze each file
//! and aggregate the results.

use std::fmt;

use crate::aggregate::aggregate;
use crate::analyze::analyze;
use crate::error::Result;
use crate::filter::{default_filter, filter_entries};
use crate::model::{CoverageReport, FileReport, RawEntry};

/// Pipeline configuration: which entries to analyze and which source
/// paths must show up.
pub struct ProcessOptions {
    pub filter: Box<dyn Fn(&RawEntry) -> bool + Send + Sync>,
    pub manifest: Vec<String>,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            filter: Box::new(default_filter),
            manifest: Vec::new(),
        }
    }
}

impl fmt::Debug for ProcessOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessOptions")
            .field("manifest", &self.manifest)
            .finish_non_exhaustive()
    }
}

impl ProcessOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the entry predicate.
    #[must_use]
    pub fn with_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&RawEntry) -> bool + Send + Sync + 'static,
    {
        self.filter = Box::new(filter);
        self
    }

    /// Analyze every entry in the dump, dev-server noise included.
    #[must_use]
    pub fn keep_all(self) -> Self {
        self.with_filter(|_| true)
    }

    /// Paths that must appear among the observed URLs; unmatched ones are
    /// reported as missing.
    #[must_use]
    pub fn with_manifest(mut self, manifest: Vec<String>) -> Self {
        self.manifest = manifest;
        self
    }
}

/// Run the full pipeline over already-parsed entries.
#[must_use]
pub fn process(entries: Vec<RawEntry>, options: &ProcessOptions) -> CoverageReport {
    let kept = filter_entries(entries, |entry| (options.filter)(entry));
    let analyzed: Vec<FileReport> = kept.iter().map(analyze).collect();
    aggregate(analyzed, &options.manifest)
}

/// Parse a raw profiler dump (a JSON array of entries) and run the
/// pipeline over it.
pub fn process_json(json: &str, options: &ProcessOptions) -> Result<CoverageReport> {
    let entries: Vec<RawEntry> = serde_json::from_str(json)?;
    Ok(process(entries, options))
}
