/// Acquisition of raw profiler dumps. Fetching is the only I/O in the
/// program and happens strictly before the pipeline runs.
///
/// The [`CoverageSource`] trait abstracts over where the dump comes from
/// (a file, stdin, or an HTTP endpoint serving the profiler output).
use std::path::PathBuf;

use anyhow::{Context, Result};

/// A source for obtaining a raw coverage dump.
pub trait CoverageSource {
    /// Fetch the dump text.
    fn fetch(&self) -> Result<String>;
}

/// Dump from a file on disk.
pub struct FileSource {
    pub path: PathBuf,
}

impl CoverageSource for FileSource {
    fn fetch(&self) -> Result<String> {
        std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read coverage dump from {}", self.path.display()))
    }
}

/// Dump from stdin.
pub struct StdinSource;

impl CoverageSource for StdinSource {
    fn fetch(&self) -> Result<String> {
        std::io::read_to_string(std::io::stdin()).context("Failed to read coverage dump from stdin")
    }
}

/// Dump fetched over HTTP, for dev servers that expose the collected
/// profiler output on an endpoint.
pub struct UrlSource {
    pub url: String,
}

impl CoverageSource for UrlSource {
    fn fetch(&self) -> Result<String> {
        let resp = ureq::get(&self.url)
            .call()
            .with_context(|| format!("Failed to fetch coverage dump from {}", self.url))?;
        resp.into_string()
            .context("Failed to read coverage dump response body")
    }
}
