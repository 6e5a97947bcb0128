//! Typed in-memory representation of the profiler dump and the normalized
//! report derived from it. Sources hand raw JSON to `process`; everything
//! downstream works with these types only.

use serde::{Deserialize, Serialize};

/// Compute a coverage ratio, returning 0.0 when the total is zero.
/// Zero-byte files therefore report 0.0, never NaN; the same rule covers
/// the aggregate ratio when no files were analyzed at all.
#[must_use]
pub fn rate(covered: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        covered as f64 / total as f64
    }
}

/// A contiguous byte span of a script recorded as executed during the
/// profiling session.
///
/// Spans within an entry are assumed non-overlapping and ascending by
/// `start`. That is not validated: the profiler is trusted, and malformed
/// spans yield incorrect accounting (see `analyze`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ByteRange {
    pub start: usize,
    pub end: usize,
}

impl ByteRange {
    /// Length in bytes. An inverted span counts as zero.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One observed resource from the profiler dump: its URL, the full source
/// text, and the executed spans. Extra keys in the dump (script ids, hit
/// counts) are ignored. Read-only to the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEntry {
    pub url: String,
    pub text: String,
    pub ranges: Vec<ByteRange>,
}

/// Byte accounting for a single analyzed file.
///
/// `url` is the display form with the scheme and host stripped;
/// `source_url` keeps the original for manifest suffix matching and is not
/// serialized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileReport {
    pub url: String,
    #[serde(skip)]
    pub source_url: String,
    pub total_bytes: u64,
    /// Bytes the profiler saw execute.
    pub used_bytes: u64,
    /// Gap bytes reclassified as covered because they hold only
    /// whitespace and closing braces.
    pub uncovered_whitespace_bytes: u64,
    pub covered_bytes: u64,
    pub ratio: f64,
    /// Human-readable excerpts of genuinely uncovered gaps, in source
    /// order. Absent from JSON output when empty.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub uncovered_chunks: Vec<String>,
}

/// Placeholder row for an expected file with no observed coverage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingFile {
    pub url: String,
    /// Always 0.0; the file never loaded.
    pub ratio: f64,
}

impl MissingFile {
    #[must_use]
    pub fn new(url: String) -> Self {
        Self { url, ratio: 0.0 }
    }
}

/// One row of the final per-file listing: a fully analyzed file, or a
/// manifest entry that was never loaded and so has no byte counts.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FileEntry {
    Analyzed(FileReport),
    Missing(MissingFile),
}

impl FileEntry {
    /// URL shown in the report listing.
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            FileEntry::Analyzed(report) => &report.url,
            FileEntry::Missing(missing) => &missing.url,
        }
    }

    #[must_use]
    pub fn ratio(&self) -> f64 {
        match self {
            FileEntry::Analyzed(report) => report.ratio,
            FileEntry::Missing(missing) => missing.ratio,
        }
    }

    /// Uncovered excerpts, when the entry was analyzed and has any.
    #[must_use]
    pub fn uncovered_chunks(&self) -> &[String] {
        match self {
            FileEntry::Analyzed(report) => &report.uncovered_chunks,
            FileEntry::Missing(_) => &[],
        }
    }

    #[must_use]
    pub fn is_missing(&self) -> bool {
        matches!(self, FileEntry::Missing(_))
    }
}

/// The final artifact: the sorted per-file listing, the manifest entries
/// that never loaded, and the aggregate byte ratio over analyzed files.
/// Immutable once built; the same input always yields an identical value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverageReport {
    pub files: Vec<FileEntry>,
    pub missing: Vec<String>,
    pub ratio: f64,
}
