//! Merge per-file reports into one report: flag manifest entries that
//! never loaded, compute the aggregate ratio and fix the listing order.

use crate::model::{rate, CoverageReport, FileEntry, FileReport, MissingFile};

/// Combine the analyzed reports with an expected-file manifest.
///
/// A manifest path counts as present when some analyzed entry's original
/// URL ends with it; anything else becomes a zero-ratio missing row. The
/// aggregate ratio sums bytes over analyzed files only, so missing files
/// surface in the listing without dragging an otherwise-clean ratio down.
#[must_use]
pub fn aggregate(analyzed: Vec<FileReport>, manifest: &[String]) -> CoverageReport {
    let missing: Vec<String> = manifest
        .iter()
        .filter(|path| {
            !analyzed
                .iter()
                .any(|report| report.source_url.ends_with(path.as_str()))
        })
        .cloned()
        .collect();

    let covered: u64 = analyzed.iter().map(|report| report.covered_bytes).sum();
    let total: u64 = analyzed.iter().map(|report| report.total_bytes).sum();
    let ratio = rate(covered, total);

    let mut files: Vec<FileEntry> = analyzed.into_iter().map(FileEntry::Analyzed).collect();
    files.extend(
        missing
            .iter()
            .map(|url| FileEntry::Missing(MissingFile::new(url.clone()))),
    );
    // Case-insensitive, with a byte-order tiebreak so equal-ignoring-case
    // URLs still sort the same way on every platform.
    files.sort_by_cached_key(|entry| (entry.url().to_lowercase(), entry.url().to_string()));

    CoverageReport {
        files,
        missing,
        ratio,
    }
}
