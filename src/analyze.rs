//! Per-file byte accounting. Walks the complement of the executed spans,
//! reclassifies formatting-only gaps as covered, and renders the rest as
//! line-tagged excerpts.

use std::sync::LazyLock;

use regex::Regex;

use crate::model::{rate, ByteRange, FileReport, RawEntry};

static NOISE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[\s}]*$").unwrap());

static HOST_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://[^/]+/").unwrap());

/// Decides whether an uncovered gap is formatting noise rather than
/// skipped logic. Noise counts toward the covered total.
pub trait NoisePolicy {
    fn is_noise(&self, gap: &str) -> bool;
}

/// Default policy: gaps holding only whitespace and closing braces are
/// noise. Brace-only lines are never executable on their own, so counting
/// them as uncovered would punish formatting style.
pub struct WhitespaceNoise;

impl NoisePolicy for WhitespaceNoise {
    fn is_noise(&self, gap: &str) -> bool {
        NOISE_RE.is_match(gap)
    }
}

/// Strip the scheme and host from a URL for display. Non-URL strings pass
/// through unchanged.
#[must_use]
pub fn normalize_url(url: &str) -> String {
    HOST_PREFIX_RE.replace(url, "").into_owned()
}

/// Complement of the executed spans over `0..total`, in source order.
///
/// Spans are taken in input order with a single forward cursor, so
/// overlapping or out-of-order spans yield whatever the cursor walk
/// produces. Offsets past `total` are clamped; zero-length gaps are
/// dropped.
#[must_use]
pub fn gaps(ranges: &[ByteRange], total: usize) -> Vec<(usize, usize)> {
    let mut gaps = Vec::new();
    let mut cursor = 0;
    for range in ranges {
        let start = range.start.min(total);
        if start > cursor {
            gaps.push((cursor, start));
        }
        cursor = range.end.min(total);
    }
    if cursor < total {
        gaps.push((cursor, total));
    }
    gaps
}

/// 1-based line number of the byte at `pos`. Recognizes `\r\n`, `\r` and
/// `\n` terminators; a bare `\r` at the boundary still counts.
#[must_use]
pub fn line_at(bytes: &[u8], pos: usize) -> usize {
    let upto = pos.min(bytes.len());
    let mut line = 1;
    let mut i = 0;
    while i < upto {
        match bytes[i] {
            b'\n' => line += 1,
            b'\r' => {
                line += 1;
                if i + 1 < upto && bytes[i + 1] == b'\n' {
                    i += 1;
                }
            }
            _ => {}
        }
        i += 1;
    }
    line
}

/// Analyze one entry with the default noise policy.
#[must_use]
pub fn analyze(entry: &RawEntry) -> FileReport {
    analyze_with(entry, &WhitespaceNoise)
}

/// Analyze one entry: total size, executed bytes, gap classification and
/// the final ratio. The entry is read-only; calling this twice yields
/// identical reports.
#[must_use]
pub fn analyze_with(entry: &RawEntry, policy: &dyn NoisePolicy) -> FileReport {
    let bytes = entry.text.as_bytes();
    let total_bytes = bytes.len() as u64;
    let used_bytes: u64 = entry.ranges.iter().map(|range| range.len() as u64).sum();

    let mut uncovered_whitespace_bytes = 0;
    let mut uncovered_chunks = Vec::new();
    for (start, end) in gaps(&entry.ranges, bytes.len()) {
        let gap = String::from_utf8_lossy(&bytes[start..end]);
        if policy.is_noise(&gap) {
            uncovered_whitespace_bytes += (end - start) as u64;
        } else {
            let line = line_at(bytes, start);
            uncovered_chunks.push(format!("line {line}: \"{gap}\""));
        }
    }

    let covered_bytes = used_bytes + uncovered_whitespace_bytes;
    FileReport {
        url: normalize_url(&entry.url),
        source_url: entry.url.clone(),
        total_bytes,
        used_bytes,
        uncovered_whitespace_bytes,
        covered_bytes,
        ratio: rate(covered_bytes, total_bytes),
        uncovered_chunks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(text: &str, ranges: Vec<(usize, usize)>) -> RawEntry {
        RawEntry {
            url: "http://localhost/src/app.js".to_string(),
            text: text.to_string(),
            ranges: ranges
                .into_iter()
                .map(|(start, end)| ByteRange { start, end })
                .collect(),
        }
    }

    #[test]
    fn test_fully_covered_file() {
        let report = analyze(&entry("abc", vec![(0, 3)]));
        assert_eq!(report.total_bytes, 3);
        assert_eq!(report.used_bytes, 3);
        assert_eq!(report.uncovered_whitespace_bytes, 0);
        assert_eq!(report.covered_bytes, 3);
        assert_eq!(report.ratio, 1.0);
        assert!(report.uncovered_chunks.is_empty());
    }

    #[test]
    fn test_whitespace_gap_counts_as_covered() {
        let report = analyze(&entry("a \nb", vec![(0, 1), (3, 4)]));
        assert_eq!(report.used_bytes, 2);
        assert_eq!(report.uncovered_whitespace_bytes, 2);
        assert_eq!(report.ratio, 1.0);
        assert!(report.uncovered_chunks.is_empty());
    }

    #[test]
    fn test_uncovered_code_becomes_chunk() {
        let report = analyze(&entry("a;x();", vec![(0, 2)]));
        assert_eq!(report.used_bytes, 2);
        assert_eq!(report.uncovered_whitespace_bytes, 0);
        assert_eq!(report.uncovered_chunks, vec!["line 1: \"x();\""]);
        assert_eq!(report.ratio, 2.0 / 6.0);
    }

    #[test]
    fn test_closing_braces_are_noise() {
        // "fn(){body}\n}\n" with the trailing brace line never executed.
        let report = analyze(&entry("f();\n}\n", vec![(0, 4)]));
        assert_eq!(report.uncovered_whitespace_bytes, 3);
        assert_eq!(report.ratio, 1.0);
        assert!(report.uncovered_chunks.is_empty());
    }

    #[test]
    fn test_adjacent_ranges_leave_no_gap() {
        let report = analyze(&entry("abcd", vec![(0, 2), (2, 4)]));
        assert_eq!(report.used_bytes, 4);
        assert!(report.uncovered_chunks.is_empty());
        assert_eq!(report.ratio, 1.0);
    }

    #[test]
    fn test_leading_gap() {
        let report = analyze(&entry("x();a", vec![(4, 5)]));
        assert_eq!(report.uncovered_chunks, vec!["line 1: \"x();\""]);
    }

    #[test]
    fn test_line_numbers_in_chunks() {
        // Terminators before the gap: one \n, one \r\n.
        let report = analyze(&entry("a\nb\r\nx();", vec![(0, 5)]));
        assert_eq!(report.uncovered_chunks, vec!["line 3: \"x();\""]);
    }

    #[test]
    fn test_multiline_gap_reported_once() {
        let report = analyze(&entry("a\nx();\ny();", vec![(0, 2)]));
        assert_eq!(report.uncovered_chunks, vec!["line 2: \"x();\ny();\""]);
    }

    #[test]
    fn test_empty_file() {
        let report = analyze(&entry("", vec![]));
        assert_eq!(report.total_bytes, 0);
        assert_eq!(report.ratio, 0.0);
        assert!(report.uncovered_chunks.is_empty());
    }

    #[test]
    fn test_no_ranges_whole_file_uncovered() {
        let report = analyze(&entry("x();", vec![]));
        assert_eq!(report.used_bytes, 0);
        assert_eq!(report.uncovered_chunks, vec!["line 1: \"x();\""]);
        assert_eq!(report.ratio, 0.0);
    }

    #[test]
    fn test_offsets_past_end_are_clamped() {
        let report = analyze(&entry("ab", vec![(0, 100)]));
        assert_eq!(report.total_bytes, 2);
        assert!(report.uncovered_chunks.is_empty());
    }

    #[test]
    fn test_url_is_normalized() {
        let report = analyze(&entry("abc", vec![(0, 3)]));
        assert_eq!(report.url, "src/app.js");
        assert_eq!(report.source_url, "http://localhost/src/app.js");
    }

    #[test]
    fn test_gaps_complement() {
        let ranges = vec![ByteRange { start: 2, end: 4 }, ByteRange { start: 6, end: 8 }];
        assert_eq!(gaps(&ranges, 10), vec![(0, 2), (4, 6), (8, 10)]);
    }

    #[test]
    fn test_gaps_skips_zero_length() {
        let ranges = vec![ByteRange { start: 0, end: 4 }, ByteRange { start: 4, end: 8 }];
        assert_eq!(gaps(&ranges, 8), vec![]);
    }

    #[test]
    fn test_gaps_clamps_out_of_bounds() {
        let ranges = vec![ByteRange { start: 20, end: 30 }];
        assert_eq!(gaps(&ranges, 4), vec![(0, 4)]);
    }

    #[test]
    fn test_line_at() {
        let text = b"a\nb\r\nc\rd";
        assert_eq!(line_at(text, 0), 1);
        assert_eq!(line_at(text, 2), 2);
        assert_eq!(line_at(text, 5), 3);
        assert_eq!(line_at(text, 8), 4);
        assert_eq!(line_at(text, 100), 4);
    }

    #[test]
    fn test_line_at_bare_cr_at_boundary() {
        // A \r\n pair split at the boundary counts the \r alone.
        assert_eq!(line_at(b"a\r\nb", 2), 2);
    }

    #[test]
    fn test_normalize_url() {
        assert_eq!(normalize_url("http://localhost:8080/src/a.js"), "src/a.js");
        assert_eq!(normalize_url("https://example.com/src/b.mjs"), "src/b.mjs");
        assert_eq!(normalize_url("src/c.js"), "src/c.js");
        assert_eq!(normalize_url("file:///src/d.js"), "file:///src/d.js");
    }

    #[test]
    fn test_custom_noise_policy() {
        struct Never;
        impl NoisePolicy for Never {
            fn is_noise(&self, _gap: &str) -> bool {
                false
            }
        }
        let report = analyze_with(&entry("a  b", vec![(0, 1), (3, 4)]), &Never);
        assert_eq!(report.uncovered_whitespace_bytes, 0);
        assert_eq!(report.uncovered_chunks, vec!["line 1: \"  \""]);
    }
}
