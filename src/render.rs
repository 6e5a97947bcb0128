//! Terminal output for a computed coverage report.

use std::fmt::Write;

use crate::model::CoverageReport;

/// The listing only appears when there is something to look at: a missing
/// file, or analyzed files short of full coverage. The aggregate ratio is
/// an exact quotient, so covered == total compares equal to 1.0.
fn show_listing(report: &CoverageReport) -> bool {
    !report.missing.is_empty() || (!report.files.is_empty() && report.ratio != 1.0)
}

/// Render the report as plain text: headline percentage, then the per-file
/// listing when warranted. With `show_chunks`, uncovered excerpts are
/// printed under their file row.
#[must_use]
pub fn render_text(report: &CoverageReport, show_chunks: bool) -> String {
    let mut out = String::new();

    let pct = report.ratio * 100.0;
    writeln!(out, "Coverage: {pct:.2}%").unwrap();

    if show_listing(report) {
        out.push('\n');
        for entry in &report.files {
            let pct = entry.ratio() * 100.0;
            let url = entry.url();
            let marker = if entry.is_missing() { "  (missing)" } else { "" };
            writeln!(out, "{pct:>7.2}%  {url}{marker}").unwrap();
            if show_chunks {
                for chunk in entry.uncovered_chunks() {
                    writeln!(out, "          {chunk}").unwrap();
                }
            }
        }
    }

    if !report.missing.is_empty() {
        let count = report.missing.len();
        let label = if count == 1 { "file" } else { "files" };
        out.push('\n');
        writeln!(out, "{count} expected {label} never loaded").unwrap();
    }

    out
}
