//! Command handler functions for the chromecov CLI.
//!
//! Each `cmd_*` function returns its output as a `String`, making them easy
//! to test without capturing stdout.

use std::fmt::Write;

use anyhow::Result;
use clap::ValueEnum;

use crate::check::{run_checks, CheckPolicy};
use crate::error::ChromecovError;
use crate::filter::url_filter;
use crate::process::{process_json, ProcessOptions};
use crate::render::render_text;

/// Output style for the `report` command.
#[derive(Clone, ValueEnum)]
pub enum Style {
    Text,
    Json,
}

/// Assemble pipeline options from command-line flags. `--all` disables
/// filtering, `--pattern` replaces the default predicate, `--expect`
/// builds the manifest.
pub fn build_options(
    pattern: Option<&str>,
    all: bool,
    expect: &[String],
) -> Result<ProcessOptions> {
    let mut options = ProcessOptions::new();

    if all {
        options = options.keep_all();
    } else if let Some(pattern) = pattern {
        let regex = regex::Regex::new(pattern).map_err(|source| ChromecovError::BadPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        options = options.with_filter(url_filter(regex));
    }

    Ok(options.with_manifest(expect.to_vec()))
}

pub fn cmd_report(
    json: &str,
    options: &ProcessOptions,
    style: &Style,
    uncovered: bool,
) -> Result<String> {
    let report = process_json(json, options)?;

    let output = match style {
        Style::Text => render_text(&report, uncovered),
        Style::Json => {
            let mut out = serde_json::to_string_pretty(&report)?;
            out.push('\n');
            out
        }
    };

    Ok(output)
}

/// Run the pipeline and evaluate the policy. The boolean is false when any
/// check failed; the caller decides the exit code.
pub fn cmd_check(
    json: &str,
    options: &ProcessOptions,
    policy: &CheckPolicy,
) -> Result<(String, bool)> {
    let report = process_json(json, options)?;
    let failures = run_checks(&report, policy);

    let mut out = render_text(&report, false);
    out.push('\n');
    if failures.is_empty() {
        out.push_str("All coverage checks passed.\n");
        Ok((out, true))
    } else {
        for failure in &failures {
            writeln!(out, "FAILED: {failure}").unwrap();
        }
        Ok((out, false))
    }
}
