use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use chromecov::check::CheckPolicy;
use chromecov::cli::{self, Style};
use chromecov::source::{CoverageSource, FileSource, StdinSource, UrlSource};

/// chromecov — Byte-level JS coverage reports from Chrome DevTools profiler dumps.
#[derive(Parser)]
#[command(name = "chromecov", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Flags shared by `report` and `check`: where the dump comes from and
/// which entries to analyze.
#[derive(Args)]
struct InputArgs {
    /// Path to the profiler dump (JSON). Reads stdin when omitted.
    file: Option<PathBuf>,

    /// Fetch the dump from an HTTP endpoint instead of a file.
    #[arg(long, conflicts_with = "file")]
    url: Option<String>,

    /// Regex for selecting entries by URL (default: same-origin /src/ scripts).
    #[arg(long, conflicts_with = "all")]
    pattern: Option<String>,

    /// Analyze every entry in the dump.
    #[arg(long)]
    all: bool,

    /// Source path that must appear in the dump. Repeatable; unmatched
    /// paths are reported as missing.
    #[arg(long, value_name = "PATH")]
    expect: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute and print a coverage report.
    Report {
        #[command(flatten)]
        input: InputArgs,

        /// Output format.
        #[arg(long, value_enum, default_value = "text")]
        format: Style,

        /// List uncovered code excerpts under each file.
        #[arg(long)]
        uncovered: bool,
    },

    /// Evaluate coverage thresholds; exits nonzero on failure.
    Check {
        #[command(flatten)]
        input: InputArgs,

        /// Minimum acceptable aggregate ratio.
        #[arg(long, default_value_t = 1.0)]
        min_ratio: f64,

        /// Maximum number of expected files allowed to be missing.
        #[arg(long, default_value_t = 0)]
        max_missing: usize,
    },
}

fn fetch(file: Option<PathBuf>, url: Option<String>) -> Result<String> {
    let source: Box<dyn CoverageSource> = match (file, url) {
        (_, Some(url)) => Box::new(UrlSource { url }),
        (Some(path), None) => Box::new(FileSource { path }),
        (None, None) => Box::new(StdinSource),
    };
    source.fetch()
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Report {
            input,
            format,
            uncovered,
        } => {
            let options = cli::build_options(input.pattern.as_deref(), input.all, &input.expect)?;
            let json = fetch(input.file, input.url)?;
            let output = cli::cmd_report(&json, &options, &format, uncovered)?;
            print!("{output}");
        }
        Commands::Check {
            input,
            min_ratio,
            max_missing,
        } => {
            let options = cli::build_options(input.pattern.as_deref(), input.all, &input.expect)?;
            let json = fetch(input.file, input.url)?;
            let policy = CheckPolicy {
                min_ratio,
                max_missing,
            };
            let (output, passed) = cli::cmd_check(&json, &options, &policy)?;
            print!("{output}");
            if !passed {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
