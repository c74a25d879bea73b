//! knapbench - exact vs greedy 0/1 knapsack benchmark
//!
//! Runs the dynamic-programming solver and the greedy heuristic over every
//! instance file of a directory, logs one line per instance and writes the
//! configured reports.
//!
//! Exits non-zero on configuration errors, on a solver invariant violation,
//! or when a report cannot be written. Malformed or oversized instances are
//! reported, not fatal.

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use knapbench::console::{self, Verbosity};
use knapbench::{
    BenchmarkConfig, BenchmarkReport, BenchmarkRunner, ConfigError, CsvExporter, DirectorySource,
    JsonExporter, MarkdownReport,
};
use owo_colors::OwoColorize;

/// Configuration file picked up from the working directory when `--config`
/// is not given.
const DEFAULT_CONFIG_FILE: &str = "knapbench.toml";

#[derive(Parser, Debug)]
#[command(name = "knapbench")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Benchmark exact (DP) and greedy 0/1 knapsack solvers", long_about = None)]
struct Cli {
    /// Directory holding the instance files
    instances_dir: Option<PathBuf>,

    /// Configuration file (TOML, or YAML by extension)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Instance file extension, without the dot
    #[arg(long)]
    extension: Option<String>,

    /// Write a CSV report
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Write a Markdown report
    #[arg(long)]
    markdown: Option<PathBuf>,

    /// Write a JSON report
    #[arg(long)]
    json: Option<PathBuf>,

    /// Per-instance time limit in seconds
    #[arg(long, value_name = "SECS")]
    time_limit: Option<u64>,

    /// Maximum number of DP table cells per instance
    #[arg(long, value_name = "N")]
    max_table_cells: Option<u64>,

    /// Unmeasured solves per solver before timing
    #[arg(long, value_name = "N")]
    warmup: Option<usize>,

    /// Benchmark instances in parallel
    #[arg(long)]
    parallel: bool,

    /// Also log instance start lines
    #[arg(short, long)]
    verbose: bool,

    /// Only log failures; no banner
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.verbose, self.quiet)
    }

    /// Loads the configuration file, then applies flag overrides.
    fn config(&self) -> Result<BenchmarkConfig> {
        let config = match &self.config {
            Some(path) => BenchmarkConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => load_or_default(Path::new(DEFAULT_CONFIG_FILE))?,
        };
        let config = self.apply_overrides(config);
        config.validate().context("Invalid configuration")?;
        Ok(config)
    }

    fn apply_overrides(&self, mut config: BenchmarkConfig) -> BenchmarkConfig {
        if let Some(dir) = &self.instances_dir {
            config = config.with_instance_directory(dir);
        }
        if let Some(extension) = &self.extension {
            config = config.with_extension(extension);
        }
        if let Some(path) = &self.csv {
            config = config.with_csv_output(path);
        }
        if let Some(path) = &self.markdown {
            config = config.with_markdown_output(path);
        }
        if let Some(path) = &self.json {
            config = config.with_json_output(path);
        }
        if let Some(seconds) = self.time_limit {
            config = config.with_time_limit_seconds(seconds);
        }
        if let Some(cells) = self.max_table_cells {
            config = config.with_max_table_cells(cells);
        }
        if let Some(count) = self.warmup {
            config = config.with_warmup_count(count);
        }
        if self.parallel {
            config = config.with_parallel(true);
        }
        config
    }
}

/// Loads `path` if it exists. A missing file yields the defaults; a file
/// that cannot be read or parsed is an error.
fn load_or_default(path: &Path) -> Result<BenchmarkConfig> {
    match BenchmarkConfig::load(path) {
        Ok(config) => Ok(config),
        Err(ConfigError::Io(err)) if err.kind() == io::ErrorKind::NotFound => {
            Ok(BenchmarkConfig::default())
        }
        Err(err) => {
            Err(err).with_context(|| format!("Failed to load config {}", path.display()))
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.config()?;

    console::init(cli.verbosity());

    let source = DirectorySource::new(&config.instances.directory)
        .with_extension(&config.instances.extension);
    let report = BenchmarkRunner::from_config(&config)
        .run(&source)
        .with_context(|| {
            format!(
                "Benchmark aborted in {}",
                config.instances.directory.display()
            )
        })?;

    write_reports(&config, &report)?;
    Ok(())
}

/// Writes every configured report; prints Markdown to stdout when none is.
fn write_reports(config: &BenchmarkConfig, report: &BenchmarkReport) -> Result<()> {
    let output = &config.output;
    if output.is_empty() {
        return MarkdownReport::write(report, io::stdout().lock())
            .context("Failed to print report");
    }

    if let Some(path) = &output.csv {
        CsvExporter::to_file(report, path).with_context(|| write_failed("CSV", path))?;
        announce("CSV", path);
    }
    if let Some(path) = &output.markdown {
        MarkdownReport::to_file(report, path).with_context(|| write_failed("Markdown", path))?;
        announce("Markdown", path);
    }
    if let Some(path) = &output.json {
        JsonExporter::to_file(report, path).with_context(|| write_failed("JSON", path))?;
        announce("JSON", path);
    }
    Ok(())
}

fn write_failed(format: &str, path: &Path) -> String {
    format!("Failed to write {} report to {}", format, path.display())
}

fn announce(format: &str, path: &Path) {
    println!(
        "{} {} report written to {}",
        "✓".bright_green(),
        format,
        path.display().bright_white()
    );
}
