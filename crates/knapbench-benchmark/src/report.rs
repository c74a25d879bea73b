//! Report generation for benchmark results.

use std::fmt::Write as _;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;

use crate::record::{BenchmarkReport, Outcome};

/// CSV exporter for benchmark reports.
///
/// One row per instance. Failed instances leave the solver columns empty
/// and fill the status and error columns.
///
/// # Example
///
/// ```
/// use knapbench_benchmark::{BenchmarkReport, CsvExporter};
///
/// let report = BenchmarkReport::new("Test", vec![]);
/// let csv = CsvExporter::to_string(&report);
/// assert!(csv.starts_with("Instance,Dynamic Execution Time"));
/// ```
pub struct CsvExporter;

impl CsvExporter {
    /// Column headers, in order.
    pub const HEADER: [&'static str; 10] = [
        "Instance",
        "Dynamic Execution Time",
        "Greedy Execution Time",
        "Algorithms Execution Time Difference",
        "Maximum Value (Dynamic)",
        "Maximum Value (Greedy)",
        "Selected Items (Dynamic)",
        "Selected Items (Greedy)",
        "Status",
        "Error",
    ];

    /// Exports the report to a CSV string.
    ///
    /// # Example
    ///
    /// ```
    /// use knapbench_benchmark::{BenchmarkRunner, CsvExporter, MemorySource};
    ///
    /// let source = MemorySource::new().with_instance("classic", "3 50\n60 10\n100 20\n120 30");
    /// let report = BenchmarkRunner::new("Test").run(&source).unwrap();
    ///
    /// let csv = CsvExporter::to_string(&report);
    /// assert!(csv.contains(",220,160,\"[1, 2]\",\"[0, 1]\",ok,"));
    /// ```
    pub fn to_string(report: &BenchmarkReport) -> String {
        let mut output = String::new();

        // Header
        writeln!(output, "{}", Self::HEADER.join(",")).unwrap();

        // Data rows
        for record in &report.records {
            let instance = csv_field(&record.instance);
            match &record.outcome {
                Outcome::Compared(c) => {
                    writeln!(
                        output,
                        "{},{:.9},{:.9},{:.9},{},{},{},{},ok,",
                        instance,
                        c.exact.duration_seconds(),
                        c.heuristic.duration_seconds(),
                        c.time_difference_seconds(),
                        c.exact.value,
                        c.heuristic.value,
                        csv_field(&format_selection(&c.exact.selected)),
                        csv_field(&format_selection(&c.heuristic.selected)),
                    )
                    .unwrap();
                }
                Outcome::Failed(f) => {
                    writeln!(
                        output,
                        "{},,,,,,,,{},{}",
                        instance,
                        f.kind,
                        csv_field(&f.message),
                    )
                    .unwrap();
                }
            }
        }

        output
    }

    /// Exports the report to a CSV file.
    pub fn to_file(report: &BenchmarkReport, path: impl AsRef<Path>) -> io::Result<()> {
        fs::write(path, Self::to_string(report))
    }

    /// Writes the report as CSV to a writer.
    pub fn write<W: Write>(report: &BenchmarkReport, mut writer: W) -> io::Result<()> {
        writer.write_all(Self::to_string(report).as_bytes())
    }
}

/// Markdown report generator.
///
/// Generates a human-readable summary and a per-instance table.
///
/// # Example
///
/// ```
/// use knapbench_benchmark::{BenchmarkReport, MarkdownReport};
///
/// let report = BenchmarkReport::new("Test", vec![]);
/// let md = MarkdownReport::to_string(&report);
/// assert!(md.contains("# Benchmark: Test"));
/// assert!(md.contains("*No instances benchmarked.*"));
/// ```
pub struct MarkdownReport;

impl MarkdownReport {
    /// Generates a Markdown report string.
    pub fn to_string(report: &BenchmarkReport) -> String {
        let mut output = String::new();

        // Title
        writeln!(output, "# Benchmark: {}", report.name).unwrap();
        writeln!(output).unwrap();

        // Metadata
        writeln!(output, "- **Instances**: {}", report.len()).unwrap();
        writeln!(output, "- **Compared**: {}", report.compared_count()).unwrap();
        writeln!(output, "- **Failed**: {}", report.failed_count()).unwrap();
        writeln!(output).unwrap();

        if report.is_empty() {
            writeln!(output, "*No instances benchmarked.*").unwrap();
            return output;
        }

        // Summary
        writeln!(output, "## Summary").unwrap();
        writeln!(output).unwrap();
        writeln!(output, "| Metric | Value |").unwrap();
        writeln!(output, "|--------|-------|").unwrap();
        writeln!(
            output,
            "| Total Dynamic Time | {:.3} ms |",
            report.total_exact_time().as_secs_f64() * 1000.0
        )
        .unwrap();
        writeln!(
            output,
            "| Total Greedy Time | {:.3} ms |",
            report.total_heuristic_time().as_secs_f64() * 1000.0
        )
        .unwrap();
        writeln!(
            output,
            "| Greedy Optimal | {} / {} |",
            report.heuristic_optimal_count(),
            report.compared_count()
        )
        .unwrap();
        if let Some(mean) = report.mean_approximation_ratio() {
            writeln!(output, "| Mean Greedy/Dynamic | {:.2}% |", mean * 100.0).unwrap();
        }
        if let Some(min) = report.min_approximation_ratio() {
            writeln!(output, "| Worst Greedy/Dynamic | {:.2}% |", min * 100.0).unwrap();
        }
        writeln!(output).unwrap();

        // Detailed results
        writeln!(output, "## Instances").unwrap();
        writeln!(output).unwrap();
        writeln!(
            output,
            "| Instance | Dynamic (ms) | Greedy (ms) | Diff (ms) | Dynamic Value | Greedy Value | Gap |"
        )
        .unwrap();
        writeln!(
            output,
            "|----------|--------------|-------------|-----------|---------------|--------------|-----|"
        )
        .unwrap();

        for record in &report.records {
            match &record.outcome {
                Outcome::Compared(c) => {
                    writeln!(
                        output,
                        "| {} | {:.3} | {:.3} | {:.3} | {} | {} | {} |",
                        md_cell(&record.instance),
                        c.exact.duration_seconds() * 1000.0,
                        c.heuristic.duration_seconds() * 1000.0,
                        c.time_difference_seconds() * 1000.0,
                        c.exact.value,
                        c.heuristic.value,
                        c.value_gap(),
                    )
                    .unwrap();
                }
                Outcome::Failed(f) => {
                    writeln!(
                        output,
                        "| {} | failed ({}): {} | | | | | |",
                        md_cell(&record.instance),
                        f.kind,
                        md_cell(&f.message),
                    )
                    .unwrap();
                }
            }
        }

        output
    }

    /// Writes the Markdown report to a file.
    pub fn to_file(report: &BenchmarkReport, path: impl AsRef<Path>) -> io::Result<()> {
        fs::write(path, Self::to_string(report))
    }

    /// Writes the Markdown report to a writer.
    pub fn write<W: Write>(report: &BenchmarkReport, mut writer: W) -> io::Result<()> {
        writer.write_all(Self::to_string(report).as_bytes())
    }
}

/// JSON exporter for benchmark reports.
///
/// # Example
///
/// ```
/// use knapbench_benchmark::{BenchmarkRunner, JsonExporter, MemorySource};
///
/// let source = MemorySource::new().with_instance("one", "1 5\n7 5");
/// let report = BenchmarkRunner::new("Test").run(&source).unwrap();
///
/// let json: serde_json::Value = serde_json::from_str(&JsonExporter::to_string(&report)).unwrap();
/// assert_eq!(json["records"][0]["exact"]["value"], 7);
/// ```
pub struct JsonExporter;

impl JsonExporter {
    /// Exports the report to a pretty-printed JSON string.
    pub fn to_string(report: &BenchmarkReport) -> String {
        // Plain structs of numbers and strings always serialize.
        serde_json::to_string_pretty(&JsonReport::from(report)).unwrap_or_default()
    }

    /// Exports the report to a JSON file.
    pub fn to_file(report: &BenchmarkReport, path: impl AsRef<Path>) -> io::Result<()> {
        let file = fs::File::create(path)?;
        Self::write(report, io::BufWriter::new(file))
    }

    /// Writes the report as JSON to a writer.
    pub fn write<W: Write>(report: &BenchmarkReport, mut writer: W) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut writer, &JsonReport::from(report))?;
        writeln!(writer)?;
        writer.flush()
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    name: &'a str,
    compared: usize,
    failed: usize,
    records: Vec<JsonRecord<'a>>,
}

#[derive(Serialize)]
struct JsonRecord<'a> {
    instance: &'a str,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    item_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    capacity: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    exact: Option<JsonSolution<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    heuristic: Option<JsonSolution<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    time_difference_seconds: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_kind: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

#[derive(Serialize)]
struct JsonSolution<'a> {
    solver: &'static str,
    value: u64,
    selected: &'a [usize],
    duration_seconds: f64,
}

impl<'a> From<&'a knapbench_core::Solution> for JsonSolution<'a> {
    fn from(solution: &'a knapbench_core::Solution) -> Self {
        Self {
            solver: solution.solver,
            value: solution.value,
            selected: &solution.selected,
            duration_seconds: solution.duration_seconds(),
        }
    }
}

impl<'a> From<&'a BenchmarkReport> for JsonReport<'a> {
    fn from(report: &'a BenchmarkReport) -> Self {
        let records = report
            .records
            .iter()
            .map(|record| match &record.outcome {
                Outcome::Compared(c) => JsonRecord {
                    instance: &record.instance,
                    status: "ok",
                    item_count: Some(c.item_count),
                    capacity: Some(c.capacity),
                    exact: Some(JsonSolution::from(&c.exact)),
                    heuristic: Some(JsonSolution::from(&c.heuristic)),
                    time_difference_seconds: Some(c.time_difference_seconds()),
                    error_kind: None,
                    error: None,
                },
                Outcome::Failed(f) => JsonRecord {
                    instance: &record.instance,
                    status: "failed",
                    item_count: None,
                    capacity: None,
                    exact: None,
                    heuristic: None,
                    time_difference_seconds: None,
                    error_kind: Some(f.kind.as_str()),
                    error: Some(&f.message),
                },
            })
            .collect();

        Self {
            name: &report.name,
            compared: report.compared_count(),
            failed: report.failed_count(),
            records,
        }
    }
}

/// Formats a selection as `[0, 4, 9]`.
fn format_selection(selected: &[usize]) -> String {
    let items: Vec<String> = selected.iter().map(usize::to_string).collect();
    format!("[{}]", items.join(", "))
}

/// Quotes a CSV field when it contains a separator, quote or newline.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn md_cell(value: &str) -> String {
    value.replace('|', "\\|").replace('\n', " ")
}
