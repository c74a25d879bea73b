//! Benchmarking framework for knapbench.
//!
//! This crate runs an exact solver and a heuristic solver over a batch of
//! knapsack instances, records both solutions with their timings, and exports
//! the results.
//!
//! # Overview
//!
//! The benchmarking framework allows you to:
//! - Enumerate instances from a directory (natural file-name order) or memory
//! - Compare both solvers per instance, with optional warmup runs
//! - Keep going when one instance is malformed or too large
//! - Export results to CSV, Markdown and JSON
//!
//! # Zero-Erasure Design
//!
//! The runner stores both solvers as type parameters, not trait objects.
//! Instance sources are the only dynamic seam.
//!
//! # Example
//!
//! ```
//! use knapbench_benchmark::{BenchmarkRunner, MarkdownReport, MemorySource};
//!
//! let source = MemorySource::new()
//!     .with_instance("inst1.txt", "3 50\n60 10\n100 20\n120 30")
//!     .with_instance("inst2.txt", "2 3\n10 2\n7 1");
//!
//! let report = BenchmarkRunner::new("Knapsack Benchmark")
//!     .with_warmup_count(1)
//!     .run(&source)
//!     .unwrap();
//!
//! assert_eq!(report.compared_count(), 2);
//! assert_eq!(report.heuristic_optimal_count(), 1);
//! assert!(MarkdownReport::to_string(&report).contains("| inst2.txt |"));
//! ```

mod error;
mod record;
mod report;
mod runner;
mod source;

pub use error::{BenchmarkError, SourceError};
pub use record::{BenchmarkReport, Comparison, ComparisonRecord, Failure, FailureKind, Outcome};
pub use report::{CsvExporter, JsonExporter, MarkdownReport};
pub use runner::BenchmarkRunner;
pub use source::{natural_cmp, DirectorySource, InstanceSource, MemorySource};
