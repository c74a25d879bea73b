//! knapbench - exact vs greedy 0/1 knapsack benchmarking
//!
//! Parse instances, solve them with the dynamic-programming solver and the
//! greedy heuristic, and compare both across a batch.
//!
//! # Example
//!
//! ```rust
//! use knapbench::prelude::*;
//!
//! let instance: Instance = "3 50\n60 10\n100 20\n120 30".parse().unwrap();
//! let budget = SolveBudget::unlimited();
//!
//! let exact = DynamicProgrammingSolver.solve(&instance, &budget).unwrap();
//! let greedy = GreedySolver.solve(&instance, &budget).unwrap();
//! assert_eq!(exact.value, 220);
//! assert_eq!(greedy.value, 160);
//! ```

// Instance model and solvers
pub use knapbench_core::{
    solve_timed, Deadline, DynamicProgrammingSolver, ErrorKind, GreedySolver, Instance, Item,
    KnapsackError, KnapsackSolver, ParseError, ParseErrorKind, ResourceExceeded, SolveBudget,
    Solution,
};

// Configuration
pub use knapbench_config::{BenchmarkConfig, ConfigError};

// Benchmark runner, sources and exporters
pub use knapbench_benchmark::{
    natural_cmp, BenchmarkError, BenchmarkReport, BenchmarkRunner, Comparison, ComparisonRecord,
    CsvExporter, DirectorySource, Failure, FailureKind, InstanceSource, JsonExporter,
    MarkdownReport, MemorySource, Outcome, SourceError,
};

#[cfg(feature = "console")]
pub use knapbench_console as console;

pub mod prelude {
    pub use super::{
        DynamicProgrammingSolver, GreedySolver, Instance, Item, KnapsackSolver, SolveBudget,
        Solution,
    };
    pub use super::{BenchmarkConfig, BenchmarkReport, BenchmarkRunner};
    pub use super::{CsvExporter, DirectorySource, InstanceSource, MarkdownReport, MemorySource};
}
