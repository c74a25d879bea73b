//! Comparison records and the aggregated report.

use std::fmt;
use std::time::Duration;

use knapbench_core::{ErrorKind, KnapsackError, Solution};

use crate::error::SourceError;

/// Exact and heuristic solutions for one instance.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    /// Number of items in the instance.
    pub item_count: usize,
    /// Knapsack capacity of the instance.
    pub capacity: u64,
    pub exact: Solution,
    pub heuristic: Solution,
}

impl Comparison {
    /// Heuristic time minus exact time, in seconds. Usually negative.
    pub fn time_difference_seconds(&self) -> f64 {
        self.heuristic.duration_seconds() - self.exact.duration_seconds()
    }

    /// How much value the heuristic left on the table.
    pub fn value_gap(&self) -> u64 {
        self.exact.value.saturating_sub(self.heuristic.value)
    }

    /// Heuristic value over exact value; 1.0 when the optimum is 0.
    ///
    /// # Example
    ///
    /// ```
    /// use knapbench_benchmark::Comparison;
    /// use knapbench_core::Solution;
    ///
    /// let comparison = Comparison {
    ///     item_count: 3,
    ///     capacity: 50,
    ///     exact: Solution::new("dynamic", 220, vec![1, 2]),
    ///     heuristic: Solution::new("greedy", 160, vec![0, 1]),
    /// };
    /// assert_eq!(comparison.value_gap(), 60);
    /// assert!((comparison.approximation_ratio() - 160.0 / 220.0).abs() < 1e-12);
    /// ```
    pub fn approximation_ratio(&self) -> f64 {
        if self.exact.value == 0 {
            1.0
        } else {
            self.heuristic.value as f64 / self.exact.value as f64
        }
    }

    /// True if the heuristic reached the optimum.
    pub fn heuristic_is_optimal(&self) -> bool {
        self.heuristic.value == self.exact.value
    }
}

/// Why an instance has no comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// The instance text could not be read.
    Source,
    /// The instance text is malformed.
    Parse,
    /// A solver ran out of its memory or time budget.
    ResourceExceeded,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Source => "source",
            FailureKind::Parse => "parse",
            FailureKind::ResourceExceeded => "resource_exceeded",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed instance: the kind of failure and its message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub kind: FailureKind,
    pub message: String,
}

impl Failure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl From<&SourceError> for Failure {
    fn from(err: &SourceError) -> Self {
        Self::new(FailureKind::Source, err.to_string())
    }
}

impl TryFrom<&KnapsackError> for Failure {
    /// Fatal errors do not convert.
    type Error = ();

    fn try_from(err: &KnapsackError) -> Result<Self, Self::Error> {
        let kind = match err.kind() {
            ErrorKind::Parse => FailureKind::Parse,
            ErrorKind::ResourceExceeded => FailureKind::ResourceExceeded,
            ErrorKind::SolverFailure => return Err(()),
        };
        Ok(Self::new(kind, err.to_string()))
    }
}

/// Result of benchmarking one instance.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Compared(Comparison),
    Failed(Failure),
}

/// One row of the benchmark: an instance and what happened to it.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRecord {
    /// Identifier given by the instance source (the file name).
    pub instance: String,
    pub outcome: Outcome,
}

impl ComparisonRecord {
    pub fn compared(instance: impl Into<String>, comparison: Comparison) -> Self {
        Self {
            instance: instance.into(),
            outcome: Outcome::Compared(comparison),
        }
    }

    pub fn failed(instance: impl Into<String>, failure: Failure) -> Self {
        Self {
            instance: instance.into(),
            outcome: Outcome::Failed(failure),
        }
    }

    pub fn comparison(&self) -> Option<&Comparison> {
        match &self.outcome {
            Outcome::Compared(comparison) => Some(comparison),
            Outcome::Failed(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&Failure> {
        match &self.outcome {
            Outcome::Compared(_) => None,
            Outcome::Failed(failure) => Some(failure),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.failure().is_some()
    }
}

/// All records of one benchmark run, in instance order.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkReport {
    /// Benchmark name.
    pub name: String,
    /// One record per instance.
    pub records: Vec<ComparisonRecord>,
}

impl BenchmarkReport {
    pub fn new(name: impl Into<String>, records: Vec<ComparisonRecord>) -> Self {
        Self {
            name: name.into(),
            records,
        }
    }

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Successful comparisons, in order.
    pub fn comparisons(&self) -> impl Iterator<Item = (&str, &Comparison)> {
        self.records
            .iter()
            .filter_map(|r| r.comparison().map(|c| (r.instance.as_str(), c)))
    }

    /// Failed instances, in order.
    pub fn failures(&self) -> impl Iterator<Item = (&str, &Failure)> {
        self.records
            .iter()
            .filter_map(|r| r.failure().map(|f| (r.instance.as_str(), f)))
    }

    pub fn compared_count(&self) -> usize {
        self.comparisons().count()
    }

    pub fn failed_count(&self) -> usize {
        self.failures().count()
    }

    /// Total time spent in the exact solver.
    pub fn total_exact_time(&self) -> Duration {
        self.comparisons().map(|(_, c)| c.exact.duration).sum()
    }

    /// Total time spent in the heuristic solver.
    pub fn total_heuristic_time(&self) -> Duration {
        self.comparisons().map(|(_, c)| c.heuristic.duration).sum()
    }

    /// Number of instances where the heuristic found the optimum.
    pub fn heuristic_optimal_count(&self) -> usize {
        self.comparisons()
            .filter(|(_, c)| c.heuristic_is_optimal())
            .count()
    }

    /// Mean approximation ratio over compared instances, if any.
    pub fn mean_approximation_ratio(&self) -> Option<f64> {
        let count = self.compared_count();
        if count == 0 {
            return None;
        }
        let total: f64 = self
            .comparisons()
            .map(|(_, c)| c.approximation_ratio())
            .sum();
        Some(total / count as f64)
    }

    /// Worst approximation ratio over compared instances, if any.
    pub fn min_approximation_ratio(&self) -> Option<f64> {
        self.comparisons()
            .map(|(_, c)| c.approximation_ratio())
            .min_by(|a, b| a.total_cmp(b))
    }
}
