//! Benchmark runner.

use std::time::{Duration, Instant};

use knapbench_config::BenchmarkConfig;
use knapbench_core::{
    solve_timed, Deadline, DynamicProgrammingSolver, GreedySolver, Instance, KnapsackError,
    KnapsackSolver, SolveBudget,
};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::error::BenchmarkError;
use crate::record::{BenchmarkReport, Comparison, ComparisonRecord, Failure};
use crate::source::InstanceSource;

/// Runs an exact and a heuristic solver over every instance of a source.
///
/// Each instance is read, parsed, then solved by the exact solver and the
/// heuristic solver back to back on the same thread, each timed on its own.
/// Read, parse and resource failures become failed records; the batch goes
/// on. A solver invariant violation aborts the run.
///
/// Solvers are type parameters, not trait objects.
///
/// # Example
///
/// ```
/// use knapbench_benchmark::{BenchmarkRunner, MemorySource};
///
/// let source = MemorySource::new()
///     .with_instance("classic", "3 50\n60 10\n100 20\n120 30")
///     .with_instance("broken", "2 10\n1 1");
///
/// let report = BenchmarkRunner::new("doc").run(&source).unwrap();
/// assert_eq!(report.len(), 2);
///
/// let classic = report.records[0].comparison().unwrap();
/// assert_eq!(classic.exact.value, 220);
/// assert_eq!(classic.heuristic.value, 160);
/// assert!(report.records[1].is_failed());
/// ```
#[derive(Debug, Clone)]
pub struct BenchmarkRunner<E = DynamicProgrammingSolver, H = GreedySolver> {
    name: String,
    exact: E,
    heuristic: H,
    max_table_cells: Option<u64>,
    time_limit: Option<Duration>,
    parallel: bool,
    warmup_count: usize,
}

impl BenchmarkRunner {
    /// Creates a sequential runner with the default solvers and no limits.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            exact: DynamicProgrammingSolver,
            heuristic: GreedySolver,
            max_table_cells: None,
            time_limit: None,
            parallel: false,
            warmup_count: 0,
        }
    }

    /// Creates a runner with the default solvers from a configuration.
    pub fn from_config(config: &BenchmarkConfig) -> Self {
        Self {
            name: config.name.clone(),
            exact: DynamicProgrammingSolver,
            heuristic: GreedySolver,
            max_table_cells: config.limits.max_table_cells,
            time_limit: config.time_limit(),
            parallel: config.execution.parallel,
            warmup_count: config.execution.warmup_count,
        }
    }
}

impl<E, H> BenchmarkRunner<E, H>
where
    E: KnapsackSolver + Sync,
    H: KnapsackSolver + Sync,
{
    /// Replaces both solvers.
    pub fn with_solvers<E2, H2>(self, exact: E2, heuristic: H2) -> BenchmarkRunner<E2, H2>
    where
        E2: KnapsackSolver + Sync,
        H2: KnapsackSolver + Sync,
    {
        BenchmarkRunner {
            name: self.name,
            exact,
            heuristic,
            max_table_cells: self.max_table_cells,
            time_limit: self.time_limit,
            parallel: self.parallel,
            warmup_count: self.warmup_count,
        }
    }

    /// Sets the DP table cell limit.
    pub fn with_max_table_cells(mut self, cells: u64) -> Self {
        self.max_table_cells = Some(cells);
        self
    }

    /// Sets the per-instance time limit, counted from the start of reading.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Processes instances on the rayon pool.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the number of unmeasured solves per solver before timing.
    pub fn with_warmup_count(mut self, count: usize) -> Self {
        self.warmup_count = count;
        self
    }

    /// Returns the benchmark name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Runs every instance of `source` and returns the records in source
    /// order.
    pub fn run(&self, source: &dyn InstanceSource) -> Result<BenchmarkReport, BenchmarkError> {
        let identifiers = source.identifiers()?;
        let batch_start = Instant::now();

        info!(
            event = "batch_start",
            name = %self.name,
            instance_count = identifiers.len() as u64,
            parallel = self.parallel,
        );

        let records = if self.parallel {
            identifiers
                .par_iter()
                .map(|id| self.run_instance(source, id))
                .collect::<Result<Vec<_>, _>>()?
        } else {
            identifiers
                .iter()
                .map(|id| self.run_instance(source, id))
                .collect::<Result<Vec<_>, _>>()?
        };

        let report = BenchmarkReport::new(self.name.clone(), records);
        info!(
            event = "batch_end",
            name = %self.name,
            compared = report.compared_count() as u64,
            failed = report.failed_count() as u64,
            heuristic_optimal = report.heuristic_optimal_count() as u64,
            duration_ms = batch_start.elapsed().as_millis() as u64,
        );
        Ok(report)
    }

    /// Reads, parses and compares one instance.
    fn run_instance(
        &self,
        source: &dyn InstanceSource,
        identifier: &str,
    ) -> Result<ComparisonRecord, BenchmarkError> {
        let start = Instant::now();
        debug!(event = "instance_start", instance = identifier);

        let text = match source.read(identifier) {
            Ok(text) => text,
            Err(err) => return Ok(self.failed(identifier, Failure::from(&err))),
        };

        let result = Instance::parse(&text)
            .map_err(KnapsackError::from)
            .and_then(|instance| self.compare_with(&instance, &self.budget(start)));

        match result {
            Ok(comparison) => {
                info!(
                    event = "instance_end",
                    instance = identifier,
                    item_count = comparison.item_count as u64,
                    capacity = comparison.capacity,
                    exact_value = comparison.exact.value,
                    heuristic_value = comparison.heuristic.value,
                    exact_ms = comparison.exact.duration_seconds() * 1000.0,
                    heuristic_ms = comparison.heuristic.duration_seconds() * 1000.0,
                );
                Ok(ComparisonRecord::compared(identifier, comparison))
            }
            Err(err) => match Failure::try_from(&err) {
                Ok(failure) => Ok(self.failed(identifier, failure)),
                Err(()) => Err(BenchmarkError::Fatal {
                    instance: identifier.to_string(),
                    source: err,
                }),
            },
        }
    }

    /// Compares both solvers on an already parsed instance.
    ///
    /// The time limit, if any, starts now.
    pub fn compare(&self, instance: &Instance) -> Result<Comparison, KnapsackError> {
        self.compare_with(instance, &self.budget(Instant::now()))
    }

    fn compare_with(
        &self,
        instance: &Instance,
        budget: &SolveBudget,
    ) -> Result<Comparison, KnapsackError> {
        for _ in 0..self.warmup_count {
            self.exact.solve(instance, budget)?;
            self.heuristic.solve(instance, budget)?;
        }

        let exact = solve_timed(&self.exact, instance, budget)?;
        let heuristic = solve_timed(&self.heuristic, instance, budget)?;

        exact.verify(instance)?;
        heuristic.verify(instance)?;
        if heuristic.value > exact.value {
            return Err(KnapsackError::SolverFailure(format!(
                "{} found value {} above the {} optimum {}",
                heuristic.solver, heuristic.value, exact.solver, exact.value
            )));
        }

        Ok(Comparison {
            item_count: instance.len(),
            capacity: instance.capacity(),
            exact,
            heuristic,
        })
    }

    fn budget(&self, start: Instant) -> SolveBudget {
        let mut budget = SolveBudget::unlimited();
        if let Some(cells) = self.max_table_cells {
            budget = budget.with_max_table_cells(cells);
        }
        if let Some(limit) = self.time_limit {
            budget = budget.with_deadline(Deadline::starting_at(start, limit));
        }
        budget
    }

    fn failed(&self, identifier: &str, failure: Failure) -> ComparisonRecord {
        warn!(
            event = "instance_failed",
            instance = identifier,
            kind = failure.kind.as_str(),
            error = %failure.message,
        );
        ComparisonRecord::failed(identifier, failure)
    }
}

#[cfg(test)]
mod tests;
