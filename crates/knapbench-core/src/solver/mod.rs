//! Knapsack solvers.
//!
//! Two solvers share the [`KnapsackSolver`] trait:
//! - [`DynamicProgrammingSolver`]: exact, O(N·C) time and space
//! - [`GreedySolver`]: value-density heuristic, O(N log N)
//!
//! Both receive the instance by shared reference and return an owned
//! [`Solution`]. A [`SolveBudget`] bounds the DP table size and the wall
//! clock time a solve may use.

mod dynamic;
mod greedy;

#[cfg(test)]
mod tests;

pub use dynamic::DynamicProgrammingSolver;
pub use greedy::GreedySolver;

use std::time::{Duration, Instant};

use crate::error::{KnapsackError, ResourceExceeded};
use crate::instance::Instance;
use crate::solution::Solution;

/// A solver for the 0/1 knapsack problem.
pub trait KnapsackSolver {
    /// Short name used in logs and reports.
    fn name(&self) -> &'static str;

    /// Solves `instance` within `budget`.
    ///
    /// The returned solution has a zero duration; use [`solve_timed`] to
    /// measure it.
    fn solve(&self, instance: &Instance, budget: &SolveBudget) -> Result<Solution, KnapsackError>;
}

/// Runs `solver` and stamps the elapsed wall-clock time onto the solution.
///
/// # Example
///
/// ```
/// use knapbench_core::{solve_timed, GreedySolver, Instance, SolveBudget};
///
/// let instance = Instance::from_pairs(5, &[(3, 2), (4, 3)]);
/// let solution = solve_timed(&GreedySolver, &instance, &SolveBudget::unlimited()).unwrap();
/// assert_eq!(solution.value, 7);
/// ```
pub fn solve_timed<S: KnapsackSolver + ?Sized>(
    solver: &S,
    instance: &Instance,
    budget: &SolveBudget,
) -> Result<Solution, KnapsackError> {
    let start = Instant::now();
    let solution = solver.solve(instance, budget)?;
    Ok(solution.with_duration(start.elapsed()))
}

/// Total value of all items, which bounds every partial sum a solver forms.
///
/// Fails when the values do not fit in a `u64`, so solvers never report a
/// truncated value.
fn value_bound(instance: &Instance) -> Result<u64, ResourceExceeded> {
    instance
        .total_value()
        .ok_or(ResourceExceeded::ValueOverflow {
            items: instance.len(),
        })
}

/// Resource limits for a single solve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolveBudget {
    max_table_cells: Option<u64>,
    deadline: Option<Deadline>,
}

impl SolveBudget {
    /// A budget with no limits.
    pub fn unlimited() -> Self {
        Self::default()
    }

    /// Limits the number of DP table cells.
    pub fn with_max_table_cells(mut self, cells: u64) -> Self {
        self.max_table_cells = Some(cells);
        self
    }

    /// Sets a deadline `limit` from now.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.deadline = Some(Deadline::after(limit));
        self
    }

    pub fn with_deadline(mut self, deadline: Deadline) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn max_table_cells(&self) -> Option<u64> {
        self.max_table_cells
    }

    pub fn deadline(&self) -> Option<Deadline> {
        self.deadline
    }

    /// Fails with [`ResourceExceeded::TimeLimit`] once the deadline passed.
    pub fn check_deadline(&self) -> Result<(), ResourceExceeded> {
        match self.deadline {
            Some(deadline) if deadline.is_expired() => Err(ResourceExceeded::TimeLimit {
                limit: deadline.limit,
            }),
            _ => Ok(()),
        }
    }
}

/// A point in time after which a solve is abandoned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    // None when `limit` overflows the clock.
    at: Option<Instant>,
    limit: Duration,
}

impl Deadline {
    /// A deadline `limit` from now.
    pub fn after(limit: Duration) -> Self {
        Self::starting_at(Instant::now(), limit)
    }

    pub fn starting_at(start: Instant, limit: Duration) -> Self {
        Self {
            at: start.checked_add(limit),
            limit,
        }
    }

    pub fn limit(&self) -> Duration {
        self.limit
    }

    pub fn is_expired(&self) -> bool {
        self.at.is_some_and(|at| Instant::now() >= at)
    }
}
