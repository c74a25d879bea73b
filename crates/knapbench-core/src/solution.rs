//! Solver output.

use std::time::Duration;

use crate::error::KnapsackError;
use crate::instance::Instance;

/// The outcome of one solver invocation on one instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    /// Name of the solver that produced this solution.
    pub solver: &'static str,
    /// Total value of the selected items.
    pub value: u64,
    /// Selected item indices, ascending.
    pub selected: Vec<usize>,
    /// Wall-clock time spent in the solver.
    pub duration: Duration,
}

impl Solution {
    /// Creates a solution, sorting the selection.
    pub fn new(solver: &'static str, value: u64, mut selected: Vec<usize>) -> Self {
        selected.sort_unstable();
        Self {
            solver,
            value,
            selected,
            duration: Duration::ZERO,
        }
    }

    /// Returns an empty solution with value 0.
    pub fn empty(solver: &'static str) -> Self {
        Self::new(solver, 0, Vec::new())
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn duration_seconds(&self) -> f64 {
        self.duration.as_secs_f64()
    }

    /// Total weight of the selection against `instance`.
    ///
    /// Returns `None` if an index is out of range or the sum overflows.
    pub fn total_weight(&self, instance: &Instance) -> Option<u64> {
        self.selected.iter().try_fold(0u64, |acc, &index| {
            acc.checked_add(instance.item(index)?.weight)
        })
    }

    /// Checks the solution against `instance`.
    ///
    /// The selection must hold distinct in-range indices in ascending order,
    /// fit in the capacity and add up to the reported value.
    ///
    /// # Example
    ///
    /// ```
    /// use knapbench_core::{Instance, Solution};
    ///
    /// let instance = Instance::from_pairs(10, &[(5, 4), (6, 7)]);
    /// assert!(Solution::new("manual", 5, vec![0]).verify(&instance).is_ok());
    /// assert!(Solution::new("manual", 11, vec![0, 1]).verify(&instance).is_err());
    /// ```
    pub fn verify(&self, instance: &Instance) -> Result<(), KnapsackError> {
        let failure = |msg: String| Err(KnapsackError::SolverFailure(msg));

        if self.selected.windows(2).any(|pair| pair[0] >= pair[1]) {
            return failure(format!(
                "{}: selection {:?} is not strictly ascending",
                self.solver, self.selected
            ));
        }

        let mut value = 0u64;
        let mut weight = 0u64;
        for &index in &self.selected {
            let Some(item) = instance.item(index) else {
                return failure(format!(
                    "{}: selected index {} out of range for {} items",
                    self.solver,
                    index,
                    instance.len()
                ));
            };
            let (Some(v), Some(w)) = (
                value.checked_add(item.value),
                weight.checked_add(item.weight),
            ) else {
                return failure(format!(
                    "{}: selection {:?} overflows a u64 total",
                    self.solver, self.selected
                ));
            };
            value = v;
            weight = w;
        }

        if weight > instance.capacity() {
            return failure(format!(
                "{}: selection weighs {} but capacity is {}",
                self.solver,
                weight,
                instance.capacity()
            ));
        }
        if value != self.value {
            return failure(format!(
                "{}: reported value {} but selection is worth {}",
                self.solver, self.value, value
            ));
        }
        Ok(())
    }
}
