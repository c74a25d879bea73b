//! Heuristic solver: greedy by value density.

use std::cmp::Ordering;

use crate::error::KnapsackError;
use crate::instance::{Instance, Item};
use crate::solution::Solution;

use super::{value_bound, KnapsackSolver, SolveBudget};

/// Greedy value/weight heuristic.
///
/// Items are ranked by descending [`Item::ratio`], ties broken by ascending
/// index, and admitted in that order whenever they fit in the remaining
/// capacity. A skipped item is never reconsidered. Items of zero weight and
/// zero value are never admitted.
///
/// # Example
///
/// ```
/// use knapbench_core::{GreedySolver, Instance, KnapsackSolver, SolveBudget};
///
/// let instance = Instance::from_pairs(50, &[(60, 10), (100, 20), (120, 30)]);
/// let solution = GreedySolver.solve(&instance, &SolveBudget::unlimited()).unwrap();
///
/// assert_eq!(solution.value, 160);
/// assert_eq!(solution.selected, vec![0, 1]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedySolver;

impl GreedySolver {
    pub const NAME: &'static str = "greedy";

    /// Returns the items in admission order.
    pub fn ranking(instance: &Instance) -> Vec<&Item> {
        let mut ranked: Vec<&Item> = instance.items().iter().collect();
        ranked.sort_by(|a, b| by_density(a, b));
        ranked
    }
}

fn by_density(a: &Item, b: &Item) -> Ordering {
    b.ratio()
        .total_cmp(&a.ratio())
        .then_with(|| a.index.cmp(&b.index))
}

impl KnapsackSolver for GreedySolver {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn solve(&self, instance: &Instance, budget: &SolveBudget) -> Result<Solution, KnapsackError> {
        value_bound(instance)?;
        let ranked = Self::ranking(instance);
        budget.check_deadline()?;

        let mut remaining = instance.capacity();
        let mut value = 0u64;
        let mut selected = Vec::new();

        for item in ranked {
            // Zero-weight, zero-value items change nothing; leave them out.
            if item.weight > remaining || (item.weight == 0 && item.value == 0) {
                continue;
            }
            remaining -= item.weight;
            value += item.value;
            selected.push(item.index);
        }

        Ok(Solution::new(Self::NAME, value, selected))
    }
}
