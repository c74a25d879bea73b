//! Exact solver: table-filling dynamic programming.

use crate::error::{KnapsackError, ResourceExceeded};
use crate::instance::Instance;
use crate::solution::Solution;

use super::{value_bound, KnapsackSolver, SolveBudget};

/// Exact 0/1 knapsack solver.
///
/// Fills `best[i][w]`, the optimal value using the first `i` items under
/// budget `w`, in a flat row-major buffer of `(N + 1) x (W + 1)` cells,
/// where `W` is the capacity clamped to the total item weight. The optimal
/// subset is recovered by walking the table back from `(N, W)`.
///
/// # Example
///
/// ```
/// use knapbench_core::{DynamicProgrammingSolver, Instance, KnapsackSolver, SolveBudget};
///
/// let instance = Instance::from_pairs(50, &[(60, 10), (100, 20), (120, 30)]);
/// let solution = DynamicProgrammingSolver
///     .solve(&instance, &SolveBudget::unlimited())
///     .unwrap();
///
/// assert_eq!(solution.value, 220);
/// assert_eq!(solution.selected, vec![1, 2]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DynamicProgrammingSolver;

impl DynamicProgrammingSolver {
    pub const NAME: &'static str = "dynamic";

    /// Computes only the optimal value, using a single row of `W + 1` cells.
    ///
    /// No selection is recovered. The row size is still subject to the
    /// budget's cell limit.
    pub fn optimal_value(
        &self,
        instance: &Instance,
        budget: &SolveBudget,
    ) -> Result<u64, KnapsackError> {
        value_bound(instance)?;
        let width = table_width(instance)?;
        check_cells(budget, width as u64)?;
        let mut row = allocate(width)?;

        for item in instance.items() {
            budget.check_deadline()?;
            let Ok(weight) = usize::try_from(item.weight) else {
                continue;
            };
            if weight >= width {
                continue;
            }
            for w in (weight..width).rev() {
                let take = row[w - weight] + item.value;
                if take > row[w] {
                    row[w] = take;
                }
            }
        }

        Ok(row[width - 1])
    }
}

impl KnapsackSolver for DynamicProgrammingSolver {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn solve(&self, instance: &Instance, budget: &SolveBudget) -> Result<Solution, KnapsackError> {
        if instance.is_empty() {
            return Ok(Solution::empty(Self::NAME));
        }
        value_bound(instance)?;

        let overflow = || ResourceExceeded::TableOverflow {
            items: instance.len(),
            capacity: instance.capacity(),
        };
        let cells = instance.table_cells().ok_or_else(overflow)?;
        check_cells(budget, cells)?;
        let cells = usize::try_from(cells).map_err(|_| overflow())?;
        let width = table_width(instance)?;

        let mut table = Table::new(allocate(cells)?, width);

        for (i, item) in instance.items().iter().enumerate() {
            budget.check_deadline()?;
            let row = i + 1;
            // Row 0 stays zero.
            for w in 0..width {
                let skip = table.get(row - 1, w);
                let best = match usize::try_from(item.weight) {
                    Ok(weight) if weight <= w => {
                        skip.max(table.get(row - 1, w - weight) + item.value)
                    }
                    _ => skip,
                };
                table.set(row, w, best);
            }
        }

        let value = table.get(instance.len(), width - 1);
        let selected = reconstruct(instance, &table)?;
        Ok(Solution::new(Self::NAME, value, selected))
    }
}

/// Walks the table from `(N, W)` back to row 0.
///
/// Keeps walking after `w` reaches 0 so zero-weight items are still picked.
fn reconstruct(instance: &Instance, table: &Table) -> Result<Vec<usize>, KnapsackError> {
    let mut selected = Vec::new();
    let mut w = table.width - 1;

    for row in (1..=instance.len()).rev() {
        if table.get(row, w) == table.get(row - 1, w) {
            continue;
        }
        let item = &instance.items()[row - 1];
        w = usize::try_from(item.weight)
            .ok()
            .and_then(|weight| w.checked_sub(weight))
            .ok_or_else(|| {
                KnapsackError::SolverFailure(format!(
                    "reconstruction selected item {} of weight {} with only {} capacity left",
                    item.index, item.weight, w
                ))
            })?;
        selected.push(item.index);
    }

    selected.reverse();
    Ok(selected)
}

/// Capacity columns needed: `min(capacity, total weight) + 1`.
///
/// Budgets past the total weight all share the same optimum.
fn table_width(instance: &Instance) -> Result<usize, ResourceExceeded> {
    let effective = instance.capacity().min(instance.total_weight());
    effective
        .checked_add(1)
        .and_then(|cols| usize::try_from(cols).ok())
        .ok_or(ResourceExceeded::TableOverflow {
            items: instance.len(),
            capacity: instance.capacity(),
        })
}

fn check_cells(budget: &SolveBudget, cells: u64) -> Result<(), ResourceExceeded> {
    match budget.max_table_cells() {
        Some(limit) if cells > limit => Err(ResourceExceeded::TableTooLarge { cells, limit }),
        _ => Ok(()),
    }
}

fn allocate(cells: usize) -> Result<Vec<u64>, ResourceExceeded> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(cells)
        .map_err(|_| ResourceExceeded::AllocationFailed {
            cells: cells as u64,
        })?;
    buffer.resize(cells, 0);
    Ok(buffer)
}

/// Row-major DP grid.
struct Table {
    cells: Vec<u64>,
    width: usize,
}

impl Table {
    fn new(cells: Vec<u64>, width: usize) -> Self {
        Self { cells, width }
    }

    #[inline]
    fn get(&self, row: usize, w: usize) -> u64 {
        self.cells[row * self.width + w]
    }

    #[inline]
    fn set(&mut self, row: usize, w: usize, value: u64) {
        self.cells[row * self.width + w] = value;
    }
}
