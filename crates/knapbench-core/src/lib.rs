//! knapbench core: the 0/1 knapsack instance model and its solvers.
//!
//! - [`Instance`]: capacity plus ordered items, parsed from the text format
//! - [`DynamicProgrammingSolver`]: exact optimum and witness subset
//! - [`GreedySolver`]: fast value-density approximation
//!
//! # Example
//!
//! ```
//! use knapbench_core::{solve_timed, DynamicProgrammingSolver, GreedySolver, Instance, SolveBudget};
//!
//! let instance: Instance = "3 50\n60 10\n100 20\n120 30".parse().unwrap();
//! let budget = SolveBudget::unlimited();
//!
//! let exact = solve_timed(&DynamicProgrammingSolver, &instance, &budget).unwrap();
//! let greedy = solve_timed(&GreedySolver, &instance, &budget).unwrap();
//! assert!(exact.value >= greedy.value);
//! ```

pub mod error;
pub mod instance;
pub mod solution;
pub mod solver;

pub use error::{ErrorKind, KnapsackError, ParseError, ParseErrorKind, ResourceExceeded, Result};
pub use instance::{Instance, Item};
pub use solution::Solution;
pub use solver::{
    solve_timed, Deadline, DynamicProgrammingSolver, GreedySolver, KnapsackSolver, SolveBudget,
};
