//! Error types for knapbench

use std::time::Duration;

use thiserror::Error;

/// Main error type for instance parsing and solving.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KnapsackError {
    /// The instance source is malformed or inconsistent.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The solve would exceed its memory or time budget.
    #[error(transparent)]
    ResourceExceeded(#[from] ResourceExceeded),

    /// A solver broke one of its own invariants.
    ///
    /// Unreachable for validated input; callers treat it as fatal.
    #[error("Solver failure: {0}")]
    SolverFailure(String),
}

impl KnapsackError {
    /// Returns the coarse classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            KnapsackError::Parse(_) => ErrorKind::Parse,
            KnapsackError::ResourceExceeded(_) => ErrorKind::ResourceExceeded,
            KnapsackError::SolverFailure(_) => ErrorKind::SolverFailure,
        }
    }

    /// Returns true for errors that indicate a bug rather than bad data.
    pub fn is_fatal(&self) -> bool {
        self.kind() == ErrorKind::SolverFailure
    }
}

/// Classification of a [`KnapsackError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Parse,
    ResourceExceeded,
    SolverFailure,
}

/// Error raised while parsing an instance source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Parse error at line {line}: {kind}")]
pub struct ParseError {
    /// 1-based line of the source the error refers to.
    pub line: usize,
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub fn new(line: usize, kind: ParseErrorKind) -> Self {
        Self { line, kind }
    }
}

/// What went wrong while parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("missing header line `<itemCount> <capacity>`")]
    MissingHeader,

    #[error("missing {field}")]
    MissingField { field: &'static str },

    #[error("{field} is not an integer: {token:?}")]
    NotAnInteger { field: &'static str, token: String },

    #[error("{field} is negative: {value}")]
    Negative { field: &'static str, value: i64 },

    #[error("unexpected trailing field {token:?}")]
    TrailingField { token: String },

    #[error("declared {declared} items but found {found}")]
    ItemCountMismatch { declared: usize, found: usize },

    #[error("total item value exceeds {}", u64::MAX)]
    TotalValueOverflow,
}

/// Resource budget violations raised by the solvers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResourceExceeded {
    /// DP table would hold more cells than allowed.
    #[error("DP table of {cells} cells exceeds the limit of {limit} cells")]
    TableTooLarge { cells: u64, limit: u64 },

    /// DP table dimensions overflow the address space.
    #[error("DP table for {items} items and capacity {capacity} overflows the address space")]
    TableOverflow { items: usize, capacity: u64 },

    /// The allocator refused the DP table.
    #[error("failed to allocate a DP table of {cells} cells")]
    AllocationFailed { cells: u64 },

    /// Item values add up to more than a `u64` holds.
    #[error("total value of {items} items exceeds {}", u64::MAX)]
    ValueOverflow { items: usize },

    /// The solve ran past its deadline.
    #[error("time limit of {limit:?} exceeded")]
    TimeLimit { limit: Duration },
}

/// Result type alias for knapbench operations
pub type Result<T> = std::result::Result<T, KnapsackError>;
