//! Benchmark errors.

use std::path::PathBuf;

use knapbench_core::KnapsackError;
use thiserror::Error;

/// Failure to enumerate or read instance sources.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unknown instance: {0}")]
    UnknownInstance(String),
}

/// Errors that abort a whole benchmark run.
///
/// Per-instance problems never surface here; they become failed records.
#[derive(Debug, Error)]
pub enum BenchmarkError {
    /// The source could not list its instances.
    #[error("Cannot enumerate instances: {0}")]
    Source(#[from] SourceError),

    /// A solver broke an invariant; results cannot be trusted.
    #[error("Fatal solver error on instance {instance}: {source}")]
    Fatal {
        instance: String,
        #[source]
        source: KnapsackError,
    },
}
