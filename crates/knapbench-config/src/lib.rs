//! Configuration system for knapbench.
//!
//! Load benchmark configuration from TOML or YAML files to choose the
//! instance directory, resource limits and report outputs without code
//! changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use knapbench_config::BenchmarkConfig;
//! use std::time::Duration;
//!
//! let config = BenchmarkConfig::from_toml_str(r#"
//!     name = "Nightly"
//!
//!     [instances]
//!     directory = "instances"
//!
//!     [limits]
//!     max_table_cells = 50_000_000
//!     instance_time_limit_seconds = 30
//!
//!     [output]
//!     csv = "DynamicAndGreedyCompare.csv"
//! "#).unwrap();
//!
//! assert_eq!(config.name, "Nightly");
//! assert_eq!(config.instances.extension, "txt");
//! assert_eq!(config.time_limit(), Some(Duration::from_secs(30)));
//! ```
//!
//! Use default config when file is missing, but not when it is malformed:
//!
//! ```
//! use knapbench_config::{BenchmarkConfig, ConfigError};
//!
//! let config = match BenchmarkConfig::load("/nonexistent/knapbench.toml") {
//!     Err(ConfigError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
//!         BenchmarkConfig::default()
//!     }
//!     other => other.unwrap(),
//! };
//! assert_eq!(config, BenchmarkConfig::default());
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default cap on DP table cells (800 MB of `u64` cells).
pub const DEFAULT_MAX_TABLE_CELLS: u64 = 100_000_000;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main benchmark configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct BenchmarkConfig {
    /// Benchmark name shown in reports.
    pub name: String,

    /// Where instances come from.
    pub instances: InstancesConfig,

    /// Per-instance resource limits.
    pub limits: LimitsConfig,

    /// Execution strategy.
    pub execution: ExecutionConfig,

    /// Report outputs.
    pub output: OutputConfig,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            name: "Knapsack Benchmark".to_string(),
            instances: InstancesConfig::default(),
            limits: LimitsConfig::default(),
            execution: ExecutionConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl BenchmarkConfig {
    /// Creates a new default configuration with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Loads configuration from a file, choosing the format by extension.
    ///
    /// `.yaml` and `.yml` files are read as YAML, anything else as TOML.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML/YAML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_file(path),
            _ => Self::from_toml_file(path),
        }
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Sets the instance directory.
    pub fn with_instance_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.instances.directory = directory.into();
        self
    }

    /// Sets the instance file extension (without the dot).
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.instances.extension = extension.into();
        self
    }

    /// Sets the DP table cell limit.
    pub fn with_max_table_cells(mut self, cells: u64) -> Self {
        self.limits.max_table_cells = Some(cells);
        self
    }

    /// Removes the DP table cell limit.
    pub fn without_table_limit(mut self) -> Self {
        self.limits.max_table_cells = None;
        self
    }

    /// Sets the per-instance time limit.
    pub fn with_time_limit_seconds(mut self, seconds: u64) -> Self {
        self.limits.instance_time_limit_seconds = Some(seconds);
        self
    }

    /// Processes instances in parallel.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.execution.parallel = parallel;
        self
    }

    /// Sets the number of unmeasured warmup solves per instance.
    pub fn with_warmup_count(mut self, count: usize) -> Self {
        self.execution.warmup_count = count;
        self
    }

    /// Sets the output path for CSV export.
    pub fn with_csv_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output.csv = Some(path.into());
        self
    }

    /// Sets the output path for the Markdown report.
    pub fn with_markdown_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output.markdown = Some(path.into());
        self
    }

    /// Sets the output path for JSON export.
    pub fn with_json_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output.json = Some(path.into());
        self
    }

    /// Returns the per-instance time limit, if configured.
    ///
    /// # Examples
    ///
    /// ```
    /// use knapbench_config::BenchmarkConfig;
    /// use std::time::Duration;
    ///
    /// let config = BenchmarkConfig::default().with_time_limit_seconds(5);
    /// assert_eq!(config.time_limit(), Some(Duration::from_secs(5)));
    /// assert_eq!(BenchmarkConfig::default().time_limit(), None);
    /// ```
    pub fn time_limit(&self) -> Option<Duration> {
        self.limits.time_limit()
    }

    /// Checks values that deserialize fine but cannot be used.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::Invalid("name must not be empty".to_string()));
        }
        let extension = &self.instances.extension;
        if extension.is_empty() || extension.starts_with('.') {
            return Err(ConfigError::Invalid(format!(
                "instances.extension must be non-empty and given without a leading dot, got {:?}",
                extension
            )));
        }
        if self.limits.max_table_cells == Some(0) {
            return Err(ConfigError::Invalid(
                "limits.max_table_cells must be positive".to_string(),
            ));
        }
        if self.limits.instance_time_limit_seconds == Some(0) {
            return Err(ConfigError::Invalid(
                "limits.instance_time_limit_seconds must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Instance discovery configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct InstancesConfig {
    /// Directory scanned for instance files.
    pub directory: PathBuf,

    /// File extension of instance files, without the dot.
    pub extension: String,
}

impl Default for InstancesConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("instances"),
            extension: "txt".to_string(),
        }
    }
}

/// Resource limits applied to every instance.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct LimitsConfig {
    /// Maximum DP table cells; `None` disables the check.
    pub max_table_cells: Option<u64>,

    /// Wall-clock limit per instance, in seconds.
    pub instance_time_limit_seconds: Option<u64>,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_table_cells: Some(DEFAULT_MAX_TABLE_CELLS),
            instance_time_limit_seconds: None,
        }
    }
}

impl LimitsConfig {
    /// Returns the time limit as a Duration, if any.
    pub fn time_limit(&self) -> Option<Duration> {
        self.instance_time_limit_seconds.map(Duration::from_secs)
    }
}

/// Execution strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ExecutionConfig {
    /// Process independent instances on a thread pool.
    pub parallel: bool,

    /// Unmeasured solves of each solver before timing.
    pub warmup_count: usize,
}

/// Report output paths. Unset outputs are skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct OutputConfig {
    pub csv: Option<PathBuf>,
    pub markdown: Option<PathBuf>,
    pub json: Option<PathBuf>,
}

impl OutputConfig {
    /// Returns true if no output is configured.
    pub fn is_empty(&self) -> bool {
        self.csv.is_none() && self.markdown.is_none() && self.json.is_none()
    }
}
