//! Instance sources.
//!
//! A source names its instances in benchmark order and hands out their raw
//! text on request. Reading is deferred so that one unreadable instance
//! fails alone.

use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::SourceError;

/// Provides raw instance text in a defined order.
pub trait InstanceSource: Sync {
    /// Instance identifiers in the order they are benchmarked.
    fn identifiers(&self) -> Result<Vec<String>, SourceError>;

    /// Raw text of the instance named `identifier`.
    fn read(&self, identifier: &str) -> Result<String, SourceError>;
}

/// Instance files in one directory, in natural file-name order.
///
/// # Example
///
/// ```no_run
/// use knapbench_benchmark::{DirectorySource, InstanceSource};
///
/// let source = DirectorySource::new("instances").with_extension("txt");
/// for id in source.identifiers().unwrap() {
///     println!("{id}");
/// }
/// ```
#[derive(Debug, Clone)]
pub struct DirectorySource {
    directory: PathBuf,
    extension: String,
}

impl DirectorySource {
    /// Creates a source over `*.txt` files in `directory`.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            extension: "txt".to_string(),
        }
    }

    /// Sets the file extension (without the dot).
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }
}

impl InstanceSource for DirectorySource {
    fn identifiers(&self) -> Result<Vec<String>, SourceError> {
        let io_error = |source| SourceError::Io {
            path: self.directory.clone(),
            source,
        };

        let mut names = Vec::new();
        for entry in fs::read_dir(&self.directory).map_err(io_error)? {
            let entry = entry.map_err(io_error)?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|ext| ext.to_str()) != Some(self.extension.as_str()) {
                continue;
            }
            // Non UTF-8 names cannot be reported faithfully; skip them.
            if let Some(name) = path.file_name().and_then(|name| name.to_str()) {
                names.push(name.to_string());
            }
        }

        names.sort_by(|a, b| natural_cmp(a, b));
        Ok(names)
    }

    fn read(&self, identifier: &str) -> Result<String, SourceError> {
        let path = self.directory.join(identifier);
        fs::read_to_string(&path).map_err(|source| SourceError::Io { path, source })
    }
}

/// In-memory instances, in insertion order.
///
/// # Example
///
/// ```
/// use knapbench_benchmark::{InstanceSource, MemorySource};
///
/// let source = MemorySource::new()
///     .with_instance("small", "1 10\n5 3")
///     .with_instance("empty", "0 10");
///
/// assert_eq!(source.identifiers().unwrap(), vec!["small", "empty"]);
/// assert_eq!(source.read("empty").unwrap(), "0 10");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    instances: Vec<(String, String)>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an instance.
    pub fn with_instance(mut self, identifier: impl Into<String>, text: impl Into<String>) -> Self {
        self.push(identifier, text);
        self
    }

    pub fn push(&mut self, identifier: impl Into<String>, text: impl Into<String>) {
        self.instances.push((identifier.into(), text.into()));
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

impl InstanceSource for MemorySource {
    fn identifiers(&self) -> Result<Vec<String>, SourceError> {
        Ok(self.instances.iter().map(|(id, _)| id.clone()).collect())
    }

    fn read(&self, identifier: &str) -> Result<String, SourceError> {
        self.instances
            .iter()
            .find(|(id, _)| id == identifier)
            .map(|(_, text)| text.clone())
            .ok_or_else(|| SourceError::UnknownInstance(identifier.to_string()))
    }
}

/// Compares strings the way people sort file names: runs of ASCII digits
/// compare by numeric value, so `inst2` sorts before `inst10`.
///
/// # Example
///
/// ```
/// use knapbench_benchmark::natural_cmp;
/// use std::cmp::Ordering;
///
/// assert_eq!(natural_cmp("inst2.txt", "inst10.txt"), Ordering::Less);
/// assert_eq!(natural_cmp("b1", "a2"), Ordering::Greater);
/// ```
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let (mut a, mut b) = (a.as_bytes(), b.as_bytes());

    loop {
        match (a.first(), b.first()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) if x.is_ascii_digit() && y.is_ascii_digit() => {
                let (num_a, rest_a) = split_digits(a);
                let (num_b, rest_b) = split_digits(b);
                let ord = compare_digit_runs(num_a, num_b);
                if ord != Ordering::Equal {
                    return ord;
                }
                a = rest_a;
                b = rest_b;
            }
            (Some(x), Some(y)) => {
                let ord = x.cmp(y);
                if ord != Ordering::Equal {
                    return ord;
                }
                a = &a[1..];
                b = &b[1..];
            }
        }
    }
}

fn split_digits(s: &[u8]) -> (&[u8], &[u8]) {
    let end = s.iter().position(|c| !c.is_ascii_digit()).unwrap_or(s.len());
    s.split_at(end)
}

/// Numeric comparison of two digit runs of any length; ties on value are
/// broken by fewer leading zeros first.
fn compare_digit_runs(a: &[u8], b: &[u8]) -> Ordering {
    let zeros = |s: &[u8]| s.iter().take_while(|&&c| c == b'0').count();
    let (za, zb) = (zeros(a), zeros(b));
    let (digits_a, digits_b) = (&a[za..], &b[zb..]);
    digits_a
        .len()
        .cmp(&digits_b.len())
        .then_with(|| digits_a.cmp(digits_b))
        .then_with(|| za.cmp(&zb))
}
