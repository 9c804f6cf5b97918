//! Error types for dataset handling, grid algebra preconditions and tooling I/O
//!
//! Per-example candidate failures are not errors in this sense: they are
//! folded into verification outcomes (see `algorithm::execution::Fault`) and
//! never reach the caller as a `SolverError`.

use std::fmt;
use std::path::PathBuf;

/// Main error type for all fallible engine and tooling operations
#[derive(Debug)]
pub enum SolverError {
    /// A grid shape precondition was violated
    Dimension {
        /// Name of the grid operation that rejected its input
        operation: &'static str,
        /// Description of the violated precondition
        reason: String,
    },

    /// A dataset handed to the engine is malformed
    ///
    /// Fatal to the task it belongs to, never to the rest of a batch.
    Dataset {
        /// Name of the offending task
        task: String,
        /// Description of what is wrong with the dataset
        reason: String,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Task file could not be parsed as JSON
    Parse {
        /// Path to the task file
        path: PathBuf,
        /// Underlying JSON error
        source: serde_json::Error,
    },

    /// Failed to save a rendered grid to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dimension { operation, reason } => {
                write!(f, "Dimension error in {operation}: {reason}")
            }
            Self::Dataset { task, reason } => {
                write!(f, "Invalid dataset '{task}': {reason}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::Parse { path, source } => {
                write!(f, "Failed to parse task '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for SolverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse { source, .. } => Some(source),
            Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SolverError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Convenience type alias for engine results
pub type Result<T> = std::result::Result<T, SolverError>;

impl SolverError {
    /// Whether this error only invalidates a single task
    pub const fn is_task_local(&self) -> bool {
        matches!(self, Self::Dataset { .. } | Self::Parse { .. })
    }
}

/// Create a dimension precondition error
pub fn dimension_error(operation: &'static str, reason: &impl ToString) -> SolverError {
    SolverError::Dimension {
        operation,
        reason: reason.to_string(),
    }
}

/// Create a dataset error for the named task
pub fn dataset_error(task: &impl ToString, reason: &impl ToString) -> SolverError {
    SolverError::Dataset {
        task: task.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> SolverError {
    SolverError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Attach a path and operation to an I/O error
pub fn file_system_error(
    path: impl Into<PathBuf>,
    operation: &'static str,
    source: std::io::Error,
) -> SolverError {
    SolverError::FileSystem {
        path: path.into(),
        operation,
        source,
    }
}
