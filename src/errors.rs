// src/errors.rs

//! Crate-wide error type and helpers.
//!
//! Every public operation returns exactly one [`BalanceError`]. Task
//! functions themselves return `anyhow::Result`; the executor wraps their
//! failure in [`BalanceError::Task`] together with the failing task's name.

use std::fmt;

use thiserror::Error;

use crate::dag::TaskName;

/// Which bound a computed total violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundViolation {
    /// The total was not strictly greater than `above`.
    BelowMinimum { total: i64, above: i64 },
    /// The total was not strictly less than `below`.
    AboveMaximum { total: i64, below: i64 },
}

impl fmt::Display for BoundViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundViolation::BelowMinimum { total, above } => {
                write!(f, "below minimum (total {total} is not above {above})")
            }
            BoundViolation::AboveMaximum { total, below } => {
                write!(f, "above maximum (total {total} is not below {below})")
            }
        }
    }
}

#[derive(Error, Debug)]
pub enum BalanceError {
    /// Bad task graph or bad config: unknown names, cycles, missing target.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A named task's function failed (or panicked).
    #[error("Task '{task}' failed: {cause:#}")]
    Task { task: TaskName, cause: anyhow::Error },

    #[error("Out of bounds: {0}")]
    OutOfBounds(BoundViolation),

    /// Internal invariant broken (overflow, non-finite data, stalled graph).
    #[error("Calculation error: {0}")]
    Calculation(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Coarse category of a [`BalanceError`], used for diagnostics and exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    /// Failure reported by a task that is not one of our own typed errors,
    /// e.g. a transport error from the node client.
    Task,
    OutOfBounds,
    Calculation,
    Io,
}

impl ErrorKind {
    /// Stable machine-readable code.
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::Configuration => "InvalidConfiguration",
            ErrorKind::Task => "TaskFailed",
            ErrorKind::OutOfBounds => "BalanceOutOfBounds",
            ErrorKind::Calculation => "FailedToCalculateBalance",
            ErrorKind::Io => "IoFailure",
        }
    }

    /// Process exit status used by the CLI.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorKind::OutOfBounds => 2,
            _ => 1,
        }
    }
}

impl BalanceError {
    pub fn task(task: impl Into<TaskName>, cause: anyhow::Error) -> Self {
        BalanceError::Task {
            task: task.into(),
            cause,
        }
    }

    /// Name of the failed task, if this error came out of the executor.
    pub fn task_name(&self) -> Option<&str> {
        match self {
            BalanceError::Task { task, .. } => Some(task.as_str()),
            _ => None,
        }
    }

    /// Category of this error.
    ///
    /// Looks through `Task` so that a bound violation raised inside a task is
    /// still reported as `OutOfBounds` rather than as a generic task failure.
    pub fn kind(&self) -> ErrorKind {
        match self {
            BalanceError::Configuration(_) => ErrorKind::Configuration,
            BalanceError::Task { cause, .. } => cause
                .downcast_ref::<BalanceError>()
                .map(BalanceError::kind)
                .unwrap_or(ErrorKind::Task),
            BalanceError::OutOfBounds(_) => ErrorKind::OutOfBounds,
            BalanceError::Calculation(_) => ErrorKind::Calculation,
            BalanceError::IoError(_) => ErrorKind::Io,
            BalanceError::TomlError(_) | BalanceError::JsonError(_) => ErrorKind::Configuration,
            BalanceError::Other(_) => ErrorKind::Task,
        }
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, BalanceError>;
