//! Error types for the portreap-core library.

use thiserror::Error;

/// Result type alias for portreap operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal errors: the process table itself could not be read.
///
/// Anything that only affects a single process is an [`EnumerationSkip`]
/// instead, and a failed signal is reported through
/// [`Outcome::SignalFailed`](crate::domain::Outcome::SignalFailed).
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to execute a system command.
    #[error("Command execution failed: {0}")]
    CommandFailed(String),

    /// Failed to parse command output.
    #[error("Failed to parse output: {0}")]
    ParseError(String),

    /// The process or socket table could not be read.
    #[error("Process lookup failed: {0}")]
    LookupFailed(String),

    /// Permission denied while reading the process or socket table.
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Platform not supported.
    #[error("Platform not supported: {0}")]
    UnsupportedPlatform(String),
}

/// Why a single process was left out of the scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The process exited while it was being inspected.
    Exited,
    /// The caller may not read this process's descriptors.
    PermissionDenied,
    /// Any other per-process failure.
    Other(String),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::Exited => write!(f, "process exited"),
            SkipReason::PermissionDenied => write!(f, "permission denied"),
            SkipReason::Other(msg) => write!(f, "{}", msg),
        }
    }
}

/// A non-fatal failure to inspect one process during enumeration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Skipped process {}: {reason}", display_pid(.pid))]
pub struct EnumerationSkip {
    /// PID of the skipped process, when it was known.
    pub pid: Option<u32>,
    /// What went wrong.
    pub reason: SkipReason,
}

fn display_pid(pid: &Option<u32>) -> String {
    pid.map_or_else(|| "?".to_string(), |p| p.to_string())
}

impl EnumerationSkip {
    pub fn new(pid: impl Into<Option<u32>>, reason: SkipReason) -> Self {
        Self {
            pid: pid.into(),
            reason,
        }
    }
}
