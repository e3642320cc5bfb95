//! Results of a port owner lookup or termination.

use serde::{Deserialize, Serialize};

use super::process::{display_name, ProcessDescriptor};

/// Why a termination signal could not be delivered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SignalFailure {
    /// The caller lacks permission to signal the process.
    PermissionDenied,
    /// The process no longer exists; it exited after it was matched.
    NoSuchProcess,
    /// Any other OS error.
    Other(String),
}

impl std::fmt::Display for SignalFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignalFailure::PermissionDenied => write!(f, "permission denied"),
            SignalFailure::NoSuchProcess => write!(f, "no such process"),
            SignalFailure::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for SignalFailure {}

/// Result of scanning for the owner of a port, without signalling it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum Lookup {
    /// The first process found holding the port.
    Found { port: u16, process: ProcessDescriptor },
    /// No inspected process holds the port.
    NotFound {
        port: u16,
        /// Processes that could not be inspected during the scan.
        skipped: usize,
    },
}

impl Lookup {
    pub fn port(&self) -> u16 {
        match self {
            Lookup::Found { port, .. } | Lookup::NotFound { port, .. } => *port,
        }
    }
}

impl std::fmt::Display for Lookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Lookup::Found { port, process } => write!(
                f,
                "Process {} with PID {} is using port {}",
                process.display_name(),
                process.pid,
                port
            ),
            Lookup::NotFound { port, .. } => write!(f, "No process found running on port {}", port),
        }
    }
}

/// Result of [`PortTerminator::terminate_owner_of_port`].
///
/// [`PortTerminator::terminate_owner_of_port`]: crate::application::PortTerminator::terminate_owner_of_port
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum Outcome {
    /// SIGTERM was delivered to the matched process. Whether it actually
    /// exits is not checked.
    Terminated {
        port: u16,
        pid: u32,
        name: Option<String>,
    },
    /// No inspected process holds the port.
    NotFound {
        port: u16,
        /// Processes that could not be inspected during the scan.
        skipped: usize,
    },
    /// A process was matched but could not be signalled.
    SignalFailed {
        port: u16,
        pid: u32,
        name: Option<String>,
        failure: SignalFailure,
    },
}

impl Outcome {
    pub fn port(&self) -> u16 {
        match self {
            Outcome::Terminated { port, .. }
            | Outcome::NotFound { port, .. }
            | Outcome::SignalFailed { port, .. } => *port,
        }
    }

    /// PID of the matched process, if any.
    pub fn pid(&self) -> Option<u32> {
        match self {
            Outcome::Terminated { pid, .. } | Outcome::SignalFailed { pid, .. } => Some(*pid),
            Outcome::NotFound { .. } => None,
        }
    }

    pub fn is_terminated(&self) -> bool {
        matches!(self, Outcome::Terminated { .. })
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Terminated { port, pid, name } => write!(
                f,
                "Killing process {} with PID {} on port {}",
                display_name(name.as_deref()),
                pid,
                port
            ),
            Outcome::NotFound { port, .. } => write!(f, "No process found running on port {}", port),
            Outcome::SignalFailed {
                port,
                pid,
                name,
                failure,
            } => write!(
                f,
                "Failed to signal process {} with PID {} on port {}: {}",
                display_name(name.as_deref()),
                pid,
                port,
                failure
            ),
        }
    }
}
