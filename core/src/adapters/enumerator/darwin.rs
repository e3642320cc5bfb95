//! macOS process enumerator using lsof.

use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::{Error, Result};
use crate::ports::{ProcessEnumerator, ProcessIter};

use super::utils::Utils;

/// macOS-specific enumerator using lsof.
///
/// lsof only reports processes the caller may inspect, so on macOS hidden
/// processes are silently absent rather than reported as skips.
pub struct DarwinEnumerator;

impl DarwinEnumerator {
    /// Create a new macOS enumerator.
    pub fn new() -> Self {
        Self
    }
}

impl Default for DarwinEnumerator {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessEnumerator for DarwinEnumerator {
    /// List every internet socket using lsof.
    ///
    /// Executes: `lsof -i -P -n +c 0`
    ///
    /// Flags explained:
    /// - -i: Show all internet sockets (TCP and UDP, any state)
    /// - -P: Show port numbers (don't resolve to service names)
    /// - -n: Show IP addresses (don't resolve to hostnames)
    /// - +c 0: Show full command name (unlimited length)
    fn processes(&self) -> Result<ProcessIter<'_>> {
        let output = Command::new("/usr/sbin/lsof")
            .args(["-i", "-P", "-n", "+c", "0"])
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| Error::CommandFailed(format!("Failed to run lsof: {}", e)))?;

        Utils::check_lsof_status(output.status.success(), &output.stdout, &output.stderr)?;
        if !output.status.success() {
            debug!(status = ?output.status, "lsof reported partial results");
        }

        let stdout = String::from_utf8(output.stdout)
            .map_err(|e| Error::ParseError(format!("Invalid UTF-8 in lsof output: {}", e)))?;

        let processes = Utils::parse_lsof_output(&stdout);
        debug!(processes = processes.len(), "Parsed lsof output");
        Ok(Box::new(processes.into_iter().map(Ok)))
    }
}
