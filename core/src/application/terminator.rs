//! Port owner termination service.

use tracing::{debug, info, warn};

use crate::domain::{Lookup, Outcome};
use crate::error::Result;
use crate::ports::{ProcessEnumerator, ProcessSignaler};

/// Application service that finds the process holding a port and asks it to
/// terminate.
///
/// The scan is a single linear pass over the process table. The first
/// process whose snapshot holds the port wins; the OS decides the order, so
/// when several processes share a port (e.g. `SO_REUSEPORT`) which one is
/// picked is platform- and timing-dependent.
///
/// Running it twice is not idempotent. The second call may report
/// `NotFound`, or target a different process that bound the port in between.
pub struct PortTerminator<E: ProcessEnumerator, S: ProcessSignaler> {
    enumerator: E,
    signaler: S,
}

impl<E: ProcessEnumerator, S: ProcessSignaler> PortTerminator<E, S> {
    /// Create a new service from its two capabilities.
    pub fn new(enumerator: E, signaler: S) -> Self {
        Self {
            enumerator,
            signaler,
        }
    }

    /// Find the first process holding `port`, without signalling it.
    pub fn find_owner_of_port(&self, port: u16) -> Result<Lookup> {
        let mut skipped = 0usize;

        for entry in self.enumerator.processes()? {
            let process = match entry {
                Ok(process) => process,
                Err(skip) => {
                    debug!(pid = ?skip.pid, reason = %skip.reason, "Skipping process");
                    skipped += 1;
                    continue;
                }
            };

            if process.holds_port(port) {
                debug!(port = port, pid = process.pid, "Found port owner");
                return Ok(Lookup::Found { port, process });
            }
        }

        if skipped > 0 {
            info!(port = port, skipped = skipped, "Some processes could not be inspected");
        }
        Ok(Lookup::NotFound { port, skipped })
    }

    /// Find the first process holding `port` and send it SIGTERM.
    ///
    /// At most one process is signalled. Only a failure to read the process
    /// table is returned as `Err`; a failed signal is reported as
    /// [`Outcome::SignalFailed`].
    pub fn terminate_owner_of_port(&self, port: u16) -> Result<Outcome> {
        let process = match self.find_owner_of_port(port)? {
            Lookup::Found { process, .. } => process,
            Lookup::NotFound { skipped, .. } => return Ok(Outcome::NotFound { port, skipped }),
        };

        // The snapshot may already be stale here: the process can exit, or the
        // port can be rebound, before the signal lands.
        match self.signaler.terminate(process.pid) {
            Ok(()) => {
                info!(port = port, pid = process.pid, "Sent SIGTERM to port owner");
                Ok(Outcome::Terminated {
                    port,
                    pid: process.pid,
                    name: process.name,
                })
            }
            Err(failure) => {
                warn!(
                    port = port,
                    pid = process.pid,
                    error = %failure,
                    "Failed to signal port owner"
                );
                Ok(Outcome::SignalFailed {
                    port,
                    pid: process.pid,
                    name: process.name,
                    failure,
                })
            }
        }
    }
}
