//! Signal delivery adapter.

use tracing::debug;

use crate::domain::SignalFailure;
use crate::ports::ProcessSignaler;

/// Sends SIGTERM through `kill(2)`.
#[derive(Debug, Default)]
pub struct SystemSignaler;

impl SystemSignaler {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(unix)]
impl ProcessSignaler for SystemSignaler {
    fn terminate(&self, pid: u32) -> std::result::Result<(), SignalFailure> {
        use nix::errno::Errno;
        use nix::sys::signal::{kill, Signal};
        use nix::unistd::Pid;

        // kill(2) treats 0 and negative values as process groups.
        let raw = match i32::try_from(pid) {
            Ok(raw) if raw > 0 => raw,
            _ => return Err(SignalFailure::Other(format!("invalid PID {}", pid))),
        };

        debug!(pid = pid, "Sending SIGTERM");
        match kill(Pid::from_raw(raw), Signal::SIGTERM) {
            Ok(()) => Ok(()),
            Err(Errno::ESRCH) => Err(SignalFailure::NoSuchProcess),
            Err(Errno::EPERM) => Err(SignalFailure::PermissionDenied),
            Err(e) => Err(SignalFailure::Other(e.to_string())),
        }
    }
}

#[cfg(not(unix))]
impl ProcessSignaler for SystemSignaler {
    fn terminate(&self, pid: u32) -> std::result::Result<(), SignalFailure> {
        debug!(pid = pid, "Signals are not supported on this platform");
        Err(SignalFailure::Other(format!(
            "signals are not supported on {}",
            std::env::consts::OS
        )))
    }
}
