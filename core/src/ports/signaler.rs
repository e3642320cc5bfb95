//! Process signaler port (interface).

use crate::domain::SignalFailure;

/// Port for asking a process to shut down.
pub trait ProcessSignaler: Send + Sync {
    /// Send a graceful termination request (SIGTERM) to `pid`.
    ///
    /// Never escalates to a forced kill.
    fn terminate(&self, pid: u32) -> std::result::Result<(), SignalFailure>;
}

impl<T: ProcessSignaler + ?Sized> ProcessSignaler for &T {
    fn terminate(&self, pid: u32) -> std::result::Result<(), SignalFailure> {
        (**self).terminate(pid)
    }
}
