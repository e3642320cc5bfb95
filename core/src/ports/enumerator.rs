//! Process enumerator port (interface).

use crate::domain::ProcessDescriptor;
use crate::error::{EnumerationSkip, Result};

/// One entry of a process table scan.
pub type ProcessEntry = std::result::Result<ProcessDescriptor, EnumerationSkip>;

/// Lazy sequence of process table entries.
pub type ProcessIter<'a> = Box<dyn Iterator<Item = ProcessEntry> + 'a>;

/// Port for enumerating OS processes together with their sockets.
///
/// Implementations yield processes in whatever order the OS exposes them.
/// A process that cannot be inspected is yielded as an [`EnumerationSkip`]
/// and must not end the sequence.
pub trait ProcessEnumerator: Send + Sync {
    /// Start a scan of the process table.
    ///
    /// Returns an error only when the table as a whole is unreadable.
    fn processes(&self) -> Result<ProcessIter<'_>>;
}

impl<T: ProcessEnumerator + ?Sized> ProcessEnumerator for &T {
    fn processes(&self) -> Result<ProcessIter<'_>> {
        (**self).processes()
    }
}
