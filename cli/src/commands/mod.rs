//! Command implementations.

use tracing::warn;

pub mod find;
pub mod kill;

/// No process holds the port.
pub const EXIT_NOT_FOUND: u8 = 1;
/// The owner was found but could not be signalled.
pub const EXIT_SIGNAL_FAILED: u8 = 2;
/// The process table could not be read.
pub const EXIT_FATAL: u8 = 3;

/// Hint shown when a scan ends without a match but some processes were
/// unreadable.
pub fn skipped_hint(skipped: usize) -> Option<String> {
    (skipped > 0).then(|| {
        format!(
            "{} processes could not be inspected; try again with elevated privileges",
            skipped
        )
    })
}

/// Log [`skipped_hint`] to stderr, if any.
pub fn warn_skipped(skipped: usize) {
    if let Some(hint) = skipped_hint(skipped) {
        warn!("{}", hint);
    }
}
