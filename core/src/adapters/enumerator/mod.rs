//! Process enumerator adapters.
//!
//! Platform-specific implementations of process/socket enumeration.

#[cfg(target_os = "macos")]
mod darwin;

#[cfg(target_os = "linux")]
mod linux;

#[cfg(any(target_os = "macos", test))]
mod utils;

use crate::error::Result;
#[cfg(not(any(target_os = "macos", target_os = "linux")))]
use crate::error::Error;
use crate::ports::{ProcessEnumerator, ProcessIter};

/// The process enumerator for the current platform.
pub struct SystemEnumerator {
    #[cfg(target_os = "macos")]
    inner: darwin::DarwinEnumerator,

    #[cfg(target_os = "linux")]
    inner: linux::ProcfsEnumerator,
}

impl SystemEnumerator {
    /// Create a new enumerator for the current platform.
    pub fn new() -> Self {
        Self {
            #[cfg(target_os = "macos")]
            inner: darwin::DarwinEnumerator::new(),

            #[cfg(target_os = "linux")]
            inner: linux::ProcfsEnumerator::new(),
        }
    }
}

impl Default for SystemEnumerator {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessEnumerator for SystemEnumerator {
    #[cfg(any(target_os = "macos", target_os = "linux"))]
    fn processes(&self) -> Result<ProcessIter<'_>> {
        self.inner.processes()
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux")))]
    fn processes(&self) -> Result<ProcessIter<'_>> {
        Err(Error::UnsupportedPlatform(std::env::consts::OS.to_string()))
    }
}
