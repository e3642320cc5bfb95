//! Ports layer - Trait definitions (interfaces).
//!
//! This module defines the capabilities the application layer needs from the
//! operating system. Implementations live in `adapters`.

mod enumerator;
mod signaler;

pub use enumerator::{ProcessEntry, ProcessEnumerator, ProcessIter};
pub use signaler::ProcessSignaler;
