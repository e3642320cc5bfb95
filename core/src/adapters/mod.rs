//! Adapters layer - External system implementations.
//!
//! This module contains implementations of the port traits defined in `ports`.
//! Each adapter handles communication with the operating system.

pub mod enumerator;
pub mod signaler;

// Re-export main types for convenience
pub use enumerator::SystemEnumerator;
pub use signaler::SystemSignaler;
