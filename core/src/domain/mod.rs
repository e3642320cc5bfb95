//! Domain layer - Pure data models.
//!
//! These types describe process/socket snapshots and the results of a scan.
//! They have no I/O dependencies and can be tested in isolation.

mod outcome;
mod process;

// Re-export all domain types
pub use outcome::{Lookup, Outcome, SignalFailure};
pub use process::{ProcessDescriptor, Protocol, SocketEndpoint};
