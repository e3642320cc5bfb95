//! portreap Core Library
//!
//! Finds the process that holds a network port and asks it to terminate.
//! Provides functionality to:
//! - Enumerate OS processes together with their open TCP/UDP sockets
//! - Find the first process whose socket is bound to a given local port
//! - Send that process a graceful termination request (SIGTERM)
//!
//! # Architecture
//! This library follows hexagonal architecture (ports & adapters):
//! - `domain`: Pure data models (process snapshots, outcomes)
//! - `ports`: Trait definitions (`ProcessEnumerator`, `ProcessSignaler`)
//! - `adapters`: Operating system implementations
//! - `application`: The `PortTerminator` use case service
//!
//! # Platform Support
//! - Linux: Reads `/proc` (process table and `/proc/net/{tcp,udp}{,6}`)
//! - macOS: Uses `lsof`
//! - Other platforms: enumeration reports `Error::UnsupportedPlatform`
//!
//! # Races
//! The process snapshot is taken before the signal is sent. A process can
//! exit, or another process can bind the same port, in between. The scan
//! never re-checks, so a stale match is signalled as-is or reported as
//! `SignalFailure::NoSuchProcess`.

// Hexagonal architecture layers
pub mod adapters;
pub mod application;
pub mod domain;
pub mod error;
pub mod ports;

// Re-export domain types (primary API)
pub use domain::{Lookup, Outcome, ProcessDescriptor, Protocol, SignalFailure, SocketEndpoint};

// Re-export other commonly used types
pub use adapters::{SystemEnumerator, SystemSignaler};
pub use application::PortTerminator;
pub use error::{EnumerationSkip, Error, Result, SkipReason};
pub use ports::{ProcessEnumerator, ProcessSignaler};

/// Build a terminator wired to the current platform's process table and
/// signal delivery.
pub fn system_terminator() -> PortTerminator<SystemEnumerator, SystemSignaler> {
    PortTerminator::new(SystemEnumerator::new(), SystemSignaler::new())
}
