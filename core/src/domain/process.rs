//! Process and socket snapshot models.

use std::net::SocketAddr;

use serde::{Deserialize, Serialize};

// ============================================================================
// Protocol
// ============================================================================

/// Transport protocol of a socket endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Protocol {
    Tcp,
    Udp,
}

impl std::fmt::Display for Protocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Protocol::Tcp => write!(f, "TCP"),
            Protocol::Udp => write!(f, "UDP"),
        }
    }
}

// ============================================================================
// SocketEndpoint
// ============================================================================

/// A local address/port pair a process had bound or connected when it was
/// enumerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SocketEndpoint {
    /// Transport protocol.
    pub protocol: Protocol,
    /// Local address and port.
    pub local: SocketAddr,
}

impl SocketEndpoint {
    pub fn new(protocol: Protocol, local: SocketAddr) -> Self {
        Self { protocol, local }
    }

    pub fn tcp(local: SocketAddr) -> Self {
        Self::new(Protocol::Tcp, local)
    }

    pub fn udp(local: SocketAddr) -> Self {
        Self::new(Protocol::Udp, local)
    }

    /// Local port number.
    pub fn port(&self) -> u16 {
        self.local.port()
    }
}

impl std::fmt::Display for SocketEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.protocol, self.local)
    }
}

// ============================================================================
// ProcessDescriptor
// ============================================================================

/// Point-in-time snapshot of one OS process and its open sockets.
///
/// The snapshot can be stale as soon as it is taken: the process may exit, and
/// its PID or port may be reused by another process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessDescriptor {
    /// OS-assigned process ID.
    pub pid: u32,
    /// Short process name, if it could be read.
    pub name: Option<String>,
    /// Sockets the process held at enumeration time.
    pub sockets: Vec<SocketEndpoint>,
}

impl ProcessDescriptor {
    pub fn new(pid: u32, name: Option<String>, sockets: Vec<SocketEndpoint>) -> Self {
        Self { pid, name, sockets }
    }

    /// Whether any socket in the snapshot is bound to `port` locally.
    pub fn holds_port(&self, port: u16) -> bool {
        self.sockets.iter().any(|s| s.port() == port)
    }

    /// Name for display, `<unknown>` when unavailable.
    pub fn display_name(&self) -> &str {
        display_name(self.name.as_deref())
    }
}

impl std::fmt::Display for ProcessDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (PID: {})", self.display_name(), self.pid)
    }
}

pub(crate) fn display_name(name: Option<&str>) -> &str {
    match name {
        Some(n) if !n.is_empty() => n,
        _ => "<unknown>",
    }
}
