//! `lsof` output parsing.

use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};

use tracing::trace;

use crate::domain::{ProcessDescriptor, Protocol, SocketEndpoint};
use crate::error::{Error, Result};

pub struct Utils;

impl Utils {
    /// Parse the local side of an lsof NAME column.
    ///
    /// Handles multiple address formats:
    /// - IPv4: "127.0.0.1:3000" or "*:8080"
    /// - IPv6: "\[::1]:3000" or "\[fe80::1%lo0]:8080"
    /// - Connected sockets: "127.0.0.1:5000->10.0.0.1:443"
    ///
    /// `ipv6` picks the unspecified address used for `*`.
    pub fn parse_local_address(name: &str, ipv6: bool) -> Option<SocketAddr> {
        let local = name.split("->").next()?;

        if let Some(rest) = local.strip_prefix('[') {
            // IPv6 format: [::1]:3000
            let bracket_end = rest.find(']')?;
            let host = &rest[..bracket_end];
            let port = rest[bracket_end + 1..].strip_prefix(':')?.parse().ok()?;
            // Zone ids ("%lo0") are not part of the address.
            let host = host.split('%').next()?;
            let ip: Ipv6Addr = host.parse().ok()?;
            return Some(SocketAddr::new(IpAddr::V6(ip), port));
        }

        // IPv4 format: 127.0.0.1:3000 or *:8080
        let last_colon = local.rfind(':')?;
        let host = &local[..last_colon];
        let port: u16 = local[last_colon + 1..].parse().ok()?;
        let ip = match host {
            "*" | "" if ipv6 => IpAddr::V6(Ipv6Addr::UNSPECIFIED),
            "*" | "" => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            _ => host.parse().ok()?,
        };
        Some(SocketAddr::new(ip, port))
    }

    /// Decide whether a finished lsof run can be parsed.
    ///
    /// lsof exits with 1 both when nothing matched and when it could not read
    /// some files, so a non-zero status alone is not a failure. It is one when
    /// lsof printed nothing but a diagnostic.
    pub fn check_lsof_status(success: bool, stdout: &[u8], stderr: &[u8]) -> Result<()> {
        if success || !stdout.is_empty() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(stderr);
        let stderr = stderr.trim();
        if stderr.is_empty() {
            return Ok(());
        }
        Err(Error::CommandFailed(format!("lsof failed: {}", stderr)))
    }

    /// Group lsof output into one descriptor per process.
    ///
    /// Expected lsof output format:
    /// ```text
    /// COMMAND    PID  USER   FD   TYPE             DEVICE SIZE/OFF NODE NAME
    /// node     34805  code   19u  IPv6 0x3d8015e195af1f3f      0t0  TCP [::1]:3000 (LISTEN)
    /// ```
    ///
    /// Processes keep the order in which lsof first lists them.
    pub fn parse_lsof_output(output: &str) -> Vec<ProcessDescriptor> {
        let mut processes: Vec<ProcessDescriptor> = Vec::new();
        let mut index: HashMap<u32, usize> = HashMap::new();

        // Skip header line
        for line in output.lines().skip(1) {
            if line.is_empty() {
                continue;
            }

            // Parse lsof columns: COMMAND PID USER FD TYPE DEVICE SIZE/OFF NODE NAME
            let components: Vec<&str> = line.split_whitespace().collect();
            if components.len() < 9 {
                continue;
            }

            let pid: u32 = match components[1].parse() {
                Ok(p) => p,
                Err(_) => continue,
            };

            let protocol = match components[7] {
                "TCP" => Protocol::Tcp,
                "UDP" => Protocol::Udp,
                _ => continue,
            };
            let ipv6 = components[4] == "IPv6";

            let Some(local) = Self::parse_local_address(components[8], ipv6) else {
                trace!(pid = pid, name = components[8], "Unparseable lsof address");
                continue;
            };
            let endpoint = SocketEndpoint::new(protocol, local);

            match index.get(&pid) {
                Some(&i) => {
                    let sockets = &mut processes[i].sockets;
                    if !sockets.contains(&endpoint) {
                        sockets.push(endpoint);
                    }
                }
                None => {
                    let name = components[0]
                        .replace("\\x20", " ") // Space
                        .replace("\\x2f", "/"); // Slash
                    index.insert(pid, processes.len());
                    processes.push(ProcessDescriptor::new(pid, Some(name), vec![endpoint]));
                }
            }
        }

        processes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(s: &str) -> SocketAddr {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_ipv4_address() {
        assert_eq!(
            Utils::parse_local_address("127.0.0.1:3000", false),
            Some(addr("127.0.0.1:3000"))
        );
        assert_eq!(Utils::parse_local_address("*:8080", false), Some(addr("0.0.0.0:8080")));
        assert_eq!(Utils::parse_local_address("*:8080", true), Some(addr("[::]:8080")));
    }

    #[test]
    fn test_parse_ipv6_address() {
        assert_eq!(Utils::parse_local_address("[::1]:3000", true), Some(addr("[::1]:3000")));
        assert_eq!(
            Utils::parse_local_address("[fe80::1%lo0]:8080", true),
            Some(addr("[fe80::1]:8080"))
        );
    }

    #[test]
    fn test_parse_connected_address() {
        assert_eq!(
            Utils::parse_local_address("192.168.1.5:51234->140.82.112.4:443", false),
            Some(addr("192.168.1.5:51234"))
        );
    }

    #[test]
    fn test_parse_invalid_address() {
        assert_eq!(Utils::parse_local_address("localhost", false), None);
        assert_eq!(Utils::parse_local_address("*:http", false), None);
        assert_eq!(Utils::parse_local_address("[::1]3000", true), None);
    }

    #[test]
    fn test_parse_lsof_output() {
        let output = r#"COMMAND    PID  USER   FD   TYPE             DEVICE SIZE/OFF NODE NAME
node     34805  code   19u  IPv6 0x3d8015e195af1f3f      0t0  TCP [::1]:3000 (LISTEN)
nginx        1  root    6u  IPv4 0x1234567890abcdef      0t0  TCP *:80 (LISTEN)
node     34805  code   23u  IPv4 0x1234567890abcdee      0t0  UDP *:5353
"#;

        let processes = Utils::parse_lsof_output(output);
        assert_eq!(processes.len(), 2);

        // First-seen order is kept
        assert_eq!(processes[0].pid, 34805);
        assert_eq!(processes[0].name.as_deref(), Some("node"));
        assert_eq!(processes[0].sockets.len(), 2);
        assert!(processes[0].holds_port(3000));
        assert!(processes[0].holds_port(5353));

        assert_eq!(processes[1].pid, 1);
        assert_eq!(processes[1].sockets, vec![SocketEndpoint::tcp(addr("0.0.0.0:80"))]);
    }

    #[test]
    fn test_connected_socket_uses_local_port() {
        let output = r#"COMMAND    PID  USER   FD   TYPE             DEVICE SIZE/OFF NODE NAME
curl      4321  code    5u  IPv4 0x1234567890abcdef      0t0  TCP 127.0.0.1:50000->127.0.0.1:8000 (ESTABLISHED)
"#;

        let processes = Utils::parse_lsof_output(output);
        assert!(processes[0].holds_port(50000));
        assert!(!processes[0].holds_port(8000));
    }

    #[test]
    fn test_unescape_process_name() {
        let output = r#"COMMAND    PID  USER   FD   TYPE             DEVICE SIZE/OFF NODE NAME
Code\x20Helper  1234  user   10u  IPv4 0x1234567890abcdef      0t0  TCP *:3000 (LISTEN)
"#;

        let processes = Utils::parse_lsof_output(output);
        assert_eq!(processes.len(), 1);
        assert_eq!(processes[0].name.as_deref(), Some("Code Helper"));
    }

    #[test]
    fn test_duplicate_sockets_collapse() {
        let output = r#"COMMAND    PID  USER   FD   TYPE             DEVICE SIZE/OFF NODE NAME
node     1234  code   19u  IPv4 0x1234567890abcdef      0t0  TCP 127.0.0.1:3000 (LISTEN)
node     1234  code   20u  IPv4 0xfedcba0987654321      0t0  TCP 127.0.0.1:3000 (LISTEN)
"#;

        let processes = Utils::parse_lsof_output(output);
        assert_eq!(processes.len(), 1);
        assert_eq!(processes[0].sockets.len(), 1);
    }

    #[test]
    fn test_lsof_status_no_matches() {
        assert!(Utils::check_lsof_status(true, b"", b"").is_ok());
        // Exit 1 without output or diagnostics: nothing matched.
        assert!(Utils::check_lsof_status(false, b"", b"").is_ok());
    }

    #[test]
    fn test_lsof_status_partial_results() {
        let stdout = b"COMMAND PID USER FD TYPE DEVICE SIZE/OFF NODE NAME\n";
        let stderr = b"lsof: WARNING: can't stat() nfs file system /mnt";
        assert!(Utils::check_lsof_status(false, stdout, stderr).is_ok());
    }

    #[test]
    fn test_lsof_status_failure() {
        let stderr = b"lsof: unacceptable option: -Z\n";
        match Utils::check_lsof_status(false, b"", stderr) {
            Err(Error::CommandFailed(msg)) => {
                assert_eq!(msg, "lsof failed: lsof: unacceptable option: -Z");
            }
            other => panic!("Unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_empty_output() {
        assert!(Utils::parse_lsof_output("").is_empty());
    }
}
