//! Linux process enumerator reading `/proc`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use procfs::process::{FDTarget, Process};
use procfs::{ProcError, ProcResult};
use tracing::{debug, trace};

use crate::domain::{ProcessDescriptor, SocketEndpoint};
use crate::error::{EnumerationSkip, Error, Result, SkipReason};
use crate::ports::{ProcessEntry, ProcessEnumerator, ProcessIter};

/// Socket inode to local endpoint.
type SocketTable = HashMap<u64, SocketEndpoint>;

/// `comm` is cut to `TASK_COMM_LEN - 1` bytes by the kernel.
const COMM_MAX_LEN: usize = 15;

/// Linux-specific enumerator.
///
/// Sockets are read once per scan from `/proc/net/{tcp,tcp6,udp,udp6}`
/// and matched against each process's `/proc/<pid>/fd` links.
pub struct ProcfsEnumerator;

impl ProcfsEnumerator {
    pub fn new() -> Self {
        Self
    }

    fn socket_table(&self) -> Result<SocketTable> {
        let mut table = SocketTable::new();

        for (name, entries) in [("tcp", procfs::net::tcp()), ("tcp6", procfs::net::tcp6())] {
            for entry in optional_table(name, entries)? {
                insert_socket(&mut table, entry.inode, SocketEndpoint::tcp(entry.local_address));
            }
        }

        for (name, entries) in [("udp", procfs::net::udp()), ("udp6", procfs::net::udp6())] {
            for entry in optional_table(name, entries)? {
                insert_socket(&mut table, entry.inode, SocketEndpoint::udp(entry.local_address));
            }
        }

        debug!(sockets = table.len(), "Read socket tables");
        Ok(table)
    }
}

impl Default for ProcfsEnumerator {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessEnumerator for ProcfsEnumerator {
    fn processes(&self) -> Result<ProcessIter<'_>> {
        let sockets = self.socket_table()?;
        let processes = procfs::process::all_processes().map_err(lookup_error)?;

        Ok(Box::new(processes.map(move |entry| match entry {
            Ok(process) => describe(&process, &sockets),
            Err(e) => Err(EnumerationSkip {
                pid: None,
                reason: skip_reason(&e),
            }),
        })))
    }
}

fn insert_socket(table: &mut SocketTable, inode: u64, endpoint: SocketEndpoint) {
    // TIME_WAIT sockets are no longer owned by any process.
    if inode != 0 {
        table.insert(inode, endpoint);
    }
}

/// Snapshot one process's name and sockets.
fn describe(process: &Process, sockets: &SocketTable) -> ProcessEntry {
    let pid = process.pid() as u32;
    let fds = process
        .fd()
        .map_err(|e| EnumerationSkip::new(pid, skip_reason(&e)))?;

    let mut endpoints = Vec::new();
    for fd in fds {
        let fd = match fd {
            Ok(fd) => fd,
            Err(e) => {
                // Descriptor closed between listing and readlink.
                trace!(pid = pid, error = %e, "Skipping file descriptor");
                continue;
            }
        };
        if let FDTarget::Socket(inode) = fd.target {
            if let Some(endpoint) = sockets.get(&inode) {
                endpoints.push(*endpoint);
            }
        }
    }

    let name = process.stat().ok().map(|stat| process_name(process, stat.comm));
    Ok(ProcessDescriptor::new(pid, name, endpoints))
}

/// Best-effort full name for a process whose `comm` may be truncated.
fn process_name(process: &Process, comm: String) -> String {
    if comm.len() < COMM_MAX_LEN {
        return comm;
    }

    let cmdline = process.cmdline().ok();
    let argv0 = cmdline
        .as_ref()
        .and_then(|args| args.first())
        .map(|arg| Path::new(arg.as_str()));
    let exe = process.exe().ok();
    extend_comm(comm, argv0, exe.as_deref())
}

/// Replace a truncated `comm` with the first candidate file name it prefixes.
///
/// argv\[0\] is tried before the executable path, so names set by the process
/// itself win over the binary on disk.
fn extend_comm(comm: String, argv0: Option<&Path>, exe: Option<&Path>) -> String {
    if comm.len() < COMM_MAX_LEN {
        return comm;
    }

    let extended = [argv0, exe]
        .into_iter()
        .flatten()
        .filter_map(|path| path.file_name()?.to_str())
        .find(|name| name.len() > comm.len() && name.starts_with(comm.as_str()))
        .map(str::to_string);
    extended.unwrap_or(comm)
}

/// A missing table means the protocol is not compiled into the kernel.
fn optional_table<T>(name: &str, entries: ProcResult<Vec<T>>) -> Result<Vec<T>> {
    match entries {
        Ok(entries) => Ok(entries),
        Err(ProcError::NotFound(_)) => {
            debug!(table = name, "Socket table not available");
            Ok(Vec::new())
        }
        Err(e) => Err(lookup_error(e)),
    }
}

fn lookup_error(err: ProcError) -> Error {
    match err {
        ProcError::PermissionDenied(path) => Error::PermissionDenied(display_path(path)),
        other => Error::LookupFailed(other.to_string()),
    }
}

fn skip_reason(err: &ProcError) -> SkipReason {
    match err {
        ProcError::NotFound(_) => SkipReason::Exited,
        ProcError::PermissionDenied(_) => SkipReason::PermissionDenied,
        other => SkipReason::Other(other.to_string()),
    }
}

fn display_path(path: Option<PathBuf>) -> String {
    path.map(|p| p.display().to_string())
        .unwrap_or_else(|| "/proc".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_reason_mapping() {
        assert_eq!(skip_reason(&ProcError::NotFound(None)), SkipReason::Exited);
        assert_eq!(
            skip_reason(&ProcError::PermissionDenied(Some(PathBuf::from("/proc/1/fd")))),
            SkipReason::PermissionDenied
        );
        assert!(matches!(
            skip_reason(&ProcError::Other("boom".to_string())),
            SkipReason::Other(_)
        ));
    }

    #[test]
    fn test_missing_table_is_empty() {
        let entries: ProcResult<Vec<u8>> = Err(ProcError::NotFound(None));
        assert!(optional_table("udp6", entries).unwrap().is_empty());
    }

    #[test]
    fn test_unreadable_table_is_fatal() {
        let entries: ProcResult<Vec<u8>> = Err(ProcError::PermissionDenied(None));
        match optional_table("tcp", entries) {
            Err(Error::PermissionDenied(path)) => assert_eq!(path, "/proc"),
            other => panic!("Unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_short_comm_is_kept() {
        let name = extend_comm(
            "nginx".to_string(),
            Some(Path::new("/usr/sbin/nginx-debug")),
            None,
        );
        assert_eq!(name, "nginx");
    }

    #[test]
    fn test_truncated_comm_uses_argv0() {
        let name = extend_comm(
            "system_enumerat".to_string(),
            Some(Path::new("/tmp/target/debug/deps/system_enumerator-7ab17c")),
            Some(Path::new("/usr/bin/other")),
        );
        assert_eq!(name, "system_enumerator-7ab17c");
    }

    #[test]
    fn test_truncated_comm_falls_back_to_exe() {
        let name = extend_comm(
            "gnome-shell-cal".to_string(),
            Some(Path::new("-bash")),
            Some(Path::new("/usr/libexec/gnome-shell-calendar-server")),
        );
        assert_eq!(name, "gnome-shell-calendar-server");
    }

    #[test]
    fn test_truncated_comm_without_matching_candidate() {
        let name = extend_comm(
            "kworker/u16:2-e".to_string(),
            None,
            Some(Path::new("/usr/bin/python3")),
        );
        assert_eq!(name, "kworker/u16:2-e");
    }

    #[test]
    fn test_time_wait_sockets_ignored() {
        let mut table = SocketTable::new();
        let ep = SocketEndpoint::tcp("127.0.0.1:8000".parse().unwrap());
        insert_socket(&mut table, 0, ep);
        insert_socket(&mut table, 1234, ep);
        assert_eq!(table.len(), 1);
        assert!(table.contains_key(&1234));
    }

    #[test]
    fn test_current_process_is_listed() {
        let enumerator = ProcfsEnumerator::new();
        let me = std::process::id();
        let found = enumerator
            .processes()
            .unwrap()
            .filter_map(|entry| entry.ok())
            .any(|p| p.pid == me);
        assert!(found);
    }
}
