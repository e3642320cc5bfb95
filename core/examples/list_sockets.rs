//! Example: List every process that holds a socket, in enumeration order.

use portreap_core::{ProcessEnumerator, SystemEnumerator};

fn main() {
    println!("Enumerating processes...\n");

    let enumerator = SystemEnumerator::new();

    let processes = match enumerator.processes() {
        Ok(processes) => processes,
        Err(e) => {
            eprintln!("Error enumerating processes: {}", e);
            return;
        }
    };

    println!("{:<8} {:<20} {:<5} LOCAL", "PID", "PROCESS", "PROTO");
    println!("{}", "-".repeat(60));

    let mut skipped = 0;
    let mut sockets = 0;
    for entry in processes {
        let process = match entry {
            Ok(process) => process,
            Err(_) => {
                skipped += 1;
                continue;
            }
        };

        let name: String = process.display_name().chars().take(20).collect();
        for socket in &process.sockets {
            println!(
                "{:<8} {:<20} {:<5} {}",
                process.pid,
                name,
                socket.protocol,
                socket.local
            );
            sockets += 1;
        }
    }

    println!("\nTotal: {} sockets ({} processes skipped)", sockets, skipped);
}
