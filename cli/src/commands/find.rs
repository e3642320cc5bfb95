//! Find command - report the process holding a port without signalling it.

use std::process::ExitCode;

use anyhow::{Context, Result};
use portreap_core::Lookup;

use super::{warn_skipped, EXIT_NOT_FOUND};

pub fn run(port: u16, json: bool) -> Result<ExitCode> {
    let terminator = portreap_core::system_terminator();
    let lookup = terminator
        .find_owner_of_port(port)
        .with_context(|| format!("Failed to look up the process on port {}", port))?;

    if let Lookup::NotFound { skipped, .. } = lookup {
        warn_skipped(skipped);
    }

    if json {
        println!("{}", serde_json::to_string(&lookup)?);
    } else {
        println!("{}", lookup);
    }

    Ok(ExitCode::from(exit_status(&lookup)))
}

/// Exit status for a lookup.
pub fn exit_status(lookup: &Lookup) -> u8 {
    match lookup {
        Lookup::Found { .. } => 0,
        Lookup::NotFound { .. } => EXIT_NOT_FOUND,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portreap_core::ProcessDescriptor;

    #[test]
    fn test_exit_status() {
        let found = Lookup::Found {
            port: 3000,
            process: ProcessDescriptor::new(1, None, Vec::new()),
        };
        assert_eq!(exit_status(&found), 0);

        let not_found = Lookup::NotFound { port: 3000, skipped: 4 };
        assert_eq!(exit_status(&not_found), EXIT_NOT_FOUND);
    }
}
