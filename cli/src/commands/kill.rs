//! Kill command - terminate the process holding a port.

use std::process::ExitCode;

use anyhow::{Context, Result};
use portreap_core::Outcome;

use super::{warn_skipped, EXIT_NOT_FOUND, EXIT_SIGNAL_FAILED};

pub fn run(port: u16, json: bool) -> Result<ExitCode> {
    let terminator = portreap_core::system_terminator();
    let outcome = terminator
        .terminate_owner_of_port(port)
        .with_context(|| format!("Failed to look up the process on port {}", port))?;

    if let Outcome::NotFound { skipped, .. } = outcome {
        warn_skipped(skipped);
    }

    if json {
        println!("{}", serde_json::to_string(&outcome)?);
    } else {
        println!("{}", outcome);
    }

    Ok(ExitCode::from(exit_status(&outcome)))
}

/// Exit status for an outcome.
pub fn exit_status(outcome: &Outcome) -> u8 {
    match outcome {
        Outcome::Terminated { .. } => 0,
        Outcome::NotFound { .. } => EXIT_NOT_FOUND,
        Outcome::SignalFailed { .. } => EXIT_SIGNAL_FAILED,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portreap_core::SignalFailure;

    #[test]
    fn test_exit_status() {
        let terminated = Outcome::Terminated {
            port: 8000,
            pid: 1,
            name: None,
        };
        assert_eq!(exit_status(&terminated), 0);

        let not_found = Outcome::NotFound { port: 8000, skipped: 0 };
        assert_eq!(exit_status(&not_found), EXIT_NOT_FOUND);

        let failed = Outcome::SignalFailed {
            port: 8000,
            pid: 1,
            name: None,
            failure: SignalFailure::PermissionDenied,
        };
        assert_eq!(exit_status(&failed), EXIT_SIGNAL_FAILED);
    }
}
