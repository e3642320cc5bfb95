//! portreap CLI - Terminate the process holding a network port
//!
//! Scans the process table for the first process with a socket bound to the
//! given local port and sends it SIGTERM.
//!
//! Exit codes: `0` signalled (or found with `--dry-run`), `1` no process on
//! the port, `2` the signal could not be delivered, `3` the process table
//! could not be read.

mod commands;
mod logging;

use std::process::ExitCode;

use clap::{ArgAction, Parser};

/// Port used when none is given.
const DEFAULT_PORT: u16 = 8000;

#[derive(Parser, Debug)]
#[command(name = "portreap")]
#[command(author, version, about = "Terminate the process holding a network port")]
struct Cli {
    /// Port whose owning process should be terminated
    #[arg(default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Only report the owning process, do not signal it
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Output in JSON format
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = if cli.dry_run {
        commands::find::run(cli.port, cli.json)
    } else {
        commands::kill::run(cli.port, cli.json)
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::from(commands::EXIT_FATAL)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_port() {
        let cli = Cli::try_parse_from(["portreap"]).unwrap();
        assert_eq!(cli.port, DEFAULT_PORT);
        assert!(!cli.dry_run);
        assert!(!cli.json);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::try_parse_from(["portreap", "3000", "--dry-run", "--json", "-vv"]).unwrap();
        assert_eq!(cli.port, 3000);
        assert!(cli.dry_run);
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_rejects_out_of_range_port() {
        assert!(Cli::try_parse_from(["portreap", "70000"]).is_err());
        assert!(Cli::try_parse_from(["portreap", "http"]).is_err());
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
