//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI parser for `todos`.
#[derive(Debug, Parser)]
#[command(
    name = "todos",
    version,
    about = "Scan a source tree for action comments and sync them to an issue tracker"
)]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Scan a directory tree and report action comments.
    Scan {
        /// Root directory to scan.
        #[arg(long, default_value = ".")]
        dir: PathBuf,
        /// Output format: table or csv.
        #[arg(long, default_value = "table")]
        output: String,
    },
    /// Scan, then reconcile action comments against the issue tracker.
    Sync {
        /// Root directory to scan.
        #[arg(long, default_value = ".")]
        dir: PathBuf,
        /// Print the planned operations without performing them.
        #[arg(long)]
        dry_run: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use clap::Parser;

    #[test]
    fn parses_scan_subcommand() {
        let cli = Cli::parse_from(["todos", "scan", "--dir", "src", "--output", "csv"]);
        match cli.command {
            Command::Scan { dir, output } => {
                assert_eq!(dir, std::path::PathBuf::from("src"));
                assert_eq!(output, "csv");
            }
            Command::Sync { .. } => panic!("expected scan"),
        }
    }

    #[test]
    fn parses_sync_subcommand_with_defaults() {
        let cli = Cli::parse_from(["todos", "sync"]);
        match cli.command {
            Command::Sync { dir, dry_run } => {
                assert_eq!(dir, std::path::PathBuf::from("."));
                assert!(!dry_run);
            }
            Command::Scan { .. } => panic!("expected sync"),
        }
    }

    #[test]
    fn parses_dry_run_flag() {
        let cli = Cli::parse_from(["todos", "sync", "--dry-run"]);
        assert!(matches!(cli.command, Command::Sync { dry_run: true, .. }));
    }
}
