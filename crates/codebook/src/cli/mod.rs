//! Command-line interface for codebook.
//!
//! This module provides the CLI structure for the `codebookd` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{CheckCommand, ConfigCommand, ServeCommand};

/// codebookd - Serve an in-memory record catalog over HTTP
///
/// Loads records and reference tables from a JSON seed file and exposes
/// them through a small REST API. Writes live in memory only.
#[derive(Debug, Parser)]
#[command(name = "codebookd")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load the seed file and serve the API
    Serve(ServeCommand),

    /// Load the seed file and report what it contains
    Check(CheckCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::Verbosity;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_cli_name() {
        assert_eq!(Cli::command().get_name(), "codebookd");
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(parse(&["codebookd", "-q", "serve"]).verbosity(), Verbosity::Quiet);
        assert_eq!(parse(&["codebookd", "serve"]).verbosity(), Verbosity::Normal);
        assert_eq!(parse(&["codebookd", "-v", "serve"]).verbosity(), Verbosity::Verbose);
        assert_eq!(parse(&["codebookd", "-vv", "serve"]).verbosity(), Verbosity::Trace);
    }

    #[test]
    fn test_parse_serve() {
        let cli = parse(&["codebookd", "serve", "--data", "seed.json", "-a", ":9000"]);
        match cli.command {
            Command::Serve(cmd) => {
                assert_eq!(cmd.data, Some(PathBuf::from("seed.json")));
                assert_eq!(cmd.address.as_deref(), Some(":9000"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_check_json() {
        let cli = parse(&["codebookd", "check", "--json"]);
        assert!(matches!(cli.command, Command::Check(CheckCommand { json: true, .. })));
    }

    #[test]
    fn test_parse_config_validate() {
        let cli = parse(&["codebookd", "config", "validate", "-f", "/tmp/c.toml"]);
        assert!(matches!(
            cli.command,
            Command::Config(ConfigCommand::Validate { file: Some(_) })
        ));
    }

    #[test]
    fn test_parse_with_config() {
        let cli = parse(&["codebookd", "-c", "/custom/config.toml", "check"]);
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }
}
