//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::report::OutputMode;

/// Behaviours - Sequential HTTP behaviour chains.
#[derive(Debug, Parser)]
#[command(name = "behaviours")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Only print results, not progress
    #[arg(short, long, global = true, conflicts_with = "silent")]
    pub quiet: bool,

    /// Only print failures
    #[arg(short, long, global = true)]
    pub silent: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Output mode selected by the global flags.
    pub fn output_mode(&self) -> OutputMode {
        if self.silent {
            OutputMode::Silent
        } else if self.quiet {
            OutputMode::Quiet
        } else {
            OutputMode::Normal
        }
    }
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run a scenario against a live server
    Run(RunArgs),

    /// Validate a scenario file without sending requests
    Check(CheckArgs),
}

/// Arguments for the `run` command.
#[derive(Debug, Clone, Args)]
pub struct RunArgs {
    /// Scenario file to run
    pub scenario: PathBuf,

    /// Override the scenario's base URL
    #[arg(long, env = "BEHAVIOURS_BASE_URL")]
    pub base_url: Option<String>,

    /// Request timeout in seconds (overrides the scenario setting)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, Args)]
pub struct CheckArgs {
    /// Scenario file to validate
    pub scenario: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_run_with_overrides() {
        let cli = Cli::parse_from([
            "behaviours",
            "run",
            "login.yml",
            "--base-url",
            "http://localhost:8080",
            "--timeout",
            "5",
        ]);
        match cli.command {
            Commands::Run(args) => {
                assert_eq!(args.scenario, PathBuf::from("login.yml"));
                assert_eq!(args.base_url.as_deref(), Some("http://localhost:8080"));
                assert_eq!(args.timeout, Some(5));
            }
            other => panic!("Expected Run, got {:?}", other),
        }
    }

    #[test]
    fn parses_check() {
        let cli = Cli::parse_from(["behaviours", "check", "login.yml"]);
        assert!(matches!(cli.command, Commands::Check(_)));
        assert_eq!(cli.output_mode(), OutputMode::Normal);
    }

    #[test]
    fn global_flags_select_output_mode() {
        let cli = Cli::parse_from(["behaviours", "check", "a.yml", "--quiet"]);
        assert_eq!(cli.output_mode(), OutputMode::Quiet);

        let cli = Cli::parse_from(["behaviours", "--silent", "check", "a.yml"]);
        assert_eq!(cli.output_mode(), OutputMode::Silent);
    }

    #[test]
    fn quiet_and_silent_conflict() {
        let result = Cli::try_parse_from(["behaviours", "-q", "-s", "check", "a.yml"]);
        assert!(result.is_err());
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["behaviours"]).is_err());
    }

    #[test]
    fn scenario_is_required() {
        assert!(Cli::try_parse_from(["behaviours", "run"]).is_err());
    }
}
