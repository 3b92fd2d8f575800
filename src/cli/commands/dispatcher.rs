//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use crate::cli::args::{Cli, Commands};
use crate::error::Result;
use crate::report::Reporter;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `reporter` - Where progress and failures are reported
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, reporter: &mut dyn Reporter) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: u8,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: u8) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
#[derive(Debug, Default)]
pub struct CommandDispatcher;

impl CommandDispatcher {
    /// Create a new dispatcher.
    pub fn new() -> Self {
        Self
    }

    /// Dispatch and execute a command.
    ///
    /// Routes the CLI subcommand to the appropriate command implementation
    /// and executes it.
    pub fn dispatch(&self, cli: &Cli, reporter: &mut dyn Reporter) -> Result<CommandResult> {
        match &cli.command {
            Commands::Run(args) => {
                let cmd = super::run::RunCommand::new(args.clone());
                cmd.execute(reporter)
            }
            Commands::Check(args) => {
                let cmd = super::check::CheckCommand::new(args.clone());
                cmd.execute(reporter)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::MockReporter;
    use clap::Parser;
    use tempfile::TempDir;

    #[test]
    fn command_result_success() {
        let result = CommandResult::success();
        assert!(result.success);
        assert_eq!(result.exit_code, 0);
    }

    #[test]
    fn command_result_failure() {
        let result = CommandResult::failure(1);
        assert!(!result.success);
        assert_eq!(result.exit_code, 1);
    }

    #[test]
    fn dispatches_check() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("ok.yml");
        std::fs::write(
            &path,
            "behaviours:\n  - description: ping\n    request:\n      url: http://a.test/\n",
        )
        .unwrap();

        let cli = Cli::parse_from(["behaviours", "check", path.to_str().unwrap()]);
        let mut reporter = MockReporter::new();
        let result = CommandDispatcher::new().dispatch(&cli, &mut reporter).unwrap();

        assert!(result.success);
        assert_eq!(reporter.completions().len(), 1);
    }
}
