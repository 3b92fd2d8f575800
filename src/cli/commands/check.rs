//! Check command implementation.
//!
//! The `behaviours check` command validates a scenario file without
//! sending any requests.

use crate::cli::args::CheckArgs;
use crate::error::Result;
use crate::report::Reporter;
use crate::scenario::{load_scenario, validate_scenario};

use super::dispatcher::{Command, CommandResult};

/// The check command implementation.
pub struct CheckCommand {
    args: CheckArgs,
}

impl CheckCommand {
    /// Create a new check command.
    pub fn new(args: CheckArgs) -> Self {
        Self { args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &CheckArgs {
        &self.args
    }
}

impl Command for CheckCommand {
    fn execute(&self, reporter: &mut dyn Reporter) -> Result<CommandResult> {
        let scenario = load_scenario(&self.args.scenario)?;
        let issues = validate_scenario(&scenario);
        let path = self.args.scenario.display();

        if issues.is_empty() {
            reporter.completed(&format!(
                "{} is valid ({} behaviours)",
                path,
                scenario.behaviours.len()
            ));
            return Ok(CommandResult::success());
        }

        for issue in &issues {
            reporter.log(&format!("[{}] {}", issue.rule, issue.message));
        }
        reporter.fatal(&format!("{} has {} problem(s)", path, issues.len()));

        Ok(CommandResult::failure(1))
    }
}
