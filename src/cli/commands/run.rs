//! Run command implementation.
//!
//! The `behaviours run` command loads a scenario, validates it, and runs
//! its behaviours in order against a live server.

use std::time::Duration;

use crate::cli::args::RunArgs;
use crate::error::Result;
use crate::executor;
use crate::report::Reporter;
use crate::scenario::{declared_behaviours, load_scenario, validate, InterpolationContext};
use crate::transport::HttpRunner;

use super::dispatcher::{Command, CommandResult};

/// The run command implementation.
pub struct RunCommand {
    args: RunArgs,
}

impl RunCommand {
    /// Create a new run command.
    pub fn new(args: RunArgs) -> Self {
        Self { args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &RunArgs {
        &self.args
    }
}

impl Command for RunCommand {
    fn execute(&self, reporter: &mut dyn Reporter) -> Result<CommandResult> {
        let mut scenario = load_scenario(&self.args.scenario)?;

        if let Some(base_url) = &self.args.base_url {
            scenario.settings.base_url = Some(base_url.clone());
        }
        if let Some(timeout) = self.args.timeout {
            scenario.settings.timeout_secs = timeout;
        }

        validate(&scenario)?;

        let name = scenario
            .name
            .clone()
            .unwrap_or_else(|| self.args.scenario.display().to_string());
        tracing::debug!(
            "Running scenario '{}' with {} behaviours",
            name,
            scenario.behaviours.len()
        );

        let runner = HttpRunner::with_timeout(Duration::from_secs(scenario.settings.timeout_secs))
            .map_err(anyhow::Error::from)?;
        let context = InterpolationContext::from_process_env();
        let behaviours = declared_behaviours(&scenario, &context);

        reporter.log(&format!("Running scenario \"{}\"", name));
        let result = executor::run(reporter, &runner, &behaviours);

        if result.success() {
            reporter.completed(&result.summary_line());
            Ok(CommandResult::success())
        } else {
            reporter.log(&result.summary_line());
            Ok(CommandResult::failure(1))
        }
    }
}
