//! Behaviours CLI entry point.

use std::process::ExitCode;

use behaviours::cli::{Cli, CommandDispatcher};
use behaviours::report::{Reporter, TerminalReporter, Theme};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("behaviours=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("behaviours=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("Behaviours starting with args: {:?}", cli);

    let mut reporter = if cli.no_color {
        TerminalReporter::with_theme(cli.output_mode(), Theme::plain())
    } else {
        TerminalReporter::new(cli.output_mode())
    };

    let dispatcher = CommandDispatcher::new();

    match dispatcher.dispatch(&cli, &mut reporter) {
        Ok(result) => ExitCode::from(result.exit_code),
        Err(e) => {
            reporter.fatal(&format!("Error: {}", e));
            ExitCode::from(1)
        }
    }
}
