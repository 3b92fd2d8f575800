//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations:
//! - `behaviours run` runs a scenario against a live server
//! - `behaviours check` validates a scenario without sending requests

pub mod check;
pub mod dispatcher;
pub mod run;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
