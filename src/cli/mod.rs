//! Command line interface for intune_wrapper.
//!
//! This module provides the CLI for wrap operations, with argument parsing,
//! command execution, and terminal feedback.

mod args;
pub mod commands;
mod output;
mod terminal;

pub use args::{Args, Command, LocateArgs, RequestArgs, RuntimeConfig, WrapArgs};
pub use output::OutputManager;
pub use terminal::{ConsoleObserver, TerminalInteraction, Transcript};

use crate::error::{CliError, Result};

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    validate_args(&args).map_err(|reason| CliError::InvalidArguments { reason })?;

    let config = create_runtime_config(&args);

    match args.command {
        Command::Wrap(wrap_args) => commands::wrap::execute(wrap_args, &config).await,
        Command::Locate(locate_args) => commands::locate::execute(locate_args, &config),
        Command::Preview(request_args) => commands::preview::execute(request_args, &config),
    }
}

/// Validate arguments without executing (for testing)
pub fn validate_args(args: &Args) -> std::result::Result<(), String> {
    args.validate()
}

/// Create runtime configuration from arguments
pub fn create_runtime_config(args: &Args) -> RuntimeConfig {
    RuntimeConfig::from(args)
}
