//! `command` subcommand: prepared command for running the wrap on a Mac.

use crate::cli::{RequestArgs, RuntimeConfig};
use crate::error::Result;
use crate::wrapper::render_command;

/// Prints the exact command `wrap` would run.
///
/// Files are not checked for existence; they may live on the Mac that will
/// run the command.
pub fn execute(args: RequestArgs, config: &RuntimeConfig) -> Result<i32> {
    let request = args.to_builder().build_unchecked();
    let command = render_command(&request)?;

    config.verbose_println("Prepared Command for macOS:")?;
    println!("{}", command);
    config.success("Copy this command and run it on a Mac with Xcode installed")?;
    Ok(0)
}
