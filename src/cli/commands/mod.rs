//! Command execution functions for the CLI subcommands.

pub mod locate;
pub mod preview;
pub mod wrap;
