//! Front-end library for the Intune App Wrapping Tool for iOS
//!
//! This library drives `IntuneMAMPackager`, the external tool that wraps an
//! `.ipa` with Intune app protection:
//! - locating the tool on the host
//! - validating inputs and building its command line
//! - running it while streaming stdout/stderr into a log
//! - classifying the run and checking the produced archive
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod cli;
pub mod error;
pub mod wrapper;

// Re-export commonly used types
pub use error::{AppError, CliError, Result};
