//! Top-level error types.
//!
//! This module defines the errors surfaced by the CLI, with recovery suggestions.

use thiserror::Error;

use crate::wrapper::{self, ValidationError};

/// Result type alias for front-end operations
pub type Result<T> = std::result::Result<T, AppError>;

/// Main error type for the front-end
#[derive(Error, Debug)]
pub enum AppError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Wrap errors
    #[error("{0}")]
    Wrapper(#[from] wrapper::Error),

    /// Generic errors from anyhow
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },
}

impl AppError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            AppError::Wrapper(wrapper::Error::Validation(v)) => match v {
                ValidationError::InputMissing | ValidationError::InputNotFound(_) => {
                    vec!["Pass an existing .ipa file with --input".to_string()]
                }
                ValidationError::ProfileMissing | ValidationError::ProfileNotFound(_) => {
                    vec!["Pass an existing .mobileprovision file with --profile".to_string()]
                }
                ValidationError::OutputMissing => {
                    vec!["Pass the wrapped .ipa destination with --output".to_string()]
                }
            },
            AppError::Wrapper(wrapper::Error::ToolNotFound { command, .. }) => {
                let mut suggestions = vec![
                    "Install IntuneMAMPackager or point --tool at it".to_string(),
                ];
                if !command.is_empty() {
                    suggestions.push(format!("Or run on a Mac: {}", command));
                }
                suggestions
            }
            AppError::Wrapper(wrapper::Error::PlatformUnsupported { .. }) => vec![
                "Run on macOS with Xcode, or pass --yes to continue anyway".to_string(),
                "Use the `command` subcommand to prepare the command for a Mac".to_string(),
            ],
            AppError::Wrapper(wrapper::Error::ProcessFailure { .. }) => {
                vec!["Check the log above for the tool's error output".to_string()]
            }
            AppError::Wrapper(wrapper::Error::Launch { .. }) => {
                vec!["Check that the tool is executable (chmod +x)".to_string()]
            }
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }

    /// Process exit code for this error.
    ///
    /// A failed tool run passes its own exit code through.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Wrapper(wrapper::Error::ProcessFailure { exit_code }) if *exit_code > 0 => {
                *exit_code
            }
            _ => 1,
        }
    }
}
