//! Error types for wrap operations.
//!
//! Every failure a wrap can hit before, during, or after the external tool runs
//! is represented here, so callers can surface each kind distinctly.

use std::path::{Path, PathBuf};
use thiserror::Error;

use super::journal::StreamKind;
use super::platform::HostPlatform;

/// Result type alias for wrap operations
pub type Result<T> = std::result::Result<T, Error>;

/// A required request field is empty or points at nothing.
///
/// Each variant maps to one user-facing validation message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please select an input IPA file")]
    InputMissing,

    #[error("Input IPA file does not exist: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Please select a provisioning profile")]
    ProfileMissing,

    #[error("Provisioning profile does not exist: {}", .0.display())]
    ProfileNotFound(PathBuf),

    #[error("Please specify an output location")]
    OutputMissing,
}

/// Main error type for wrap operations
#[derive(Error, Debug)]
pub enum Error {
    /// Request failed validation, nothing was launched
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The wrapping tool does not exist at the resolved path
    #[error("Wrapping tool not found at {}", .path.display())]
    ToolNotFound {
        /// Path that was probed
        path: PathBuf,
        /// Prepared command for running the wrap elsewhere
        command: String,
    },

    /// The host cannot run the tool and the user declined to continue
    #[error("iOS app wrapping is not supported on {platform}")]
    PlatformUnsupported {
        /// Host the wrap was attempted on
        platform: HostPlatform,
    },

    /// The tool ran and exited nonzero
    #[error("Wrapping failed with exit code {exit_code}")]
    ProcessFailure {
        /// Exit code reported by the tool
        exit_code: i32,
    },

    /// The tool could not be started or awaited
    #[error("Failed to run {command}: {source}")]
    Launch {
        /// Command that was attempted
        command: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Reading one of the tool's output streams failed
    #[error("Failed to read tool {stream}: {source}")]
    StreamRead {
        /// Stream that faulted
        stream: StreamKind,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Post-wrap verification hit an error
    #[error("Verification error: {0}")]
    Verification(String),

    /// An argument cannot be rendered as a shell word
    #[error("Cannot quote argument: {0}")]
    Quote(String),

    /// IO errors tied to a specific path
    #[error("Failed {context} at {}: {source}", .path.display())]
    Fs {
        /// What was being done
        context: &'static str,
        /// Path involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

/// Attaches filesystem context to IO results.
pub trait ErrorExt<T> {
    /// Wraps an IO error with the operation and path it happened on.
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|source| Error::Fs {
            context,
            path: path.as_ref().to_path_buf(),
            source,
        })
    }
}
