//! Results of a finished wrap.

use serde::Serialize;

use super::builder::VerificationResult;
use super::journal::{LogLine, StreamKind};

/// Terminal classification of a tool run.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    /// Exit code 0
    Success,
    /// Any other exit code
    Failure,
}

impl Classification {
    /// Exit code 0 is the only success criterion; log content is never consulted.
    pub fn from_exit_code(exit_code: i32) -> Self {
        if exit_code == 0 {
            Classification::Success
        } else {
            Classification::Failure
        }
    }
}

/// A completed tool run.
#[derive(Clone, Debug, Serialize)]
pub struct ProcessOutcome {
    /// Exit code, `-1` when terminated by a signal
    pub exit_code: i32,
    /// Success or failure, derived from `exit_code`
    pub classification: Classification,
    /// Everything logged during the run, in append order
    pub lines: Vec<LogLine>,
}

impl ProcessOutcome {
    /// Builds an outcome, classifying by exit code.
    pub fn new(exit_code: i32, lines: Vec<LogLine>) -> Self {
        Self {
            exit_code,
            classification: Classification::from_exit_code(exit_code),
            lines,
        }
    }

    /// Whether the tool exited 0.
    pub fn is_success(&self) -> bool {
        self.classification == Classification::Success
    }

    /// Lines that came from the given stream.
    pub fn lines_from(&self, stream: StreamKind) -> impl Iterator<Item = &LogLine> {
        self.lines.iter().filter(move |line| line.stream == stream)
    }
}

/// Outcome of a full orchestrated wrap.
#[derive(Clone, Debug, Serialize)]
pub struct WrapReport {
    /// Tool run result
    pub outcome: ProcessOutcome,
    /// Post-wrap check, when it was requested and did not error
    pub verification: Option<VerificationResult>,
}
