//! Driving the Intune App Wrapping Tool for iOS.
//!
//! # Overview
//!
//! A wrap:
//! 1. Builds and validates a [`WrapRequest`]
//! 2. Checks whether the host can run the tool ([`HostPlatform`])
//! 3. Locates `IntuneMAMPackager` ([`ToolLocator`])
//! 4. Runs it, streaming output into a single-writer log ([`WrapLog`])
//! 5. Classifies the run by exit code ([`ProcessOutcome`])
//! 6. Optionally checks the produced archive ([`VerificationResult`])

pub mod builder;
pub mod error;
pub mod interaction;
pub mod journal;
pub mod outcome;
pub mod platform;
pub mod request;

pub use builder::{
    ToolLocation, ToolLocator, ToolRunner, VerificationResult, WrapOrchestrator, locate,
    render_command, verify, wrap,
};
pub use error::{Error, ErrorExt, Result, ValidationError};
pub use interaction::{FixedAnswer, Interaction};
pub use journal::{LogEvent, LogHandle, LogLine, LogObserver, NullObserver, Status, StreamKind, WrapLog};
pub use outcome::{Classification, ProcessOutcome, WrapReport};
pub use platform::{Capability, HostPlatform};
pub use request::{WrapRequest, WrapRequestBuilder, suggest_output_path};
