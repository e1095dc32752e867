//! Wrap orchestration and coordination.
//!
//! This module provides the [`WrapOrchestrator`] and the pieces it is built
//! from.
//!
//! # Module Organization
//!
//! - [`command`] - Tool argument construction and command previews
//! - [`orchestrator`] - Main [`WrapOrchestrator`] and the [`wrap`] entry point
//! - [`runner`] - Child process launch and output streaming
//! - [`tool_detection`] - Wrapping tool lookup
//! - [`verification`] - Post-wrap artifact heuristic

pub mod command;
pub mod orchestrator;
pub mod runner;
pub mod tool_detection;
pub mod verification;

pub use command::{render_command, render_command_for, tool_args};
pub use orchestrator::{WrapOrchestrator, wrap};
pub use runner::ToolRunner;
pub use tool_detection::{ToolLocation, ToolLocator, install_instructions, locate, resolve_override};
pub use verification::{VerificationResult, verify, verify_and_log};
