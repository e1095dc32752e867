//! Main wrap orchestration.
//!
//! This module provides the [`WrapOrchestrator`] that takes a validated
//! [`WrapRequest`] through platform checks, tool lookup, the tool run, and the
//! optional verification, plus the lower level [`wrap`] entry point.

use std::path::{Path, PathBuf};

use super::command::{render_command, tool_args};
use super::runner::ToolRunner;
use super::tool_detection::{ToolLocation, ToolLocator, install_instructions, resolve_override};
use super::verification::verify_and_log;
use crate::wrapper::error::{Error, Result};
use crate::wrapper::interaction::Interaction;
use crate::wrapper::journal::{LogHandle, LogObserver, WrapLog};
use crate::wrapper::outcome::{ProcessOutcome, WrapReport};
use crate::wrapper::platform::{Capability, HostPlatform};
use crate::wrapper::request::WrapRequest;

/// Drives one wrap from request to report.
///
/// # Flow
///
/// 1. Re-validate the request against the disk
/// 2. On a host that cannot run the tool, ask whether to continue
/// 3. Resolve the tool; if missing, offer instructions and the prepared
///    command, then stop
/// 4. Run the tool, streaming its output into the wrap log
/// 5. Verify the output when the request asks for it
///
/// # Examples
///
/// ```no_run
/// use intune_wrapper::wrapper::{FixedAnswer, NullObserver, WrapOrchestrator, WrapRequest};
///
/// # async fn example() -> intune_wrapper::wrapper::Result<()> {
/// let request = WrapRequest::builder()
///     .input("App.ipa")
///     .profile("App.mobileprovision")
///     .build()?;
///
/// let report = WrapOrchestrator::for_current_host()
///     .run(&request, &FixedAnswer(true), NullObserver)
///     .await?;
/// println!("exit code {}", report.outcome.exit_code);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct WrapOrchestrator {
    platform: HostPlatform,
    locator: ToolLocator,
    tool_override: Option<PathBuf>,
}

impl WrapOrchestrator {
    /// Orchestrator for the given host, with the standard tool locations.
    pub fn new(platform: HostPlatform) -> Self {
        Self {
            platform,
            locator: ToolLocator::for_platform(platform),
            tool_override: None,
        }
    }

    /// Orchestrator for the host this binary runs on.
    pub fn for_current_host() -> Self {
        Self::new(HostPlatform::current())
    }

    /// Uses `tool` instead of probing the standard locations.
    pub fn with_tool<P: AsRef<Path>>(mut self, tool: P) -> Self {
        self.tool_override = Some(tool.as_ref().to_path_buf());
        self
    }

    /// Replaces the locator used when no tool override is set.
    pub fn with_locator(mut self, locator: ToolLocator) -> Self {
        self.locator = locator;
        self
    }

    /// Host platform this orchestrator decides for.
    pub fn platform(&self) -> HostPlatform {
        self.platform
    }

    /// Resolves the tool now. Never cached.
    pub fn resolve_tool(&self) -> ToolLocation {
        match &self.tool_override {
            Some(tool) => resolve_override(tool),
            None => self.locator.locate(),
        }
    }

    /// Runs the full wrap flow.
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`] - a required path is empty or missing
    /// - [`Error::PlatformUnsupported`] - the user declined on an incapable host
    /// - [`Error::ToolNotFound`] - no tool at the resolved path
    /// - [`Error::Launch`] / [`Error::StreamRead`] - the tool could not be run
    ///
    /// A nonzero exit is not an error here: it is reported in the outcome.
    pub async fn run<I, O>(
        &self,
        request: &WrapRequest,
        interaction: &I,
        observer: O,
    ) -> Result<WrapReport>
    where
        I: Interaction + ?Sized,
        O: LogObserver,
    {
        request.validate()?;

        match self.platform.capability() {
            Capability::Capable => {}
            Capability::Incapable => {
                let proceed = interaction.confirm(
                    "Platform Limitation",
                    &format!(
                        "You are running on {}.\n\n\
                         iOS app wrapping requires macOS with Xcode installed.\n\n\
                         This tool can validate your files and prepare the command, \
                         but cannot perform actual wrapping.\n\n\
                         Continue anyway?",
                        self.platform
                    ),
                );
                if !proceed {
                    return Err(Error::PlatformUnsupported {
                        platform: self.platform,
                    });
                }
            }
        }

        let tool = match self.resolve_tool() {
            ToolLocation::Found(tool) => tool,
            ToolLocation::Missing(path) => return Err(self.offer_remediation(request, path, interaction)),
        };

        let (log, journal) = WrapLog::spawn(observer);
        let result = execute(request, &tool, &log).await;

        let verification = match &result {
            Ok(_) if request.verify_after_wrap() => {
                log.status("Verifying wrapped IPA...", 0.9);
                verify_and_log(request.input(), request.output(), &log).await
            }
            _ => None,
        };

        if let Ok(exit_code) = &result {
            finish_status(*exit_code, &log);
        }

        drop(log);
        let state = journal.finish().await;
        let exit_code = result?;

        Ok(WrapReport {
            outcome: ProcessOutcome::new(exit_code, state.lines),
            verification,
        })
    }

    fn offer_remediation<I>(&self, request: &WrapRequest, path: PathBuf, interaction: &I) -> Error
    where
        I: Interaction + ?Sized,
    {
        let command = match render_command(request) {
            Ok(command) => command,
            Err(e) => {
                log::warn!("Cannot prepare command: {}", e);
                String::new()
            }
        };

        let wants_instructions = interaction.confirm(
            "Wrapping Tool Not Found",
            &format!(
                "The Intune App Wrapping Tool is not found at:\n{}\n\n\
                 Would you like instructions to download it?",
                path.display()
            ),
        );
        if wants_instructions {
            interaction.notify(
                "Download Instructions",
                &install_instructions(self.platform.capability()),
            );
        }

        if !command.is_empty() {
            interaction.notify(
                "Command Prepared",
                &format!(
                    "Run this on a macOS machine with Xcode:\n\n{}",
                    command
                ),
            );
        }

        Error::ToolNotFound { path, command }
    }
}

/// Runs the tool for an already resolved path and collects its output.
///
/// Skips platform checks and verification; the request is still validated
/// and nothing is launched if validation fails or `tool` does not exist.
pub async fn wrap<O: LogObserver>(
    request: &WrapRequest,
    tool: &Path,
    observer: O,
) -> Result<ProcessOutcome> {
    request.validate()?;
    if !tool.is_file() {
        return Err(Error::ToolNotFound {
            path: tool.to_path_buf(),
            command: render_command(request)?,
        });
    }

    let (log, journal) = WrapLog::spawn(observer);
    let result = execute(request, tool, &log).await;
    if let Ok(exit_code) = &result {
        finish_status(*exit_code, &log);
    }
    drop(log);

    let state = journal.finish().await;
    Ok(ProcessOutcome::new(result?, state.lines))
}

/// Launch, drain, await, and log the verdict.
async fn execute(request: &WrapRequest, tool: &Path, log: &LogHandle) -> Result<i32> {
    log.status("Starting wrapping process...", 0.1);

    let runner = ToolRunner::new(tool);
    match runner.run(&tool_args(request), log).await {
        Ok(0) => {
            log.note("");
            log.note("✓ SUCCESS! App wrapped successfully!");
            log.note(format!("Wrapped IPA: {}", request.output().display()));
            Ok(0)
        }
        Ok(exit_code) => {
            log.note("");
            log.note(format!("✗ FAILED! Exit code: {}", exit_code));
            Ok(exit_code)
        }
        Err(e) => {
            log::error!("Wrap run failed: {}", e);
            log.note(format!("EXCEPTION: {}", e));
            log.status("✗ Error occurred", 0.0);
            Err(e)
        }
    }
}

fn finish_status(exit_code: i32, log: &LogHandle) {
    if exit_code == 0 {
        log.status("✓ Complete!", 1.0);
    } else {
        log.status("✗ Wrapping failed", 0.0);
    }
}
