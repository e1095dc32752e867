//! `wrap` subcommand.

use anyhow::Context;
use std::path::Path;

use crate::cli::{ConsoleObserver, RuntimeConfig, TerminalInteraction, WrapArgs};
use crate::error::Result;
use crate::wrapper::{
    Capability, Classification, HostPlatform, LogLine, WrapOrchestrator, WrapReport,
};

/// Validates, runs the tool, and reports.
///
/// # Returns
///
/// `Ok(0)` when the tool exited 0. A nonzero tool exit comes back as
/// [`crate::wrapper::Error::ProcessFailure`] so `main` can pass the code on.
pub async fn execute(args: WrapArgs, config: &RuntimeConfig) -> Result<i32> {
    let request = args
        .request
        .to_builder()
        .verify_after_wrap(!args.no_verify)
        .build()?;

    let platform = HostPlatform::current();
    print_platform_banner(platform, config)?;

    let mut orchestrator = WrapOrchestrator::new(platform);
    if let Some(tool) = &args.tool {
        orchestrator = orchestrator.with_tool(tool);
    }

    let interaction = TerminalInteraction::new(*config.output(), args.yes);
    let observer = ConsoleObserver::new(*config.output());
    let transcript = observer.transcript();

    let result = orchestrator.run(&request, &interaction, observer).await;

    // Written before any error propagates so a failed launch still leaves its log
    if let Some(path) = &args.log_file {
        let trailer = match &result {
            Ok(report) => format!("exit code: {}", report.outcome.exit_code),
            Err(e) => format!("error: {}", e),
        };
        match write_log_file(path, &transcript.lines(), &trailer).await {
            Ok(()) => config.verbose_println(&format!("Log written to {}", path.display()))?,
            Err(e) if result.is_err() => log::warn!("{}", e),
            Err(e) => return Err(e),
        }
    }

    let report = result?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    finish(&report, request.output(), config)
}

fn print_platform_banner(platform: HostPlatform, config: &RuntimeConfig) -> std::io::Result<()> {
    match platform.capability() {
        Capability::Capable => {
            config.success("Platform: macOS - Ready for iOS app wrapping!")?;
        }
        Capability::Incapable => {
            config.warn(&format!("Platform: {}", platform))?;
            config.warn("Note: Actual iOS app wrapping requires macOS with Xcode")?;
            config.warn("This tool can prepare files and the command on other platforms")?;
        }
    }
    Ok(())
}

fn finish(report: &WrapReport, output: &Path, config: &RuntimeConfig) -> Result<i32> {
    match report.outcome.classification {
        Classification::Success => {
            config.success(&format!(
                "App wrapped successfully! Output: {}",
                output.display()
            ))?;
            Ok(0)
        }
        Classification::Failure => Err(crate::wrapper::Error::ProcessFailure {
            exit_code: report.outcome.exit_code,
        }
        .into()),
    }
}

async fn write_log_file(path: &Path, lines: &[LogLine], trailer: &str) -> Result<()> {
    let mut contents = String::new();
    for line in lines {
        contents.push_str(&format!(
            "[{}] {}\n",
            line.at.format("%Y-%m-%d %H:%M:%S"),
            line.display_text()
        ));
    }
    contents.push_str(trailer);
    contents.push('\n');

    tokio::fs::write(path, contents)
        .await
        .with_context(|| format!("Failed to write wrap log to {}", path.display()))?;
    Ok(())
}
