//! `locate` subcommand.

use serde_json::json;

use crate::cli::{LocateArgs, RuntimeConfig};
use crate::error::Result;
use crate::wrapper::builder::{ToolLocator, resolve_override};
use crate::wrapper::HostPlatform;

/// Prints the host capability and where the tool is, or would be.
///
/// Always exits 0; a missing tool is information here, not an error.
pub fn execute(args: LocateArgs, config: &RuntimeConfig) -> Result<i32> {
    let platform = HostPlatform::current();
    let locator = ToolLocator::for_platform(platform);
    let location = match &args.tool {
        Some(tool) => resolve_override(tool),
        None => locator.locate(),
    };

    if args.json {
        let report = json!({
            "platform": platform,
            "capability": platform.capability(),
            "location": location,
            "candidates": locator.candidates(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(0);
    }

    config.section("Wrapping tool")?;
    config.indent(&format!("Platform:   {} ({})", platform, platform.capability()))?;
    if args.tool.is_none() {
        for candidate in locator.candidates() {
            let mark = if candidate.is_file() { "✓" } else { " " };
            config.indent(&format!("Candidate:  {} {}", mark, candidate.display()))?;
        }
    }

    if location.is_found() {
        config.success(&format!("Found: {}", location.path().display()))?;
    } else {
        config.warn(&format!("Not found, expected at: {}", location.path().display()))?;
    }
    Ok(0)
}
