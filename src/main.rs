//! Intune Wrapper - terminal front-end for the iOS app wrapping tool.
//!
//! This binary wraps an .ipa with IntuneMAMPackager, streaming the tool's output
//! and reporting the result through its exit code.

use std::process;

use intune_wrapper::cli;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // Run CLI and get exit code
    let exit_code = match cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            for suggestion in e.recovery_suggestions() {
                eprintln!("  • {}", suggestion);
            }
            e.exit_code()
        }
    };

    process::exit(exit_code);
}
