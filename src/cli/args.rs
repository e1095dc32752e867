//! Command line argument parsing and validation.
//!
//! This module provides CLI argument parsing using clap, with validation
//! that runs before any file is touched.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::wrapper::WrapRequestBuilder;

/// Terminal front-end for the Intune App Wrapping Tool for iOS
#[derive(Parser, Debug)]
#[command(
    name = "intune_wrapper",
    version,
    about = "Wrap iOS apps with the Intune App Wrapping Tool",
    long_about = "Runs IntuneMAMPackager on an .ipa and streams its output.

The wrapping tool itself only runs on macOS with Xcode. On other hosts the
inputs can still be validated and the command prepared for a Mac.

Usage:
  intune_wrapper wrap -i App.ipa -p App.mobileprovision
  intune_wrapper wrap -i App.ipa -p App.mobileprovision -o Wrapped.ipa -c \"iPhone Distribution: Contoso\"
  intune_wrapper command -i App.ipa -p App.mobileprovision
  intune_wrapper locate

Exit code 0 = the tool exited 0. A failed tool run passes its exit code through."
)]
pub struct Args {
    /// Only print errors and the final result
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Print extra detail such as where the log file went
    #[arg(long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Wrap an .ipa with IntuneMAMPackager
    Wrap(WrapArgs),

    /// Show where IntuneMAMPackager is expected on this host
    Locate(LocateArgs),

    /// Print the wrapping command without running it
    #[command(name = "command")]
    Preview(RequestArgs),
}

/// Inputs shared by `wrap` and `command`.
#[derive(clap::Args, Debug, Clone)]
pub struct RequestArgs {
    /// Input .ipa to wrap
    #[arg(short = 'i', long, value_name = "IPA")]
    pub input: PathBuf,

    /// Wrapped .ipa to write
    ///
    /// Defaults to <input stem>-wrapped.ipa next to the input.
    #[arg(short = 'o', long, value_name = "IPA")]
    pub output: Option<PathBuf>,

    /// Provisioning profile (.mobileprovision)
    #[arg(short = 'p', long, value_name = "PROFILE")]
    pub profile: PathBuf,

    /// Signing certificate used to re-sign the app
    #[arg(short = 'c', long, value_name = "IDENTITY")]
    pub signing_identity: Option<String>,

    /// Run the tool without its -v flag
    #[arg(long)]
    pub no_verbose: bool,
}

impl RequestArgs {
    /// Starts a request builder from these arguments.
    pub fn to_builder(&self) -> WrapRequestBuilder {
        let mut builder = WrapRequestBuilder::new()
            .input(&self.input)
            .profile(&self.profile)
            .verbose(!self.no_verbose);

        if let Some(output) = &self.output {
            builder = builder.output(output);
        }
        if let Some(identity) = &self.signing_identity {
            builder = builder.signing_identity(identity.clone());
        }
        builder
    }
}

/// Arguments for `wrap`.
#[derive(clap::Args, Debug)]
pub struct WrapArgs {
    #[command(flatten)]
    pub request: RequestArgs,

    /// Skip the post-wrap size check
    #[arg(long)]
    pub no_verify: bool,

    /// Path to IntuneMAMPackager, or a program name to look up on PATH
    #[arg(long, value_name = "PATH", env = "INTUNE_WRAPPER_TOOL")]
    pub tool: Option<PathBuf>,

    /// Continue on hosts that cannot run the tool without asking
    #[arg(short = 'y', long, env = "INTUNE_WRAPPER_ASSUME_YES")]
    pub yes: bool,

    /// Also write the full wrap log to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Print the wrap report as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `locate`.
#[derive(clap::Args, Debug)]
pub struct LocateArgs {
    /// Path to IntuneMAMPackager, or a program name to look up on PATH
    #[arg(long, value_name = "PATH", env = "INTUNE_WRAPPER_TOOL")]
    pub tool: Option<PathBuf>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        let request = match &self.command {
            Command::Wrap(args) => &args.request,
            Command::Preview(args) => args,
            Command::Locate(_) => return Ok(()),
        };

        if request.output.as_ref() == Some(&request.input) {
            return Err(format!(
                "Output must differ from input: {} would be overwritten",
                request.input.display()
            ));
        }

        Ok(())
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for terminal output
    output: super::OutputManager,
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        let json = matches!(&args.command, Command::Wrap(w) if w.json)
            || matches!(&args.command, Command::Locate(l) if l.json);

        let output = super::OutputManager::new(args.verbose, args.quiet || json);

        Self { output }
    }
}

impl RuntimeConfig {
    /// Get a reference to the output manager
    pub fn output(&self) -> &super::OutputManager {
        &self.output
    }

    /// Print verbose message if in verbose mode
    pub fn verbose_println(&self, message: &str) -> std::io::Result<()> {
        self.output.verbose(message)
    }

    /// Print success message if not in quiet mode
    pub fn success(&self, message: &str) -> std::io::Result<()> {
        self.output.success(message)
    }

    /// Print warning message if not in quiet mode
    pub fn warn(&self, message: &str) -> std::io::Result<()> {
        self.output.warn(message)
    }

    /// Print section header
    pub fn section(&self, title: &str) -> std::io::Result<()> {
        self.output.section(title)
    }

    /// Print indented text
    pub fn indent(&self, message: &str) -> std::io::Result<()> {
        self.output.indent(message)
    }
}
