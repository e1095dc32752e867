//! Argument construction and command previews.
//!
//! The process runner and the preview both go through [`tool_args`], so what
//! gets shown is what would run.

use std::path::Path;

use super::tool_detection::TOOL_NAME;
use crate::wrapper::error::{Error, Result};
use crate::wrapper::request::WrapRequest;

/// Builds the tool's argument vector.
///
/// `-i <input> -o <output> -p <profile> [-c <identity>] [-v]`. Each value is
/// its own argv entry, so spaces in paths never split an argument.
pub fn tool_args(request: &WrapRequest) -> Vec<String> {
    let mut args = vec![
        "-i".to_string(),
        path_arg(request.input()),
        "-o".to_string(),
        path_arg(request.output()),
        "-p".to_string(),
        path_arg(request.profile()),
    ];

    if let Some(identity) = request.signing_identity() {
        args.push("-c".to_string());
        args.push(identity.to_string());
    }

    if request.verbose() {
        args.push("-v".to_string());
    }

    args
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Quotes arguments for display, only where a POSIX shell would need it.
pub fn quote_args(args: &[String]) -> Result<String> {
    let mut quoted = Vec::with_capacity(args.len());
    for arg in args {
        let word = shlex::try_quote(arg).map_err(|e| Error::Quote(format!("{arg:?}: {e:?}")))?;
        quoted.push(word.into_owned());
    }
    Ok(quoted.join(" "))
}

/// Renders the command a user could paste on a Mac to run this wrap.
pub fn render_command(request: &WrapRequest) -> Result<String> {
    render_command_for(Path::new(TOOL_NAME), request)
}

/// Renders the command with an explicit executable.
pub fn render_command_for(program: &Path, request: &WrapRequest) -> Result<String> {
    let program = quote_program(program)?;
    let args = quote_args(&tool_args(request))?;
    Ok(format!("{program} {args}"))
}

/// Quotes an executable path for display.
pub fn quote_program(program: &Path) -> Result<String> {
    let program = program.to_string_lossy();
    shlex::try_quote(&program)
        .map(|quoted| quoted.into_owned())
        .map_err(|e| Error::Quote(format!("{program}: {e:?}")))
}
