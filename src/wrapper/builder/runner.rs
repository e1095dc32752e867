//! Wrapping tool process execution.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;

use super::command::{quote_args, quote_program};
use crate::wrapper::error::{Error, Result};
use crate::wrapper::journal::{LogHandle, StreamKind};

/// Runs the wrapping tool and streams its output into the wrap log.
#[derive(Clone, Debug)]
pub struct ToolRunner {
    tool: PathBuf,
}

impl ToolRunner {
    /// Creates a runner for the tool at `tool`.
    pub fn new<P: AsRef<Path>>(tool: P) -> Self {
        Self {
            tool: tool.as_ref().to_path_buf(),
        }
    }

    /// Launches the tool, drains both output streams, and waits for exit.
    ///
    /// The child is spawned directly (no shell) with stdin closed. Stdout and
    /// stderr are read line by line concurrently while it runs. Output is
    /// decoded leniently, so stray non-UTF-8 bytes never end the run. There is
    /// no timeout: the wait lasts as long as the tool does.
    ///
    /// # Returns
    ///
    /// The exit code, or `-1` if the tool was terminated by a signal.
    pub async fn run(&self, args: &[String], log: &LogHandle) -> Result<i32> {
        let command_line = format!("{} {}", quote_program(&self.tool)?, quote_args(args)?);

        log.note(format!("Executing: {}", command_line));
        log.note("");

        log.status("Wrapping app with Intune wrapper...", 0.3);

        // kill_on_drop releases the child on every early return
        let mut child = Command::new(&self.tool)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| Error::Launch {
                command: command_line.clone(),
                source,
            })?;

        log::info!("Launched {} (pid {:?})", self.tool.display(), child.id());
        log.status("Processing... Please wait", 0.5);

        // Both streams must be drained before waiting, or a full pipe stalls the tool.
        // try_join returns on the first fault so the child is killed right away.
        let drained = tokio::try_join!(
            drain_lines(child.stdout.take(), StreamKind::Stdout, log),
            drain_lines(child.stderr.take(), StreamKind::Stderr, log),
        );

        if let Err(e) = drained {
            log::warn!("Stream read failed, terminating {}", self.tool.display());
            if let Err(kill_err) = child.start_kill() {
                log::warn!("Failed to kill {}: {}", self.tool.display(), kill_err);
            }
            if let Err(wait_err) = child.wait().await {
                log::warn!("Failed to reap {}: {}", self.tool.display(), wait_err);
            }
            return Err(e);
        }

        let status = child.wait().await.map_err(|source| Error::Launch {
            command: command_line,
            source,
        })?;

        log.status("Wrapping completed", 0.8);

        let exit_code = status.code().unwrap_or(-1);
        log::info!("{} exited with code {}", self.tool.display(), exit_code);
        Ok(exit_code)
    }
}

/// Forwards every non-empty line of `reader` to the log.
///
/// Lines are split on `\n` and decoded lossily; only real read errors fail.
async fn drain_lines<R>(reader: Option<R>, stream: StreamKind, log: &LogHandle) -> Result<()>
where
    R: AsyncRead + Unpin,
{
    let Some(reader) = reader else {
        return Ok(());
    };

    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => return Ok(()),
            Ok(_) => {
                let text = String::from_utf8_lossy(&buf);
                let line = text.trim_end_matches(['\r', '\n']);
                if !line.is_empty() {
                    log.line(stream, line);
                }
            }
            Err(source) => return Err(Error::StreamRead { stream, source }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wrapper::journal::{NullObserver, WrapLog};
    use std::io;
    use std::pin::Pin;
    use std::task::{Context, Poll};
    use tokio::io::ReadBuf;

    /// Reader whose every read fails.
    struct Broken;

    impl AsyncRead for Broken {
        fn poll_read(
            self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            _buf: &mut ReadBuf<'_>,
        ) -> Poll<io::Result<()>> {
            Poll::Ready(Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed")))
        }
    }

    #[tokio::test]
    async fn invalid_utf8_is_decoded_lossily() {
        let (handle, journal) = WrapLog::spawn(NullObserver);
        let output: &[u8] = b"Signing caf\xe9.app\r\n\ndone";

        drain_lines(Some(output), StreamKind::Stdout, &handle)
            .await
            .unwrap();
        drop(handle);

        let texts: Vec<_> = journal
            .finish()
            .await
            .lines
            .into_iter()
            .map(|l| l.text)
            .collect();
        assert_eq!(texts, ["Signing caf\u{FFFD}.app", "done"]);
    }

    #[tokio::test]
    async fn read_errors_are_stream_faults() {
        let (handle, _journal) = WrapLog::spawn(NullObserver);
        let err = drain_lines(Some(Broken), StreamKind::Stderr, &handle)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::StreamRead {
                stream: StreamKind::Stderr,
                ..
            }
        ));
    }
}
