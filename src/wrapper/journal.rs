//! Single-writer wrap log.
//!
//! The log buffer is owned by one consumer task. The stdout reader, the stderr
//! reader, and the orchestrator each hold a [`LogHandle`] and send
//! [`LogEvent`]s to it; nothing else touches the buffer. The observer, which
//! is where a UI hooks in, is only ever called from the consumer task.
//!
//! Events from one producer arrive in the order they were sent. Across
//! producers the order is whatever the channel saw first.

use chrono::{DateTime, Local};
use serde::Serialize;
use std::fmt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Where a log line came from.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamKind {
    /// Tool standard output
    Stdout,
    /// Tool standard error
    Stderr,
    /// Messages written by the wrapper itself
    Orchestrator,
}

impl fmt::Display for StreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamKind::Stdout => f.write_str("stdout"),
            StreamKind::Stderr => f.write_str("stderr"),
            StreamKind::Orchestrator => f.write_str("wrapper"),
        }
    }
}

/// One appended log line.
#[derive(Clone, Debug, Serialize)]
pub struct LogLine {
    /// Source of the line
    pub stream: StreamKind,
    /// Raw text, without the stderr tag
    pub text: String,
    /// When the consumer received it
    pub at: DateTime<Local>,
}

impl LogLine {
    /// Text as shown to the user, stderr lines tagged with `ERROR: `.
    pub fn display_text(&self) -> String {
        match self.stream {
            StreamKind::Stderr => format!("ERROR: {}", self.text),
            StreamKind::Stdout | StreamKind::Orchestrator => self.text.clone(),
        }
    }
}

impl fmt::Display for LogLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_text())
    }
}

/// Coarse progress milestone.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Status {
    /// Human readable phase
    pub message: String,
    /// Progress in `0.0..=1.0`
    pub fraction: f64,
}

/// Message sent to the log owner.
#[derive(Clone, Debug)]
pub enum LogEvent {
    /// Append a line
    Line(LogLine),
    /// Replace the current status
    Status(Status),
}

/// Receives every event after it has been applied to the log.
pub trait LogObserver: Send + 'static {
    /// Called once per event, in consumer order.
    fn on_event(&mut self, event: &LogEvent);
}

impl<F> LogObserver for F
where
    F: FnMut(&LogEvent) + Send + 'static,
{
    fn on_event(&mut self, event: &LogEvent) {
        self(event)
    }
}

/// Observer that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl LogObserver for NullObserver {
    fn on_event(&mut self, _event: &LogEvent) {}
}

/// Producer side of the log.
#[derive(Clone, Debug)]
pub struct LogHandle {
    tx: mpsc::UnboundedSender<LogEvent>,
}

impl LogHandle {
    /// Appends a line from the given stream.
    pub fn line(&self, stream: StreamKind, text: impl Into<String>) {
        self.send(LogEvent::Line(LogLine {
            stream,
            text: text.into(),
            at: Local::now(),
        }));
    }

    /// Appends a wrapper message.
    pub fn note(&self, text: impl Into<String>) {
        self.line(StreamKind::Orchestrator, text);
    }

    /// Publishes a progress milestone.
    pub fn status(&self, message: impl Into<String>, fraction: f64) {
        self.send(LogEvent::Status(Status {
            message: message.into(),
            fraction: fraction.clamp(0.0, 1.0),
        }));
    }

    fn send(&self, event: LogEvent) {
        // The consumer only stops once every handle is gone.
        if self.tx.send(event).is_err() {
            log::debug!("wrap log consumer already finished, event dropped");
        }
    }
}

/// Consumer side of the log.
pub struct WrapLog {
    task: JoinHandle<LogState>,
}

/// Everything the consumer collected.
#[derive(Clone, Debug, Default)]
pub struct LogState {
    /// Lines in append order
    pub lines: Vec<LogLine>,
    /// Last status seen
    pub status: Option<Status>,
}

impl WrapLog {
    /// Spawns the consumer task and returns the first producer handle.
    ///
    /// Must be called inside a tokio runtime.
    pub fn spawn<O: LogObserver>(mut observer: O) -> (LogHandle, WrapLog) {
        let (tx, mut rx) = mpsc::unbounded_channel::<LogEvent>();

        let task = tokio::spawn(async move {
            let mut state = LogState::default();
            while let Some(event) = rx.recv().await {
                match &event {
                    LogEvent::Line(line) => state.lines.push(line.clone()),
                    LogEvent::Status(status) => state.status = Some(status.clone()),
                }
                observer.on_event(&event);
            }
            state
        });

        (LogHandle { tx }, WrapLog { task })
    }

    /// Waits for all handles to drop and returns the collected state.
    pub async fn finish(self) -> LogState {
        match self.task.await {
            Ok(state) => state,
            Err(e) => {
                log::error!("wrap log consumer panicked: {}", e);
                LogState::default()
            }
        }
    }
}
