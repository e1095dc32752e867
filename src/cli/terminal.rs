//! Terminal implementations of the wrap collaborators.

use std::io::{self, BufRead, IsTerminal, Write};
use std::sync::{Arc, Mutex, PoisonError};

use super::OutputManager;
use crate::wrapper::{Interaction, LogEvent, LogLine, LogObserver};

/// Confirm and notify prompts on stdin/stdout.
#[derive(Debug, Clone)]
pub struct TerminalInteraction {
    output: OutputManager,
    assume_yes: bool,
}

impl TerminalInteraction {
    /// Creates prompts that print through `output`.
    ///
    /// With `assume_yes`, every question is answered yes without reading stdin.
    pub fn new(output: OutputManager, assume_yes: bool) -> Self {
        Self { output, assume_yes }
    }

    fn print_block(&self, title: &str, message: &str) {
        let _ = self.output.section(title);
        for line in message.lines() {
            let _ = self.output.indent(line);
        }
    }
}

impl Interaction for TerminalInteraction {
    fn confirm(&self, title: &str, message: &str) -> bool {
        if self.assume_yes {
            log::debug!("{}: assuming yes", title);
            return true;
        }

        if !io::stdin().is_terminal() {
            // Nobody to ask; treat as declined
            let _ = self
                .output
                .error(&format!("{} (stdin is not a terminal, pass --yes to continue)", title));
            return false;
        }

        self.print_block(title, message);
        print!("  [y/N] ");
        let _ = io::stdout().flush();

        let mut answer = String::new();
        if let Err(e) = io::stdin().lock().read_line(&mut answer) {
            log::warn!("Failed to read answer: {}", e);
            return false;
        }
        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }

    fn notify(&self, title: &str, message: &str) {
        if self.output.is_quiet() {
            // The prepared command must still reach the user
            let mut stderr = io::stderr().lock();
            let _ = writeln!(stderr, "{}:\n{}", title, message);
            return;
        }
        self.print_block(title, message);
    }
}

/// Shared copy of every line a [`ConsoleObserver`] printed.
///
/// Outlives the wrap, so the lines are still there when the run ends in an error.
#[derive(Debug, Clone, Default)]
pub struct Transcript(Arc<Mutex<Vec<LogLine>>>);

impl Transcript {
    fn push(&self, line: LogLine) {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).push(line);
    }

    /// Lines recorded so far, in log order.
    pub fn lines(&self) -> Vec<LogLine> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

/// Prints wrap log lines and status milestones as they arrive.
#[derive(Debug, Clone)]
pub struct ConsoleObserver {
    output: OutputManager,
    transcript: Transcript,
}

impl ConsoleObserver {
    /// Creates an observer that prints through `output`.
    pub fn new(output: OutputManager) -> Self {
        Self {
            output,
            transcript: Transcript::default(),
        }
    }

    /// Handle to the lines this observer sees.
    pub fn transcript(&self) -> Transcript {
        self.transcript.clone()
    }
}

impl LogObserver for ConsoleObserver {
    fn on_event(&mut self, event: &LogEvent) {
        let result = match event {
            LogEvent::Line(line) => {
                self.transcript.push(line.clone());
                self.output.indent(&line.display_text())
            }
            LogEvent::Status(status) => self.output.progress(&format!(
                "[{:>3.0}%] {}",
                status.fraction * 100.0,
                status.message
            )),
        };
        if let Err(e) = result {
            log::debug!("Failed to print wrap log: {}", e);
        }
    }
}
