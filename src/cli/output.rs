//! Terminal output with verbose and quiet switches.

use std::io::{self, Write};

/// Prints status, warnings, and streamed text to the terminal.
///
/// Regular output goes to stdout, errors to stderr. Quiet mode suppresses
/// everything except errors.
#[derive(Debug, Clone, Copy)]
pub struct OutputManager {
    verbose: bool,
    quiet: bool,
}

impl OutputManager {
    /// Creates an output manager.
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    /// Whether regular output is suppressed.
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// Prints a line in verbose mode.
    pub fn verbose(&self, message: &str) -> io::Result<()> {
        if self.verbose && !self.quiet {
            self.println(message)?;
        }
        Ok(())
    }

    /// Prints a progress line.
    pub fn progress(&self, message: &str) -> io::Result<()> {
        if !self.quiet {
            self.println(&format!("→ {}", message))?;
        }
        Ok(())
    }

    /// Prints a success line.
    pub fn success(&self, message: &str) -> io::Result<()> {
        if !self.quiet {
            self.println(&format!("✓ {}", message))?;
        }
        Ok(())
    }

    /// Prints a warning line.
    pub fn warn(&self, message: &str) -> io::Result<()> {
        if !self.quiet {
            self.println(&format!("⚠ {}", message))?;
        }
        Ok(())
    }

    /// Prints an error line to stderr, even in quiet mode.
    pub fn error(&self, message: &str) -> io::Result<()> {
        let mut stderr = io::stderr().lock();
        writeln!(stderr, "✗ {}", message)
    }

    /// Prints a section header.
    pub fn section(&self, title: &str) -> io::Result<()> {
        if !self.quiet {
            let mut stdout = io::stdout().lock();
            writeln!(stdout)?;
            writeln!(stdout, "{}", title)?;
            writeln!(stdout, "{}", "─".repeat(title.chars().count()))?;
        }
        Ok(())
    }

    /// Prints indented text.
    pub fn indent(&self, message: &str) -> io::Result<()> {
        if !self.quiet {
            self.println(&format!("  {}", message))?;
        }
        Ok(())
    }

    fn println(&self, message: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", message)
    }
}
