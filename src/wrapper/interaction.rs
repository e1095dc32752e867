//! User decisions the orchestrator needs before launching anything.

/// Blocking confirm and notify prompts.
///
/// A terminal, a GUI dialog, or a test script can sit behind this. Calls
/// happen before the tool is launched, never while it runs.
pub trait Interaction {
    /// Asks a yes/no question. `true` means continue.
    fn confirm(&self, title: &str, message: &str) -> bool;

    /// Shows a message that only needs acknowledging.
    fn notify(&self, title: &str, message: &str);
}

/// Answers every question the same way and logs notifications.
#[derive(Debug, Clone, Copy)]
pub struct FixedAnswer(pub bool);

impl Interaction for FixedAnswer {
    fn confirm(&self, title: &str, _message: &str) -> bool {
        log::debug!("{}: answering {}", title, if self.0 { "yes" } else { "no" });
        self.0
    }

    fn notify(&self, title: &str, message: &str) {
        log::info!("{}: {}", title, message);
    }
}
