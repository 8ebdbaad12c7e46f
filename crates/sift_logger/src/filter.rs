//! Verbosity threshold and display policy.

use sift_diagnostics::{Level, RestoreMessage};

/// Decides which messages are eligible for collection and display.
///
/// Collection and display are separate questions: a hidden warning is still
/// collected as long as it meets the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerbosityFilter {
    threshold: Level,
}

impl VerbosityFilter {
    /// Creates a filter admitting `threshold` and every more severe level.
    pub fn new(threshold: Level) -> Self {
        Self { threshold }
    }

    /// Returns the minimum level this filter admits.
    pub fn threshold(&self) -> Level {
        self.threshold
    }

    /// Returns `true` if a message at `level` should be collected.
    pub fn should_collect(&self, level: Level) -> bool {
        level >= self.threshold
    }

    /// Returns `true` if `message` should be forwarded to the sink.
    ///
    /// When `hide_warnings_and_errors` is set, errors and warnings are only
    /// shown if the message asks to stay visible. Other levels only need to
    /// meet the threshold.
    pub fn should_display(&self, message: &RestoreMessage, hide_warnings_and_errors: bool) -> bool {
        let visible = !message.level.is_warning_or_error()
            || !hide_warnings_and_errors
            || message.should_display;
        visible && self.should_collect(message.level)
    }
}

impl Default for VerbosityFilter {
    fn default() -> Self {
        Self::new(Level::Minimal)
    }
}
