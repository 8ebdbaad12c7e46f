//! Diagnostic messages emitted during a restore operation.

use crate::code::DiagnosticCode;
use crate::level::Level;
use serde::{Deserialize, Serialize};

/// A plain diagnostic with a level, code, and text.
///
/// Producers that know nothing about projects or packages emit this shape;
/// the logger normalizes it into a [`RestoreMessage`] on entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenericMessage {
    /// The level of this message.
    pub level: Level,
    /// The diagnostic code, or [`DiagnosticCode::Undefined`].
    pub code: DiagnosticCode,
    /// The human-readable message text.
    pub text: String,
}

impl GenericMessage {
    /// Creates a generic message.
    pub fn new(level: Level, code: DiagnosticCode, text: impl Into<String>) -> Self {
        Self {
            level,
            code,
            text: text.into(),
        }
    }
}

/// A diagnostic enriched with the restore context it was raised in.
///
/// Every message entering the logger is normalized into this shape. The
/// `file_path` is backfilled from `project_path` (or the logger's own project
/// path) when the producer left it empty.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestoreMessage {
    /// The level of this message.
    pub level: Level,
    /// The diagnostic code, or [`DiagnosticCode::Undefined`].
    pub code: DiagnosticCode,
    /// The human-readable message text.
    pub text: String,
    /// The file the message should be attributed to.
    #[serde(default)]
    pub file_path: Option<String>,
    /// The project being restored when the message was raised.
    #[serde(default)]
    pub project_path: Option<String>,
    /// The package the message concerns, if any.
    #[serde(default)]
    pub library_id: Option<String>,
    /// Target graphs the message applies to. Empty means every graph.
    #[serde(default)]
    pub target_graphs: Vec<String>,
    /// Whether an error or warning stays visible when the logger hides them.
    #[serde(default = "default_should_display")]
    pub should_display: bool,
}

fn default_should_display() -> bool {
    true
}

impl RestoreMessage {
    /// Creates a restore message with empty context and `should_display` set.
    pub fn new(level: Level, code: DiagnosticCode, text: impl Into<String>) -> Self {
        Self {
            level,
            code,
            text: text.into(),
            file_path: None,
            project_path: None,
            library_id: None,
            target_graphs: Vec::new(),
            should_display: true,
        }
    }

    /// Creates an error message.
    pub fn error(code: DiagnosticCode, text: impl Into<String>) -> Self {
        Self::new(Level::Error, code, text)
    }

    /// Creates a warning message.
    pub fn warning(code: DiagnosticCode, text: impl Into<String>) -> Self {
        Self::new(Level::Warning, code, text)
    }

    /// Sets the file path.
    pub fn with_file_path(mut self, path: impl Into<String>) -> Self {
        self.file_path = Some(path.into());
        self
    }

    /// Sets the project path.
    pub fn with_project_path(mut self, path: impl Into<String>) -> Self {
        self.project_path = Some(path.into());
        self
    }

    /// Sets the package this message concerns.
    pub fn with_library_id(mut self, id: impl Into<String>) -> Self {
        self.library_id = Some(id.into());
        self
    }

    /// Adds a target graph this message applies to.
    pub fn with_target_graph(mut self, target: impl Into<String>) -> Self {
        self.target_graphs.push(target.into());
        self
    }

    /// Sets whether the message stays visible when errors and warnings are hidden.
    pub fn with_should_display(mut self, should_display: bool) -> Self {
        self.should_display = should_display;
        self
    }

    /// Returns the file path if it is set and non-empty.
    pub fn file_path(&self) -> Option<&str> {
        non_empty(self.file_path.as_deref())
    }

    /// Returns the project path if it is set and non-empty.
    pub fn project_path(&self) -> Option<&str> {
        non_empty(self.project_path.as_deref())
    }

    /// Fills an empty `file_path` from `project_path`, falling back to `fallback`.
    ///
    /// A non-empty `file_path` is never overwritten. If neither source
    /// resolves, the field is left as it was.
    pub fn backfill_file_path(&mut self, fallback: Option<&str>) {
        if self.file_path().is_some() {
            return;
        }
        let source = self.project_path().or_else(|| non_empty(fallback));
        if let Some(path) = source {
            self.file_path = Some(path.to_string());
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

impl From<GenericMessage> for RestoreMessage {
    fn from(message: GenericMessage) -> Self {
        Self::new(message.level, message.code, message.text)
    }
}

/// Any diagnostic a producer can hand to the logger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiagnosticMessage {
    /// A plain message without restore context.
    Generic(GenericMessage),
    /// A message already carrying restore context.
    Restore(RestoreMessage),
}

impl DiagnosticMessage {
    /// Returns the level of the message.
    pub fn level(&self) -> Level {
        match self {
            DiagnosticMessage::Generic(m) => m.level,
            DiagnosticMessage::Restore(m) => m.level,
        }
    }

    /// Returns the diagnostic code of the message.
    pub fn code(&self) -> DiagnosticCode {
        match self {
            DiagnosticMessage::Generic(m) => m.code,
            DiagnosticMessage::Restore(m) => m.code,
        }
    }

    /// Returns the message text.
    pub fn text(&self) -> &str {
        match self {
            DiagnosticMessage::Generic(m) => &m.text,
            DiagnosticMessage::Restore(m) => &m.text,
        }
    }

    /// Returns the restore shape of this message.
    ///
    /// Restore messages are returned as they are; generic messages become a
    /// restore message with empty context that is allowed to display.
    pub fn normalize(&self) -> RestoreMessage {
        match self {
            DiagnosticMessage::Generic(m) => RestoreMessage::from(m.clone()),
            DiagnosticMessage::Restore(m) => m.clone(),
        }
    }
}

impl From<GenericMessage> for DiagnosticMessage {
    fn from(message: GenericMessage) -> Self {
        DiagnosticMessage::Generic(message)
    }
}

impl From<RestoreMessage> for DiagnosticMessage {
    fn from(message: RestoreMessage) -> Self {
        DiagnosticMessage::Restore(message)
    }
}
