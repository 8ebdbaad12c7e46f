//! Message levels ordered from most verbose to most severe.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The level of a restore diagnostic message.
///
/// Ordered from most verbose (`Debug`) to most severe (`Error`), matching the
/// derived `PartialOrd`/`Ord` implementation based on declaration order. A
/// verbosity threshold admits every level greater than or equal to itself.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Internal tracing detail.
    Debug,
    /// Detailed progress output.
    Verbose,
    /// Normal informational output.
    Information,
    /// The minimal output shown by default.
    Minimal,
    /// A potential problem that does not fail the restore.
    Warning,
    /// A problem that fails the restore.
    Error,
}

impl Level {
    /// Every level, in ascending order.
    pub const ALL: [Level; 6] = [
        Level::Debug,
        Level::Verbose,
        Level::Information,
        Level::Minimal,
        Level::Warning,
        Level::Error,
    ];

    /// Returns `true` for [`Warning`](Level::Warning) and [`Error`](Level::Error).
    ///
    /// These are the only levels the display policy lets a message hide itself from.
    pub fn is_warning_or_error(self) -> bool {
        matches!(self, Level::Warning | Level::Error)
    }

    /// Returns `true` if this level is [`Error`](Level::Error).
    pub fn is_error(self) -> bool {
        self == Level::Error
    }

    /// Returns the lowercase name used in configuration files.
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Debug => "debug",
            Level::Verbose => "verbose",
            Level::Information => "information",
            Level::Minimal => "minimal",
            Level::Warning => "warning",
            Level::Error => "error",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a [`Level`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid level: '{input}'")]
pub struct ParseLevelError {
    /// The input string that failed to parse.
    pub input: String,
}

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Level::ALL
            .into_iter()
            .find(|level| level.as_str() == lower)
            .ok_or_else(|| ParseLevelError {
                input: s.to_string(),
            })
    }
}
