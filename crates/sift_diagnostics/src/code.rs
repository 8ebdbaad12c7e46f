//! Restore diagnostic codes such as `NU1605`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The prefix shared by every defined restore code.
const PREFIX: &str = "NU";

/// A restore diagnostic code.
///
/// Displayed as `NU` followed by the number zero-padded to at least four
/// digits, e.g. `NU1605` or `NU0012`. Parsing accepts any number of four or
/// more digits that fits in a `u16`, so every code reads back as itself.
/// Messages that carry no code use [`DiagnosticCode::Undefined`]. Codes
/// serialize as their display string so they read naturally in configuration.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[derive(Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DiagnosticCode {
    /// No code was assigned to the message.
    #[default]
    Undefined,
    /// A numbered `NU` code.
    Nu(u16),
}

impl DiagnosticCode {
    /// Creates a numbered code.
    pub fn new(number: u16) -> Self {
        DiagnosticCode::Nu(number)
    }

    /// Returns `true` if this is [`DiagnosticCode::Undefined`].
    pub fn is_undefined(self) -> bool {
        self == DiagnosticCode::Undefined
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticCode::Undefined => f.write_str("Undefined"),
            DiagnosticCode::Nu(number) => write!(f, "{PREFIX}{number:04}"),
        }
    }
}

/// Error returned when a string is not a valid diagnostic code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid diagnostic code: '{input}'")]
pub struct ParseCodeError {
    /// The input string that failed to parse.
    pub input: String,
}

impl FromStr for DiagnosticCode {
    type Err = ParseCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let err = || ParseCodeError {
            input: s.to_string(),
        };

        if s.eq_ignore_ascii_case("undefined") {
            return Ok(DiagnosticCode::Undefined);
        }
        let digits = s
            .get(..PREFIX.len())
            .filter(|prefix| prefix.eq_ignore_ascii_case(PREFIX))
            .map(|_| &s[PREFIX.len()..])
            .ok_or_else(err)?;
        if digits.len() < 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(err());
        }
        let number: u16 = digits.parse().map_err(|_| err())?;
        Ok(DiagnosticCode::Nu(number))
    }
}

impl TryFrom<String> for DiagnosticCode {
    type Error = ParseCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DiagnosticCode> for String {
    fn from(code: DiagnosticCode) -> Self {
        code.to_string()
    }
}
