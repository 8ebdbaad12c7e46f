//! Restore diagnostic messages, severity levels, and thread-safe collection.
//!
//! This crate defines the [`DiagnosticMessage`] tagged union produced by the
//! dependency-resolution engine, the richer [`RestoreMessage`] shape every
//! message is normalized into, and the [`ErrorCollector`] that accumulates
//! messages from concurrent producers during one restore operation.

#![warn(missing_docs)]

pub mod code;
pub mod collector;
pub mod level;
pub mod message;

pub use code::{DiagnosticCode, ParseCodeError};
pub use collector::ErrorCollector;
pub use level::{Level, ParseLevelError};
pub use message::{DiagnosticMessage, GenericMessage, RestoreMessage};
