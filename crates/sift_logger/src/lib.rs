//! The collecting logger placed between a restore engine and its output.
//!
//! [`CollectingLogger`] decides, for every diagnostic a restore produces,
//! whether to drop it under warning-suppression policy, whether to record it
//! for later inspection through [`errors`](CollectingLogger::errors), and
//! whether to forward it to the downstream [`LogSink`]. Without a
//! [`SuppressionGate`] the logger runs in basic mode and only applies the
//! verbosity threshold and display policy.

#![warn(missing_docs)]

pub mod filter;
pub mod gate;
pub mod logger;
pub mod sink;

pub use filter::VerbosityFilter;
pub use gate::SuppressionGate;
pub use logger::CollectingLogger;
pub use sink::{LogSink, NullSink};
