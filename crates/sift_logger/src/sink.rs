//! The downstream sink displayed messages are forwarded to.

use sift_diagnostics::DiagnosticMessage;
use std::convert::Infallible;
use std::future::Future;

/// Receives every message that passes the logger's display decision.
///
/// Errors are returned to the producer exactly as the sink reports them.
pub trait LogSink: Send + Sync {
    /// The error type reported by this sink.
    type Error;

    /// Forwards a message synchronously.
    fn log(&self, message: &DiagnosticMessage) -> Result<(), Self::Error>;

    /// Forwards a message asynchronously.
    ///
    /// Defaults to calling [`log`](Self::log).
    fn log_async(
        &self,
        message: &DiagnosticMessage,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send {
        async move { self.log(message) }
    }
}

/// A sink that discards every message.
///
/// Useful when only the collected messages matter.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl LogSink for NullSink {
    type Error = Infallible;

    fn log(&self, _message: &DiagnosticMessage) -> Result<(), Self::Error> {
        Ok(())
    }
}
