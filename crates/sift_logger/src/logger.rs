//! The collecting logger orchestrating suppression, collection, and display.

use crate::filter::VerbosityFilter;
use crate::gate::SuppressionGate;
use crate::sink::LogSink;
use log::trace;
use sift_config::LoggingConfig;
use sift_diagnostics::{DiagnosticMessage, ErrorCollector, Level, RestoreMessage};
use std::future::Future;

/// Filters, collects, and forwards the diagnostics of one restore operation.
///
/// Every message goes through the same steps:
///
/// 1. In gated mode, a warning suppressed by the [`SuppressionGate`] is
///    dropped entirely.
/// 2. The message is normalized into a [`RestoreMessage`] and an empty file
///    path is backfilled from the message's project path or the logger's own.
/// 3. Messages meeting the verbosity threshold are collected.
/// 4. Messages passing the display policy are forwarded to the sink.
///
/// Logging takes `&self`, so one logger can be shared by every restore
/// worker. Configuration setters take `&mut self` and are expected to run
/// before the logger is shared.
pub struct CollectingLogger<S> {
    sink: S,
    filter: VerbosityFilter,
    hide_warnings_and_errors: bool,
    project_path: Option<String>,
    collector: ErrorCollector,
    gate: Option<SuppressionGate>,
}

impl<S: LogSink> CollectingLogger<S> {
    /// Creates a basic logger with no warning suppression.
    pub fn new(sink: S, threshold: Level, hide_warnings_and_errors: bool) -> Self {
        Self {
            sink,
            filter: VerbosityFilter::new(threshold),
            hide_warnings_and_errors,
            project_path: None,
            collector: ErrorCollector::new(),
            gate: None,
        }
    }

    /// Creates a basic logger from the `[logging]` configuration section.
    pub fn from_config(sink: S, config: &LoggingConfig) -> Self {
        let mut logger = Self::new(sink, config.verbosity, config.hide_warnings_and_errors);
        logger.project_path = config.project_path.clone();
        logger
    }

    /// Switches the logger to gated mode using `gate`.
    pub fn with_suppression(mut self, gate: SuppressionGate) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Sets the path messages without a file or project path are attributed to.
    pub fn set_project_path(&mut self, path: impl Into<String>) {
        self.project_path = Some(path.into());
    }

    /// Returns the logger's own project path.
    pub fn project_path(&self) -> Option<&str> {
        self.project_path.as_deref()
    }

    /// Returns the minimum level messages need to be collected or displayed.
    pub fn threshold(&self) -> Level {
        self.filter.threshold()
    }

    /// Returns `true` if errors and warnings are hidden unless they ask to display.
    pub fn hides_warnings_and_errors(&self) -> bool {
        self.hide_warnings_and_errors
    }

    /// Returns the suppression gate in gated mode.
    pub fn suppression(&self) -> Option<&SuppressionGate> {
        self.gate.as_ref()
    }

    /// Returns the suppression gate for configuration in gated mode.
    pub fn suppression_mut(&mut self) -> Option<&mut SuppressionGate> {
        self.gate.as_mut()
    }

    /// Returns the downstream sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Returns the collector holding every collected message.
    pub fn collector(&self) -> &ErrorCollector {
        &self.collector
    }

    /// Returns a snapshot of every collected message.
    pub fn errors(&self) -> Vec<RestoreMessage> {
        self.collector.snapshot()
    }

    /// Consumes the logger and returns the collected messages.
    pub fn into_errors(self) -> Vec<RestoreMessage> {
        self.collector.take_all()
    }

    /// Logs a message, forwarding it to the sink if it is displayed.
    ///
    /// The only error is the sink's own, returned as is.
    pub fn log(&self, message: impl Into<DiagnosticMessage>) -> Result<(), S::Error> {
        match self.accept(message.into()) {
            Some(displayed) => self.sink.log(&displayed),
            None => Ok(()),
        }
    }

    /// Logs a message, forwarding it to the sink asynchronously if it is displayed.
    ///
    /// Suppression and collection happen before the returned future is first
    /// polled; only the sink call is deferred.
    pub fn log_async(
        &self,
        message: impl Into<DiagnosticMessage>,
    ) -> impl Future<Output = Result<(), S::Error>> + Send + '_ {
        let accepted = self.accept(message.into());
        async move {
            match accepted {
                Some(displayed) => self.sink.log_async(&displayed).await,
                None => Ok(()),
            }
        }
    }

    /// Runs suppression and collection, returning the message to display.
    fn accept(&self, message: DiagnosticMessage) -> Option<DiagnosticMessage> {
        let mut restore = message.normalize();

        if let Some(gate) = &self.gate {
            if gate.is_suppressed(&restore) {
                return None;
            }
        }

        restore.backfill_file_path(self.project_path.as_deref());

        let displayed = self
            .filter
            .should_display(&restore, self.hide_warnings_and_errors)
            .then(|| match message {
                DiagnosticMessage::Generic(generic) => DiagnosticMessage::Generic(generic),
                DiagnosticMessage::Restore(_) => DiagnosticMessage::Restore(restore.clone()),
            });

        if self.filter.should_collect(restore.level) {
            self.collector.record(restore);
        }

        if let Some(displayed) = &displayed {
            trace!("forwarding {} {}", displayed.level(), displayed.code());
        }
        displayed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::NullSink;
    use sift_diagnostics::{DiagnosticCode, GenericMessage};
    use sift_suppression::{ProjectMetadata, RestoreGraph, SharedPolicy};
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct RecordingSink {
        received: Mutex<Vec<DiagnosticMessage>>,
    }

    impl RecordingSink {
        fn received(&self) -> Vec<DiagnosticMessage> {
            self.received.lock().unwrap().clone()
        }
    }

    impl LogSink for RecordingSink {
        type Error = std::convert::Infallible;

        fn log(&self, message: &DiagnosticMessage) -> Result<(), Self::Error> {
            self.received.lock().unwrap().push(message.clone());
            Ok(())
        }
    }

    fn warning(text: &str) -> RestoreMessage {
        RestoreMessage::warning(DiagnosticCode::new(1603), text)
    }

    #[test]
    fn basic_logger_collects_and_displays() {
        let logger = CollectingLogger::new(RecordingSink::default(), Level::Information, false);
        logger.log(warning("w")).unwrap();
        assert_eq!(logger.errors().len(), 1);
        assert_eq!(logger.sink().received().len(), 1);
    }

    #[test]
    fn below_threshold_dropped_everywhere() {
        let logger = CollectingLogger::new(RecordingSink::default(), Level::Warning, false);
        logger
            .log(GenericMessage::new(Level::Minimal, DiagnosticCode::Undefined, "m"))
            .unwrap();
        assert!(logger.errors().is_empty());
        assert!(logger.sink().received().is_empty());
    }

    #[test]
    fn hidden_message_still_collected() {
        let logger = CollectingLogger::new(RecordingSink::default(), Level::Debug, true);
        logger.log(warning("w").with_should_display(false)).unwrap();
        logger
            .log(RestoreMessage::error(DiagnosticCode::new(1101), "e").with_should_display(false))
            .unwrap();
        assert_eq!(logger.errors().len(), 2);
        assert!(logger.sink().received().is_empty());
    }

    #[test]
    fn generic_message_forwarded_unchanged() {
        let mut logger = CollectingLogger::new(RecordingSink::default(), Level::Debug, false);
        logger.set_project_path("own.csproj");
        let generic = GenericMessage::new(Level::Information, DiagnosticCode::Undefined, "info");
        logger.log(generic.clone()).unwrap();

        assert_eq!(
            logger.sink().received(),
            vec![DiagnosticMessage::Generic(generic)]
        );
        assert_eq!(logger.errors()[0].file_path(), Some("own.csproj"));
    }

    #[test]
    fn restore_message_forwarded_with_backfilled_path() {
        let mut logger = CollectingLogger::new(RecordingSink::default(), Level::Debug, false);
        logger.set_project_path("own.csproj");
        logger.log(warning("w").with_project_path("app.csproj")).unwrap();

        match &logger.sink().received()[0] {
            DiagnosticMessage::Restore(m) => assert_eq!(m.file_path(), Some("app.csproj")),
            other => panic!("expected restore message, got {other:?}"),
        }
    }

    #[test]
    fn from_config_applies_settings() {
        let config = LoggingConfig {
            verbosity: Level::Warning,
            hide_warnings_and_errors: true,
            project_path: Some("app.csproj".to_string()),
        };
        let logger = CollectingLogger::from_config(NullSink, &config);
        assert_eq!(logger.threshold(), Level::Warning);
        assert!(logger.hides_warnings_and_errors());
        assert_eq!(logger.project_path(), Some("app.csproj"));
        assert!(logger.suppression().is_none());
    }

    #[test]
    fn gated_logger_drops_suppressed_warning() {
        let policy: SharedPolicy = Arc::new(|m: &RestoreMessage| m.text == "drop");
        let gate = SuppressionGate::new(|_: &[RestoreGraph], _: &ProjectMetadata| -> SharedPolicy {
            Arc::new(|_: &RestoreMessage| false)
        })
        .with_project_policy(policy);
        let logger = CollectingLogger::new(RecordingSink::default(), Level::Debug, false)
            .with_suppression(gate);

        logger.log(warning("drop")).unwrap();
        logger.log(warning("keep")).unwrap();

        let texts: Vec<_> = logger.errors().into_iter().map(|m| m.text).collect();
        assert_eq!(texts, vec!["keep"]);
        assert_eq!(logger.sink().received().len(), 1);
    }

    #[test]
    fn suppression_mut_configures_gate() {
        let mut logger = CollectingLogger::new(NullSink, Level::Debug, false).with_suppression(
            SuppressionGate::new(|_: &[RestoreGraph], _: &ProjectMetadata| -> SharedPolicy {
                Arc::new(|_: &RestoreMessage| false)
            }),
        );
        logger
            .suppression_mut()
            .unwrap()
            .set_transitive_policy(Arc::new(|_: &RestoreMessage| true));
        logger.log(warning("w")).unwrap();
        assert!(logger.errors().is_empty());
    }

    #[test]
    fn into_errors_drains() {
        let logger = CollectingLogger::new(NullSink, Level::Debug, false);
        logger.log(warning("a")).unwrap();
        logger.log(warning("b")).unwrap();
        assert_eq!(logger.into_errors().len(), 2);
    }
}
