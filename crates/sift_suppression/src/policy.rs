//! The policy and factory traits the logger's suppression gate is built on.

use crate::graph::{ProjectMetadata, RestoreGraph};
use sift_diagnostics::RestoreMessage;
use std::sync::Arc;

/// A policy shared between the logger and any number of producers.
pub type SharedPolicy = Arc<dyn SuppressionPolicy>;

/// Decides whether a restore message should be dropped.
///
/// Policies are consulted concurrently from every producer thread, so they
/// must be `Send + Sync` and must not mutate the message. Any
/// `Fn(&RestoreMessage) -> bool` closure is a policy.
pub trait SuppressionPolicy: Send + Sync {
    /// Returns `true` if the message should be suppressed.
    fn apply(&self, message: &RestoreMessage) -> bool;
}

impl<F> SuppressionPolicy for F
where
    F: Fn(&RestoreMessage) -> bool + Send + Sync,
{
    fn apply(&self, message: &RestoreMessage) -> bool {
        self(message)
    }
}

/// Builds the transitive suppression policy from the restore results.
///
/// Building walks every dependency graph, so the logger calls this at most
/// once, and only after a warning has actually been raised.
pub trait TransitiveSuppressionFactory: Send + Sync {
    /// Builds a policy for the given graphs and root project.
    fn build(&self, graphs: &[RestoreGraph], metadata: &ProjectMetadata) -> SharedPolicy;
}

impl<F> TransitiveSuppressionFactory for F
where
    F: Fn(&[RestoreGraph], &ProjectMetadata) -> SharedPolicy + Send + Sync,
{
    fn build(&self, graphs: &[RestoreGraph], metadata: &ProjectMetadata) -> SharedPolicy {
        self(graphs, metadata)
    }
}
