//! Warning suppression combining the project and transitive policies.

use log::debug;
use sift_diagnostics::{Level, RestoreMessage};
use sift_suppression::{
    ProjectMetadata, RestoreGraph, SharedPolicy, SuppressionPolicy, TransitiveSuppressionFactory,
};
use std::sync::{Arc, OnceLock};

/// Decides whether a warning is suppressed by project or transitive policy.
///
/// The project policy is consulted first. Only when it lets a warning through
/// is the transitive policy consulted, and only then is the transitive policy
/// built from the restore graphs and project metadata. Building happens at
/// most once per gate, even when many producers raise warnings concurrently.
pub struct SuppressionGate {
    factory: Arc<dyn TransitiveSuppressionFactory>,
    project: Option<SharedPolicy>,
    transitive: OnceLock<SharedPolicy>,
    graphs: Vec<RestoreGraph>,
    metadata: Option<ProjectMetadata>,
}

impl SuppressionGate {
    /// Creates a gate that builds its transitive policy with `factory`.
    pub fn new(factory: impl TransitiveSuppressionFactory + 'static) -> Self {
        Self {
            factory: Arc::new(factory),
            project: None,
            transitive: OnceLock::new(),
            graphs: Vec::new(),
            metadata: None,
        }
    }

    /// Sets the project policy.
    pub fn with_project_policy(mut self, policy: SharedPolicy) -> Self {
        self.set_project_policy(policy);
        self
    }

    /// Sets the restore graphs the transitive policy is built from.
    pub fn with_restore_graphs(mut self, graphs: Vec<RestoreGraph>) -> Self {
        self.set_restore_graphs(graphs);
        self
    }

    /// Sets the project metadata the transitive policy is built from.
    pub fn with_project_metadata(mut self, metadata: ProjectMetadata) -> Self {
        self.set_project_metadata(metadata);
        self
    }

    /// Replaces the project policy.
    pub fn set_project_policy(&mut self, policy: SharedPolicy) {
        self.project = Some(policy);
    }

    /// Replaces the transitive policy, so the factory is never called.
    pub fn set_transitive_policy(&mut self, policy: SharedPolicy) {
        self.transitive = OnceLock::from(policy);
    }

    /// Replaces the restore graphs.
    pub fn set_restore_graphs(&mut self, graphs: Vec<RestoreGraph>) {
        self.graphs = graphs;
    }

    /// Replaces the project metadata.
    pub fn set_project_metadata(&mut self, metadata: ProjectMetadata) {
        self.metadata = Some(metadata);
    }

    /// Returns the project policy, if one is attached.
    pub fn project_policy(&self) -> Option<&SharedPolicy> {
        self.project.as_ref()
    }

    /// Returns the transitive policy if it has been set or built.
    pub fn transitive_policy(&self) -> Option<&SharedPolicy> {
        self.transitive.get()
    }

    /// Returns the restore graphs.
    pub fn restore_graphs(&self) -> &[RestoreGraph] {
        &self.graphs
    }

    /// Returns the project metadata, if set.
    pub fn project_metadata(&self) -> Option<&ProjectMetadata> {
        self.metadata.as_ref()
    }

    /// Returns `true` if `message` is a warning either policy suppresses.
    pub fn is_suppressed(&self, message: &RestoreMessage) -> bool {
        if message.level != Level::Warning {
            return false;
        }

        if self.project.as_ref().is_some_and(|p| p.apply(message)) {
            debug!("warning {} suppressed by project policy", message.code);
            return true;
        }

        if self.transitive_or_build().is_some_and(|p| p.apply(message)) {
            debug!(
                "warning {} for '{}' suppressed by transitive policy",
                message.code,
                message.library_id.as_deref().unwrap_or_default()
            );
            return true;
        }

        false
    }

    /// Returns the transitive policy, building it on first use.
    ///
    /// Without graphs or project metadata there is nothing to build from and
    /// no transitive suppression applies.
    fn transitive_or_build(&self) -> Option<&SharedPolicy> {
        if let Some(policy) = self.transitive.get() {
            return Some(policy);
        }
        let metadata = self.metadata.as_ref()?;
        if self.graphs.is_empty() {
            return None;
        }
        Some(self.transitive.get_or_init(|| {
            debug!(
                "building transitive warning suppression for '{}'",
                metadata.project_name
            );
            self.factory.build(&self.graphs, metadata)
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sift_diagnostics::DiagnosticCode;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const NU1605: DiagnosticCode = DiagnosticCode::Nu(1605);
    const NU1603: DiagnosticCode = DiagnosticCode::Nu(1603);

    fn suppress(code: DiagnosticCode) -> SharedPolicy {
        Arc::new(move |m: &RestoreMessage| m.code == code)
    }

    fn counting_factory(
        builds: Arc<AtomicUsize>,
        code: DiagnosticCode,
    ) -> impl TransitiveSuppressionFactory {
        move |_: &[RestoreGraph], _: &ProjectMetadata| -> SharedPolicy {
            builds.fetch_add(1, Ordering::SeqCst);
            suppress(code)
        }
    }

    fn with_context(gate: SuppressionGate) -> SuppressionGate {
        gate.with_restore_graphs(vec![RestoreGraph::new("net8.0", "app")])
            .with_project_metadata(ProjectMetadata::new("app"))
    }

    #[test]
    fn non_warnings_pass() {
        let builds = Arc::new(AtomicUsize::new(0));
        let gate = with_context(SuppressionGate::new(counting_factory(builds.clone(), NU1605)))
            .with_project_policy(Arc::new(|_: &RestoreMessage| true));
        assert!(!gate.is_suppressed(&RestoreMessage::error(NU1605, "e")));
        assert!(!gate.is_suppressed(&RestoreMessage::new(Level::Minimal, NU1605, "m")));
        assert_eq!(builds.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn project_policy_short_circuits() {
        let builds = Arc::new(AtomicUsize::new(0));
        let gate = with_context(SuppressionGate::new(counting_factory(builds.clone(), NU1605)))
            .with_project_policy(suppress(NU1605));
        assert!(gate.is_suppressed(&RestoreMessage::warning(NU1605, "w")));
        assert_eq!(builds.load(Ordering::SeqCst), 0);
        assert!(gate.transitive_policy().is_none());
    }

    #[test]
    fn transitive_built_once_on_first_unsuppressed_warning() {
        let builds = Arc::new(AtomicUsize::new(0));
        let gate = with_context(SuppressionGate::new(counting_factory(builds.clone(), NU1605)));
        assert!(gate.is_suppressed(&RestoreMessage::warning(NU1605, "w")));
        assert!(!gate.is_suppressed(&RestoreMessage::warning(NU1603, "w")));
        assert!(gate.is_suppressed(&RestoreMessage::warning(NU1605, "w")));
        assert_eq!(builds.load(Ordering::SeqCst), 1);
        assert!(gate.transitive_policy().is_some());
    }

    #[test]
    fn no_context_means_no_transitive_suppression() {
        let builds = Arc::new(AtomicUsize::new(0));
        let gate = SuppressionGate::new(counting_factory(builds.clone(), NU1605));
        assert!(!gate.is_suppressed(&RestoreMessage::warning(NU1605, "w")));

        let gate = SuppressionGate::new(counting_factory(builds.clone(), NU1605))
            .with_project_metadata(ProjectMetadata::new("app"));
        assert!(!gate.is_suppressed(&RestoreMessage::warning(NU1605, "w")));
        assert_eq!(builds.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn explicit_transitive_policy_skips_factory() {
        let builds = Arc::new(AtomicUsize::new(0));
        let mut gate = with_context(SuppressionGate::new(counting_factory(builds.clone(), NU1603)));
        gate.set_transitive_policy(suppress(NU1605));
        assert!(gate.is_suppressed(&RestoreMessage::warning(NU1605, "w")));
        assert!(!gate.is_suppressed(&RestoreMessage::warning(NU1603, "w")));
        assert_eq!(builds.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn concurrent_warnings_build_once() {
        let builds = Arc::new(AtomicUsize::new(0));
        let gate = with_context(SuppressionGate::new(counting_factory(builds.clone(), NU1605)));
        std::thread::scope(|scope| {
            for _ in 0..16 {
                scope.spawn(|| {
                    assert!(gate.is_suppressed(&RestoreMessage::warning(NU1605, "w")));
                });
            }
        });
        assert_eq!(builds.load(Ordering::SeqCst), 1);
    }
}
