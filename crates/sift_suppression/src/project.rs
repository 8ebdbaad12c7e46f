//! Suppression by the codes a project declares for itself.

use crate::graph::ProjectMetadata;
use crate::policy::SuppressionPolicy;
use sift_config::WarningProperties;
use sift_diagnostics::{Level, RestoreMessage};

/// Suppresses warnings whose code the project lists in its warning properties.
///
/// Project-wide codes match any warning; package-specific codes match only
/// warnings whose `library_id` names that package.
#[derive(Debug, Clone, Default)]
pub struct ProjectWarningPolicy {
    properties: WarningProperties,
}

impl ProjectWarningPolicy {
    /// Creates a policy from the project's warning properties.
    pub fn new(properties: WarningProperties) -> Self {
        Self { properties }
    }

    /// Creates a policy from the root project's metadata.
    pub fn from_metadata(metadata: &ProjectMetadata) -> Self {
        Self::new(metadata.warning_properties.clone())
    }

    /// Returns the warning properties this policy applies.
    pub fn properties(&self) -> &WarningProperties {
        &self.properties
    }
}

impl SuppressionPolicy for ProjectWarningPolicy {
    fn apply(&self, message: &RestoreMessage) -> bool {
        message.level == Level::Warning
            && self
                .properties
                .suppresses(message.code, message.library_id.as_deref())
    }
}
