//! The restore results and project metadata transitive suppression is built from.

use serde::{Deserialize, Serialize};
use sift_config::WarningProperties;
use std::collections::BTreeMap;

/// One dependency edge, from a project or package to one of its dependencies.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    /// The id of the depending project or package.
    pub parent: String,
    /// The id of the dependency.
    pub child: String,
}

/// The resolved dependency graph for one target.
///
/// Node ids are project names or package ids; a node is a project when the
/// [`ProjectMetadata`] names it, otherwise a package.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestoreGraph {
    /// The target the graph was resolved for, e.g. `net8.0`.
    pub target: String,
    /// The id of the project being restored.
    pub root: String,
    /// Every resolved dependency edge.
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
}

impl RestoreGraph {
    /// Creates a graph containing only the root project.
    pub fn new(target: impl Into<String>, root: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            root: root.into(),
            dependencies: Vec::new(),
        }
    }

    /// Adds a dependency edge.
    pub fn with_dependency(mut self, parent: impl Into<String>, child: impl Into<String>) -> Self {
        self.dependencies.push(Dependency {
            parent: parent.into(),
            child: child.into(),
        });
        self
    }

    /// Returns `true` if this graph applies to a message naming `targets`.
    ///
    /// A message naming no targets applies to every graph.
    pub fn applies_to(&self, targets: &[String]) -> bool {
        target_selected(&self.target, targets)
    }
}

/// Returns `true` if `target` is among `targets`, ignoring case, or if
/// `targets` is empty.
pub(crate) fn target_selected(target: &str, targets: &[String]) -> bool {
    targets.is_empty() || targets.iter().any(|t| t.eq_ignore_ascii_case(target))
}

/// The root project and the warning properties of the projects it references.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ProjectMetadata {
    /// The name of the project being restored.
    pub project_name: String,
    /// The root project's own warning properties.
    #[serde(default)]
    pub warning_properties: WarningProperties,
    /// Warning properties of each project reference, by project name.
    #[serde(default)]
    pub references: BTreeMap<String, WarningProperties>,
}

impl ProjectMetadata {
    /// Creates metadata for a project with no references.
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            ..Self::default()
        }
    }

    /// Sets the root project's own warning properties.
    pub fn with_warning_properties(mut self, properties: WarningProperties) -> Self {
        self.warning_properties = properties;
        self
    }

    /// Adds a project reference and its warning properties.
    pub fn with_reference(mut self, name: impl Into<String>, properties: WarningProperties) -> Self {
        self.references.insert(name.into(), properties);
        self
    }

    /// Returns the warning properties of a referenced project, if `id` names one.
    pub fn reference(&self, id: &str) -> Option<&WarningProperties> {
        self.references
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(id))
            .map(|(_, properties)| properties)
    }
}
