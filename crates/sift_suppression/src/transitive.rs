//! Suppression inherited from project references.
//!
//! A referenced project that suppresses a code (project-wide, or for a
//! particular package) also suppresses that code for every package reached
//! through it. A warning about a package is dropped only when *every* path
//! from the root project to the package crosses such a reference: one
//! unsuppressed path keeps the warning visible.

use crate::graph::{target_selected, ProjectMetadata, RestoreGraph};
use crate::policy::{SharedPolicy, SuppressionPolicy, TransitiveSuppressionFactory};
use log::{debug, warn};
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use sift_diagnostics::{DiagnosticCode, Level, RestoreMessage};
use std::collections::hash_map::Entry;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

type CodeSet = BTreeSet<DiagnosticCode>;

/// Codes suppressed for each package of one target graph.
#[derive(Debug, Clone)]
struct TargetSuppression {
    target: String,
    /// Keyed by lowercased package id. Packages present in the graph but not
    /// reachable from the root are absent.
    packages: HashMap<String, CodeSet>,
}

/// Suppresses package warnings that every referencing path already suppresses.
#[derive(Debug, Clone, Default)]
pub struct TransitiveWarningPolicy {
    targets: Vec<TargetSuppression>,
}

impl TransitiveWarningPolicy {
    /// Walks every graph and records the codes suppressed for each package.
    ///
    /// A graph containing a dependency cycle contributes no suppression.
    pub fn build(graphs: &[RestoreGraph], metadata: &ProjectMetadata) -> Self {
        let targets = graphs
            .iter()
            .map(|graph| TargetSuppression {
                target: graph.target.clone(),
                packages: suppressed_packages(graph, metadata),
            })
            .collect::<Vec<_>>();
        debug!(
            "built transitive warning suppression for '{}' across {} graph(s)",
            metadata.project_name,
            targets.len()
        );
        Self { targets }
    }

    /// Returns the codes suppressed for `package` in the graph for `target`.
    pub fn suppressed_codes(&self, target: &str, package: &str) -> Option<&BTreeSet<DiagnosticCode>> {
        self.targets
            .iter()
            .find(|t| t.target.eq_ignore_ascii_case(target))
            .and_then(|t| t.packages.get(&package.to_ascii_lowercase()))
    }
}

impl SuppressionPolicy for TransitiveWarningPolicy {
    fn apply(&self, message: &RestoreMessage) -> bool {
        if message.level != Level::Warning {
            return false;
        }
        let Some(package) = message.library_id.as_deref() else {
            return false;
        };
        let key = package.to_ascii_lowercase();

        // Graphs that never reach the package have no say in the decision.
        let mut relevant = self
            .targets
            .iter()
            .filter(|t| target_selected(&t.target, &message.target_graphs))
            .filter_map(|t| t.packages.get(&key))
            .peekable();

        relevant.peek().is_some() && relevant.all(|codes| codes.contains(&message.code))
    }
}

/// Builds a [`TransitiveWarningPolicy`] for the logger's lazy suppression gate.
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphSuppressionFactory;

impl TransitiveSuppressionFactory for GraphSuppressionFactory {
    fn build(&self, graphs: &[RestoreGraph], metadata: &ProjectMetadata) -> SharedPolicy {
        Arc::new(TransitiveWarningPolicy::build(graphs, metadata))
    }
}

/// Computes, for each reachable package, the codes suppressed on all paths.
///
/// Nodes are visited in topological order. A node's set is the intersection,
/// over its parents, of the parent's set plus whatever the parent suppresses
/// when it is a referenced project. The root's own properties are excluded;
/// they belong to the project policy.
fn suppressed_packages(graph: &RestoreGraph, metadata: &ProjectMetadata) -> HashMap<String, CodeSet> {
    let mut dag: DiGraph<String, ()> = DiGraph::new();
    let mut node_id_map: HashMap<String, NodeIndex> = HashMap::new();
    let mut node = |dag: &mut DiGraph<String, ()>, id: &str| {
        *node_id_map
            .entry(id.to_ascii_lowercase())
            .or_insert_with(|| dag.add_node(id.to_string()))
    };

    let root = node(&mut dag, &graph.root);
    for dependency in &graph.dependencies {
        let parent = node(&mut dag, &dependency.parent);
        let child = node(&mut dag, &dependency.child);
        dag.update_edge(parent, child, ());
    }

    let order = match toposort(&dag, None) {
        Ok(order) => order,
        Err(cycle) => {
            warn!(
                "dependency cycle through '{}' in target '{}'; transitive warning suppression disabled for it",
                dag[cycle.node_id()],
                graph.target
            );
            return HashMap::new();
        }
    };

    let mut reached: HashMap<NodeIndex, CodeSet> = HashMap::new();
    reached.insert(root, CodeSet::new());

    for idx in order {
        let Some(inherited) = reached.get(&idx).cloned() else {
            continue;
        };
        let properties = if idx == root {
            None
        } else {
            metadata.reference(&dag[idx])
        };

        for child in dag.neighbors(idx) {
            let mut codes = inherited.clone();
            if let Some(properties) = properties {
                codes.extend(properties.no_warn.iter().copied());
                if let Some(package_codes) = properties.package_codes(&dag[child]) {
                    codes.extend(package_codes.iter().copied());
                }
            }
            match reached.entry(child) {
                Entry::Occupied(mut existing) => {
                    existing.get_mut().retain(|code| codes.contains(code));
                }
                Entry::Vacant(slot) => {
                    slot.insert(codes);
                }
            }
        }
    }

    reached
        .into_iter()
        .filter(|(idx, _)| *idx != root && metadata.reference(&dag[*idx]).is_none())
        .map(|(idx, codes)| (dag[idx].to_ascii_lowercase(), codes))
        .collect()
}
