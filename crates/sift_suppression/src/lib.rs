//! Warning-suppression policies for restore diagnostics.
//!
//! A [`SuppressionPolicy`] decides whether a warning should be dropped. Two
//! implementations are provided: [`ProjectWarningPolicy`] applies the codes a
//! project declares for itself, and [`TransitiveWarningPolicy`] applies the
//! codes declared by referenced projects to the packages reached through
//! them. The transitive policy walks every [`RestoreGraph`], so loggers build
//! it lazily through a [`TransitiveSuppressionFactory`].

#![warn(missing_docs)]

pub mod graph;
pub mod policy;
pub mod project;
pub mod transitive;

pub use graph::{ProjectMetadata, RestoreGraph};
pub use policy::{SharedPolicy, SuppressionPolicy, TransitiveSuppressionFactory};
pub use project::ProjectWarningPolicy;
pub use transitive::{GraphSuppressionFactory, TransitiveWarningPolicy};
