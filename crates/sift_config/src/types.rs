//! Configuration types deserialized from `sift.toml`.

use serde::Deserialize;
use sift_diagnostics::{DiagnosticCode, Level};
use std::collections::{BTreeMap, BTreeSet};

/// The top-level configuration parsed from `sift.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct SiftConfig {
    /// Verbosity and display settings for the collecting logger.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// The project's own warning-suppression properties.
    #[serde(default)]
    pub warnings: WarningProperties,
}

/// Verbosity and display settings for the collecting logger.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Minimum level a message needs to be collected or displayed.
    #[serde(default = "default_verbosity")]
    pub verbosity: Level,
    /// Hide errors and warnings unless the message asks to stay visible.
    #[serde(default)]
    pub hide_warnings_and_errors: bool,
    /// Path of the project being restored, used to attribute messages.
    #[serde(default)]
    pub project_path: Option<String>,
}

fn default_verbosity() -> Level {
    Level::Minimal
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            verbosity: default_verbosity(),
            hide_warnings_and_errors: false,
            project_path: None,
        }
    }
}

/// Warning codes a project declares it does not want to see.
///
/// Codes in `no_warn` are suppressed for every message raised against the
/// project. Codes under `packages` are suppressed only for messages about
/// that package.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct WarningProperties {
    /// Codes suppressed project-wide.
    #[serde(default)]
    pub no_warn: BTreeSet<DiagnosticCode>,
    /// Codes suppressed per package id.
    #[serde(default)]
    pub packages: BTreeMap<String, BTreeSet<DiagnosticCode>>,
}

impl WarningProperties {
    /// Creates warning properties with the given project-wide codes.
    pub fn with_no_warn(codes: impl IntoIterator<Item = DiagnosticCode>) -> Self {
        Self {
            no_warn: codes.into_iter().collect(),
            packages: BTreeMap::new(),
        }
    }

    /// Adds codes suppressed only for the given package.
    pub fn with_package_no_warn(
        mut self,
        package: impl Into<String>,
        codes: impl IntoIterator<Item = DiagnosticCode>,
    ) -> Self {
        self.packages
            .entry(package.into())
            .or_default()
            .extend(codes);
        self
    }

    /// Returns `true` if `code` is suppressed for messages about `package`.
    ///
    /// Package-specific codes only apply when a package is given.
    pub fn suppresses(&self, code: DiagnosticCode, package: Option<&str>) -> bool {
        if self.no_warn.contains(&code) {
            return true;
        }
        package
            .and_then(|id| self.package_codes(id))
            .is_some_and(|codes| codes.contains(&code))
    }

    /// Returns the codes suppressed for `package`, matched case-insensitively.
    pub fn package_codes(&self, package: &str) -> Option<&BTreeSet<DiagnosticCode>> {
        self.packages
            .iter()
            .find(|(id, _)| id.eq_ignore_ascii_case(package))
            .map(|(_, codes)| codes)
    }

    /// Returns `true` if no code is suppressed at all.
    pub fn is_empty(&self) -> bool {
        self.no_warn.is_empty() && self.packages.values().all(BTreeSet::is_empty)
    }
}
