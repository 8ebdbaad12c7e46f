//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::{SiftConfig, WarningProperties};
use std::path::Path;

/// The configuration file name looked up in a project directory.
pub const CONFIG_FILE_NAME: &str = "sift.toml";

/// Loads and validates a `sift.toml` configuration from a project directory.
pub fn load_config(project_dir: &Path) -> Result<SiftConfig, ConfigError> {
    let content = std::fs::read_to_string(project_dir.join(CONFIG_FILE_NAME))?;
    load_config_from_str(&content)
}

/// Parses and validates a `sift.toml` configuration from a string.
///
/// Malformed diagnostic codes are reported as parse errors.
pub fn load_config_from_str(content: &str) -> Result<SiftConfig, ConfigError> {
    let config: SiftConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_warnings(&config.warnings)?;
    Ok(config)
}

/// Rejects suppression entries that could never match a message.
fn validate_warnings(warnings: &WarningProperties) -> Result<(), ConfigError> {
    if warnings.no_warn.iter().any(|code| code.is_undefined()) {
        return Err(ConfigError::ValidationError(
            "warnings.no_warn cannot contain 'Undefined'".to_string(),
        ));
    }
    for (package, codes) in &warnings.packages {
        if package.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "warnings.packages has an empty package id".to_string(),
            ));
        }
        if codes.iter().any(|code| code.is_undefined()) {
            return Err(ConfigError::ValidationError(format!(
                "warnings.packages.{package} cannot contain 'Undefined'"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sift_diagnostics::{DiagnosticCode, Level};

    #[test]
    fn parse_empty_config() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config.logging.verbosity, Level::Minimal);
        assert!(config.warnings.is_empty());
    }

    #[test]
    fn parse_full_config() {
        let toml = r#"
[logging]
verbosity = "information"
hide_warnings_and_errors = true
project_path = "src/app/app.csproj"

[warnings]
no_warn = ["NU1603", "NU1701"]

[warnings.packages]
"Contoso.Utility" = ["NU1605"]
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.logging.verbosity, Level::Information);
        assert!(config.logging.hide_warnings_and_errors);
        assert_eq!(
            config.logging.project_path.as_deref(),
            Some("src/app/app.csproj")
        );
        assert_eq!(config.warnings.no_warn.len(), 2);
        assert!(config
            .warnings
            .suppresses(DiagnosticCode::new(1605), Some("Contoso.Utility")));
    }

    #[test]
    fn invalid_toml_errors() {
        let err = load_config_from_str("this is not valid toml {{{}}}").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn malformed_code_errors() {
        let toml = r#"
[warnings]
no_warn = ["NU16"]
"#;
        let err = load_config_from_str(toml).unwrap_err();
        match err {
            ConfigError::ParseError(msg) => assert!(msg.contains("invalid diagnostic code")),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn unknown_verbosity_errors() {
        let toml = r#"
[logging]
verbosity = "loud"
"#;
        let err = load_config_from_str(toml).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn undefined_code_rejected() {
        let toml = r#"
[warnings]
no_warn = ["Undefined"]
"#;
        let err = load_config_from_str(toml).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn empty_package_id_rejected() {
        let toml = r#"
[warnings.packages]
"" = ["NU1605"]
"#;
        let err = load_config_from_str(toml).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[logging]\nverbosity = \"debug\"\n",
        )
        .unwrap();
        let config = load_config(dir.path()).unwrap();
        assert_eq!(config.logging.verbosity, Level::Debug);
    }

    #[test]
    fn io_error_from_nonexistent_dir() {
        let err = load_config(Path::new("/nonexistent/dir")).unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }
}
