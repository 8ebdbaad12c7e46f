//! Errors raised while reading `sift.toml`.

/// Why a `sift.toml` could not be turned into a [`SiftConfig`](crate::SiftConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("cannot read sift.toml: {0}")]
    IoError(#[from] std::io::Error),

    /// The TOML is malformed, or a level or diagnostic code in it is unknown.
    #[error("invalid sift.toml: {0}")]
    ParseError(String),

    /// The file parsed but asks for a suppression that cannot apply.
    #[error("invalid warning settings: {0}")]
    ValidationError(String),
}
