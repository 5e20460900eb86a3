use std::path::PathBuf;

use thiserror::Error;

/// Option resolution and file loading failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed carousel options: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("option '{field}' out of range: {reason}")]
    OutOfRange {
        field: &'static str,
        reason: &'static str,
    },

    #[error("failed to read options file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML options: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("unsupported options file format: {0}")]
    UnsupportedFormat(PathBuf),
}

/// Result of resolving or loading options.
pub type Result<T> = std::result::Result<T, ConfigError>;
