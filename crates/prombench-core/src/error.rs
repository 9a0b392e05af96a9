//! Configuration error types.

use thiserror::Error;

/// Result type alias for configuration handling.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while assembling a scale command. All of them are fatal at
/// startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid pattern: {0} (expected burst or step)")]
    InvalidPattern(String),

    #[error("invalid duration: {0}")]
    InvalidDuration(String),

    #[error("missing required argument: {0}")]
    MissingArgument(&'static str),

    #[error("min replicas must be >= 0, got {0}")]
    NegativeMin(i32),

    #[error("max replicas ({max}) must be >= min replicas ({min})")]
    MaxBelowMin { max: i32, min: i32 },

    #[error("invalid substitution variable: {0} (expected KEY=VALUE)")]
    InvalidVar(String),

    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}
