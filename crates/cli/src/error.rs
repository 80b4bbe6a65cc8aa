//! CLI error types.

use std::path::PathBuf;

use thiserror::Error;
use zarvan_core::{ConfigError, EngineError};

/// Result type alias for the CLI.
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur while running a command.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid document: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("Invalid config: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid value for {name}: {value}")]
    InvalidEnv { name: &'static str, value: String },

    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_error_is_transparent() {
        let err = CliError::from(EngineError::UnknownView("agenda".to_string()));
        assert_eq!(err.to_string(), "Unknown view: agenda");
    }

    #[test]
    fn test_invalid_env_message() {
        let err = CliError::InvalidEnv {
            name: "ZARVAN_LAYOUT",
            value: "grid".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid value for ZARVAN_LAYOUT: grid");
    }
}
