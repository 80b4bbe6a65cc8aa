//! Engine error types.
//!
//! Most malformed input degrades silently (zeroed dates, normalized repeat
//! rules, clamped minutes). Only contract violations between the host and the
//! engine are reported.

use thiserror::Error;

/// Errors surfaced to the host.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Unknown view: {0}")]
    UnknownView(String),

    #[error("Invalid config: {0}")]
    Config(#[from] ConfigError),
}

/// Errors that can occur when validating an [`EngineConfig`](crate::EngineConfig).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Overlap step must be positive")]
    InvalidOverlapStep,

    #[error("Overlap minimum width must be between 1 and 100 percent (got {0})")]
    InvalidMinWidth(u32),

    #[error("Minimum timed duration must be positive")]
    InvalidMinDuration,

    #[error("Per-day display cap must be at least 1")]
    InvalidDisplayCap,

    #[error("At least one view must be enabled")]
    NoViewsEnabled,
}

pub type Result<T> = std::result::Result<T, EngineError>;
