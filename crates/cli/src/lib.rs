//! zarvan_cli - command line host for the zarvan scheduling engine.

pub mod cli;
pub mod commands;
pub mod config;
pub mod document;
pub mod error;
pub mod logging;
pub mod output;

pub use error::{CliError, Result};
