//! Output formatting functions.

pub mod json;
pub mod pretty;

use serde::Serialize;

use crate::cli::OutputFormat;

/// Format a value as compact JSON, or with the command's text renderer.
pub fn format_output<T: Serialize>(
    value: &T,
    format: OutputFormat,
    pretty: impl Fn(&T) -> String,
) -> String {
    match format {
        OutputFormat::Json => json::format_json(value),
        OutputFormat::Pretty => pretty(value),
    }
}
