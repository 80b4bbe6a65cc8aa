//! Tracing subscriber setup.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter for a `-v` count: warn, then info, debug and trace.
pub fn default_filter(verbosity: u8) -> String {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    format!("zarvan_cli={level},zarvan_core={level}")
}

/// Installs the global subscriber. `RUST_LOG` wins over `verbosity`.
/// Logs go to stderr so command output stays clean.
pub fn init(verbosity: u8, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbosity)));
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_levels() {
        assert_eq!(default_filter(0), "zarvan_cli=warn,zarvan_core=warn");
        assert_eq!(default_filter(1), "zarvan_cli=info,zarvan_core=info");
        assert_eq!(default_filter(2), "zarvan_cli=debug,zarvan_core=debug");
        assert_eq!(default_filter(7), "zarvan_cli=trace,zarvan_core=trace");
    }
}
