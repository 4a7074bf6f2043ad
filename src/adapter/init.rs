//! One-time `tracing` subscriber setup for binaries and tests.
//!
//! The facade itself never configures its sink; this helper exists for
//! processes that want a working subscriber with a severity-derived filter
//! without pulling `tracing-subscriber` wiring into their own code.

use thiserror::Error;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::domain::Severity;

#[derive(Error, Debug)]
pub enum InitError {
    #[error("failed to build filter '{filter}'")]
    Filter {
        filter: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("global subscriber already installed")]
    AlreadyInstalled(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// env-filter token for a severity's mapped `tracing` verbosity.
pub fn filter_token(severity: Severity) -> &'static str {
    match severity {
        Severity::Fatal | Severity::Error => "error",
        Severity::Warn => "warn",
        Severity::Info => "info",
        Severity::Debug => "debug",
        Severity::Function => "trace",
    }
}

/// Filter string for a default severity plus per-target directives.
pub fn build_filter_string(default: Severity, directives: &[&str]) -> String {
    if directives.is_empty() {
        return filter_token(default).to_string();
    }

    let mut parts = Vec::with_capacity(directives.len() + 1);
    parts.push(filter_token(default).to_string());
    for directive in directives {
        parts.push((*directive).to_string());
    }
    parts.join(",")
}

/// Install a compact fmt subscriber filtered at `default`, with optional
/// `target=level` directives. Callable once per process.
pub fn init_tracing(default: Severity, directives: &[&str]) -> Result<(), InitError> {
    let filter_string = build_filter_string(default, directives);

    let env_filter = EnvFilter::try_new(&filter_string).map_err(|e| InitError::Filter {
        filter: filter_string,
        source: Box::new(e),
    })?;

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        fmt::layer()
            .with_target(true)
            .with_level(true)
            .compact(),
    );

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| InitError::AlreadyInstalled(Box::new(e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_token_mapping() {
        assert_eq!(filter_token(Severity::Fatal), "error");
        assert_eq!(filter_token(Severity::Error), "error");
        assert_eq!(filter_token(Severity::Warn), "warn");
        assert_eq!(filter_token(Severity::Info), "info");
        assert_eq!(filter_token(Severity::Debug), "debug");
        assert_eq!(filter_token(Severity::Function), "trace");
    }

    #[test]
    fn test_build_filter_string() {
        assert_eq!(build_filter_string(Severity::Info, &[]), "info");

        let filter = build_filter_string(Severity::Debug, &["hyper=warn", "h2=error"]);
        assert_eq!(filter, "debug,hyper=warn,h2=error");
    }

    #[test]
    fn test_init_tracing_tolerates_prior_subscriber() {
        // Another test (or harness) may already have installed a global
        // subscriber; the only acceptable failure is AlreadyInstalled.
        match init_tracing(Severity::Info, &[]) {
            Ok(()) => {}
            Err(InitError::AlreadyInstalled(_)) => {}
            Err(e) => panic!("unexpected error: {e:?}"),
        }
    }
}
