use thiserror::Error;

/// Errors raised while assembling or installing the process-wide level table.
///
/// Raised once, at initialization; the emit path never produces one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("level '{name}' already registered with rank {existing}, refusing rebind to {requested}")]
    ConflictingLevel {
        name: String,
        existing: u32,
        requested: u32,
    },

    #[error("already initialized, levels and sinks are frozen after first use")]
    AlreadyInitialized,

    #[error("unknown level '{input}'. Valid levels: {valid_levels:?}")]
    UnknownLevel {
        input: String,
        valid_levels: Vec<String>,
    },
}

/// Errors raised by a sink during dispatch.
///
/// The facade never catches, retries, or logs about these; they propagate to
/// the caller of the emission operation unchanged.
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("sink dispatch failed: {details}")]
    Dispatch {
        details: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("sink is closed")]
    Closed,
}

impl SinkError {
    pub fn dispatch(details: impl Into<String>) -> Self {
        SinkError::Dispatch {
            details: details.into(),
            source: None,
        }
    }

    pub fn dispatch_with(
        details: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        SinkError::Dispatch {
            details: details.into(),
            source: Some(Box::new(source)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflicting_level_display() {
        let error = ConfigError::ConflictingLevel {
            name: "AUDIT".to_string(),
            existing: 150,
            requested: 250,
        };
        let text = error.to_string();
        assert!(text.contains("AUDIT"));
        assert!(text.contains("150"));
        assert!(text.contains("250"));
    }

    #[test]
    fn test_dispatch_error_carries_source() {
        let error = SinkError::dispatch_with("write failed", std::io::Error::other("disk full"));
        let source = std::error::Error::source(&error);
        assert!(source.is_some());
        assert_eq!(source.unwrap().to_string(), "disk full");
    }

    #[test]
    fn test_dispatch_error_without_source() {
        let error = SinkError::dispatch("write failed");
        assert!(std::error::Error::source(&error).is_none());
        assert_eq!(error.to_string(), "sink dispatch failed: write failed");
    }
}
