//! Port traits for the structured logging engine the facade delegates to.
//!
//! The engine owns formatting, filtering, appenders and configuration; the
//! facade only asks it two questions: is this rank/marker combination
//! enabled, and please write this one record.

use std::error::Error;
use std::sync::Arc;

use crate::domain::error::SinkError;
use crate::domain::{DefaultMessageFactory, Marker, MessageFactory, ResolvedMessage, SeverityLevel};

/// One dispatchable record.
///
/// Ephemeral: produced by dispatch, consumed immediately by the sink. The
/// facade owns none of its lifecycle beyond the single forwarding call.
#[derive(Debug)]
pub struct LogRecord<'a> {
    /// Qualified name of the facade, so the sink can skip its frames when
    /// attributing caller location.
    pub attribution: &'static str,
    pub level: SeverityLevel,
    pub marker: Option<&'a Marker>,
    pub message: ResolvedMessage,
    pub cause: Option<&'a (dyn Error + 'static)>,
}

/// The structured logging engine consumed by the facade.
pub trait Sink: Send + Sync {
    /// Handle bound to a logger name. Implementations own caching by name;
    /// the facade re-wraps whatever comes back without further identity.
    fn logger(&self, name: &str) -> Arc<dyn SinkHandle>;

    /// Factory applied to eager plain values when the caller supplies none.
    fn default_factory(&self) -> Arc<dyn MessageFactory> {
        Arc::new(DefaultMessageFactory)
    }
}

/// Per-name handle into the sink.
pub trait SinkHandle: Send + Sync {
    /// Threshold comparison for a rank/marker combination. Runs before any
    /// deferred message is realized.
    fn enabled(&self, rank: u32, marker: Option<&Marker>) -> bool;

    /// Write one record. Errors are the sink's own and propagate to the
    /// caller of the emission operation unchanged.
    fn dispatch(&self, record: LogRecord<'_>) -> Result<(), SinkError>;
}
