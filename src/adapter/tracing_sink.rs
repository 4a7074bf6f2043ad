//! Sink adapter over the `tracing` ecosystem.
//!
//! Formatting, filtering and writing stay with the installed subscriber; this
//! adapter maps ranks onto `tracing` verbosity, renders `{}` templates, and
//! forwards severity name, rank, marker, cause chain and attribution as
//! structured fields.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;
use tracing::Level;

use crate::domain::error::SinkError;
use crate::domain::{Marker, ResolvedMessage, Severity};
use crate::port::{LogRecord, Sink, SinkHandle};

/// Production sink backed by whatever `tracing` subscriber is installed.
///
/// Owns the handle cache; one handle per logger name.
pub struct TracingSink {
    handles: RwLock<HashMap<String, Arc<TracingHandle>>>,
}

impl TracingSink {
    pub fn new() -> Self {
        Self {
            handles: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for TracingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for TracingSink {
    fn logger(&self, name: &str) -> Arc<dyn SinkHandle> {
        if let Some(handle) = self.handles.read().get(name) {
            return handle.clone();
        }
        let mut handles = self.handles.write();
        handles
            .entry(name.to_string())
            .or_insert_with(|| {
                Arc::new(TracingHandle {
                    name: name.to_string(),
                })
            })
            .clone()
    }
}

struct TracingHandle {
    name: String,
}

impl SinkHandle for TracingHandle {
    fn enabled(&self, rank: u32, _marker: Option<&Marker>) -> bool {
        // Marker filtering is a subscriber concern; the threshold check here
        // only consults the mapped verbosity.
        let level = tracing_level(rank);
        if level == Level::ERROR {
            tracing::enabled!(Level::ERROR)
        } else if level == Level::WARN {
            tracing::enabled!(Level::WARN)
        } else if level == Level::INFO {
            tracing::enabled!(Level::INFO)
        } else if level == Level::DEBUG {
            tracing::enabled!(Level::DEBUG)
        } else {
            tracing::enabled!(Level::TRACE)
        }
    }

    fn dispatch(&self, record: LogRecord<'_>) -> Result<(), SinkError> {
        let body = match &record.message {
            ResolvedMessage::Template { template, args } => render_template(template, args),
            ResolvedMessage::Structured(message) => message.to_string(),
        };
        let marker = record.marker.map(Marker::name);
        let cause = record.cause.map(cause_chain);
        let cause = cause.as_deref();

        let level = tracing_level(record.level.rank);
        if level == Level::ERROR {
            tracing::event!(
                Level::ERROR,
                logger = %self.name,
                severity = record.level.name.as_ref(),
                rank = record.level.rank,
                marker = marker,
                cause = cause,
                attribution = record.attribution,
                "{body}"
            );
        } else if level == Level::WARN {
            tracing::event!(
                Level::WARN,
                logger = %self.name,
                severity = record.level.name.as_ref(),
                rank = record.level.rank,
                marker = marker,
                cause = cause,
                attribution = record.attribution,
                "{body}"
            );
        } else if level == Level::INFO {
            tracing::event!(
                Level::INFO,
                logger = %self.name,
                severity = record.level.name.as_ref(),
                rank = record.level.rank,
                marker = marker,
                cause = cause,
                attribution = record.attribution,
                "{body}"
            );
        } else if level == Level::DEBUG {
            tracing::event!(
                Level::DEBUG,
                logger = %self.name,
                severity = record.level.name.as_ref(),
                rank = record.level.rank,
                marker = marker,
                cause = cause,
                attribution = record.attribution,
                "{body}"
            );
        } else {
            tracing::event!(
                Level::TRACE,
                logger = %self.name,
                severity = record.level.name.as_ref(),
                rank = record.level.rank,
                marker = marker,
                cause = cause,
                attribution = record.attribution,
                "{body}"
            );
        }
        Ok(())
    }
}

/// Rank → `tracing` verbosity. FATAL shares ERROR (tracing has no fatal);
/// FUNCTION maps to TRACE. Custom ranks fall into the nearest band.
fn tracing_level(rank: u32) -> Level {
    if rank <= Severity::Error.rank() {
        Level::ERROR
    } else if rank <= Severity::Warn.rank() {
        Level::WARN
    } else if rank <= Severity::Info.rank() {
        Level::INFO
    } else if rank <= Severity::Debug.rank() {
        Level::DEBUG
    } else {
        Level::TRACE
    }
}

/// Positional `{}` substitution, log4j style: `\{}` stays literal, surplus
/// placeholders are left in place, surplus arguments are ignored.
fn render_template(template: &str, args: &[Value]) -> String {
    let mut out = String::with_capacity(template.len() + 16 * args.len());
    let mut rest = template;
    let mut next = 0;
    while let Some(idx) = rest.find("{}") {
        if idx > 0 && rest.as_bytes()[idx - 1] == b'\\' {
            out.push_str(&rest[..idx - 1]);
            out.push_str("{}");
        } else if next < args.len() {
            out.push_str(&rest[..idx]);
            out.push_str(&value_text(&args[next]));
            next += 1;
        } else {
            out.push_str(&rest[..idx + 2]);
        }
        rest = &rest[idx + 2..];
    }
    out.push_str(rest);
    out
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn cause_chain(error: &(dyn std::error::Error + 'static)) -> String {
    let mut text = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let _ = write!(text, ": {cause}");
        source = cause.source();
    }
    text
}
