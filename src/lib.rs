#![deny(
    clippy::explicit_iter_loop,
    clippy::manual_let_else,
    clippy::semicolon_if_nothing_returned,
    clippy::inconsistent_struct_constructor
)]
#![allow(
    clippy::missing_errors_doc,      // Internal API
    clippy::missing_panics_doc,      // Internal API
    clippy::module_name_repetitions, // e.g. SinkError in sink module
    clippy::must_use_candidate       // Annotated selectively on critical APIs
)]

//! Leveled logging facade over a structured sink.
//!
//! Six fixed severity levels with log4j-compatible ranks (lower rank = more
//! severe), an enabled gate that keeps deferred messages unbuilt while their
//! level is inactive, and a single dispatch path into a pluggable sink.

pub mod adapter;
pub mod domain;
pub mod logger;
pub mod port;
pub mod test_support;

// Re-export main types for easy access
pub use domain::{
    ConfigError, LevelRegistry, Marker, MessageSource, ResolvedMessage, Severity, SeverityLevel,
    SinkError, StructuredMessage, SuppliedMessage,
};
pub use logger::{ATTRIBUTION, Event, Logger, set_default_sink};
pub use port::{LogRecord, Sink, SinkHandle};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
