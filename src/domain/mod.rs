//! Domain layer for sevlog.
//!
//! Contains the canonical types shared across all modules:
//! - `Severity` / `SeverityLevel`: the six fixed levels and their ranks
//! - `LevelRegistry`: the write-once process-wide level table
//! - `MessageSource`: how a caller hands a message to the facade
//! - `Marker`: orthogonal categorization tag
//! - `ConfigError` / `SinkError`: the facade's error taxonomy

pub mod error;
pub mod level;
pub mod marker;
pub mod message;
pub mod registry;

pub use error::{ConfigError, SinkError};
pub use level::{Severity, SeverityLevel};
pub use marker::Marker;
pub use message::{
    DefaultMessageFactory, MessageFactory, MessageSource, ResolvedMessage, StructuredMessage,
    SuppliedMessage,
};
pub use registry::LevelRegistry;
