pub mod sink;

pub use sink::{LogRecord, Sink, SinkHandle};
