//! The leveled logging facade.
//!
//! A `Logger` is a thin, stateless re-wrap of a sink handle bound to a name.
//! Every emission runs the same path: gate, resolve the message source at
//! most once, dispatch exactly once. The per-level methods and the `Event`
//! builder are convenience skins over `emit`.

use std::any::type_name;
use std::error::Error;
use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::adapter::TracingSink;
use crate::domain::error::{ConfigError, SinkError};
use crate::domain::{Marker, MessageFactory, MessageSource, Severity};
use crate::logger::gate;
use crate::port::{LogRecord, Sink, SinkHandle};

/// Qualified name handed to the sink with every record so it can skip the
/// facade's own frames when attributing caller location.
pub const ATTRIBUTION: &str = concat!(module_path!(), "::Logger");

static DEFAULT_SINK: OnceLock<Arc<dyn Sink>> = OnceLock::new();

/// Install the process-wide sink used by the name-only factories.
///
/// Callable once, before the first `Logger::named` call; afterwards the sink
/// is frozen for the life of the process.
pub fn set_default_sink(sink: Arc<dyn Sink>) -> Result<(), ConfigError> {
    DEFAULT_SINK
        .set(sink)
        .map_err(|_| ConfigError::AlreadyInitialized)
}

fn default_sink() -> &'static Arc<dyn Sink> {
    DEFAULT_SINK.get_or_init(|| Arc::new(TracingSink::new()))
}

/// Named facade over a sink handle.
///
/// Cheap to clone and safe for unsynchronized concurrent use; it carries no
/// state beyond its bound name, handle and message factory.
#[derive(Clone)]
pub struct Logger {
    name: Arc<str>,
    handle: Arc<dyn SinkHandle>,
    factory: Arc<dyn MessageFactory>,
}

impl Logger {
    /// Logger with the given name, on the process default sink.
    pub fn named(name: &str) -> Self {
        Self::with_sink(default_sink().clone(), name)
    }

    /// Logger named after a type.
    pub fn for_type<T: ?Sized>() -> Self {
        Self::named(type_name::<T>())
    }

    /// Logger named after a value's type.
    pub fn for_value<T: ?Sized>(value: &T) -> Self {
        Self::named(std::any::type_name_of_val(value))
    }

    /// Logger with the given name and a caller-supplied message factory.
    ///
    /// The factory only applies to eager plain values; templates and
    /// pre-built structured messages bypass it.
    pub fn named_with_factory(name: &str, factory: Arc<dyn MessageFactory>) -> Self {
        let mut logger = Self::named(name);
        logger.factory = factory;
        logger
    }

    /// Logger bound to an explicit sink, for tests and embedding.
    pub fn with_sink(sink: Arc<dyn Sink>, name: &str) -> Self {
        let handle = sink.logger(name);
        let factory = sink.default_factory();
        Self {
            name: Arc::from(name),
            handle,
            factory,
        }
    }

    /// As `with_sink`, with a caller-supplied message factory.
    pub fn with_sink_and_factory(
        sink: Arc<dyn Sink>,
        name: &str,
        factory: Arc<dyn MessageFactory>,
    ) -> Self {
        let mut logger = Self::with_sink(sink, name);
        logger.factory = factory;
        logger
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether `severity` with an optional marker is currently admitted.
    pub fn enabled(&self, severity: Severity, marker: Option<&Marker>) -> bool {
        gate::enabled(self.handle.as_ref(), severity.rank(), marker)
    }

    /// The single generic emission operation.
    ///
    /// Gate first; a negative answer returns `Ok(())` with no supplier
    /// invoked and no sink call. A positive answer resolves the source
    /// exactly once and dispatches exactly once. Dispatch failures propagate
    /// unchanged; nothing is caught or retried here.
    pub fn emit(
        &self,
        severity: Severity,
        marker: Option<&Marker>,
        source: MessageSource,
        cause: Option<&(dyn Error + 'static)>,
    ) -> Result<(), SinkError> {
        if !gate::enabled(self.handle.as_ref(), severity.rank(), marker) {
            return Ok(());
        }
        let message = source.resolve(self.factory.as_ref());
        self.handle.dispatch(LogRecord {
            attribution: ATTRIBUTION,
            level: severity.level(),
            marker,
            message,
            cause,
        })
    }

    /// Pending emission at `severity`, for marker-carrying call shapes.
    pub fn at(&self, severity: Severity) -> Event<'_> {
        Event {
            logger: self,
            severity,
            marker: None,
            cause: None,
        }
    }

    /// Logs a message at FATAL.
    pub fn fatal(&self, message: impl Into<MessageSource>) -> Result<(), SinkError> {
        self.emit(Severity::Fatal, None, message.into(), None)
    }

    /// Logs a message at FATAL with the error that caused it.
    pub fn fatal_cause(
        &self,
        message: impl Into<MessageSource>,
        cause: &(dyn Error + 'static),
    ) -> Result<(), SinkError> {
        self.emit(Severity::Fatal, None, message.into(), Some(cause))
    }

    /// Logs a message at ERROR.
    pub fn error(&self, message: impl Into<MessageSource>) -> Result<(), SinkError> {
        self.emit(Severity::Error, None, message.into(), None)
    }

    /// Logs a message at ERROR with the error that caused it.
    pub fn error_cause(
        &self,
        message: impl Into<MessageSource>,
        cause: &(dyn Error + 'static),
    ) -> Result<(), SinkError> {
        self.emit(Severity::Error, None, message.into(), Some(cause))
    }

    /// Logs a message at WARN.
    pub fn warn(&self, message: impl Into<MessageSource>) -> Result<(), SinkError> {
        self.emit(Severity::Warn, None, message.into(), None)
    }

    pub fn warn_cause(
        &self,
        message: impl Into<MessageSource>,
        cause: &(dyn Error + 'static),
    ) -> Result<(), SinkError> {
        self.emit(Severity::Warn, None, message.into(), Some(cause))
    }

    /// Logs a message at INFO.
    pub fn info(&self, message: impl Into<MessageSource>) -> Result<(), SinkError> {
        self.emit(Severity::Info, None, message.into(), None)
    }

    pub fn info_cause(
        &self,
        message: impl Into<MessageSource>,
        cause: &(dyn Error + 'static),
    ) -> Result<(), SinkError> {
        self.emit(Severity::Info, None, message.into(), Some(cause))
    }

    /// Logs a message at DEBUG.
    pub fn debug(&self, message: impl Into<MessageSource>) -> Result<(), SinkError> {
        self.emit(Severity::Debug, None, message.into(), None)
    }

    pub fn debug_cause(
        &self,
        message: impl Into<MessageSource>,
        cause: &(dyn Error + 'static),
    ) -> Result<(), SinkError> {
        self.emit(Severity::Debug, None, message.into(), Some(cause))
    }

    /// Logs a message at FUNCTION, the least severe level.
    pub fn function(&self, message: impl Into<MessageSource>) -> Result<(), SinkError> {
        self.emit(Severity::Function, None, message.into(), None)
    }

    pub fn function_cause(
        &self,
        message: impl Into<MessageSource>,
        cause: &(dyn Error + 'static),
    ) -> Result<(), SinkError> {
        self.emit(Severity::Function, None, message.into(), Some(cause))
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger").field("name", &self.name).finish()
    }
}

/// One pending emission with an optional marker and cause attached.
///
/// Terminal `log` hands everything to `Logger::emit`; dropping the event
/// without calling it emits nothing.
#[must_use = "an Event does nothing until `log` is called"]
pub struct Event<'a> {
    logger: &'a Logger,
    severity: Severity,
    marker: Option<&'a Marker>,
    cause: Option<&'a (dyn Error + 'static)>,
}

impl<'a> Event<'a> {
    pub fn marker(mut self, marker: &'a Marker) -> Self {
        self.marker = Some(marker);
        self
    }

    pub fn cause(mut self, cause: &'a (dyn Error + 'static)) -> Self {
        self.cause = Some(cause);
        self
    }

    pub fn log(self, message: impl Into<MessageSource>) -> Result<(), SinkError> {
        self.logger
            .emit(self.severity, self.marker, message.into(), self.cause)
    }
}
