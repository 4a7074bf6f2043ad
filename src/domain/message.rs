use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Pre-built structured message: a body plus named fields.
///
/// The facade passes these through to the sink unchanged; how body and fields
/// are rendered is the sink's business.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredMessage {
    body: String,
    fields: BTreeMap<String, Value>,
}

impl StructuredMessage {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn fields(&self) -> &BTreeMap<String, Value> {
        &self.fields
    }
}

impl fmt::Display for StructuredMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.body)?;
        for (key, value) in &self.fields {
            write!(f, " {key}={value}")?;
        }
        Ok(())
    }
}

/// What a deferred message supplier may produce: an eager value (routed
/// through the message factory) or a pre-built structured message.
#[derive(Debug, Clone, PartialEq)]
pub enum SuppliedMessage {
    Plain(Value),
    Structured(StructuredMessage),
}

impl From<StructuredMessage> for SuppliedMessage {
    fn from(message: StructuredMessage) -> Self {
        SuppliedMessage::Structured(message)
    }
}

impl From<Value> for SuppliedMessage {
    fn from(value: Value) -> Self {
        SuppliedMessage::Plain(value)
    }
}

impl From<String> for SuppliedMessage {
    fn from(value: String) -> Self {
        SuppliedMessage::Plain(Value::String(value))
    }
}

impl From<&str> for SuppliedMessage {
    fn from(value: &str) -> Self {
        SuppliedMessage::Plain(Value::String(value.to_string()))
    }
}

/// Zero-argument producer of a full message, run only behind an affirmative
/// gate. `FnOnce` makes "invoked at most once" a type-level guarantee.
pub type MessageSupplier = Box<dyn FnOnce() -> SuppliedMessage + Send>;

/// Zero-argument producer of one positional template argument.
pub type ArgSupplier = Box<dyn FnOnce() -> Value + Send>;

/// The ways a caller may hand a message to the facade.
///
/// Ephemeral: constructed per call, consumed by resolution, never stored.
pub enum MessageSource {
    /// Eager value, wrapped by the message factory at resolution.
    Plain(Value),
    /// Template string with positional arguments, forwarded unmodified;
    /// placeholder substitution is the sink's job.
    Template { template: String, args: Vec<Value> },
    /// Deferred message, built only when the level is active.
    Supplier(MessageSupplier),
    /// Pre-built message, passed through unchanged.
    Structured(StructuredMessage),
    /// Template whose arguments are built lazily, in declared order.
    SupplierArgs {
        template: String,
        suppliers: Vec<ArgSupplier>,
    },
}

impl MessageSource {
    pub fn plain(value: impl Into<Value>) -> Self {
        MessageSource::Plain(value.into())
    }

    pub fn template(
        template: impl Into<String>,
        args: impl IntoIterator<Item = Value>,
    ) -> Self {
        MessageSource::Template {
            template: template.into(),
            args: args.into_iter().collect(),
        }
    }

    pub fn lazy<M, F>(supplier: F) -> Self
    where
        F: FnOnce() -> M + Send + 'static,
        M: Into<SuppliedMessage>,
    {
        MessageSource::Supplier(Box::new(move || supplier().into()))
    }

    pub fn structured(message: StructuredMessage) -> Self {
        MessageSource::Structured(message)
    }

    pub fn lazy_args(template: impl Into<String>, suppliers: Vec<ArgSupplier>) -> Self {
        MessageSource::SupplierArgs {
            template: template.into(),
            suppliers,
        }
    }

    /// Realize the message, consuming the source.
    ///
    /// Deferred variants run here; the gate must already have been affirmed.
    /// Supplier panics propagate to the caller uncaught.
    pub(crate) fn resolve(self, factory: &dyn MessageFactory) -> ResolvedMessage {
        match self {
            MessageSource::Plain(value) => ResolvedMessage::Structured(factory.create(value)),
            MessageSource::Template { template, args } => {
                ResolvedMessage::Template { template, args }
            }
            MessageSource::Structured(message) => ResolvedMessage::Structured(message),
            MessageSource::Supplier(supplier) => match supplier() {
                SuppliedMessage::Plain(value) => {
                    ResolvedMessage::Structured(factory.create(value))
                }
                SuppliedMessage::Structured(message) => ResolvedMessage::Structured(message),
            },
            MessageSource::SupplierArgs {
                template,
                suppliers,
            } => {
                // Declared order, each at most once.
                let args = suppliers.into_iter().map(|supply| supply()).collect();
                ResolvedMessage::Template { template, args }
            }
        }
    }
}

impl fmt::Debug for MessageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageSource::Plain(value) => f.debug_tuple("Plain").field(value).finish(),
            MessageSource::Template { template, args } => f
                .debug_struct("Template")
                .field("template", template)
                .field("args", args)
                .finish(),
            MessageSource::Supplier(_) => f.write_str("Supplier(..)"),
            MessageSource::Structured(message) => {
                f.debug_tuple("Structured").field(message).finish()
            }
            MessageSource::SupplierArgs { template, suppliers } => f
                .debug_struct("SupplierArgs")
                .field("template", template)
                .field("suppliers", &suppliers.len())
                .finish(),
        }
    }
}

impl From<&str> for MessageSource {
    fn from(value: &str) -> Self {
        MessageSource::Plain(Value::String(value.to_string()))
    }
}

impl From<String> for MessageSource {
    fn from(value: String) -> Self {
        MessageSource::Plain(Value::String(value))
    }
}

impl From<Value> for MessageSource {
    fn from(value: Value) -> Self {
        MessageSource::Plain(value)
    }
}

impl From<StructuredMessage> for MessageSource {
    fn from(message: StructuredMessage) -> Self {
        MessageSource::Structured(message)
    }
}

/// What dispatch hands to the sink after resolution.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedMessage {
    /// Template and positional args, substitution deferred to the sink.
    Template { template: String, args: Vec<Value> },
    /// Factory-wrapped eager value or pre-built structured message.
    Structured(StructuredMessage),
}

/// Wraps eager plain values into the sink's message representation.
///
/// Stringification semantics live here, not in the facade.
pub trait MessageFactory: Send + Sync {
    fn create(&self, value: Value) -> StructuredMessage;
}

/// Factory used when the caller supplies none: strings become the body
/// verbatim, anything else is rendered as compact JSON.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultMessageFactory;

impl MessageFactory for DefaultMessageFactory {
    fn create(&self, value: Value) -> StructuredMessage {
        let body = match value {
            Value::String(text) => text,
            other => other.to_string(),
        };
        StructuredMessage::new(body)
    }
}
