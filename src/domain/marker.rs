use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Caller-supplied categorization tag, orthogonal to severity.
///
/// The sink may use it for fine-grained filtering; the facade only threads it
/// through the gate check and the dispatched record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Marker {
    name: Cow<'static, str>,
}

impl Marker {
    pub const fn from_static(name: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
        }
    }

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl From<&'static str> for Marker {
    fn from(name: &'static str) -> Self {
        Marker::from_static(name)
    }
}
