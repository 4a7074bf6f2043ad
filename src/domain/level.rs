use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// The six fixed severity levels.
///
/// Ranks are inverted relative to the common "bigger number = more severe"
/// convention: FATAL carries the smallest rank. Sink threshold comparisons
/// depend on this exact numbering, do not reorder.
///
/// Declaration order matches rank order, so the derived `Ord` sorts from most
/// severe (`Fatal`) to least severe (`Function`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Severity {
    Fatal,
    Error,
    Warn,
    Info,
    Debug,
    Function,
}

impl Severity {
    /// All levels, most severe first.
    pub const ALL: [Severity; 6] = [
        Severity::Fatal,
        Severity::Error,
        Severity::Warn,
        Severity::Info,
        Severity::Debug,
        Severity::Function,
    ];

    /// Fixed numeric rank. Lower rank = higher severity.
    pub const fn rank(self) -> u32 {
        match self {
            Severity::Fatal => 100,
            Severity::Error => 200,
            Severity::Warn => 300,
            Severity::Info => 400,
            Severity::Debug => 500,
            Severity::Function => 550,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Severity::Fatal => "FATAL",
            Severity::Error => "ERROR",
            Severity::Warn => "WARN",
            Severity::Info => "INFO",
            Severity::Debug => "DEBUG",
            Severity::Function => "FUNCTION",
        }
    }

    /// The level carrying exactly this rank, if any.
    pub fn from_rank(rank: u32) -> Option<Severity> {
        Severity::ALL
            .into_iter()
            .find(|severity| severity.rank() == rank)
    }

    /// The named rank pair carried in log records and the registry.
    pub fn level(self) -> SeverityLevel {
        SeverityLevel {
            name: Cow::Borrowed(self.name()),
            rank: self.rank(),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Severity {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "FATAL" => Ok(Severity::Fatal),
            "ERROR" => Ok(Severity::Error),
            "WARN" | "WARNING" => Ok(Severity::Warn),
            "INFO" => Ok(Severity::Info),
            "DEBUG" => Ok(Severity::Debug),
            "FUNCTION" => Ok(Severity::Function),
            _ => Err(ConfigError::UnknownLevel {
                input: s.to_string(),
                valid_levels: Severity::ALL
                    .into_iter()
                    .map(|severity| severity.name().to_string())
                    .collect(),
            }),
        }
    }
}

/// A named severity rank.
///
/// Records and the registry carry this instead of `Severity` so that custom
/// registered levels flow through the same dispatch path as the built-in six.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityLevel {
    pub name: Cow<'static, str>,
    pub rank: u32,
}

impl SeverityLevel {
    pub fn new(name: impl Into<Cow<'static, str>>, rank: u32) -> Self {
        Self {
            name: name.into(),
            rank,
        }
    }
}

impl fmt::Display for SeverityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl From<Severity> for SeverityLevel {
    fn from(severity: Severity) -> Self {
        severity.level()
    }
}
