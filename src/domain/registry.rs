use std::collections::BTreeMap;
use std::sync::OnceLock;

use super::error::ConfigError;
use super::level::{Severity, SeverityLevel};

static GLOBAL: OnceLock<LevelRegistry> = OnceLock::new();

/// Process-wide table of severity level names and ranks.
///
/// Built before any concurrent emission begins, frozen afterwards. Reads
/// after `install` (or first `global()`) need no locking because nothing
/// mutates the table anymore.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelRegistry {
    by_name: BTreeMap<String, u32>,
}

impl LevelRegistry {
    /// Table seeded with the six built-in levels.
    pub fn builtin() -> Self {
        let mut by_name = BTreeMap::new();
        for severity in Severity::ALL {
            by_name.insert(severity.name().to_string(), severity.rank());
        }
        Self { by_name }
    }

    /// Register a level name with its rank.
    ///
    /// Same name with the same rank is idempotent. Same name with a different
    /// rank is a configuration error, never a silent override.
    pub fn register(&mut self, name: &str, rank: u32) -> Result<(), ConfigError> {
        match self.by_name.get(name) {
            Some(&existing) if existing == rank => Ok(()),
            Some(&existing) => Err(ConfigError::ConflictingLevel {
                name: name.to_string(),
                existing,
                requested: rank,
            }),
            None => {
                self.by_name.insert(name.to_string(), rank);
                Ok(())
            }
        }
    }

    /// Rank registered for `name`, if any.
    pub fn resolve(&self, name: &str) -> Option<u32> {
        self.by_name.get(name).copied()
    }

    /// The named rank pair for `name`.
    pub fn level(&self, name: &str) -> Result<SeverityLevel, ConfigError> {
        match self.resolve(name) {
            Some(rank) => Ok(SeverityLevel::new(name.to_string(), rank)),
            None => Err(ConfigError::UnknownLevel {
                input: name.to_string(),
                valid_levels: self.by_name.keys().cloned().collect(),
            }),
        }
    }

    /// Registered levels, ordered by rank (most severe first).
    pub fn levels(&self) -> Vec<SeverityLevel> {
        let mut levels: Vec<SeverityLevel> = self
            .by_name
            .iter()
            .map(|(name, &rank)| SeverityLevel::new(name.clone(), rank))
            .collect();
        levels.sort_by_key(|level| level.rank);
        levels
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Install this table as the process-wide registry.
    ///
    /// Callable once, at process start, before the first `global()` read.
    pub fn install(self) -> Result<(), ConfigError> {
        GLOBAL.set(self).map_err(|_| ConfigError::AlreadyInitialized)
    }

    /// The process-wide table; the built-in six if none was installed.
    pub fn global() -> &'static LevelRegistry {
        GLOBAL.get_or_init(Self::builtin)
    }
}

impl Default for LevelRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
