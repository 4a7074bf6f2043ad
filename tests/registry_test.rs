// Process-global registry: read-then-install ordering within one process.
use std::str::FromStr;

use serial_test::serial;
use sevlog::{ConfigError, LevelRegistry, Severity};

#[test]
#[serial]
fn test_global_freezes_after_first_read() {
    // First read seeds the built-in table.
    let registry = LevelRegistry::global();
    assert_eq!(registry.resolve("FATAL"), Some(100));
    assert_eq!(registry.resolve("FUNCTION"), Some(550));

    // The table is frozen now; a late install is a configuration error.
    let mut custom = LevelRegistry::builtin();
    custom.register("AUDIT", 150).unwrap();
    assert_eq!(custom.install(), Err(ConfigError::AlreadyInitialized));

    // The frozen table is unaffected by the rejected install.
    assert_eq!(LevelRegistry::global().resolve("AUDIT"), None);
}

#[test]
#[serial]
fn test_global_reads_are_stable() {
    let first = LevelRegistry::global();
    let second = LevelRegistry::global();
    assert!(std::ptr::eq(first, second));
}

#[test]
fn test_round_trip_on_a_fresh_table() {
    let mut registry = LevelRegistry::builtin();
    registry.register("AUDIT", 150).unwrap();
    assert_eq!(registry.resolve("AUDIT"), Some(150));

    let error = registry.register("AUDIT", 250).unwrap_err();
    assert_eq!(
        error,
        ConfigError::ConflictingLevel {
            name: "AUDIT".to_string(),
            existing: 150,
            requested: 250,
        }
    );
}

#[test]
fn test_severity_parses_registry_names() {
    for severity in Severity::ALL {
        assert_eq!(Severity::from_str(severity.name()).unwrap(), severity);
    }
}
