//! Versioned migration of persisted widget configuration.
//!
//! # Algorithm
//!
//! The stored record is read as a raw JSON object. Its `version` (missing
//! means 0) selects where to enter [`MIGRATIONS`], an ordered list of pure
//! steps. Each step rewrites the object for the next version; after the
//! last one the record is tagged [`CURRENT_CONFIG_VERSION`] and decoded.
//!
//! Adding a version means appending one step and bumping the constant.
//!
//! Any failure (bad JSON, non-object, bad or future version, a field that
//! still does not decode) is reported as
//! [`EngineError::CorruptConfig`]; nothing partially migrated escapes.

use serde_json::{Map, Value};
use tracing::{info, warn};

use super::WidgetConfig;
use crate::error::{EngineError, EngineResult};

/// Version written by this crate.
pub const CURRENT_CONFIG_VERSION: u32 = 2;

type Record = Map<String, Value>;

/// One upgrade step from `from` to `from + 1`.
struct Migration {
    from: u32,
    description: &'static str,
    apply: fn(&mut Record),
}

/// Upgrade steps, in version order.
const MIGRATIONS: [Migration; CURRENT_CONFIG_VERSION as usize] = [
    Migration {
        from: 0,
        description: "drop day override stored in the legacy format",
        apply: clear_day,
    },
    Migration {
        from: 1,
        description: "reset timetable selection for the new document schema",
        apply: clear_selection,
    },
];

fn clear_day(record: &mut Record) {
    record.remove("day");
}

fn clear_selection(record: &mut Record) {
    for key in ["file", "day", "electiveChoices", "lockedUntil"] {
        record.remove(key);
    }
}

/// Parses a stored record, upgrading it to the current version.
///
/// # Errors
/// [`EngineError::CorruptConfig`] when the record cannot be parsed or its
/// version is not one this crate knows.
pub fn migrate_config(raw: &str) -> EngineResult<WidgetConfig> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|err| EngineError::corrupt_config(format!("invalid JSON: {err}")))?;
    let Value::Object(mut record) = value else {
        return Err(EngineError::corrupt_config("record is not a JSON object"));
    };

    let stored = stored_version(&record)?;
    if stored > CURRENT_CONFIG_VERSION {
        return Err(EngineError::corrupt_config(format!(
            "unknown config version {stored} (newest known is {CURRENT_CONFIG_VERSION})"
        )));
    }

    for step in MIGRATIONS.iter().filter(|step| step.from >= stored) {
        info!(
            target: "timetable::migration",
            from = step.from,
            to = step.from + 1,
            "{}",
            step.description
        );
        (step.apply)(&mut record);
    }
    record.insert("version".into(), Value::from(CURRENT_CONFIG_VERSION));

    serde_json::from_value(Value::Object(record))
        .map_err(|err| EngineError::corrupt_config(format!("invalid field: {err}")))
}

/// Parses a stored record, falling back to defaults when it is corrupt.
pub fn load_or_default(raw: &str) -> WidgetConfig {
    migrate_config(raw).unwrap_or_else(|err| {
        warn!(target: "timetable::migration", %err, "replacing widget configuration with defaults");
        WidgetConfig::default()
    })
}

fn stored_version(record: &Record) -> EngineResult<u32> {
    match record.get("version") {
        None | Some(Value::Null) => Ok(0),
        Some(value) => value
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .ok_or_else(|| EngineError::corrupt_config(format!("invalid version {value}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DayOfWeek;
    use chrono::NaiveTime;

    #[test]
    fn test_steps_cover_every_version() {
        for (i, step) in MIGRATIONS.iter().enumerate() {
            assert_eq!(step.from as usize, i);
        }
    }

    #[test]
    fn test_v0_clears_everything_but_preferences() {
        let raw = r#"{
            "day": 3,
            "isLocal": false,
            "file": "cse-a.json",
            "electiveChoices": {"batch": "B1"},
            "lockedUntil": 1700000000,
            "showFreePeriods": false,
            "showNextDayAt": "18:30"
        }"#;
        let config = migrate_config(raw).unwrap();
        assert_eq!(config.version, CURRENT_CONFIG_VERSION);
        assert_eq!(config.day, None);
        assert_eq!(config.file, None);
        assert!(config.elective_choices.is_empty());
        assert_eq!(config.locked_until, None);
        assert!(!config.is_local);
        assert!(!config.show_free_periods);
        assert_eq!(config.show_next_day_at, NaiveTime::from_hms_opt(18, 30, 0).unwrap());
    }

    #[test]
    fn test_v1_resets_selection() {
        let raw = r#"{
            "version": 1,
            "day": "Monday",
            "file": "cse-a.json",
            "electiveChoices": {"batch": "B1"},
            "showCompletedPeriods": false
        }"#;
        let config = migrate_config(raw).unwrap();
        assert_eq!(config.day, None);
        assert_eq!(config.file, None);
        assert!(config.elective_choices.is_empty());
        assert!(!config.show_completed_periods);
    }

    #[test]
    fn test_current_version_is_untouched() {
        let raw = r#"{
            "version": 2,
            "day": "Wednesday",
            "isLocal": false,
            "file": "cse-a.json",
            "electiveChoices": {"batch": "B1"},
            "lockedUntil": 1700000000
        }"#;
        let config = migrate_config(raw).unwrap();
        assert_eq!(config.day, Some(DayOfWeek::Wednesday));
        assert_eq!(config.file.as_deref(), Some("cse-a.json"));
        assert_eq!(config.elective_choices["batch"], "B1");
        assert_eq!(config.locked_until, Some(1_700_000_000));
    }

    #[test]
    fn test_migration_is_idempotent() {
        let raw = r#"{"version": 1, "file": "x.json", "showFreePeriods": false}"#;
        let first = migrate_config(raw).unwrap();
        let second = migrate_config(&first.to_json().unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_future_version_is_corrupt() {
        let err = migrate_config(r#"{"version": 3}"#).unwrap_err();
        assert!(err.is_corrupt_config());
    }

    #[test]
    fn test_bad_version_is_corrupt() {
        for raw in [r#"{"version": -1}"#, r#"{"version": "2"}"#, r#"{"version": 1.5}"#] {
            assert!(migrate_config(raw).unwrap_err().is_corrupt_config(), "{raw}");
        }
    }

    #[test]
    fn test_malformed_input_is_corrupt() {
        for raw in ["", "not json", "[1, 2]", r#"{"version": 2, "showNextDayAt": "late"}"#] {
            assert!(migrate_config(raw).unwrap_err().is_corrupt_config(), "{raw}");
        }
    }

    #[test]
    fn test_load_or_default() {
        assert_eq!(load_or_default("garbage"), WidgetConfig::default());
        let config = load_or_default(r#"{"version": 2, "showFreePeriods": false}"#);
        assert!(!config.show_free_periods);
    }
}
