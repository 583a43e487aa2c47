//! Structural validation for timetable documents.
//!
//! Checks reference integrity before a document is used for display.
//! Every check runs; errors accumulate instead of short-circuiting, so a
//! caller can show the author the full list at once. Detects:
//! - Subject ids that collide with the lab marker
//! - Duplicate value ids within an elective option
//! - Slots matching on unknown options, or with malformed patterns
//! - Slot outcomes and schedule entries that reference nothing
//! - Days that do not cover exactly 7 period-units
//!
//! Resolution and display never require a valid document: they fall back
//! to the unknown-subject sentinel instead of failing.

use std::collections::HashSet;
use std::fmt;
use tracing::debug;

use crate::models::{is_lab, lab_width, Timetable, FREE, LAB_SUFFIX, PERIODS_PER_DAY, WILDCARD};

/// A validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationErrorKind {
    /// A subject id ends with the lab marker.
    ReservedSubjectKey,
    /// Two values of one elective option share an id.
    DuplicateValueId,
    /// A slot matches on an option that doesn't exist.
    UnknownConfigKey,
    /// A choice pattern has a different length than the slot's match list.
    PatternLengthMismatch,
    /// A pattern token is neither a wildcard nor a value of its option.
    InvalidPatternValue,
    /// A slot outcome references an unknown subject.
    InvalidSubjectReference,
    /// A schedule entry is not FREE, a slot, or a subject.
    InvalidScheduleEntry,
    /// A day does not cover exactly 7 period-units.
    InvalidDayLength,
    /// A compact-form lab starts at an offset where labs can't start.
    MisplacedLab,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates a timetable document in the standard form.
///
/// Checks:
/// 1. No subject id ends with the lab marker
/// 2. Value ids are unique within each elective option
/// 3. Every slot match key is a known option
/// 4. Every pattern has one token per match key
/// 5. Every non-wildcard token is a value of its option
/// 6. Every slot outcome is FREE or a subject reference
/// 7. Every schedule entry is FREE, a slot id, or a subject reference
/// 8. Every day lists exactly 7 entries
///
/// # Returns
/// All detected issues; empty when the document is valid.
pub fn validate(timetable: &Timetable) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for key in timetable.subjects.keys() {
        if is_lab(key) {
            errors.push(ValidationError::new(
                ValidationErrorKind::ReservedSubjectKey,
                format!("Subject key \"{key}\" must not end with {LAB_SUFFIX} (reserved for lab entries)"),
            ));
        }
    }

    for (key, option) in &timetable.config {
        let mut seen = HashSet::new();
        if option.values.iter().any(|v| !seen.insert(v.id.as_str())) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateValueId,
                format!("Config \"{key}\" has duplicate value IDs"),
            ));
        }
    }

    for (slot_id, slot) in &timetable.slots {
        for key in &slot.match_keys {
            if !timetable.config.contains_key(key) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownConfigKey,
                    format!("Slot \"{slot_id}\" references non-existent config key \"{key}\""),
                ));
            }
        }

        for choice in &slot.choices {
            if choice.pattern.len() != slot.match_keys.len() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::PatternLengthMismatch,
                    format!(
                        "Slot \"{slot_id}\" pattern length ({}) doesn't match match length ({})",
                        choice.pattern.len(),
                        slot.match_keys.len()
                    ),
                ));
            }

            for (token, key) in choice.pattern.iter().zip(&slot.match_keys) {
                if token == WILDCARD {
                    continue;
                }
                // unknown keys were already reported above
                let Some(option) = timetable.config.get(key) else {
                    continue;
                };
                if !option.has_value(token) {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::InvalidPatternValue,
                        format!(
                            "Slot \"{slot_id}\" pattern value \"{token}\" is not a valid ID for config \"{key}\" (valid: {})",
                            option.value_ids().join(", ")
                        ),
                    ));
                }
            }

            if choice.value != FREE && !timetable.is_subject_reference(&choice.value) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidSubjectReference,
                    format!(
                        "Slot \"{slot_id}\" pattern [{}] references invalid subject \"{}\"",
                        choice.pattern.join(", "),
                        choice.value
                    ),
                ));
            }
        }
    }

    for (day, entries) in &timetable.schedule {
        for entry in entries {
            if entry == FREE
                || timetable.slots.contains_key(entry)
                || timetable.is_subject_reference(entry)
            {
                continue;
            }
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidScheduleEntry,
                format!("{day}: Entry \"{entry}\" is not a valid subject, slot, or FREE"),
            ));
        }

        if entries.len() != PERIODS_PER_DAY {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidDayLength,
                format!(
                    "{day}: schedule has {} entries, expected {PERIODS_PER_DAY}",
                    entries.len()
                ),
            ));
        }
    }

    debug!(target: "timetable::validation", errors = errors.len(), "validated timetable");
    errors
}

/// Validates a timetable whose days are in the compact form.
///
/// In the compact form a lab appears once per block. Checks:
/// 1. Every entry is FREE, a slot id, or a subject reference
/// 2. Labs start only at period offsets 0, 3 or 5
/// 3. Each day covers exactly 7 period-units once labs are expanded
pub fn validate_schedule(timetable: &Timetable) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (day, entries) in &timetable.schedule {
        let mut offset = 0;
        for entry in entries {
            if entry != FREE
                && !timetable.slots.contains_key(entry)
                && !timetable.is_subject_reference(entry)
            {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidScheduleEntry,
                    format!("{day}: Entry \"{entry}\" is not a valid subject, slot, or FREE"),
                ));
            }

            let width = match (is_lab(entry), lab_width(offset)) {
                (false, _) => 1,
                (true, Some(width)) => width,
                (true, None) => {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::MisplacedLab,
                        format!(
                            "{day}: Lab \"{entry}\" starts at period {}; labs can only start at periods 1, 4 or 6",
                            offset + 1
                        ),
                    ));
                    2
                }
            };
            offset += width;
        }

        if offset != PERIODS_PER_DAY {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidDayLength,
                format!("{day}: schedule covers {offset} periods, expected {PERIODS_PER_DAY}"),
            ));
        }
    }

    debug!(target: "timetable::validation", errors = errors.len(), "validated compact schedule");
    errors
}
