//! Timetable document model.
//!
//! A timetable is the whole declarative description of a week: the subject
//! catalog, the elective options, the conditional slots, and the per-day
//! list of schedule entries.
//!
//! # Schedule entries
//!
//! Each entry is one of:
//! - the literal [`FREE`]
//! - a subject id, optionally suffixed with [`LAB_SUFFIX`]
//! - a slot id, resolved through the user's elective choices
//!
//! In the standard form every day lists exactly [`PERIODS_PER_DAY`]
//! entries, one per period-unit; a 3-unit lab appears three times. The
//! older compact form lists a lab once per block; see
//! [`expand_compact_day`].

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{
    is_lab, lab_width, strip_lab, ConfigOption, DayOfWeek, Slot, Subject, FREE, PERIODS_PER_DAY,
};
use crate::error::EngineResult;

/// A weekly timetable document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Timetable {
    /// Subject catalog keyed by subject id.
    pub subjects: IndexMap<String, Subject>,
    /// Elective options keyed by config key.
    #[serde(default)]
    pub config: IndexMap<String, ConfigOption>,
    /// Conditional cells keyed by slot id.
    #[serde(default)]
    pub slots: IndexMap<String, Slot>,
    /// Schedule entries per day.
    pub schedule: BTreeMap<DayOfWeek, Vec<String>>,
}

impl Timetable {
    /// Creates an empty timetable.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a timetable document.
    ///
    /// Unknown top-level keys are ignored. Parsing checks shape only; run
    /// [`validate`](crate::validation::validate) for reference integrity.
    pub fn from_json(raw: &str) -> EngineResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Adds a subject.
    pub fn with_subject(mut self, id: impl Into<String>, subject: Subject) -> Self {
        self.subjects.insert(id.into(), subject);
        self
    }

    /// Adds an elective option.
    pub fn with_option(mut self, key: impl Into<String>, option: ConfigOption) -> Self {
        self.config.insert(key.into(), option);
        self
    }

    /// Adds a slot.
    pub fn with_slot(mut self, id: impl Into<String>, slot: Slot) -> Self {
        self.slots.insert(id.into(), slot);
        self
    }

    /// Sets the entries of one day.
    pub fn with_day<I, S>(mut self, day: DayOfWeek, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.schedule
            .insert(day, entries.into_iter().map(Into::into).collect());
        self
    }

    /// Entries of a day, if the day is scheduled.
    pub fn day(&self, day: DayOfWeek) -> Option<&[String]> {
        self.schedule.get(&day).map(Vec::as_slice)
    }

    /// Whether `reference` names a subject, with or without the lab marker.
    pub fn is_subject_reference(&self, reference: &str) -> bool {
        self.subjects.contains_key(reference) || self.subjects.contains_key(strip_lab(reference))
    }

    /// Looks up the subject for a resolved token.
    ///
    /// [`FREE`] maps to [`Subject::free`]; anything unknown maps to
    /// [`Subject::unknown`].
    pub fn subject_for(&self, token: &str) -> Subject {
        match strip_lab(token) {
            FREE => Subject::free(),
            id => self
                .subjects
                .get(id)
                .cloned()
                .unwrap_or_else(Subject::unknown),
        }
    }

    /// Converts every day from the compact form to the standard form.
    pub fn expand_compact(mut self) -> Self {
        for entries in self.schedule.values_mut() {
            *entries = expand_compact_day(entries);
        }
        self
    }
}

/// Expands a compact day into one entry per period-unit.
///
/// Each lab marker is repeated to the width of a lab block starting at the
/// current offset (3 at offset 0, 2 elsewhere). The output is not padded
/// or truncated to [`PERIODS_PER_DAY`].
pub fn expand_compact_day(entries: &[String]) -> Vec<String> {
    let mut out = Vec::with_capacity(PERIODS_PER_DAY);
    for entry in entries {
        let width = if is_lab(entry) {
            lab_width(out.len()).unwrap_or(2)
        } else {
            1
        };
        out.extend(std::iter::repeat(entry.clone()).take(width));
    }
    out
}
