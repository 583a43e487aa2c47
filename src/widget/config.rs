//! Persisted widget configuration and its update operations.
//!
//! Every operation is pure: updates consume the record and return a new
//! one, queries take the current time as an argument. Persistence and
//! serialization of writes belong to the store.

use chrono::{DateTime, NaiveTime, TimeZone};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::migration::CURRENT_CONFIG_VERSION;
use crate::display::{DisplayBuilder, DisplayOptions, TimetableDisplayEntry};
use crate::error::EngineResult;
use crate::models::{time_format, DayOfWeek, ElectiveChoices, PeriodGrid, Timetable};

/// The user's widget state.
///
/// # JSON
///
/// camelCase keys; `showNextDayAt` is `"HH:MM"`; `lockedUntil` is epoch
/// seconds. Missing keys take their default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WidgetConfig {
    /// Schema version of the stored record.
    pub version: u32,
    /// Day override. `None` follows the clock.
    pub day: Option<DayOfWeek>,
    /// The document comes from a local file rather than the registry.
    pub is_local: bool,
    /// Identifier of the active timetable document.
    pub file: Option<String>,
    pub elective_choices: ElectiveChoices,
    /// Epoch seconds until which the day override survives refresh ticks.
    pub locked_until: Option<i64>,
    pub show_free_periods: bool,
    pub show_completed_periods: bool,
    /// From this time of day on, the widget shows tomorrow.
    #[serde(with = "time_format")]
    pub show_next_day_at: NaiveTime,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            version: CURRENT_CONFIG_VERSION,
            day: None,
            is_local: true,
            file: None,
            elective_choices: ElectiveChoices::new(),
            locked_until: None,
            show_free_periods: true,
            show_completed_periods: true,
            show_next_day_at: default_show_next_day_at(),
        }
    }
}

fn default_show_next_day_at() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 59, 0).unwrap_or(NaiveTime::MIN)
}

impl WidgetConfig {
    /// Serializes the record for the store.
    pub fn to_json(&self) -> EngineResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn with_day(mut self, day: Option<DayOfWeek>) -> Self {
        self.day = day;
        self
    }

    /// Switches to another document together with the choices made for it.
    pub fn with_file(
        mut self,
        file: impl Into<String>,
        is_local: bool,
        choices: ElectiveChoices,
    ) -> Self {
        self.file = Some(file.into());
        self.is_local = is_local;
        self.elective_choices = choices;
        self
    }

    /// Keeps the day override until the next local midnight after `now`.
    pub fn locked_until_midnight<Tz: TimeZone>(mut self, now: &DateTime<Tz>) -> Self {
        let midnight = now
            .date_naive()
            .succ_opt()
            .map(|date| date.and_time(NaiveTime::MIN))
            .and_then(|local| now.timezone().from_local_datetime(&local).earliest());
        let until = match midnight {
            Some(at) => at.timestamp(),
            None => now.timestamp() + 24 * 60 * 60,
        };
        self.locked_until = Some(until);
        self
    }

    pub fn unlocked(mut self) -> Self {
        self.locked_until = None;
        self
    }

    pub fn with_show_free_periods(mut self, show: bool) -> Self {
        self.show_free_periods = show;
        self
    }

    pub fn with_show_completed_periods(mut self, show: bool) -> Self {
        self.show_completed_periods = show;
        self
    }

    pub fn with_show_next_day_at(mut self, at: NaiveTime) -> Self {
        self.show_next_day_at = at;
        self
    }

    /// Whether the lock is still in the future at `now`.
    pub fn is_locked<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> bool {
        self.locked_until
            .is_some_and(|until| until > now.timestamp())
    }

    /// The day the widget shows at `now`.
    ///
    /// The override wins. Otherwise today, until `now` reaches
    /// `show_next_day_at`, then tomorrow.
    pub fn day_to_show<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> DayOfWeek {
        if let Some(day) = self.day {
            return day;
        }
        let today = DayOfWeek::of(now.date_naive());
        if now.time() < self.show_next_day_at {
            today
        } else {
            today.succ()
        }
    }

    /// Whether a scheduled refresh at `now` clears the day override.
    pub fn should_reset_day<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> bool {
        !self.is_locked(now)
    }

    /// Applies a scheduled refresh tick.
    pub fn tick<Tz: TimeZone>(self, now: &DateTime<Tz>) -> Self {
        if self.day.is_some() && self.should_reset_day(now) {
            debug!(target: "timetable::widget", "clearing day override");
            return self.with_day(None);
        }
        self
    }

    /// Reconciles the record with a freshly fetched copy of its document.
    ///
    /// Drops the file selection when the stored choices no longer fit, so
    /// the user is asked to pick again.
    pub fn reconcile(mut self, timetable: &Timetable) -> Self {
        if !choices_compatible(&self.elective_choices, timetable) {
            info!(
                target: "timetable::widget",
                file = ?self.file,
                "stored choices no longer fit the document; clearing selection"
            );
            self.file = None;
        }
        self
    }

    /// Display options for `day`, given the clock at `now`.
    ///
    /// The completed-period filter only applies when `day` is today.
    pub fn display_options<Tz: TimeZone>(
        &self,
        day: DayOfWeek,
        now: &DateTime<Tz>,
        grid: PeriodGrid,
    ) -> DisplayOptions {
        let is_today = DayOfWeek::of(now.date_naive()) == day;
        DisplayOptions {
            show_free_periods: self.show_free_periods,
            show_completed_periods: self.show_completed_periods,
            now: is_today.then(|| now.time()),
            grid,
        }
    }

    /// Builds what the widget shows at `now`.
    pub fn render<Tz: TimeZone>(
        &self,
        timetable: &Timetable,
        now: &DateTime<Tz>,
    ) -> (DayOfWeek, Vec<TimetableDisplayEntry>) {
        let day = self.day_to_show(now);
        let options = self.display_options(day, now, PeriodGrid::default());
        let choices = (!self.elective_choices.is_empty()).then_some(&self.elective_choices);
        let entries = DisplayBuilder::new(timetable)
            .with_options(options)
            .build(day, choices);
        (day, entries)
    }
}

/// Whether stored `choices` still fit `timetable`.
///
/// Incompatible when a choice names an option or value the document no
/// longer has, or when nothing is stored but the document has options.
pub fn choices_compatible(choices: &ElectiveChoices, timetable: &Timetable) -> bool {
    if choices.is_empty() {
        return timetable.config.is_empty();
    }
    choices.iter().all(|(key, value)| {
        timetable
            .config
            .get(key)
            .is_some_and(|option| option.has_value(value))
    })
}
