//! Day display builder.
//!
//! # Algorithm
//!
//! 1. Resolve every schedule entry of the day to a list of subject tokens:
//!    one token for a subject, FREE, or a slot under known choices; the
//!    slot's possible values when no choices are given.
//! 2. Walk the 7 period positions. At a lab start offset (0, 3, 5), a run
//!    of identical lab-only token lists of the right width (3 at 0, 2
//!    elsewhere) merges into one lab block.
//! 3. Map tokens to subjects (unknown references degrade to the unknown
//!    sentinel) and place the block on the clock through the period grid.
//! 4. Drop free blocks and finished blocks if asked to.
//!
//! # Complexity
//! O(7) per day after resolution; resolution is O(entries · choices).

use chrono::NaiveTime;
use once_cell::unsync::OnceCell;
use std::sync::Arc;
use tracing::{debug, warn};

use super::TimetableDisplayEntry;
use crate::analysis::{all_possible_values, possible_values, PossibleValues};
use crate::models::{
    is_lab, lab_width, DayOfWeek, ElectiveChoices, PeriodGrid, Subject, Timetable, FREE,
    PERIODS_PER_DAY,
};

/// Visibility and layout settings for a built day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayOptions {
    /// Keep blocks that resolve to FREE.
    pub show_free_periods: bool,
    /// Keep blocks that have already ended at `now`.
    pub show_completed_periods: bool,
    /// Current time of day. Set only when building "today".
    pub now: Option<NaiveTime>,
    /// Clock times of the periods.
    pub grid: PeriodGrid,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            show_free_periods: true,
            show_completed_periods: true,
            now: None,
            grid: PeriodGrid::default(),
        }
    }
}

/// Builds display entries for one timetable.
///
/// # Example
///
/// ```
/// use timetable_engine::display::DisplayBuilder;
/// use timetable_engine::models::{DayOfWeek, Subject, Timetable};
///
/// let tt = Timetable::new()
///     .with_subject("A", Subject::new("Algorithms", "CS201"))
///     .with_subject("B", Subject::new("Biology", "BI101"))
///     .with_day(DayOfWeek::Monday, ["A_LAB", "A_LAB", "A_LAB", "B", "FREE", "FREE", "FREE"]);
///
/// let entries = DisplayBuilder::new(&tt)
///     .show_free_periods(false)
///     .build(DayOfWeek::Monday, None);
///
/// assert_eq!(entries.len(), 2);
/// assert!(entries[0].lab);
/// assert_eq!(entries[0].end, 2);
/// ```
#[derive(Debug, Clone)]
pub struct DisplayBuilder<'a> {
    timetable: &'a Timetable,
    options: DisplayOptions,
    possible: Option<Arc<PossibleValues>>,
}

impl<'a> DisplayBuilder<'a> {
    pub fn new(timetable: &'a Timetable) -> Self {
        Self {
            timetable,
            options: DisplayOptions::default(),
            possible: None,
        }
    }

    /// Replaces all options.
    pub fn with_options(mut self, options: DisplayOptions) -> Self {
        self.options = options;
        self
    }

    pub fn show_free_periods(mut self, show: bool) -> Self {
        self.options.show_free_periods = show;
        self
    }

    pub fn show_completed_periods(mut self, show: bool) -> Self {
        self.options.show_completed_periods = show;
        self
    }

    /// Sets the current time of day for the completed-period filter.
    pub fn at(mut self, now: NaiveTime) -> Self {
        self.options.now = Some(now);
        self
    }

    pub fn with_grid(mut self, grid: PeriodGrid) -> Self {
        self.options.grid = grid;
        self
    }

    /// Supplies a precomputed possible-values table (e.g. from a cache).
    pub fn with_possible_values(mut self, possible: Arc<PossibleValues>) -> Self {
        self.possible = Some(possible);
        self
    }

    /// Builds the ordered entries of `day`.
    ///
    /// With `choices`, slots resolve to a single value. Without, they show
    /// every value they could take. A day missing from the document yields
    /// no entries.
    pub fn build(&self, day: DayOfWeek, choices: Option<&ElectiveChoices>) -> Vec<TimetableDisplayEntry> {
        let Some(raw) = self.timetable.day(day) else {
            return Vec::new();
        };

        let resolved = self.resolve_day(day, raw, choices);
        let options = &self.options;
        let mut entries = Vec::with_capacity(PERIODS_PER_DAY);

        let mut i = 0;
        while i < PERIODS_PER_DAY {
            let tokens = &resolved[i];
            let lab_block = lab_run_width(&resolved, i)
                .and_then(|width| options.grid.lab_block(i).map(|slot| (width, slot)));
            let (width, slot, lab) = match lab_block {
                Some((width, slot)) => (width, slot, true),
                None => (1, options.grid.periods[i], false),
            };

            let subject = self.subject_for(tokens);
            let hidden_free = !options.show_free_periods && subject.is_free();
            let hidden_done = !options.show_completed_periods
                && options.now.is_some_and(|now| slot.has_ended(now));

            if !hidden_free && !hidden_done {
                entries.push(TimetableDisplayEntry {
                    name: subject.name,
                    short_name: subject.short_name,
                    slot,
                    start: i,
                    end: i + width - 1,
                    lab,
                });
            }

            i += width;
        }

        debug!(target: "timetable::display", %day, entries = entries.len(), "built day display");
        entries
    }

    /// Resolves each period position to its candidate tokens.
    fn resolve_day(
        &self,
        day: DayOfWeek,
        raw: &[String],
        choices: Option<&ElectiveChoices>,
    ) -> Vec<Vec<String>> {
        if raw.len() != PERIODS_PER_DAY {
            warn!(
                target: "timetable::display",
                %day,
                entries = raw.len(),
                "day does not list 7 entries; missing positions show as free"
            );
        }

        let table: OnceCell<Arc<PossibleValues>> = OnceCell::new();
        let possible = || {
            table.get_or_init(|| {
                self.possible
                    .clone()
                    .unwrap_or_else(|| Arc::new(all_possible_values(self.timetable)))
            })
        };

        (0..PERIODS_PER_DAY)
            .map(|i| {
                let Some(entry) = raw.get(i) else {
                    return vec![FREE.to_string()];
                };
                let Some(slot) = self.timetable.slots.get(entry) else {
                    return vec![entry.clone()];
                };
                if let Some(choices) = choices {
                    match slot.resolve(choices) {
                        Ok(value) => return vec![value.to_string()],
                        Err(err) => {
                            warn!(target: "timetable::display", slot = %entry, %err, "showing all possible values");
                        }
                    }
                }
                possible()
                    .get(entry)
                    .cloned()
                    .unwrap_or_else(|| possible_values(self.timetable, entry, slot))
            })
            .collect()
    }

    /// Subject for a token list; several tokens merge into one composite.
    fn subject_for(&self, tokens: &[String]) -> Subject {
        match tokens {
            [single] => self.timetable.subject_for(single),
            _ => {
                let parts: Vec<Subject> = tokens
                    .iter()
                    .map(|t| self.timetable.subject_for(t))
                    .collect();
                let join = |field: fn(&Subject) -> &str| {
                    parts.iter().map(field).collect::<Vec<_>>().join(" / ")
                };
                Subject {
                    name: join(|s| s.name.as_str()),
                    code: join(|s| s.code.as_str()),
                    faculty: Vec::new(),
                    short_name: join(|s| s.short_name.as_str()),
                }
            }
        }
    }
}

/// Width of the lab block starting at `i`, if one does.
///
/// The tokens at `i` must include a non-free value and consist only of lab
/// markers and FREE, and the following positions up to the block width
/// must hold the same tokens.
fn lab_run_width(resolved: &[Vec<String>], i: usize) -> Option<usize> {
    let width = lab_width(i)?;
    let tokens = &resolved[i];
    let lab_only = tokens.iter().any(|t| t != FREE) && tokens.iter().all(|t| is_lab(t) || t == FREE);
    if !lab_only {
        return None;
    }
    let run = resolved.get(i..i + width)?;
    run.iter().all(|other| other == tokens).then_some(width)
}

/// Builds the entries of `day` with default options.
///
/// Shorthand for [`DisplayBuilder`] with only the free-period filter set.
pub fn build_display(
    day: DayOfWeek,
    timetable: &Timetable,
    show_free_periods: bool,
    choices: Option<&ElectiveChoices>,
) -> Vec<TimetableDisplayEntry> {
    DisplayBuilder::new(timetable)
        .show_free_periods(show_free_periods)
        .build(day, choices)
}
