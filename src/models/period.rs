//! The fixed daily period grid.
//!
//! A day is 7 period-units. Labs take 3 units when they start at offset 0
//! and 2 units when they start at offset 3 or 5; each lab start has its
//! own block time, distinct from the sum of the periods it covers (the
//! lab blocks absorb the breaks).
//!
//! # Time Model
//! Times are wall-clock `NaiveTime`s. Intervals are half-open: a period
//! contains its start and excludes its end.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::time_format;

/// Number of period-units in a day.
pub const PERIODS_PER_DAY: usize = 7;

/// Offsets where a lab block may start, with the block width in units.
pub const LAB_STARTS: [(usize, usize); 3] = [(0, 3), (3, 2), (5, 2)];

/// Width of a lab block starting at `offset`, if a lab may start there.
pub fn lab_width(offset: usize) -> Option<usize> {
    LAB_STARTS
        .iter()
        .find(|(start, _)| *start == offset)
        .map(|(_, width)| *width)
}

/// A time interval [start, end) on the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PeriodSlot {
    /// Start of the period (inclusive).
    #[serde(with = "time_format")]
    pub start: NaiveTime,
    /// End of the period (exclusive).
    #[serde(with = "time_format")]
    pub end: NaiveTime,
}

impl PeriodSlot {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// Builds a slot from hour/minute pairs. Out-of-range values collapse
    /// to midnight, so only use it with literals.
    pub fn hm(start: (u32, u32), end: (u32, u32)) -> Self {
        Self::new(hm(start.0, start.1), hm(end.0, end.1))
    }

    /// Whether `time` falls within this period.
    #[inline]
    pub fn contains(&self, time: NaiveTime) -> bool {
        time >= self.start && time < self.end
    }

    /// Whether the period is over at `time`.
    #[inline]
    pub fn has_ended(&self, time: NaiveTime) -> bool {
        time >= self.end
    }

    /// Whether two periods overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl fmt::Display for PeriodSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            self.start.format("%-I:%M"),
            self.end.format("%-I:%M")
        )
    }
}

fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

/// Clock times for the period grid.
///
/// `Default` is the standard campus grid. Embedders with a different bell
/// schedule can deserialize their own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodGrid {
    /// Times of the 7 single periods.
    pub periods: [PeriodSlot; PERIODS_PER_DAY],
    /// Times of the lab blocks starting at offsets 0, 3 and 5.
    pub lab_blocks: [PeriodSlot; 3],
}

impl Default for PeriodGrid {
    fn default() -> Self {
        Self {
            periods: [
                PeriodSlot::hm((8, 10), (9, 0)),
                PeriodSlot::hm((9, 0), (9, 50)),
                PeriodSlot::hm((9, 50), (10, 40)),
                PeriodSlot::hm((11, 0), (11, 50)),
                PeriodSlot::hm((11, 50), (12, 40)),
                PeriodSlot::hm((14, 0), (14, 50)),
                PeriodSlot::hm((14, 50), (15, 40)),
            ],
            lab_blocks: [
                PeriodSlot::hm((8, 10), (10, 25)),
                PeriodSlot::hm((10, 50), (13, 5)),
                PeriodSlot::hm((13, 25), (15, 40)),
            ],
        }
    }
}

impl PeriodGrid {
    /// Time of the single period at `index`.
    pub fn period(&self, index: usize) -> Option<PeriodSlot> {
        self.periods.get(index).copied()
    }

    /// Time of the lab block starting at `offset`.
    pub fn lab_block(&self, offset: usize) -> Option<PeriodSlot> {
        LAB_STARTS
            .iter()
            .position(|(start, _)| *start == offset)
            .and_then(|i| self.lab_blocks.get(i).copied())
    }
}
